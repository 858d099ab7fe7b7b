use airforce::error::GameError;
use airforce::score::ScoreTable;

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game_scores.txt");

    let mut table = ScoreTable::new();
    table.insert("Alice", 50);
    table.insert("Bob", 10);
    table.save(&path).unwrap();

    assert_eq!(ScoreTable::load(&path), table);
}

#[test]
fn file_format_is_one_record_per_line() {
    let mut table = ScoreTable::new();
    table.insert("Bob", 10);
    table.insert("Alice", 50);
    assert_eq!(table.to_text(), "Alice:50\nBob:10\n");
}

#[test]
fn malformed_lines_are_skipped() {
    let table = ScoreTable::parse("garbage\nAlice:50\nBob:ten\n\nEve:1:2\n  Carol:7  \n");
    assert_eq!(table.entries.len(), 2);
    assert_eq!(table.get("Alice"), 50);
    assert_eq!(table.get("Carol"), 7);
    assert_eq!(table.get("Bob"), 0);
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let table = ScoreTable::load(&dir.path().join("nope.txt"));
    assert!(table.entries.is_empty());
}

#[test]
fn negative_and_oversized_scores_are_skipped() {
    let table = ScoreTable::parse("Alice:-5\nBob:4294967296\nCarol:4294967295\n");
    assert_eq!(table.entries.len(), 1);
    assert_eq!(table.get("Carol"), u32::MAX);
}

#[test]
fn non_utf8_line_skips_only_itself() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    std::fs::write(&path, b"Alice:50\n\xff\xfe:3\nBob:10\n").unwrap();

    let mut table = ScoreTable::load(&path);
    assert_eq!(table.entries.len(), 2);
    assert_eq!(table.get("Alice"), 50);
    assert_eq!(table.get("Bob"), 10);

    // Saving after such a load keeps every readable record
    table.record("Bob", 20);
    table.save(&path).unwrap();
    let reloaded = ScoreTable::load(&path);
    assert_eq!(reloaded.get("Alice"), 50);
    assert_eq!(reloaded.get("Bob"), 20);
}

#[test]
fn unreadable_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    // Reading a directory as a file fails
    let table = ScoreTable::load(dir.path());
    assert!(table.entries.is_empty());
}

#[test]
fn save_failure_is_a_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ScoreTable::new().save(dir.path()).unwrap_err();
    assert!(matches!(err, GameError::Persistence { .. }));
    assert!(err.to_string().starts_with("score store"));
}

#[test]
fn save_overwrites_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.txt");
    std::fs::write(&path, "Old:999\n").unwrap();

    let mut table = ScoreTable::new();
    table.insert("New", 1);
    table.save(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "New:1\n");
}

#[test]
fn record_only_raises() {
    let mut table = ScoreTable::new();
    table.ensure_player("Alice");
    assert_eq!(table.get("Alice"), 0);
    assert!(table.record("Alice", 30));
    assert!(!table.record("Alice", 30));
    assert!(!table.record("Alice", 20));
    assert_eq!(table.get("Alice"), 30);

    table.ensure_player("Alice");
    assert_eq!(table.get("Alice"), 30);
}
