//! Per-player high scores persisted as a plain text table.
//!
//! One record per line, `name:score`.  Lines that don't parse are skipped.
//! The whole file is rewritten on every save.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::GameError;

/// Player name → best score.  Ordered so saves are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTable {
    pub entries: BTreeMap<String, u32>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> u32 {
        self.entries.get(name).copied().unwrap_or(0)
    }

    pub fn insert(&mut self, name: impl Into<String>, score: u32) {
        self.entries.insert(name.into(), score);
    }

    /// Make sure `name` has a record, starting at 0.
    pub fn ensure_player(&mut self, name: &str) {
        self.entries.entry(name.to_string()).or_insert(0);
    }

    /// Raise `name`'s record to `score` if it beats it.  Returns true when
    /// the table changed.
    pub fn record(&mut self, name: &str, score: u32) -> bool {
        if score <= self.get(name) {
            return false;
        }
        self.insert(name, score);
        true
    }

    /// Parse the on-disk format.  Never fails; bad lines are dropped.
    /// Scores must fit a `u32`, so negative or oversized values count as bad.
    pub fn parse(contents: &str) -> Self {
        Self::parse_bytes(contents.as_bytes())
    }

    /// Like `parse`, but a line that isn't valid UTF-8 is skipped on its own
    /// instead of spoiling the whole file.
    pub fn parse_bytes(contents: &[u8]) -> Self {
        let entries = contents
            .split(|&b| b == b'\n')
            .filter_map(|line| {
                let line = std::str::from_utf8(line).ok()?.trim();
                let mut parts = line.split(':');
                let (name, score) = (parts.next()?, parts.next()?);
                if parts.next().is_some() {
                    return None;
                }
                let score = score.trim().parse().ok()?;
                Some((name.to_string(), score))
            })
            .collect();
        Self { entries }
    }

    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|(name, score)| format!("{name}:{score}\n"))
            .collect()
    }

    /// Load the table from disk.  A missing file is a fresh start; an
    /// unreadable one is logged and treated the same way.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No score file found at {:?}, starting fresh", path);
            return Self::default();
        }

        match fs::read(path) {
            Ok(contents) => {
                let table = Self::parse_bytes(&contents);
                info!("Loaded {} score records from {:?}", table.entries.len(), path);
                table
            }
            Err(e) => {
                warn!("Failed to read score file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Overwrite the score file with the full table.
    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        fs::write(path, self.to_text()).map_err(|e| GameError::Persistence {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
