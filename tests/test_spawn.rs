use airforce::compute::init_state;
use airforce::config::*;
use airforce::entities::*;
use airforce::spawn::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn playing_state() -> GameState {
    let mut s = init_state(SCREEN_WIDTH, SCREEN_HEIGHT, &mut StdRng::seed_from_u64(0));
    s.status = GameStatus::Playing;
    s
}

#[test]
fn enemies_spawn_above_screen_within_bounds() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let e = new_enemy(&mut rng, SCREEN_WIDTH);
        assert!(e.body.x >= 0.0 && e.body.right() <= SCREEN_WIDTH);
        assert!((-100.0..=-40.0).contains(&e.body.y));
        assert!(e.speed_y == 1.0 || e.speed_y == 2.0);
    }
}

#[test]
fn power_ups_fall_at_fixed_speed() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..200 {
        let p = new_power_up(&mut rng, SCREEN_WIDTH);
        assert_eq!(p.speed_y, POWER_UP_SPEED);
        assert_eq!(p.effect, PowerUpEffect::TripleShot);
        assert!(p.body.x >= 0.0 && p.body.right() <= SCREEN_WIDTH);
        assert!((-100.0..=-40.0).contains(&p.body.y));
    }
}

#[test]
fn same_seed_same_spawns() {
    let a = new_enemy(&mut StdRng::seed_from_u64(99), SCREEN_WIDTH);
    let b = new_enemy(&mut StdRng::seed_from_u64(99), SCREEN_WIDTH);
    assert_eq!(a, b);
}

#[test]
fn boss_spawns_centred_above_screen_in_entry_phase() {
    let boss = new_boss(&mut StdRng::seed_from_u64(3), SCREEN_WIDTH, 77);
    assert_eq!(boss.body.center_x(), SCREEN_WIDTH / 2.0);
    assert_eq!(boss.body.y, -BOSS_SIZE.1);
    assert_eq!(boss.health, BOSS_HEALTH);
    assert_eq!(boss.phase, BossPhase::Entering);
    assert_eq!(boss.last_shot, 77);
    assert!(boss.direction == 1 || boss.direction == -1);
}

#[test]
fn second_boss_is_rejected() {
    let mut s = playing_state();
    let mut rng = StdRng::seed_from_u64(4);
    assert!(spawn_boss(&mut s, &mut rng));
    s.boss.as_mut().unwrap().health = 5;
    assert!(!spawn_boss(&mut s, &mut rng));
    assert_eq!(s.boss.as_ref().map(|b| b.health), Some(5));
}

#[test]
fn power_up_roll_is_rare_and_uncapped() {
    let mut s = playing_state();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100_000 {
        maybe_spawn_power_up(&mut s, &mut rng);
    }
    // 0.0004 × 100k ≈ 40
    assert!(s.power_ups.len() > 10, "{}", s.power_ups.len());
    assert!(s.power_ups.len() < 100, "{}", s.power_ups.len());
}
