use airforce::collision::*;
use airforce::compute::{init_state, new_boss_bullet, new_bullet, sweep_dead};
use airforce::config::*;
use airforce::entities::*;
use airforce::spawn::boss_due;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn make_state() -> GameState {
    let mut s = init_state(SCREEN_WIDTH, SCREEN_HEIGHT, &mut seeded_rng());
    s.enemies.clear();
    s.status = GameStatus::Playing;
    s
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy {
        body: Body::new(x, y, ENEMY_SIZE),
        speed_y: 1.0,
    }
}

/// A player bullet sitting inside the given rectangle's top half.
fn bullet_into(body: &Body) -> Projectile {
    new_bullet(body.center_x(), body.y + 25.0, 0.0)
}

fn boss_at(x: f32, y: f32, health: i32) -> Boss {
    Boss {
        body: Body::new(x, y, BOSS_SIZE),
        health,
        direction: 1,
        phase: BossPhase::Patrolling,
        last_shot: 0,
    }
}

fn resolve(s: &mut GameState) -> CollisionReport {
    let report = resolve_collisions(s, &mut seeded_rng());
    sweep_dead(s);
    report
}

// ── boss bullets ↔ player ─────────────────────────────────────────────────────

#[test]
fn boss_bullet_hit_ends_session_and_skips_other_checks() {
    let mut s = make_state();
    let p = s.player.body.clone();
    s.boss_bullets.push(new_boss_bullet(p.center_x(), p.y + 5.0));

    // This kill would score if the pass continued
    let e = enemy_at(100.0, 100.0);
    s.bullets.push(bullet_into(&e.body));
    s.enemies.push(e);

    let report = resolve(&mut s);
    assert!(report.player_hit);
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(!s.is_active());
    assert!(s.is_over());
    assert_eq!(s.score, 0);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn boss_bullet_miss_is_harmless() {
    let mut s = make_state();
    s.boss_bullets.push(new_boss_bullet(50.0, 100.0));
    let report = resolve(&mut s);
    assert!(!report.player_hit);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.boss_bullets.len(), 1);
}

// ── player bullets ↔ enemies ──────────────────────────────────────────────────

#[test]
fn kill_scores_and_sends_replacement() {
    let mut s = make_state();
    let e = enemy_at(100.0, 100.0);
    s.bullets.push(bullet_into(&e.body));
    s.enemies.push(e);

    let report = resolve(&mut s);
    assert_eq!(report.enemies_killed, 1);
    assert_eq!(s.score, ENEMY_POINTS);
    assert_eq!(s.enemies_defeated, 1);
    assert!(s.bullets.is_empty());
    // The victim is gone and a fresh one waits above the screen
    assert_eq!(s.enemies.len(), 1);
    assert!(s.enemies[0].body.y < 0.0);
}

#[test]
fn one_bullet_kills_at_most_one_enemy() {
    let mut s = make_state();
    let a = enemy_at(100.0, 100.0);
    let b = enemy_at(110.0, 105.0); // overlaps `a`
    s.bullets.push(bullet_into(&a.body));
    s.enemies.push(a);
    s.enemies.push(b);

    let report = resolve(&mut s);
    assert_eq!(report.enemies_killed, 1);
    assert_eq!(s.score, 10);
    // one survivor + one replacement
    assert_eq!(s.enemies.len(), 2);
}

#[test]
fn second_bullet_on_same_enemy_survives() {
    let mut s = make_state();
    let e = enemy_at(100.0, 100.0);
    s.bullets.push(bullet_into(&e.body));
    s.bullets.push(bullet_into(&e.body));
    s.enemies.push(e);

    resolve(&mut s);
    assert_eq!(s.enemies_defeated, 1);
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn fifteenth_kill_summons_boss_instead_of_replacement() {
    let mut s = make_state();
    s.enemies_defeated = BOSS_SPAWN_INTERVAL - 1;
    let e = enemy_at(100.0, 100.0);
    s.bullets.push(bullet_into(&e.body));
    s.enemies.push(e);

    resolve(&mut s);
    assert_eq!(s.enemies_defeated, 15);
    assert!(s.boss_active());
    let boss = s.boss.as_ref().unwrap();
    assert_eq!(boss.health, BOSS_HEALTH);
    assert_eq!(boss.phase, BossPhase::Entering);
    assert_eq!(boss.body.center_x(), SCREEN_WIDTH / 2.0);
    assert!(boss.body.bottom() <= 0.0);
    assert!(s.enemies.is_empty());
}

#[test]
fn no_replacement_during_boss_fight() {
    let mut s = make_state();
    s.boss = Some(boss_at(400.0, 250.0, BOSS_HEALTH));
    let e = enemy_at(10.0, 100.0);
    s.bullets.push(bullet_into(&e.body));
    s.enemies.push(e);

    resolve(&mut s);
    assert_eq!(s.enemies_defeated, 1);
    assert!(s.enemies.is_empty());
}

#[test]
fn boss_due_kill_rejected_while_boss_active() {
    let mut s = make_state();
    s.enemies_defeated = 29;
    s.boss = Some(boss_at(400.0, 250.0, 3));
    let e = enemy_at(10.0, 100.0);
    s.bullets.push(bullet_into(&e.body));
    s.enemies.push(e);

    resolve(&mut s);
    assert_eq!(s.enemies_defeated, 30);
    // The original boss is untouched, no second one appeared
    assert_eq!(s.boss.as_ref().map(|b| b.health), Some(3));
}

// ── player bullets ↔ boss ─────────────────────────────────────────────────────

#[test]
fn boss_hit_costs_one_health() {
    let mut s = make_state();
    let boss = boss_at(250.0, 50.0, BOSS_HEALTH);
    s.bullets.push(bullet_into(&boss.body));
    s.boss = Some(boss);

    let report = resolve(&mut s);
    assert_eq!(report.boss_hits, 1);
    assert!(!report.boss_killed);
    assert_eq!(s.boss.as_ref().map(|b| b.health), Some(BOSS_HEALTH - 1));
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 0);
}

#[test]
fn boss_death_scores_and_releases_two_enemies() {
    let mut s = make_state();
    s.enemies_defeated = 15;
    s.score = 150;
    let boss = boss_at(250.0, 50.0, 1);
    s.bullets.push(bullet_into(&boss.body));
    s.bullets.push(bullet_into(&boss.body));
    s.boss = Some(boss);

    let report = resolve(&mut s);
    assert!(report.boss_killed);
    assert_eq!(report.boss_hits, 1);
    assert!(!s.boss_active());
    assert_eq!(s.score, 250);
    assert_eq!(s.enemies.len(), BOSS_DEATH_SPAWNS);
    assert_eq!(s.enemies_defeated, 15); // boss kills don't count
    // The second bullet was not spent on a dead boss
    assert_eq!(s.bullets.len(), 1);
}

// ── player ↔ power-ups ────────────────────────────────────────────────────────

#[test]
fn power_up_pickup_grants_triple_shot() {
    let mut s = make_state();
    s.frame = 42;
    let p = &s.player.body;
    s.power_ups.push(PowerUp {
        body: Body::new(p.x + 10.0, p.y + 10.0, POWER_UP_SIZE),
        speed_y: POWER_UP_SPEED,
        effect: PowerUpEffect::TripleShot,
    });

    let report = resolve(&mut s);
    assert_eq!(report.power_ups_collected, 1);
    assert!(s.power_ups.is_empty());
    assert!(s.player.triple_shot);
    assert_eq!(s.player.triple_shot_expiry, 42 + TRIPLE_SHOT_DURATION);
}

#[test]
fn distant_power_up_is_left_alone() {
    let mut s = make_state();
    s.power_ups.push(PowerUp {
        body: Body::new(10.0, 10.0, POWER_UP_SIZE),
        speed_y: POWER_UP_SPEED,
        effect: PowerUpEffect::TripleShot,
    });
    resolve(&mut s);
    assert_eq!(s.power_ups.len(), 1);
    assert!(!s.player.triple_shot);
}

// ── enemy breach ──────────────────────────────────────────────────────────────

#[test]
fn enemy_past_bottom_ends_session() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, SCREEN_HEIGHT + 1.0));
    let report = resolve(&mut s);
    assert!(report.enemy_breached);
    assert_eq!(s.status, GameStatus::GameOver);
}

#[test]
fn enemy_touching_bottom_is_not_a_breach() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, SCREEN_HEIGHT));
    let report = resolve(&mut s);
    assert!(!report.enemy_breached);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── boss trigger rule ─────────────────────────────────────────────────────────

#[test]
fn boss_due_on_positive_multiples_only() {
    for n in 0..200 {
        assert_eq!(boss_due(n), n > 0 && n % 15 == 0, "n={n}");
    }
}
