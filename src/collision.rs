//! Pairwise hit resolution, run once per tick after all entities moved.
//!
//! Passes run in a fixed order and each one skips anything an earlier pass
//! already consumed, so a bullet is spent at most once per tick.  A lethal
//! hit on the player ends the pass early.

use rand::Rng;
use tracing::{debug, info};

use crate::compute::apply_power_up;
use crate::config::{BOSS_DEATH_SPAWNS, BOSS_POINTS, ENEMY_POINTS};
use crate::entities::{GameState, GameStatus};
use crate::spawn::{boss_due, spawn_boss, spawn_enemy};

/// What happened during one resolution pass.  Mostly useful to tests and logs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub player_hit: bool,
    pub enemies_killed: u32,
    pub boss_hits: u32,
    pub boss_killed: bool,
    pub power_ups_collected: u32,
    pub enemy_breached: bool,
}

pub fn resolve_collisions(state: &mut GameState, rng: &mut impl Rng) -> CollisionReport {
    let mut report = CollisionReport::default();

    if player_vs_boss_bullets(state) {
        report.player_hit = true;
        end_session(state);
        return report;
    }

    report.enemies_killed = bullets_vs_enemies(state, rng);
    let (hits, killed) = bullets_vs_boss(state, rng);
    report.boss_hits = hits;
    report.boss_killed = killed;
    report.power_ups_collected = player_vs_power_ups(state);

    if enemy_breached(state) {
        report.enemy_breached = true;
        end_session(state);
    }
    report
}

fn end_session(state: &mut GameState) {
    state.status = GameStatus::GameOver;
}

// ── 1. Boss bullets ↔ player ─────────────────────────────────────────────────

fn player_vs_boss_bullets(state: &mut GameState) -> bool {
    let player = &state.player.body;
    let mut hit = false;
    for bullet in state.boss_bullets.iter_mut().filter(|b| b.body.alive) {
        if bullet.body.overlaps(player) {
            bullet.body.alive = false;
            hit = true;
        }
    }
    hit
}

// ── 2. Player bullets ↔ enemies ──────────────────────────────────────────────

/// Each bullet kills at most one enemy.  Every kill scores, counts toward
/// the next boss, and either summons that boss or (outside a boss fight)
/// sends in a replacement enemy.
fn bullets_vs_enemies(state: &mut GameState, rng: &mut impl Rng) -> u32 {
    let mut kills = 0;
    for bullet in state.bullets.iter_mut().filter(|b| b.body.alive) {
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.body.alive && e.body.overlaps(&bullet.body))
        else {
            continue;
        };
        bullet.body.alive = false;
        enemy.body.alive = false;
        kills += 1;
    }

    // Spawns wait until the pass is over so a new enemy can't be hit by a
    // bullet from the same tick.
    for _ in 0..kills {
        state.score += ENEMY_POINTS;
        state.enemies_defeated += 1;
        if boss_due(state.enemies_defeated) {
            spawn_boss(state, rng);
        } else if !state.boss_active() {
            spawn_enemy(state, rng);
        }
    }
    kills
}

// ── 3. Player bullets ↔ boss ─────────────────────────────────────────────────

/// Every overlapping bullet is spent and costs the boss one hit point.  Once
/// the boss is down, remaining bullets fly on.
fn bullets_vs_boss(state: &mut GameState, rng: &mut impl Rng) -> (u32, bool) {
    let Some(boss) = state.boss.as_mut() else {
        return (0, false);
    };

    let mut hits = 0;
    for bullet in state.bullets.iter_mut().filter(|b| b.body.alive) {
        if !bullet.body.overlaps(&boss.body) {
            continue;
        }
        bullet.body.alive = false;
        boss.health -= 1;
        hits += 1;
        if boss.health <= 0 {
            break;
        }
    }

    if boss.health > 0 {
        return (hits, false);
    }

    state.boss = None;
    state.score += BOSS_POINTS;
    for _ in 0..BOSS_DEATH_SPAWNS {
        spawn_enemy(state, rng);
    }
    info!(frame = state.frame, score = state.score, "boss defeated");
    (hits, true)
}

// ── 4. Player ↔ power-ups ────────────────────────────────────────────────────

fn player_vs_power_ups(state: &mut GameState) -> u32 {
    let mut collected = 0;
    for power_up in state.power_ups.iter_mut().filter(|p| p.body.alive) {
        if !power_up.body.overlaps(&state.player.body) {
            continue;
        }
        power_up.body.alive = false;
        state.player = apply_power_up(&state.player, power_up.effect, state.frame);
        debug!(frame = state.frame, effect = ?power_up.effect, "power-up collected");
        collected += 1;
    }
    collected
}

// ── 5. Enemy breach ──────────────────────────────────────────────────────────

/// An enemy whose top edge has dropped past the bottom of the screen.
fn enemy_breached(state: &GameState) -> bool {
    state
        .enemies
        .iter()
        .any(|e| e.body.alive && e.body.rect().top() as f32 > state.height)
}
