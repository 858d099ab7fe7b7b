//! Entity constructors and spawn rules.
//!
//! Every random choice goes through the injected `rng`, so a seeded RNG
//! reproduces the same spawns.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{
    BOSS_HEALTH, BOSS_SIZE, BOSS_SPAWN_INTERVAL, ENEMY_SIZE, ENEMY_SPEED_RANGE,
    PLAYER_BOTTOM_MARGIN, PLAYER_SIZE, POWER_UP_SIZE, POWER_UP_SPAWN_CHANCE, POWER_UP_SPEED,
    SPAWN_Y_RANGE,
};
use crate::entities::{
    Body, Boss, BossPhase, Enemy, GameState, Player, PowerUp, PowerUpEffect,
};

/// A fresh player, centred at the bottom of the playfield.
pub fn new_player(width: f32, height: f32) -> Player {
    let (w, h) = PLAYER_SIZE;
    Player {
        body: Body::centered(width / 2.0, height - PLAYER_BOTTOM_MARGIN - h, (w, h)),
        speed_x: 0.0,
        triple_shot: false,
        triple_shot_expiry: 0,
    }
}

/// Random position above the screen, fully inside the horizontal bounds.
fn random_drop_body(rng: &mut impl Rng, width: f32, size: (f32, f32)) -> Body {
    let max_x = (width - size.0).max(0.0) as i32;
    let x = rng.gen_range(0..=max_x) as f32;
    let y = rng.gen_range(SPAWN_Y_RANGE.0..=SPAWN_Y_RANGE.1) as f32;
    Body::new(x, y, size)
}

pub fn new_enemy(rng: &mut impl Rng, width: f32) -> Enemy {
    let body = random_drop_body(rng, width, ENEMY_SIZE);
    let speed_y = rng.gen_range(ENEMY_SPEED_RANGE.0..=ENEMY_SPEED_RANGE.1) as f32;
    Enemy { body, speed_y }
}

pub fn new_power_up(rng: &mut impl Rng, width: f32) -> PowerUp {
    PowerUp {
        body: random_drop_body(rng, width, POWER_UP_SIZE),
        speed_y: POWER_UP_SPEED,
        effect: PowerUpEffect::TripleShot,
    }
}

/// A boss centred horizontally, just above the screen, in its entry phase.
pub fn new_boss(rng: &mut impl Rng, width: f32, frame: u64) -> Boss {
    let (w, h) = BOSS_SIZE;
    Boss {
        body: Body::centered(width / 2.0, -h, (w, h)),
        health: BOSS_HEALTH,
        direction: if rng.gen_bool(0.5) { 1 } else { -1 },
        phase: BossPhase::Entering,
        last_shot: frame,
    }
}

// ── Spawn rules ──────────────────────────────────────────────────────────────

/// A boss is due exactly when the kill count is a positive multiple of
/// `BOSS_SPAWN_INTERVAL`.
pub fn boss_due(enemies_defeated: u32) -> bool {
    enemies_defeated > 0 && enemies_defeated % BOSS_SPAWN_INTERVAL == 0
}

pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) {
    let enemy = new_enemy(rng, state.width);
    state.enemies.push(enemy);
}

/// Place a boss unless one is already in play.  Returns whether it spawned.
pub fn spawn_boss(state: &mut GameState, rng: &mut impl Rng) -> bool {
    if state.boss_active() {
        debug!(frame = state.frame, "boss spawn rejected, boss already active");
        return false;
    }
    state.boss = Some(new_boss(rng, state.width, state.frame));
    info!(
        frame = state.frame,
        enemies_defeated = state.enemies_defeated,
        "boss spawned"
    );
    true
}

/// Roll the per-tick power-up chance.  Power-ups are uncapped.
pub fn maybe_spawn_power_up(state: &mut GameState, rng: &mut impl Rng) {
    if rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
        let power_up = new_power_up(rng, state.width);
        debug!(x = power_up.body.x, y = power_up.body.y, "power-up spawned");
        state.power_ups.push(power_up);
    }
}
