//! Tuning constants and start-up configuration.
//!
//! All distances are playfield pixels, all durations are ticks of the
//! 60 Hz frame clock.

use std::path::PathBuf;

// ── Playfield ────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 600.0;
pub const SCREEN_HEIGHT: f32 = 400.0;
pub const FPS: u32 = 60;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: (f32, f32) = (50.0, 50.0);
pub const PLAYER_SPEED: f32 = 5.0;
/// Gap between the player's bottom edge and the bottom of the screen.
pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
/// 60 seconds at 60 FPS.
pub const TRIPLE_SHOT_DURATION: u64 = 3600;
pub const TRIPLE_SHOT_ANGLES: [f32; 3] = [-30.0, 0.0, 30.0];

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: (f32, f32) = (50.0, 50.0);
/// Inclusive range of downward speeds.
pub const ENEMY_SPEED_RANGE: (i32, i32) = (1, 2);
/// Inclusive range of spawn heights, above the visible screen.
pub const SPAWN_Y_RANGE: (i32, i32) = (-100, -40);
pub const INITIAL_ENEMIES: usize = 2;

// ── Boss ─────────────────────────────────────────────────────────────────────

pub const BOSS_SIZE: (f32, f32) = (100.0, 100.0);
pub const BOSS_HEALTH: i32 = 15;
pub const BOSS_PATROL_SPEED: f32 = 3.0;
pub const BOSS_ENTRY_SPEED: f32 = 1.0;
/// The boss stops descending once its top edge reaches this line.
pub const BOSS_ENTRY_LINE: f32 = 50.0;
/// 1200 ms at 60 FPS.
pub const BOSS_SHOOT_DELAY: u64 = 72;
pub const BOSS_VOLLEY_OFFSETS: [f32; 3] = [-30.0, 0.0, 30.0];
/// Kills between boss encounters.
pub const BOSS_SPAWN_INTERVAL: u32 = 15;
/// Basic enemies released when a boss dies.
pub const BOSS_DEATH_SPAWNS: usize = 2;

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const BULLET_SIZE: (f32, f32) = (10.0, 20.0);
pub const BULLET_SPEED: f32 = 10.0;
pub const BOSS_BULLET_SIZE: (f32, f32) = (15.0, 25.0);
pub const BOSS_BULLET_SPEED: f32 = 7.0;

// ── Power-ups ────────────────────────────────────────────────────────────────

pub const POWER_UP_SIZE: (f32, f32) = (30.0, 30.0);
pub const POWER_UP_SPEED: f32 = 2.0;
/// Per-tick spawn probability.
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.0004;

// ── Scoring ──────────────────────────────────────────────────────────────────

pub const ENEMY_POINTS: u32 = 10;
pub const BOSS_POINTS: u32 = 100;

// ── Runtime configuration ────────────────────────────────────────────────────

/// Built once at program start and handed to the session and renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub score_file: PathBuf,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            score_file: PathBuf::from("game_scores.txt"),
            log_file: PathBuf::from("game_log.txt"),
        }
    }
}
