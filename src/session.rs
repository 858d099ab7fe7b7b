//! A game session: state, RNG, score table and player name behind a single
//! `tick` entry point.
//!
//! `Game::tick` is the one place per-frame failures are caught.  A tick that
//! fails is logged and dropped; the session carries on from the last good
//! state on the next frame.

use std::path::PathBuf;

use rand::Rng;
use tracing::{error, info, warn};

use crate::compute::{self, init_state};
use crate::config::GameConfig;
use crate::entities::{GameState, InputState, SessionSnapshot};
use crate::score::ScoreTable;

pub struct Game<R: Rng> {
    state: GameState,
    rng: R,
    scores: ScoreTable,
    /// `None` keeps scores in memory only.
    score_path: Option<PathBuf>,
    player_name: String,
    running: bool,
}

impl<R: Rng> Game<R> {
    pub fn new(config: &GameConfig, player_name: &str, mut scores: ScoreTable, mut rng: R) -> Self {
        scores.ensure_player(player_name);
        Self {
            state: init_state(config.width, config.height, &mut rng),
            rng,
            scores,
            score_path: Some(config.score_file.clone()),
            player_name: player_name.to_string(),
            running: true,
        }
    }

    /// Keep the score table in memory; nothing is written to disk.
    pub fn without_persistence(self) -> Self {
        Self {
            score_path: None,
            ..self
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one frame and describe the result for the renderer.
    pub fn tick(&mut self, input: &InputState) -> SessionSnapshot {
        if input.quit_pressed {
            self.running = false;
            return self.snapshot();
        }

        match compute::tick(&self.state, input, &mut self.rng) {
            Ok(next) => self.state = next,
            Err(e) => error!("{e}"),
        }

        if self.scores.record(&self.player_name, self.state.score) {
            info!(
                player = %self.player_name,
                score = self.state.score,
                "new high score"
            );
            self.save_scores();
        }

        self.snapshot()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let s = &self.state;
        SessionSnapshot {
            status: s.status,
            running: self.running,
            frame: s.frame,
            score: s.score,
            high_score: self.scores.get(&self.player_name),
            player_name: self.player_name.clone(),
            enemies_defeated: s.enemies_defeated,
            triple_shot: s.player.triple_shot,
            boss_health: s.boss.as_ref().map(|b| b.health),
            width: s.width,
            height: s.height,
            player: s.player.body.rect(),
            enemies: s.enemies.iter().map(|e| e.body.rect()).collect(),
            boss: s.boss.as_ref().map(|b| b.body.rect()),
            bullets: s.bullets.iter().map(|b| b.body.rect()).collect(),
            boss_bullets: s.boss_bullets.iter().map(|b| b.body.rect()).collect(),
            power_ups: s.power_ups.iter().map(|p| p.body.rect()).collect(),
        }
    }

    /// Final save before the program exits.
    pub fn shutdown(&mut self) {
        self.running = false;
        self.save_scores();
    }

    fn save_scores(&self) {
        let Some(path) = &self.score_path else {
            return;
        };
        if let Err(e) = self.scores.save(path) {
            warn!("{e}; keeping scores in memory");
        }
    }
}
