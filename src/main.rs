mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::thread_rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use airforce::config::{GameConfig, FPS};
use airforce::entities::InputState;
use airforce::error::GameError;
use airforce::prompt::prompt_name;
use airforce::score::ScoreTable;
use airforce::session::Game;

use display::RenderContext;

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

/// A direction key counts as "held" if its last press/repeat event arrived
/// within this many frames.  Covers terminals that don't emit key-release
/// events: OS key-repeat is ≥ 15 Hz, so 6 frames (100 ms) is refreshed
/// before it expires.
const HOLD_WINDOW: u64 = 6;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Tracks held keys across frames and folds each frame's events into an
/// `InputState`.
#[derive(Default)]
struct InputSampler {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl InputSampler {
    fn sample(&mut self, rx: &mpsc::Receiver<Event>) -> InputState {
        self.frame += 1;
        let mut input = InputState::default();

        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                // Press: record key + one-shot actions
                KeyEventKind::Press => {
                    self.key_frame.insert(code, self.frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            input.quit_pressed = true;
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            input.quit_pressed = true;
                        }
                        KeyCode::Char(' ') => input.shoot_pressed = true,
                        KeyCode::Char('r') | KeyCode::Char('R') => input.restart_pressed = true,
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                }
                // Release: drop key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }

        let left = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
        let right = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
        input.left_held = any_held(&self.key_frame, &left, self.frame);
        input.right_held = any_held(&self.key_frame, &right, self.frame);
        input
    }
}

// ── Game loop ────────────────────────────────────────────────────────────────

fn game_loop<R: rand::Rng>(
    ctx: &mut RenderContext,
    game: &mut Game<R>,
    rx: &mpsc::Receiver<Event>,
) {
    let mut sampler = InputSampler::default();

    loop {
        let frame_start = Instant::now();

        let input = sampler.sample(rx);
        let snapshot = game.tick(&input);
        if !snapshot.running {
            break;
        }

        // A failed draw loses one frame, never the session.
        if let Err(e) = ctx.render(&snapshot) {
            error!("render failed on frame {}: {}", snapshot.frame, e);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn init_logging(config: &GameConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("failed creating log file {}", config.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let config = GameConfig::default();
    init_logging(&config)?;

    let stdin = io::stdin();
    let name = match prompt_name(&mut stdin.lock(), &mut io::stdout()) {
        Ok(Some(name)) => name,
        Ok(None) => return Ok(()),
        Err(e @ GameError::InvalidInput(_)) => {
            info!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let scores = ScoreTable::load(&config.score_file);
    let mut game = Game::new(&config, &name, scores, thread_rng());
    info!(player = %name, "session started");

    let mut ctx = RenderContext::init()
        .map_err(|e| GameError::Init(e.to_string()))
        .context("terminal setup failed")?;
    info!(keyboard_enhanced = ctx.keyboard_enhanced(), "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    game_loop(&mut ctx, &mut game, &rx);

    ctx.teardown();
    game.shutdown();
    info!("shutdown complete");
    Ok(())
}
