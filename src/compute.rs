//! Game-logic functions.
//!
//! Entity updates take the current value and return the next one.  `tick`
//! clones the whole `GameState`, advances the clone, and hands it back only
//! if it passes validation, so a failed frame never leaves a half-updated
//! state behind.  Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::info;

use crate::collision::resolve_collisions;
use crate::config::{
    BOSS_BULLET_SIZE, BOSS_BULLET_SPEED, BOSS_ENTRY_LINE, BOSS_ENTRY_SPEED, BOSS_PATROL_SPEED,
    BOSS_SHOOT_DELAY, BOSS_VOLLEY_OFFSETS, BULLET_SIZE, BULLET_SPEED, INITIAL_ENEMIES,
    PLAYER_SPEED, TRIPLE_SHOT_ANGLES, TRIPLE_SHOT_DURATION,
};
use crate::entities::{
    Body, Boss, BossPhase, Enemy, GameState, GameStatus, InputState, Player, PowerUp,
    PowerUpEffect, Projectile, ProjectileOwner,
};
use crate::error::GameError;
use crate::spawn::{maybe_spawn_power_up, new_enemy, new_player};

// ── Constructors ─────────────────────────────────────────────────────────────

/// The start-screen state: a player and the initial enemies, nothing moving.
pub fn init_state(width: f32, height: f32, rng: &mut impl Rng) -> GameState {
    GameState {
        player: new_player(width, height),
        enemies: (0..INITIAL_ENEMIES).map(|_| new_enemy(rng, width)).collect(),
        boss: None,
        bullets: Vec::new(),
        boss_bullets: Vec::new(),
        power_ups: Vec::new(),
        score: 0,
        enemies_defeated: 0,
        status: GameStatus::Ready,
        frame: 0,
        width,
        height,
    }
}

/// Start a new round: everything cleared, a fresh player, two enemies.
/// The frame clock keeps running.
pub fn reset(state: &GameState, rng: &mut impl Rng) -> GameState {
    info!(frame = state.frame, previous_score = state.score, "session reset");
    GameState {
        status: GameStatus::Playing,
        frame: state.frame,
        ..init_state(state.width, state.height, rng)
    }
}

/// A player bullet leaving `(center_x, bottom)` at `angle_deg` from vertical.
/// 0° fires straight up; positive angles lean left.
pub fn new_bullet(center_x: f32, bottom: f32, angle_deg: f32) -> Projectile {
    let (w, h) = BULLET_SIZE;
    let angle = angle_deg.to_radians();
    Projectile {
        body: Body::centered(center_x, bottom - h, (w, h)),
        vx: -angle.sin() * BULLET_SPEED,
        vy: -angle.cos() * BULLET_SPEED,
        owner: ProjectileOwner::Player,
    }
}

pub fn new_boss_bullet(center_x: f32, top: f32) -> Projectile {
    Projectile {
        body: Body::centered(center_x, top, BOSS_BULLET_SIZE),
        vx: 0.0,
        vy: BOSS_BULLET_SPEED,
        owner: ProjectileOwner::Boss,
    }
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Fire from the player's nose: one straight bullet, or a 3-way spread while
/// triple shot is active.
pub fn player_shoot(state: &GameState) -> GameState {
    let p = &state.player.body;
    let (cx, top) = (p.center_x().floor(), p.y.floor());
    let mut bullets = state.bullets.clone();
    if state.player.triple_shot {
        bullets.extend(TRIPLE_SHOT_ANGLES.iter().map(|&a| new_bullet(cx, top, a)));
    } else {
        bullets.push(new_bullet(cx, top, 0.0));
    }
    GameState {
        bullets,
        ..state.clone()
    }
}

/// Grant a power-up's effect.  Picking up triple shot while it is already
/// active only pushes the expiry back.
pub fn apply_power_up(player: &Player, effect: PowerUpEffect, frame: u64) -> Player {
    match effect {
        PowerUpEffect::TripleShot => Player {
            triple_shot: true,
            triple_shot_expiry: frame + TRIPLE_SHOT_DURATION,
            ..player.clone()
        },
    }
}

// ── Per-entity kinematics ────────────────────────────────────────────────────

/// Move horizontally per the held keys (right wins over left), clamp inside
/// the screen, and expire triple shot.
pub fn update_player(player: &Player, input: &InputState, width: f32, frame: u64) -> Player {
    let mut speed_x = 0.0;
    if input.left_held {
        speed_x = -PLAYER_SPEED;
    }
    if input.right_held {
        speed_x = PLAYER_SPEED;
    }

    let max_x = (width - player.body.w).max(0.0);
    let x = (player.body.x + speed_x).clamp(0.0, max_x);

    let triple_shot = player.triple_shot && frame <= player.triple_shot_expiry;

    Player {
        body: Body { x, ..player.body.clone() },
        speed_x,
        triple_shot,
        ..player.clone()
    }
}

/// Advance a projectile and mark it dead once it leaves the playfield.
///
/// Player bullets exit through the top or either side; boss bullets only
/// fall out of the bottom.
pub fn update_projectile(projectile: &Projectile, width: f32, height: f32) -> Projectile {
    let body = Body {
        x: projectile.body.x + projectile.vx,
        y: projectile.body.y + projectile.vy,
        ..projectile.body.clone()
    };
    let r = body.rect();
    let gone = match projectile.owner {
        ProjectileOwner::Player => r.bottom() < 0 || r.left() < 0 || r.right() as f32 > width,
        ProjectileOwner::Boss => r.top() as f32 > height,
    };
    Projectile {
        body: Body {
            alive: body.alive && !gone,
            ..body
        },
        ..projectile.clone()
    }
}

/// Enemies only fall.  Leaving the screen is handled as a loss, not a despawn.
pub fn update_enemy(enemy: &Enemy) -> Enemy {
    Enemy {
        body: Body {
            y: enemy.body.y + enemy.speed_y,
            ..enemy.body.clone()
        },
        ..enemy.clone()
    }
}

pub fn update_power_up(power_up: &PowerUp, height: f32) -> PowerUp {
    let y = power_up.body.y + power_up.speed_y;
    let gone = y.floor() > height;
    PowerUp {
        body: Body {
            y,
            alive: power_up.body.alive && !gone,
            ..power_up.body.clone()
        },
        ..power_up.clone()
    }
}

/// Entering: descend until the top edge reaches the entry line.
/// Patrolling: sweep sideways, reversing once an edge leaves the screen.
pub fn update_boss(boss: &Boss, width: f32) -> Boss {
    match boss.phase {
        BossPhase::Entering => {
            let y = boss.body.y + BOSS_ENTRY_SPEED;
            let phase = if y >= BOSS_ENTRY_LINE {
                BossPhase::Patrolling
            } else {
                BossPhase::Entering
            };
            Boss {
                body: Body { y, ..boss.body.clone() },
                phase,
                ..boss.clone()
            }
        }
        BossPhase::Patrolling => {
            let x = boss.body.x + BOSS_PATROL_SPEED * boss.direction as f32;
            let direction = if x + boss.body.w > width || x < 0.0 {
                -boss.direction
            } else {
                boss.direction
            };
            Boss {
                body: Body { x, ..boss.body.clone() },
                direction,
                ..boss.clone()
            }
        }
    }
}

/// Fire a 3-bullet volley once the shoot delay has elapsed.  The boss never
/// fires while entering.
pub fn boss_volley(state: &GameState) -> GameState {
    let Some(boss) = &state.boss else {
        return state.clone();
    };
    if boss.phase != BossPhase::Patrolling
        || state.frame.saturating_sub(boss.last_shot) <= BOSS_SHOOT_DELAY
    {
        return state.clone();
    }

    let cx = boss.body.center_x();
    let bottom = boss.body.bottom();
    let mut boss_bullets = state.boss_bullets.clone();
    boss_bullets.extend(
        BOSS_VOLLEY_OFFSETS
            .iter()
            .map(|&dx| new_boss_bullet(cx + dx, bottom)),
    );

    GameState {
        boss: Some(Boss {
            last_shot: state.frame,
            ..boss.clone()
        }),
        boss_bullets,
        ..state.clone()
    }
}

// ── Housekeeping ─────────────────────────────────────────────────────────────

/// Drop every entity whose `alive` flag was cleared this tick.
pub fn sweep_dead(state: &mut GameState) {
    state.bullets.retain(|b| b.body.alive);
    state.boss_bullets.retain(|b| b.body.alive);
    state.enemies.retain(|e| e.body.alive);
    state.power_ups.retain(|p| p.body.alive);
    if state.boss.as_ref().is_some_and(|b| !b.body.alive) {
        state.boss = None;
    }
}

/// Reject a frame that produced a non-finite position anywhere.
pub fn validate(state: &GameState) -> Result<(), GameError> {
    let bodies = std::iter::once(&state.player.body)
        .chain(state.enemies.iter().map(|e| &e.body))
        .chain(state.boss.iter().map(|b| &b.body))
        .chain(state.bullets.iter().map(|b| &b.body))
        .chain(state.boss_bullets.iter().map(|b| &b.body))
        .chain(state.power_ups.iter().map(|p| &p.body));

    for body in bodies {
        if !body.is_finite() {
            return Err(GameError::Tick {
                frame: state.frame,
                reason: format!("non-finite position ({}, {})", body.x, body.y),
            });
        }
    }
    Ok(())
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Order: input actions → power-up roll → kinematics → boss volley →
/// collisions.  The update phase only runs while playing; on the start and
/// game-over screens a shot or restart starts a new round instead.
pub fn tick(
    state: &GameState,
    input: &InputState,
    rng: &mut impl Rng,
) -> Result<GameState, GameError> {
    let mut next = GameState {
        frame: state.frame + 1,
        ..state.clone()
    };

    if next.is_active() {
        if input.shoot_pressed {
            next = player_shoot(&next);
        }
    } else if input.shoot_pressed || input.restart_pressed {
        next = reset(&next, rng);
    }

    if next.is_active() {
        next = update(next, input, rng);
    }

    validate(&next)?;
    Ok(next)
}

fn update(mut state: GameState, input: &InputState, rng: &mut impl Rng) -> GameState {
    maybe_spawn_power_up(&mut state, rng);

    let (w, h, frame) = (state.width, state.height, state.frame);
    state.player = update_player(&state.player, input, w, frame);
    state.bullets = state.bullets.iter().map(|b| update_projectile(b, w, h)).collect();
    state.boss_bullets = state
        .boss_bullets
        .iter()
        .map(|b| update_projectile(b, w, h))
        .collect();
    state.enemies = state.enemies.iter().map(update_enemy).collect();
    state.power_ups = state.power_ups.iter().map(|p| update_power_up(p, h)).collect();
    state.boss = state.boss.as_ref().map(|b| update_boss(b, w));
    sweep_dead(&mut state);

    let mut state = boss_volley(&state);
    let defeated_before = state.enemies_defeated;
    resolve_collisions(&mut state, rng);
    sweep_dead(&mut state);
    debug_assert!(state.enemies_defeated >= defeated_before);

    if state.is_over() {
        info!(
            frame = state.frame,
            score = state.score,
            enemies_defeated = state.enemies_defeated,
            "game over"
        );
    }
    state
}
