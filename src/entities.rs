//! All game entity types. Pure data, no game rules.

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Whole-pixel rectangle used for hit-testing and drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Axis-aligned overlap; rectangles that only share an edge do not touch.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Shared shape of every movable actor.
///
/// Position is kept in real-valued coordinates so diagonal bullets can
/// accumulate sub-pixel motion; `rect()` snaps it to whole pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, (w, h): (f32, f32)) -> Self {
        Self { x, y, w, h, alive: true }
    }

    /// Build a body whose horizontal centre sits on `center_x`; odd widths
    /// put the extra pixel on the right.
    pub fn centered(center_x: f32, y: f32, (w, h): (f32, f32)) -> Self {
        Self::new(center_x - (w / 2.0).floor(), y, (w, h))
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            w: self.w as i32,
            h: self.h as i32,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.rect().overlaps(&other.rect())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ── Actors ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub speed_x: f32,
    pub triple_shot: bool,
    /// Last frame on which the triple-shot buff is still active.
    pub triple_shot_expiry: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub speed_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    /// Descending into view; never shoots.
    Entering,
    /// Sweeping side to side and firing volleys.
    Patrolling,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub body: Body,
    pub health: i32,
    /// +1 moves right, -1 moves left.
    pub direction: i32,
    pub phase: BossPhase,
    /// Frame of the last volley (or of the spawn, before the first one).
    pub last_shot: u64,
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Boss,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub vx: f32,
    pub vy: f32,
    pub owner: ProjectileOwner,
}

// ── Power-ups ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpEffect {
    /// 3-way spread fire at -30°, 0° and +30° for `TRIPLE_SHOT_DURATION` ticks.
    TripleShot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub body: Body,
    pub speed_y: f32,
    pub effect: PowerUpEffect,
}

// ── Master game state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Start screen; nothing moves until the first reset.
    Ready,
    Playing,
    GameOver,
}

/// The entire game state.  Cloneable so update functions can build the
/// next frame without touching the current one.
///
/// Each entity kind has its own collection, so collision passes pick the
/// groups they need directly.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// At most one boss; `boss_active()` is derived from it.
    pub boss: Option<Boss>,
    pub bullets: Vec<Projectile>,
    pub boss_bullets: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    pub enemies_defeated: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn boss_active(&self) -> bool {
        self.boss.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

// ── Frame boundary ───────────────────────────────────────────────────────────

/// Input sampled once per tick by the frontend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left_held: bool,
    pub right_held: bool,
    pub shoot_pressed: bool,
    pub quit_pressed: bool,
    pub restart_pressed: bool,
}

/// Read-only view of a session handed to the renderer after every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub status: GameStatus,
    /// False once quit was requested.
    pub running: bool,
    pub frame: u64,
    pub score: u32,
    pub high_score: u32,
    pub player_name: String,
    pub enemies_defeated: u32,
    pub triple_shot: bool,
    pub boss_health: Option<i32>,
    pub width: f32,
    pub height: f32,
    pub player: Rect,
    pub enemies: Vec<Rect>,
    pub boss: Option<Rect>,
    pub bullets: Vec<Rect>,
    pub boss_bullets: Vec<Rect>,
    pub power_ups: Vec<Rect>,
}
