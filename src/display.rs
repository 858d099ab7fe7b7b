//! Rendering layer. All terminal I/O lives here.
//!
//! `RenderContext` owns the terminal for the lifetime of the program:
//! `init` switches to raw mode and the alternate screen, `teardown` (or
//! dropping the context) restores it.  Drawing only reads a
//! `SessionSnapshot`; no game logic happens here.

use std::io::{stdout, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use airforce::entities::{GameStatus, Rect, SessionSnapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_HIGH: Color = Color::Yellow;
const C_HUD_PLAYER: Color = Color::Green;
const C_HUD_BOSS: Color = Color::Red;
const C_PLAYER: Color = Color::Magenta;
const C_ENEMY: Color = Color::Grey;
const C_BOSS: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_BOSS: Color = Color::Red;
const C_POWER_UP: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Terminal lifecycle ────────────────────────────────────────────────────────

pub struct RenderContext {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
    active: bool,
}

impl RenderContext {
    pub fn init() -> std::io::Result<Self> {
        let mut out = BufWriter::new(stdout());

        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Ask for key-release events.  Terminals without the kitty protocol
        // refuse, and held keys fall back to a repeat window instead.
        let keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

        Ok(Self {
            out,
            keyboard_enhanced,
            active: true,
        })
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Restore the terminal.  Safe to call more than once.
    pub fn teardown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    /// Render one complete frame.
    pub fn render(&mut self, snap: &SessionSnapshot) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        render(&mut self.out, snap, Viewport::new(snap, cols, rows))
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ── Playfield → terminal cells ───────────────────────────────────────────────

/// Maps playfield pixels into the bordered area of the terminal.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    /// Rows 0 and `rows-1` hold the HUD and hint; rows 1 and `rows-2` the
    /// border.  The playfield fills what is left.
    fn new(snap: &SessionSnapshot, cols: u16, rows: u16) -> Self {
        let inner_w = cols.saturating_sub(2).max(1) as f32;
        let inner_h = rows.saturating_sub(4).max(1) as f32;
        Self {
            cols,
            rows,
            sx: inner_w / snap.width,
            sy: inner_h / snap.height,
        }
    }

    /// Visible cells covered by `r`, or `None` if it is entirely off-field.
    fn cells(&self, r: &Rect) -> Option<(u16, u16, u16, u16)> {
        let min_c = 1.0;
        let max_c = self.cols.saturating_sub(2) as f32;
        let min_r = 2.0;
        let max_r = self.rows.saturating_sub(3) as f32;

        let c0 = (1.0 + r.left() as f32 * self.sx).floor().max(min_c);
        let c1 = (1.0 + r.right() as f32 * self.sx).ceil().min(max_c + 1.0);
        let r0 = (2.0 + r.top() as f32 * self.sy).floor().max(min_r);
        let r1 = (2.0 + r.bottom() as f32 * self.sy).ceil().min(max_r + 1.0);

        if c1 <= c0 || r1 <= r0 {
            return None;
        }
        Some((c0 as u16, r0 as u16, (c1 - c0) as u16, (r1 - r0) as u16))
    }
}

fn render<W: Write>(out: &mut W, snap: &SessionSnapshot, vp: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, vp)?;

    match snap.status {
        GameStatus::Ready => draw_start_screen(out, snap, vp)?,
        GameStatus::GameOver => draw_game_over(out, snap, vp)?,
        GameStatus::Playing => {
            draw_hud(out, snap, vp)?;
            for enemy in &snap.enemies {
                fill(out, vp, enemy, C_ENEMY, '▓')?;
            }
            for power_up in &snap.power_ups {
                fill(out, vp, power_up, C_POWER_UP, '★')?;
            }
            if let Some(boss) = &snap.boss {
                fill(out, vp, boss, C_BOSS, '█')?;
            }
            for bullet in &snap.bullets {
                fill(out, vp, bullet, C_BULLET_PLAYER, '║')?;
            }
            for bullet in &snap.boss_bullets {
                fill(out, vp, bullet, C_BULLET_BOSS, '↓')?;
            }
            fill(out, vp, &snap.player, C_PLAYER, '▲')?;
        }
    }

    draw_controls_hint(out, vp)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &SessionSnapshot, vp: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}  ", snap.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!("Hi:{:>6}  ", snap.high_score)))?;
    out.queue(style::SetForegroundColor(C_HUD_PLAYER))?;
    out.queue(Print(format!("Player: {}", snap.player_name)))?;

    // Boss HP and triple-shot indicator, right side
    let mut right = String::new();
    if snap.triple_shot {
        right.push_str("[★ TRIPLE] ");
    }
    if let Some(hp) = snap.boss_health {
        right.push_str(&format!("Boss HP: {hp}"));
    }
    if right.is_empty() {
        return Ok(());
    }

    let rx = vp.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    let color = if snap.boss_health.is_some() {
        C_HUD_BOSS
    } else {
        C_POWER_UP
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(right))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    vp: Viewport,
    rect: &Rect,
    color: Color,
    glyph: char,
) -> std::io::Result<()> {
    let Some((col, row, w, h)) = vp.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let line: String = std::iter::repeat(glyph).take(w as usize).collect();
    for dy in 0..h {
        out.queue(cursor::MoveTo(col, row + dy))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Start and game-over screens ───────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    vp: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_start_screen<W: Write>(
    out: &mut W,
    snap: &SessionSnapshot,
    vp: Viewport,
) -> std::io::Result<()> {
    let cy = vp.rows / 2;
    draw_centered(out, vp, cy.saturating_sub(3), "★  AIRFORCE  ★", Color::Cyan)?;
    draw_centered(out, vp, cy.saturating_sub(1), "Good luck", Color::White)?;
    let welcome = format!("Welcome, {}!", snap.player_name);
    draw_centered(out, vp, cy, &welcome, Color::Green)?;
    if snap.high_score > 0 {
        let best = format!("High Score: {}", snap.high_score);
        draw_centered(out, vp, cy + 1, &best, Color::Yellow)?;
    }
    draw_centered(out, vp, cy + 3, "Press SPACE to Start", Color::White)?;
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    snap: &SessionSnapshot,
    vp: Viewport,
) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];
    let start_row = (vp.rows / 2).saturating_sub(4);
    for (i, (msg, color)) in lines.iter().enumerate() {
        draw_centered(out, vp, start_row + i as u16, msg, *color)?;
    }

    let row = start_row + lines.len() as u16;
    let player_line = format!("Player: {}", snap.player_name);
    draw_centered(out, vp, row, &player_line, Color::Green)?;

    let score_line = format!("Score: {:>6}", snap.score);
    draw_centered(out, vp, row + 1, &score_line, Color::White)?;

    let new_best = snap.score > 0 && snap.score >= snap.high_score;
    let (best_line, best_color) = if new_best {
        (format!("★ NEW BEST: {:>6} ★", snap.high_score), Color::Yellow)
    } else {
        (format!("High Score: {:>6}", snap.high_score), Color::DarkGrey)
    };
    draw_centered(out, vp, row + 2, &best_line, best_color)?;

    draw_centered(out, vp, row + 4, "SPACE / R - Play Again  Q - Quit", Color::White)?;
    Ok(())
}
