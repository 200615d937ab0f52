/// Rendering layer — all terminal I/O lives here.
///
/// The simulation runs in a 400×600 pixel arena; this module scales those
/// coordinates onto the terminal cell grid each frame.  No game logic is
/// performed here, only translation of state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use arcade_shooter::catalog::Archetype;
use arcade_shooter::enemy::{Enemy, Owner, Projectile};
use arcade_shooter::session::{Session, SpawnMode};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// Terminal colour for an archetype (the catalog's hex hint mapped to the
/// nearest ANSI colour).
pub fn archetype_color(archetype: Archetype) -> Color {
    match archetype {
        Archetype::Standard => Color::Red,
        Archetype::Heavy => Color::Yellow,
        Archetype::Tracker => Color::Magenta,
        Archetype::Tank => Color::Green,
        Archetype::Teleporter => Color::Cyan,
    }
}

fn archetype_glyph(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::Standard => "▼",
        Archetype::Heavy => "▓",
        Archetype::Tracker => "•",
        Archetype::Tank => "█",
        Archetype::Teleporter => "◈",
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps arena pixels to terminal cells.  Row 0 is the HUD, rows 1 and
/// `height-2` are the border, the last row is the controls hint.
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    pub fn new(width: u16, height: u16, arena_width: f32, arena_height: f32) -> Self {
        let cols = width.saturating_sub(2).max(1) as f32;
        let rows = height.saturating_sub(4).max(1) as f32;
        Viewport {
            width,
            height,
            scale_x: cols / arena_width,
            scale_y: rows / arena_height,
        }
    }

    fn cell(&self, x: f32, y: f32) -> (u16, u16) {
        let cx = 1.0 + x * self.scale_x;
        let cy = 2.0 + y * self.scale_y;
        (
            (cx as i32).clamp(1, self.width as i32 - 2) as u16,
            (cy as i32).clamp(2, self.height as i32 - 3) as u16,
        )
    }

    /// Scaled on-screen width in cells, at least one.
    fn cell_width(&self, pixels: f32) -> u16 {
        ((pixels * self.scale_x) as u16).max(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    view: &Viewport,
    high_score: u32,
    now: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, session, view, high_score, now)?;

    for enemy in &session.enemies {
        draw_enemy(out, enemy, view)?;
    }
    for bullet in session.player_bullets.iter().chain(&session.enemy_bullets) {
        draw_bullet(out, bullet, view)?;
    }
    draw_player(out, session, view)?;
    draw_controls_hint(out, view)?;

    if session.game_over {
        draw_game_over(out, session, view, high_score)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    session: &Session,
    view: &Viewport,
    high_score: u32,
    now: u64,
) -> std::io::Result<()> {
    // Score and high score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if high_score > 0 {
        out.queue(Print(format!("Score:{:>6}  Hi:{:>6}", session.score, high_score)))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", session.score)))?;
    }

    // Mode tag — centre
    let mode_str = match session.mode {
        SpawnMode::Normal => "[ ARCADE ]",
        SpawnMode::Test { .. } => "[ TEST ]",
    };
    let mx = (view.width / 2).saturating_sub(mode_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(mx, 0))?;
    out.queue(style::SetForegroundColor(match session.mode {
        SpawnMode::Normal => Color::Green,
        SpawnMode::Test { .. } => Color::Yellow,
    }))?;
    out.queue(Print(mode_str))?;

    // Elapsed time — right (drives the unlock curve, so worth showing)
    let secs = session.elapsed_ms(now) / 1000;
    let time_str = format!("T+{:>3}s", secs);
    let tx = view.width.saturating_sub(time_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, session: &Session, view: &Viewport) -> std::io::Result<()> {
    let (cx, cy) = view.cell(session.player.center_x(), session.player.y);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print("▲"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    // Off-screen spawns (y < 0) stay invisible until they enter the arena.
    if enemy.bounds.y < 0.0 {
        return Ok(());
    }

    let (cx, cy) = view.cell(enemy.bounds.x, enemy.bounds.y);
    let span = view.cell_width(enemy.bounds.width);
    let glyph = archetype_glyph(enemy.archetype);

    out.queue(style::SetForegroundColor(archetype_color(enemy.archetype)))?;
    out.queue(cursor::MoveTo(cx, cy))?;
    out.queue(Print(glyph.repeat(span as usize)))?;

    // Tanks show their remaining hit points mid-sprite.
    if enemy.archetype == Archetype::Tank && span >= 3 {
        out.queue(cursor::MoveTo(cx + span / 2, cy))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("{}", enemy.hit_points)))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Projectile, view: &Viewport) -> std::io::Result<()> {
    if bullet.bounds.y < 0.0 {
        return Ok(());
    }
    let (cx, cy) = view.cell(bullet.bounds.x, bullet.bounds.y);
    out.queue(cursor::MoveTo(cx, cy))?;
    match bullet.owner {
        Owner::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        Owner::Enemy => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ / WASD : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    session: &Session,
    view: &Viewport,
    high_score: u32,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", session.score);
    let best = high_score.max(session.score);
    let is_new_best = session.score >= high_score && session.score > 0;
    let best_line = if is_new_best {
        format!("★ NEW BEST: {:>6} ★", best)
    } else {
        format!("Best Score:  {:>6}", best)
    };

    let box_lines: &[&str] = &[
        "╔════════════════════╗",
        "║    GAME  OVER      ║",
        "╚════════════════════╝",
    ];

    let cx = view.width / 2;
    let total_rows = box_lines.len() + 3;
    let start_row = (view.height / 2).saturating_sub(total_rows as u16 / 2);

    out.queue(style::SetForegroundColor(Color::Red))?;
    for (i, msg) in box_lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + box_lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(best_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(if is_new_best {
        Color::Yellow
    } else {
        Color::DarkGrey
    }))?;
    out.queue(Print(&best_line))?;

    let hint = "R - Play Again  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
