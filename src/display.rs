//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable `FrameView`.
//! No game logic is performed; this module only scales world rectangles
//! into character cells and translates them into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::view::{Banner, FrameView, Sprite, SpriteKind};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_MYSTERY: Color = Color::Red;
const C_OBSTACLE: Color = Color::DarkYellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

const CONTROLS_HINT: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

/// Maps world coordinates onto the cells inside the border.
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    fn new(frame: &FrameView, cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            world_w: frame.width,
            world_h: frame.height,
        }
    }

    // Inner play area: columns 1..cols-1, rows 2..rows-2.
    fn inner_w(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_h(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    fn col(&self, x: f32) -> u16 {
        let c = (x / self.world_w * self.inner_w()).floor().clamp(0.0, self.inner_w() - 1.0);
        1 + c as u16
    }

    fn row(&self, y: f32) -> u16 {
        let r = (y / self.world_h * self.inner_h()).floor().clamp(0.0, self.inner_h() - 1.0);
        2 + r as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &FrameView) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let vp = Viewport::new(frame, cols, rows);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &vp)?;
    draw_hud(out, frame, &vp)?;

    for sprite in &frame.sprites {
        draw_sprite(out, sprite, &vp)?;
    }

    draw_controls_hint(out, &vp)?;

    if let Some(banner) = frame.banner {
        draw_banner(out, banner, frame, &vp)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let w = vp.cols as usize;
    let h = vp.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(vp.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &FrameView, vp: &Viewport) -> std::io::Result<()> {
    let hud = &frame.hud;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Hi:{:>6}",
        hud.score, hud.high_score
    )))?;

    let level_str = format!("[ LEVEL {} ]", hud.level);
    let lx = (vp.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(hud.lives as usize));
    let rx = vp.cols.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn sprite_style(kind: SpriteKind) -> (&'static str, Color) {
    match kind {
        SpriteKind::Player => ("▲", C_PLAYER),
        SpriteKind::Enemy => ("▼", C_ENEMY),
        SpriteKind::Mystery => ("◎", C_MYSTERY),
        SpriteKind::PlayerBullet => ("║", C_BULLET_PLAYER),
        SpriteKind::EnemyBullet => ("↓", C_BULLET_ENEMY),
        // Shade thins out as the obstacle takes hits
        SpriteKind::Obstacle { health } if health >= 3 => ("█", C_OBSTACLE),
        SpriteKind::Obstacle { health: 2 } => ("▓", C_OBSTACLE),
        SpriteKind::Obstacle { .. } => ("░", C_OBSTACLE),
    }
}

/// Fill every cell the sprite's rectangle covers (at least one).
fn draw_sprite<W: Write>(out: &mut W, sprite: &Sprite, vp: &Viewport) -> std::io::Result<()> {
    let (glyph, color) = sprite_style(sprite.kind);
    let rect = &sprite.rect;

    let left = vp.col(rect.left);
    let right = vp.col(rect.right - 0.001).max(left);
    let top = vp.row(rect.top);
    let bottom = vp.row(rect.bottom - 0.001).max(top);

    out.queue(style::SetForegroundColor(color))?;
    let line = glyph.repeat((right - left + 1) as usize);
    for row in top..=bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(CONTROLS_HINT))?;
    Ok(())
}

// ── Banner overlay ────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    banner: Banner,
    frame: &FrameView,
    vp: &Viewport,
) -> std::io::Result<()> {
    let color = match banner {
        Banner::Title => Color::Cyan,
        Banner::GameOver => Color::Red,
        Banner::PlayAgain => Color::Yellow,
    };

    let inner = format!("   {}   ", banner.text().to_uppercase());
    let bar = "═".repeat(inner.chars().count());
    let boxed = [
        format!("╔{}╗", bar),
        format!("║{}║", inner),
        format!("╚{}╝", bar),
    ];

    let mut lines: Vec<(String, Color)> = boxed.into_iter().map(|l| (l, color)).collect();
    if banner != Banner::Title {
        lines.push((format!("Final Score: {:>6}", frame.hud.score), Color::Yellow));
        lines.push((format!("Best Score:  {:>6}", frame.hud.high_score), Color::DarkGrey));
    }
    lines.push((banner.hint().to_string(), Color::White));

    let cx = vp.cols / 2;
    let start_row = (vp.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
