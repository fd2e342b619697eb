//! Rendering layer: all terminal I/O lives here.
//!
//! The 640×360 px viewport is drawn onto an 80×22 cell canvas (one cell is
//! 8×16 px), framed by a HUD row above and a hint row below. No game logic
//! is performed; this module only translates world state into terminal
//! commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use tile_platformer::config::MAX_HEALTH;
use tile_platformer::entities::{BulletOrigin, Direction};
use tile_platformer::geometry::Rect;
use tile_platformer::map::{Tile, Viewport};
use tile_platformer::world::{Status, World};

const CELL_W: f32 = 8.0;
const CELL_H: f32 = 16.0;
const VIEW_COLS: u16 = 80;
const VIEW_ROWS: u16 = 22;
/// First terminal row of the play area (row 0 is the HUD).
const PLAY_TOP: u16 = 1;
const HEALTH_BAR_CELLS: u32 = 20;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_SOLID: Color = Color::DarkGrey;
const C_PLATFORM: Color = Color::Grey;
const C_LADDER: Color = Color::DarkYellow;
const C_EXIT: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_COIN: Color = Color::Yellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

/// One glyph per explosion filmstrip frame.
const EXPLOSION_GLYPHS: [char; 4] = ['*', '✶', '+', '·'];

// ── Canvas ────────────────────────────────────────────────────────────────────

struct Canvas {
    cells: Vec<(char, Color)>,
    view: Viewport,
}

impl Canvas {
    fn new(view: Viewport) -> Canvas {
        Canvas {
            cells: vec![(' ', Color::Reset); VIEW_COLS as usize * VIEW_ROWS as usize],
            view,
        }
    }

    fn put(&mut self, col: i32, row: i32, glyph: char, color: Color) {
        if col < 0 || row < 0 || col >= VIEW_COLS as i32 || row >= VIEW_ROWS as i32 {
            return;
        }
        self.cells[row as usize * VIEW_COLS as usize + col as usize] = (glyph, color);
    }

    /// Covers every cell a world-space rectangle touches.
    fn fill(&mut self, rect: &Rect, glyph: char, color: Color) {
        let col0 = ((rect.left() - self.view.x) / CELL_W).floor() as i32;
        let col1 = ((rect.right() - self.view.x) / CELL_W).ceil() as i32;
        let row0 = ((rect.top() - self.view.y) / CELL_H).floor() as i32;
        let row1 = ((rect.bottom() - self.view.y) / CELL_H).ceil() as i32;
        for row in row0..row1.max(row0 + 1) {
            for col in col0..col1.max(col0 + 1) {
                self.put(col, row, glyph, color);
            }
        }
    }

    fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for (row, line) in self.cells.chunks(VIEW_COLS as usize).enumerate() {
            out.queue(cursor::MoveTo(0, PLAY_TOP + row as u16))?;
            for &(glyph, color) in line {
                if current != Some(color) {
                    out.queue(style::SetForegroundColor(color))?;
                    current = Some(color);
                }
                out.queue(Print(glyph))?;
            }
        }
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, world)?;

    let mut canvas = Canvas::new(world.viewport);
    draw_tiles(&mut canvas, world);
    draw_actors(&mut canvas, world);
    canvas.flush(out)?;

    draw_controls_hint(out)?;

    match world.status {
        Status::Running => {}
        Status::GameOver => draw_end_screen(out, world, "GAME  OVER", Color::Red)?,
        Status::Victory => draw_end_screen(out, world, " YOU  WIN ", Color::Green)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, PLAY_TOP + VIEW_ROWS + 1))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", world.score)))?;

    let health = world.display_health();
    let filled = (health * HEALTH_BAR_CELLS).div_ceil(MAX_HEALTH as u32) as usize;
    let bar = format!(
        "Health [{}{}] {:>3}",
        "█".repeat(filled),
        "░".repeat(HEALTH_BAR_CELLS as usize - filled),
        health
    );
    out.queue(cursor::MoveTo(18, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(bar))?;

    let lives_str = format!("Lives:{}", "♥".repeat(world.lives as usize));
    let rx = VIEW_COLS.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Map & actors ──────────────────────────────────────────────────────────────

fn draw_tiles(canvas: &mut Canvas, world: &World) {
    let view = world.viewport;
    for row in 0..VIEW_ROWS {
        for col in 0..VIEW_COLS {
            // Sample the middle of the cell.
            let px = view.x + (col as f32 + 0.5) * CELL_W;
            let py = view.y + (row as f32 + 0.5) * CELL_H;
            let (glyph, color) = match world.map.tile_at(px, py) {
                Tile::Empty => continue,
                Tile::Solid => ('█', C_SOLID),
                Tile::Platform => ('▀', C_PLATFORM),
                Tile::Ladder => ('H', C_LADDER),
                Tile::Exit => ('▒', C_EXIT),
            };
            canvas.put(col as i32, row as i32, glyph, color);
        }
    }
}

fn draw_actors(canvas: &mut Canvas, world: &World) {
    for coin in &world.collectables {
        canvas.fill(&coin.rect, '¤', C_COIN);
    }
    for enemy in &world.enemies {
        let glyph = match enemy.direction {
            Direction::Left => '◄',
            Direction::Right => '►',
        };
        canvas.fill(&enemy.rect, glyph, C_ENEMY);
    }
    for bullet in &world.bullets {
        let color = match bullet.origin {
            BulletOrigin::Player => C_BULLET_PLAYER,
            BulletOrigin::Enemy => C_BULLET_ENEMY,
        };
        canvas.fill(&bullet.rect, '-', color);
    }
    for explosion in &world.explosions {
        let glyph = EXPLOSION_GLYPHS[explosion.frame % EXPLOSION_GLYPHS.len()];
        canvas.fill(&explosion.rect, glyph, C_EXPLOSION);
    }

    let player = &world.player;
    let glyph = match (player.on_ladder, player.direction) {
        (true, _) => '#',
        (false, Direction::Left) => '<',
        (false, Direction::Right) => '>',
    };
    canvas.fill(&player.rect, glyph, C_PLAYER);
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, PLAY_TOP + VIEW_ROWS))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   ↑ ↓ : Climb   SPACE : Jump   X : Shoot   Q : Quit",
    ))?;
    Ok(())
}

// ── End-of-level overlay ──────────────────────────────────────────────────────

fn draw_end_screen<W: Write>(
    out: &mut W,
    world: &World,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let title_line = format!("║    {}      ║", title);
    let score_line = format!("Final Score: {:>6}", world.score);

    let lines: [(&str, Color); 5] = [
        ("╔════════════════════╗", color),
        (&title_line, color),
        ("╚════════════════════╝", color),
        (&score_line, Color::Yellow),
        ("press any key", Color::White),
    ];

    let cx = VIEW_COLS / 2;
    let start_row = PLAY_TOP + (VIEW_ROWS / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
