/// Rendering layer: all terminal I/O lives here.
///
/// Each call receives a mutable writer and a finished `Frame`.  No game
/// logic is performed; this module only translates the logical canvas and
/// its text overlays into terminal commands.
///
/// Every character cell shows two vertical sub-pixels: the upper one as the
/// foreground of `▀`, the lower one as the cell background.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use arcade_shooter::entities::Rgba;
use arcade_shooter::render::Frame;

const HALF_BLOCK: &str = "▀";

fn color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `cols`×`rows` terminal.
pub fn render<W: Write>(out: &mut W, frame: &Frame, cols: u16, rows: u16) -> std::io::Result<()> {
    if cols == 0 || rows == 0 {
        return Ok(());
    }

    draw_canvas(out, frame, cols, rows)?;
    draw_texts(out, frame, cols, rows)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Canvas ────────────────────────────────────────────────────────────────────

fn draw_canvas<W: Write>(out: &mut W, frame: &Frame, cols: u16, rows: u16) -> std::io::Result<()> {
    let canvas = &frame.canvas;
    let (w, h) = (canvas.width(), canvas.height());
    let sub_rows = rows as u32 * 2;

    let mut last: Option<(Rgba, Rgba)> = None;
    for row in 0..rows {
        out.queue(cursor::MoveTo(0, row))?;
        let (top0, top1) = span(row as u32 * 2, sub_rows, h);
        let (bot0, bot1) = span(row as u32 * 2 + 1, sub_rows, h);
        for col in 0..cols {
            let (x0, x1) = span(col as u32, cols as u32, w);
            let top = canvas.sample_region(x0, top0, x1, top1);
            let bottom = canvas.sample_region(x0, bot0, x1, bot1);

            // Only emit colour changes
            if last != Some((top, bottom)) {
                out.queue(style::SetForegroundColor(color(top)))?;
                out.queue(style::SetBackgroundColor(color(bottom)))?;
                last = Some((top, bottom));
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }
    Ok(())
}

/// Logical pixel range covered by cell `i` of `n` across `len` pixels.
/// Never empty, even when cells outnumber pixels.
fn span(i: u32, n: u32, len: u32) -> (u32, u32) {
    let start = i * len / n;
    let end = (i + 1) * len / n;
    (start, end.max(start + 1))
}

// ── HUD text ──────────────────────────────────────────────────────────────────

fn draw_texts<W: Write>(out: &mut W, frame: &Frame, cols: u16, rows: u16) -> std::io::Result<()> {
    let (w, h) = (frame.canvas.width(), frame.canvas.height());

    for item in &frame.texts {
        let col = (item.x * cols as u32 / w) as u16;
        let row = (item.y * rows as u32 / h) as u16;
        if col >= cols || row >= rows {
            continue;
        }
        // Cut at the right edge instead of wrapping
        let room = (cols - col) as usize;
        let text: String = item.text.chars().take(room).collect();

        // Keep the canvas colour behind the glyphs
        let behind = frame.canvas.sample_region(item.x, item.y, item.x + 1, item.y + 1);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetBackgroundColor(color(behind)))?;
        out.queue(style::SetForegroundColor(color(item.color)))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

/// Wipe the screen, e.g. after a resize.
pub fn clear<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    Ok(())
}
