//! Draw layer. Turns a `GameState` into pixels and text.
//!
//! The game draws into an offscreen RGBA `Canvas` at logical resolution and
//! lists its HUD strings as `TextItem`s; the host decides how to put both on
//! screen.  Nothing here mutates game state.

use crate::compute::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::entities::{GameState, Rgba};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const BACKGROUND: Rgba = Rgba::rgb(0x10, 0x18, 0x30);
pub const PLAYER_COLOR: Rgba = Rgba::rgb(0x6f, 0xd1, 0xff);
pub const ENEMY_COLOR: Rgba = Rgba::rgb(0xff, 0x6f, 0x6f);
pub const BULLET_COLOR: Rgba = Rgba::rgb(0xff, 0xff, 0x6f);
pub const TEXT_COLOR: Rgba = Rgba::WHITE;

// ── Sprite sizes ──────────────────────────────────────────────────────────────

const PLAYER_SPRITE: (f32, f32) = (32.0, 16.0);
const ENEMY_SPRITE: (f32, f32) = (28.0, 16.0);
const BULLET_SPRITE: (f32, f32) = (6.0, 10.0);
const PARTICLE_SIZE: f32 = 3.0;
const STAR_SIZE: f32 = 2.0;

pub const STAR_COUNT: usize = 30;

pub const INSTRUCTIONS: &str = "Arrows/WASD to move - Space to shoot - Q to quit";

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Row-major RGBA8 image.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Canvas {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        };
        canvas.fill(Rgba::BLACK);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Overwrite every pixel (no blending).
    pub fn fill(&mut self, color: Rgba) {
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel[0] = color.r;
            pixel[1] = color.g;
            pixel[2] = color.b;
            pixel[3] = color.a;
        }
    }

    /// Blend a `w`×`h` rectangle with its top-left at (`x`, `y`).
    /// The origin is floored to whole pixels; anything off-canvas is clipped.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        if color.a == 0 {
            return;
        }
        let x0 = (x.floor() as i64).max(0);
        let y0 = (y.floor() as i64).max(0);
        let x1 = (x.floor() as i64 + w as i64).min(self.width as i64);
        let y1 = (y.floor() as i64 + h as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for py in y0..y1 {
            let row = (py as usize) * self.width as usize;
            for px in x0..x1 {
                let i = (row + px as usize) * 4;
                blend(&mut self.pixels[i..i + 4], color);
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.pixels[i..i + 4];
        Some(Rgba {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        })
    }

    /// Brightest pixel in `[x0, x1) × [y0, y1)`, clipped to the canvas.
    ///
    /// Used to shrink the canvas onto a coarse grid without losing small
    /// bright sprites (bullets, particles, stars) the way averaging would.
    pub fn sample_region(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Rgba {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let mut best: Option<Rgba> = None;
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(p) = self.pixel(x, y) {
                    if best.map_or(true, |b| p.luma() > b.luma()) {
                        best = Some(p);
                    }
                }
            }
        }
        best.unwrap_or(Rgba::BLACK)
    }
}

/// Source-over blend of `src` onto an opaque destination pixel.
fn blend(dst: &mut [u8], src: Rgba) {
    if src.a == 0xff {
        dst.copy_from_slice(&[src.r, src.g, src.b, 0xff]);
        return;
    }
    let a = src.a as u32;
    let mix = |d: u8, s: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
    dst[0] = mix(dst[0], src.r);
    dst[1] = mix(dst[1], src.g);
    dst[2] = mix(dst[2], src.b);
    dst[3] = 0xff;
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// A string for the host's monospace font, top-left anchored in logical px.
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    pub x: u32,
    pub y: u32,
    pub text: String,
    pub color: Rgba,
}

/// Everything one `draw` produces.  Reused across frames to avoid
/// reallocating the canvas.
#[derive(Clone, Debug)]
pub struct Frame {
    pub canvas: Canvas,
    pub texts: Vec<TextItem>,
}

impl Frame {
    pub fn new() -> Self {
        Frame {
            canvas: Canvas::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            texts: Vec::new(),
        }
    }

    fn text(&mut self, x: u32, y: u32, text: String) {
        self.texts.push(TextItem {
            x,
            y,
            text,
            color: TEXT_COLOR,
        });
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DrawOptions {
    /// Tint the background from `GameState::bg_hue` instead of the fixed
    /// `BACKGROUND` colour.
    pub cycle_background: bool,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn draw(state: &GameState, options: &DrawOptions, frame: &mut Frame) {
    frame.texts.clear();

    let bg = if options.cycle_background {
        hue_background(state.bg_hue)
    } else {
        BACKGROUND
    };
    frame.canvas.fill(bg);

    draw_stars(&mut frame.canvas, state.frame);

    let p = &state.player;
    centered(&mut frame.canvas, p.x, p.y, PLAYER_SPRITE, PLAYER_COLOR);
    for e in &state.enemies {
        centered(&mut frame.canvas, e.x, e.y, ENEMY_SPRITE, ENEMY_COLOR);
    }
    for b in &state.bullets {
        centered(&mut frame.canvas, b.x, b.y, BULLET_SPRITE, BULLET_COLOR);
    }
    for part in &state.particles {
        frame
            .canvas
            .fill_rect(part.x, part.y, PARTICLE_SIZE, PARTICLE_SIZE, part.color);
    }

    // HUD
    frame.text(8, 4, format!("Score: {}", state.score));
    frame.text(SCREEN_WIDTH - 120, 4, format!("Frames: {}", state.frame));
    frame.text(8, SCREEN_HEIGHT - 18, INSTRUCTIONS.to_string());
}

fn centered(canvas: &mut Canvas, x: f32, y: f32, (w, h): (f32, f32), color: Rgba) {
    canvas.fill_rect(x - w / 2.0, y - h / 2.0, w, h, color);
}

// ── Stars ─────────────────────────────────────────────────────────────────────

/// Position and colour of star `i` at `frame`.  Stars carry no state; they
/// slide right by 7 px a frame and wrap.
pub fn star(i: usize, frame: u64) -> (u32, u32, Rgba) {
    let i = i as u64;
    let x = (frame.wrapping_mul(7).wrapping_add(i * 13) % SCREEN_WIDTH as u64) as u32;
    let y = ((i * 37) % SCREEN_HEIGHT as u64) as u32;
    let alpha = 50 + (i % 3) as u8 * 40;
    (x, y, Rgba::WHITE.with_alpha(alpha))
}

fn draw_stars(canvas: &mut Canvas, frame: u64) {
    for i in 0..STAR_COUNT {
        let (x, y, color) = star(i, frame);
        canvas.fill_rect(x as f32, y as f32, STAR_SIZE, STAR_SIZE, color);
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// Dark, desaturated colour for a hue in degrees.
pub fn hue_background(hue: f32) -> Rgba {
    const SATURATION: f32 = 0.5;
    const VALUE: f32 = 0.19;

    let h = hue.rem_euclid(360.0) / 60.0;
    let c = VALUE * SATURATION;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = VALUE - c;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba::rgb(to_u8(r), to_u8(g), to_u8(b))
}
