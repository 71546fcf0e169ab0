use arcade_shooter::compute::{init_state, SCREEN_HEIGHT, SCREEN_WIDTH};
use arcade_shooter::entities::*;
use arcade_shooter::render::*;

fn drawn(state: &GameState, options: DrawOptions) -> Frame {
    let mut frame = Frame::new();
    draw(state, &options, &mut frame);
    frame
}

// ── canvas ────────────────────────────────────────────────────────────────────

#[test]
fn frame_canvas_has_logical_size() {
    let frame = Frame::new();
    assert_eq!(frame.canvas.width(), SCREEN_WIDTH);
    assert_eq!(frame.canvas.height(), SCREEN_HEIGHT);
    assert_eq!(frame.canvas.pixel(SCREEN_WIDTH, 0), None);
}

#[test]
fn sample_region_picks_brightest() {
    let mut c = Canvas::new(8, 8);
    c.fill(BACKGROUND);
    c.fill_rect(5.0, 5.0, 1.0, 1.0, BULLET_COLOR);
    assert_eq!(c.sample_region(0, 0, 8, 8), BULLET_COLOR);
    assert_eq!(c.sample_region(0, 0, 4, 4), BACKGROUND);
    // Clipped to the canvas
    assert_eq!(c.sample_region(4, 4, 100, 100), BULLET_COLOR);
}

// ── draw ──────────────────────────────────────────────────────────────────────

#[test]
fn background_is_static_by_default() {
    let mut s = init_state();
    let a = drawn(&s, DrawOptions::default());
    s.bg_hue = 10.0;
    let b = drawn(&s, DrawOptions::default());
    // Frame 0 stars all sit at x < 400, away from this pixel
    assert_eq!(a.canvas.pixel(700, 200), Some(BACKGROUND));
    assert_eq!(b.canvas.pixel(700, 200), Some(BACKGROUND));
}

#[test]
fn cycling_background_follows_hue() {
    let mut s = init_state();
    s.bg_hue = 10.0;
    let frame = drawn(&s, DrawOptions { cycle_background: true });
    assert_eq!(frame.canvas.pixel(700, 200), Some(hue_background(10.0)));
}

#[test]
fn sprites_are_centred_on_entities() {
    let mut s = init_state();
    s.enemies.push(Enemy { x: 600.0, y: 300.0, vx: 0.0, vy: 0.0 });
    s.bullets.push(Bullet { x: 500.0, y: 400.0, vy: -8.0 });
    let frame = drawn(&s, DrawOptions::default());
    let c = &frame.canvas;

    assert_eq!(c.pixel(400, 536), Some(PLAYER_COLOR));
    assert_eq!(c.pixel(384, 528), Some(PLAYER_COLOR)); // top-left corner
    assert_eq!(c.pixel(416, 536), Some(BACKGROUND)); // just past the right edge

    assert_eq!(c.pixel(600, 300), Some(ENEMY_COLOR));
    assert_eq!(c.pixel(586, 292), Some(ENEMY_COLOR));
    assert_eq!(c.pixel(614, 300), Some(BACKGROUND));

    assert_eq!(c.pixel(500, 400), Some(BULLET_COLOR));
    assert_eq!(c.pixel(497, 395), Some(BULLET_COLOR));
    assert_eq!(c.pixel(503, 400), Some(BACKGROUND));
}

#[test]
fn particles_are_drawn_from_their_corner() {
    let mut s = init_state();
    let color = Rgba::rgb(0xff, 0xc0, 0x40);
    s.particles.push(Particle { x: 650.0, y: 100.0, vx: 0.0, vy: 0.0, life: 10, color });
    let frame = drawn(&s, DrawOptions::default());
    assert_eq!(frame.canvas.pixel(650, 100), Some(color));
    assert_eq!(frame.canvas.pixel(652, 102), Some(color));
    assert_eq!(frame.canvas.pixel(653, 100), Some(BACKGROUND));
}

#[test]
fn sprites_partly_off_screen_are_clipped() {
    let mut s = init_state();
    s.enemies.push(Enemy { x: 100.0, y: -20.0, vx: 0.0, vy: 0.0 });
    s.enemies.push(Enemy { x: 795.0, y: 100.0, vx: 0.0, vy: 0.0 });
    let frame = drawn(&s, DrawOptions::default());
    assert_eq!(frame.canvas.pixel(799, 100), Some(ENEMY_COLOR));
}

// ── stars ─────────────────────────────────────────────────────────────────────

#[test]
fn star_positions_follow_frame_and_index() {
    assert_eq!(star(0, 0), (0, 0, Rgba::WHITE.with_alpha(50)));
    assert_eq!(star(1, 10), (83, 37, Rgba::WHITE.with_alpha(90)));
    assert_eq!(star(2, 0), (26, 74, Rgba::WHITE.with_alpha(130)));
    // x wraps at the screen width
    assert_eq!(star(0, 115).0, (115 * 7) % 800);
    // y wraps at the screen height
    assert_eq!(star(20, 0).1, (20 * 37) % 600);
}

#[test]
fn stars_are_blended_over_background() {
    let s = init_state();
    let frame = drawn(&s, DrawOptions::default());
    let (x, y, _) = star(1, 0);
    let p = frame.canvas.pixel(x, y).unwrap();
    assert!(p.luma() > BACKGROUND.luma());
    assert!(p.luma() < 255);
}

// ── HUD ───────────────────────────────────────────────────────────────────────

#[test]
fn hud_shows_score_frames_and_instructions() {
    let mut s = init_state();
    s.score = 120;
    s.frame = 77;
    let frame = drawn(&s, DrawOptions::default());
    let texts: Vec<&str> = frame.texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Score: 120", "Frames: 77", INSTRUCTIONS]);

    assert_eq!((frame.texts[0].x, frame.texts[0].y), (8, 4));
    assert_eq!(frame.texts[1].x, SCREEN_WIDTH - 120);
    assert_eq!(frame.texts[2].y, SCREEN_HEIGHT - 18);
}

#[test]
fn reused_frame_does_not_accumulate_text() {
    let s = init_state();
    let mut frame = Frame::new();
    draw(&s, &DrawOptions::default(), &mut frame);
    draw(&s, &DrawOptions::default(), &mut frame);
    assert_eq!(frame.texts.len(), 3);
}
