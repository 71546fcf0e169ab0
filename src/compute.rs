//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle or a sound sink) and returns
//! a brand-new `GameState`.  Side effects are limited to the injected RNG and
//! the sound triggers handed to the sink.

use rand::Rng;

use crate::audio::{Sound, SoundSink};
use crate::entities::{Bullet, Enemy, GameState, Particle, Player, Rgba};
use crate::input::InputState;

// ── Screen ───────────────────────────────────────────────────────────────────

/// Logical screen size; never depends on the host window.
pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 600;

const W: f32 = SCREEN_WIDTH as f32;
const H: f32 = SCREEN_HEIGHT as f32;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 28.0;
pub const PLAYER_HEIGHT: f32 = 18.0;
/// The ship centre stays this far inside every screen edge.
pub const PLAYER_MARGIN: f32 = 16.0;
/// Pixels per frame per pressed direction.  Diagonals are not normalised.
pub const PLAYER_SPEED: f32 = 4.0;
const PLAYER_START_Y: f32 = H - 64.0;

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Fire-rate limiter: a held fire key shoots on frames divisible by this.
pub const FIRE_INTERVAL: u64 = 8;
pub const BULLET_SPEED: f32 = -8.0;
/// Bullets leave from the nose, this far above the ship centre.
pub const BULLET_SPAWN_OFFSET: f32 = 12.0;
/// Bullets survive while `-BULLET_MARGIN < y < height + BULLET_MARGIN`.
pub const BULLET_MARGIN: f32 = 20.0;
/// A bullet that scored a hit is parked here until the next prune.
pub const SPENT_BULLET_Y: f32 = -9999.0;

// ── Enemies ──────────────────────────────────────────────────────────────────

pub const ENEMY_SPAWN_INTERVAL: u64 = 45;
pub const ENEMY_SPAWN_Y: f32 = -20.0;
/// Spawn x is kept this far from both side edges.
pub const ENEMY_SPAWN_MARGIN: u32 = 20;
/// Horizontal drift is uniform in `-ENEMY_DRIFT..ENEMY_DRIFT`.
pub const ENEMY_DRIFT: f32 = 0.75;
pub const ENEMY_MIN_SPEED: f32 = 1.0;
pub const ENEMY_MAX_SPEED: f32 = 2.5;
/// Enemies that fall past `height + ENEMY_ESCAPE_MARGIN` are dropped.
pub const ENEMY_ESCAPE_MARGIN: f32 = 40.0;

// ── Hits & particles ─────────────────────────────────────────────────────────

pub const HIT_RADIUS: f32 = 20.0;
pub const SCORE_PER_KILL: u32 = 10;
pub const PARTICLES_PER_KILL: usize = 12;
/// Each particle velocity component is uniform in `-PARTICLE_SPEED..PARTICLE_SPEED`.
pub const PARTICLE_SPEED: f32 = 2.0;
pub const PARTICLE_MIN_LIFE: u32 = 20;
pub const PARTICLE_MAX_LIFE: u32 = 40;
pub const GRAVITY: f32 = 0.05;
pub const PARTICLE_COLOR: Rgba = Rgba::rgb(0xff, 0xc0, 0x40);

// ── Background ───────────────────────────────────────────────────────────────

pub const START_HUE: f32 = 200.0;
pub const HUE_STEP: f32 = 0.02;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: ship near the bottom centre, nothing else.
pub fn init_state() -> GameState {
    GameState {
        player: Player {
            x: W / 2.0,
            y: PLAYER_START_Y,
        },
        bullets: Vec::new(),
        enemies: Vec::new(),
        particles: Vec::new(),
        score: 0,
        frame: 0,
        bg_hue: START_HUE,
    }
}

/// Logical screen size reported to the host, whatever its window size.
pub fn layout(_outside_width: u32, _outside_height: u32) -> (u32, u32) {
    (SCREEN_WIDTH, SCREEN_HEIGHT)
}

pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply directional input, then clamp the ship inside the margin.
pub fn move_player(state: &GameState, input: &InputState) -> GameState {
    let mut x = state.player.x;
    let mut y = state.player.y;
    if input.left {
        x -= PLAYER_SPEED;
    }
    if input.right {
        x += PLAYER_SPEED;
    }
    if input.up {
        y -= PLAYER_SPEED;
    }
    if input.down {
        y += PLAYER_SPEED;
    }
    GameState {
        player: Player {
            x: x.clamp(PLAYER_MARGIN, W - PLAYER_MARGIN),
            y: y.clamp(PLAYER_MARGIN, H - PLAYER_MARGIN),
        },
        ..state.clone()
    }
}

/// Fire one bullet from the ship's nose.  Rate limiting is the caller's job.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: state.player.x,
        y: state.player.y - BULLET_SPAWN_OFFSET,
        vy: BULLET_SPEED,
    });
    GameState {
        bullets,
        ..state.clone()
    }
}

/// Drop one enemy in above the top edge at a random column.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    let x = (ENEMY_SPAWN_MARGIN + rng.gen_range(0..SCREEN_WIDTH - 2 * ENEMY_SPAWN_MARGIN)) as f32;
    let vx = rng.gen_range(-ENEMY_DRIFT..ENEMY_DRIFT);
    let vy = rng.gen_range(ENEMY_MIN_SPEED..ENEMY_MAX_SPEED);
    let mut enemies = state.enemies.clone();
    enemies.push(Enemy {
        x,
        y: ENEMY_SPAWN_Y,
        vx,
        vy,
    });
    GameState {
        enemies,
        ..state.clone()
    }
}

fn burst(x: f32, y: f32, rng: &mut impl Rng) -> impl Iterator<Item = Particle> + '_ {
    (0..PARTICLES_PER_KILL).map(move |_| Particle {
        x,
        y,
        vx: rng.gen_range(-PARTICLE_SPEED..PARTICLE_SPEED),
        vy: rng.gen_range(-PARTICLE_SPEED..PARTICLE_SPEED),
        life: rng.gen_range(PARTICLE_MIN_LIFE..PARTICLE_MAX_LIFE),
        color: PARTICLE_COLOR,
    })
}

// ── Per-frame tick (nearly pure: RNG and sounds are injected) ──────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameState,
    input: &InputState,
    rng: &mut impl Rng,
    sounds: &mut dyn SoundSink,
) -> GameState {
    let mut next = move_player(
        &GameState {
            frame: state.frame + 1,
            ..state.clone()
        },
        input,
    );
    let frame = next.frame;

    // ── 1. Fire (rate-limited) ───────────────────────────────────────────────
    if input.fire && frame % FIRE_INTERVAL == 0 {
        next = player_shoot(&next);
        sounds.play(Sound::Shot);
    }

    // ── 2. Move bullets, discard the ones that left the screen ──────────────
    let mut bullets: Vec<Bullet> = next
        .bullets
        .iter()
        .map(|b| Bullet { y: b.y + b.vy, ..b.clone() })
        .filter(|b| b.y > -BULLET_MARGIN && b.y < H + BULLET_MARGIN)
        .collect();

    // ── 3. Move enemies, then spawn (a new enemy starts moving next frame) ──
    next.enemies = next
        .enemies
        .iter()
        .map(|e| Enemy {
            x: e.x + e.vx,
            y: e.y + e.vy,
            ..e.clone()
        })
        .collect();
    if frame % ENEMY_SPAWN_INTERVAL == 0 {
        next = spawn_enemy(&next, &mut *rng);
    }

    // ── 4. Collision: bullets ↔ enemies ──────────────────────────────────────
    // The first bullet in range takes the hit; it is parked off-screen and
    // pruned by step 2 next frame.
    let mut particles = next.particles.clone();
    let mut score = next.score;
    let mut enemies: Vec<Enemy> = Vec::with_capacity(next.enemies.len());

    for enemy in next.enemies.iter().cloned() {
        let hit = bullets
            .iter_mut()
            .find(|b| distance(enemy.x, enemy.y, b.x, b.y) < HIT_RADIUS);
        match hit {
            Some(bullet) => {
                bullet.y = SPENT_BULLET_Y;
                particles.extend(burst(enemy.x, enemy.y, &mut *rng));
                score += SCORE_PER_KILL;
                sounds.play(Sound::Pop);
                tracing::debug!(frame, x = enemy.x, y = enemy.y, score, "enemy destroyed");
            }
            // Enemies that fell past the bottom escape without penalty
            None if enemy.y < H + ENEMY_ESCAPE_MARGIN => enemies.push(enemy),
            None => {}
        }
    }

    // ── 5. Particles: integrate, apply gravity, age ─────────────────────────
    let particles: Vec<Particle> = particles
        .into_iter()
        .map(|p| Particle {
            x: p.x + p.vx,
            y: p.y + p.vy,
            vy: p.vy + GRAVITY,
            life: p.life.saturating_sub(1),
            ..p
        })
        .filter(|p| p.life > 0)
        .collect();

    // ── 6. Background hue ────────────────────────────────────────────────────
    let mut bg_hue = next.bg_hue + HUE_STEP;
    if bg_hue > 360.0 {
        bg_hue = 0.0;
    }

    GameState {
        bullets,
        enemies,
        particles,
        score,
        bg_hue,
        ..next
    }
}
