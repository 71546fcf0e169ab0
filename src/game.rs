//! `Arcade`: the object the host drives once per frame.
//!
//! It owns the simulation state, the seeded RNG and the sound sink, and
//! exposes the three host callbacks: `update`, `draw` and `layout`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::SoundSink;
use crate::compute::{init_state, layout, tick};
use crate::config::Config;
use crate::entities::GameState;
use crate::input::InputState;
use crate::render::{draw, DrawOptions, Frame};

pub struct Arcade {
    state: GameState,
    rng: StdRng,
    seed: u64,
    options: DrawOptions,
    sounds: Box<dyn SoundSink>,
}

impl Arcade {
    pub fn new(config: &Config, sounds: Box<dyn SoundSink>) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        tracing::info!(seed, "new game");
        Arcade {
            state: init_state(),
            rng: StdRng::seed_from_u64(seed),
            seed,
            options: DrawOptions {
                cycle_background: config.cycle_background,
            },
            sounds,
        }
    }

    /// Advance one frame.
    pub fn update(&mut self, input: &InputState) {
        self.state = tick(&self.state, input, &mut self.rng, self.sounds.as_mut());
    }

    pub fn draw(&self, frame: &mut Frame) {
        draw(&self.state, &self.options, frame);
    }

    pub fn layout(&self, outside_width: u32, outside_height: u32) -> (u32, u32) {
        layout(outside_width, outside_height)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seed the RNG was built from; replaying with it reproduces the run.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}
