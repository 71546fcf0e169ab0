//! Keyboard input.
//!
//! Instead of acting on each key event individually, `KeyTracker` records
//! the frame number of the last press/repeat event for every key.  Each
//! frame the game asks which keys are still "fresh" (seen within
//! `hold_window` frames) and applies all their effects together, so Space
//! and a direction can be held at the same time.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events → keys are removed on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  Keys expire after `hold_window` frames of silence.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key counts as held this long after its last press/repeat when the
/// terminal sends no release events.  OS key-repeat runs at ≥ 15 Hz.
pub const HOLD_DURATION: Duration = Duration::from_millis(133);

/// Directional and fire state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Game actions a key can map to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

/// Arrows and WASD move, Space fires.  Letters are case-insensitive.
pub fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Down),
        KeyCode::Char(' ') => Some(Action::Fire),
        _ => None,
    }
}

/// Q, Esc and Ctrl-C leave the game.  Only presses count.
pub fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            modifiers,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct KeyTracker {
    /// Maps each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    hold_window: u64,
}

impl KeyTracker {
    pub fn new(hold_window: u64) -> Self {
        KeyTracker {
            key_frame: HashMap::new(),
            hold_window,
        }
    }

    /// Tracker whose hold window covers `HOLD_DURATION` at the given rate.
    pub fn for_fps(fps: u32) -> Self {
        let frames = (HOLD_DURATION.as_secs_f64() * fps as f64).ceil() as u64;
        Self::new(frames.max(1))
    }

    /// Feed one terminal event seen during `frame`.
    pub fn observe(&mut self, event: &Event, frame: u64) {
        if let Event::Key(KeyEvent { code, kind, .. }) = event {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.key_frame.insert(*code, frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(code);
                }
            }
        }
    }

    /// Returns true if `key` was seen within the last `hold_window` frames.
    pub fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    /// Collapse every fresh key into this frame's `InputState`.
    pub fn snapshot(&self, frame: u64) -> InputState {
        let mut input = InputState::default();
        for code in self.key_frame.keys() {
            if !self.is_held(code, frame) {
                continue;
            }
            match action_for(code) {
                Some(Action::Left) => input.left = true,
                Some(Action::Right) => input.right = true,
                Some(Action::Up) => input.up = true,
                Some(Action::Down) => input.down = true,
                Some(Action::Fire) => input.fire = true,
                None => {}
            }
        }
        input
    }
}
