//! Sound triggers.
//!
//! Gameplay code never waits on playback: it hands a `Sound` to a
//! `SoundSink` and moves on.  `AudioQueue` forwards triggers over a channel
//! to a dedicated worker thread, the same way the terminal host feeds key
//! events to the game loop.  No synthesis happens yet; the worker only
//! records each trigger in the log.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    /// Player fired a bullet.
    Shot,
    /// An enemy was destroyed.
    Pop,
}

/// Anything that accepts fire-and-forget sound triggers.
pub trait SoundSink {
    fn play(&mut self, sound: Sound);
}

/// Discards every trigger.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _sound: Sound) {}
}

/// Records triggers in order, for asserting on what a frame emitted.
impl SoundSink for Vec<Sound> {
    fn play(&mut self, sound: Sound) {
        self.push(sound);
    }
}

// ── Background queue ──────────────────────────────────────────────────────────

pub struct AudioQueue {
    tx: Option<mpsc::Sender<Sound>>,
    worker: Option<JoinHandle<u64>>,
}

impl AudioQueue {
    /// Spawn the playback worker.
    pub fn start() -> Result<Self, GameError> {
        let (tx, rx) = mpsc::channel::<Sound>();
        let worker = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                let mut played = 0u64;
                // Ends once every sender is dropped.
                for sound in rx {
                    tracing::trace!(?sound, "sound trigger");
                    played += 1;
                }
                played
            })
            .map_err(GameError::AudioInit)?;

        Ok(AudioQueue {
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Close the channel and wait for the worker to drain it.
    /// Returns how many triggers the worker handled.
    pub fn shutdown(mut self) -> u64 {
        self.finish()
    }

    fn finish(&mut self) -> u64 {
        drop(self.tx.take());
        match self.worker.take() {
            Some(handle) => handle.join().unwrap_or(0),
            None => 0,
        }
    }
}

impl SoundSink for AudioQueue {
    fn play(&mut self, sound: Sound) {
        if let Some(tx) = &self.tx {
            // A dead worker just means silence.
            let _ = tx.send(sound);
        }
    }
}

impl Drop for AudioQueue {
    fn drop(&mut self) {
        let played = self.finish();
        if played > 0 {
            tracing::debug!(played, "audio worker stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_delivers_every_trigger() {
        let mut queue = AudioQueue::start().unwrap();
        queue.play(Sound::Shot);
        queue.play(Sound::Pop);
        queue.play(Sound::Shot);
        assert_eq!(queue.shutdown(), 3);
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink: Vec<Sound> = Vec::new();
        sink.play(Sound::Pop);
        sink.play(Sound::Shot);
        assert_eq!(sink, vec![Sound::Pop, Sound::Shot]);
    }
}
