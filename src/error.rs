//! Error types for start-up.
//!
//! The per-frame simulation itself cannot fail; everything here happens
//! while building the game.  Terminal I/O errors are handled by the binary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `Config`.
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The audio worker thread could not be spawned.
    #[error("audio init failed: {0}")]
    AudioInit(std::io::Error),
}
