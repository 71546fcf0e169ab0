//! Runtime configuration: an optional TOML file, then CLI overrides.
//! Gameplay rules are compiled-in constants and are not configurable.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GameError;

pub const DEFAULT_FPS: u32 = 60;
pub const MAX_FPS: u32 = 240;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// RNG seed; a random one is drawn (and logged) when absent.
    pub seed: Option<u64>,
    /// Simulation and render rate.
    pub fps: u32,
    /// Tint the background from the hue phase instead of the fixed colour.
    pub cycle_background: bool,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// The terminal is in raw mode while playing, so logs go to a file.
    pub file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            fps: DEFAULT_FPS,
            cycle_background: false,
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            file: PathBuf::from("arcade_shooter.log"),
        }
    }
}

impl Config {
    /// Read and validate a TOML config file.  Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml(&text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(GameError::InvalidConfig(format!(
                "fps must be in 1..={MAX_FPS}, got {}",
                self.fps
            )));
        }
        if self.log.level.trim().is_empty() {
            return Err(GameError::InvalidConfig("log.level is empty".into()));
        }
        Ok(())
    }
}
