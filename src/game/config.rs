use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest board side in cells; keeps cell coordinates and terminal widths lossless
pub const MAX_GRID_SIZE: usize = 256;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("grid must be at least 2x2 cells, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },
    #[error("grid may be at most {max}x{max} cells, got {width}x{height}")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("initial snake of length {length} does not fit in a row of width {width}")]
    SnakeTooLong { length: usize, width: usize },
    #[error("fps must be greater than zero")]
    ZeroFps,
}

/// Configuration for the game
///
/// A cell corresponds to one 32 pixel block of a 480x480 window, so the
/// default board is 15x15 cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Ticks per second of the scene loop
    pub fps: u32,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 15,
            grid_height: 15,
            initial_snake_length: 5,
            fps: 8,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            initial_snake_length: 3,
            ..Self::new(10, 10)
        }
    }

    /// Load a configuration from a TOML file; missing keys fall back to defaults
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Check that a game can be started with this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_SIZE,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        // The head starts at column `initial_snake_length` and needs a free cell ahead.
        if self.initial_snake_length + 1 >= self.grid_width {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                width: self.grid_width,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        Ok(())
    }

    /// Duration of a single tick
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }
}
