//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Scenes drive it one tick at a time.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, MAX_GRID_SIZE};
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use state::{CollisionType, GameState, Position, Snake};
