//! Scene Snake - a terminal snake game built on a scene state machine
//!
//! This library provides:
//! - Core game logic (game module)
//! - The scene abstraction and its fixed-timestep runner (scene module)
//! - Title, gameplay and game over scenes (scenes module)
//! - Keyboard mapping, TUI rendering and session metrics

pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod scene;
pub mod scenes;
