//! Concrete scenes: title screen, gameplay and game over

pub mod game;
pub mod game_over;
pub mod title;

pub use game::GameScene;
pub use game_over::{GameOverScene, RoundSummary};
pub use title::TitleScene;
