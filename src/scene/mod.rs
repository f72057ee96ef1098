//! Scene state machine
//!
//! A [`Scene`] reacts to input, advances its own state once per tick and draws
//! itself. Every hook returns a [`Transition`], which plays the role of the
//! "next scene" pointer: [`SceneRunner`] swaps in the new scene at the end of
//! the frame, after the current one has been rendered.
//!
//! ```text
//!   Title --Space--> Game --death--> GameOver --Space/Enter--> Title
//!     \_______________\__________________\____Esc / Alt+F4____> (none)
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::Frame;

use crate::game::GameConfig;
use crate::input::KeyAction;
use crate::metrics::GameMetrics;

mod runner;

pub use runner::SceneRunner;

/// Where the runner goes after the current frame
pub enum Transition {
    /// Keep the active scene
    Stay,
    /// Replace the active scene
    Switch(Box<dyn Scene>),
    /// Leave the loop; no scene follows
    Quit,
}

impl Transition {
    /// Combine two transitions requested in the same frame.
    ///
    /// The later request wins unless it is `Stay`; `Quit` is never overridden.
    pub fn then(self, later: Transition) -> Transition {
        match (self, later) {
            (Transition::Quit, _) => Transition::Quit,
            (earlier, Transition::Stay) => earlier,
            (_, later) => later,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_stay(&self) -> bool {
        matches!(self, Transition::Stay)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Stay => write!(f, "Stay"),
            Transition::Switch(scene) => write!(f, "Switch({})", scene.name()),
            Transition::Quit => write!(f, "Quit"),
        }
    }
}

/// State shared by every scene of one session
pub struct SceneContext {
    pub config: GameConfig,
    pub metrics: GameMetrics,
    rng: StdRng,
}

impl SceneContext {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            metrics: GameMetrics::new(),
            rng,
        }
    }

    /// Seed for the next round, so a fixed session seed still varies between rounds
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

/// One screen of the game
pub trait Scene {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Handle this frame's key actions. Quit requests are filtered out beforehand.
    fn process_input(&mut self, ctx: &mut SceneContext, actions: &[KeyAction]) -> Transition;

    /// Advance one tick
    fn update(&mut self, _ctx: &mut SceneContext) -> Transition {
        Transition::Stay
    }

    fn render(&self, ctx: &SceneContext, frame: &mut Frame);
}
