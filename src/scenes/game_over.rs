use ratatui::Frame;

use crate::game::CollisionType;
use crate::input::KeyAction;
use crate::render::Renderer;
use crate::scene::{Scene, SceneContext, Transition};

use super::TitleScene;

/// How a round ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub length: usize,
    /// None when the snake filled the board
    pub collision: Option<CollisionType>,
    pub new_best: bool,
}

pub struct GameOverScene {
    summary: RoundSummary,
    renderer: Renderer,
}

impl GameOverScene {
    pub fn new(summary: RoundSummary) -> Self {
        Self {
            summary,
            renderer: Renderer::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn summary(&self) -> &RoundSummary {
        &self.summary
    }
}

impl Scene for GameOverScene {
    fn name(&self) -> &'static str {
        "game_over"
    }

    fn process_input(&mut self, _ctx: &mut SceneContext, actions: &[KeyAction]) -> Transition {
        let back = actions
            .iter()
            .any(|a| matches!(a, KeyAction::Start | KeyAction::Confirm));
        if back {
            return Transition::Switch(Box::new(TitleScene::new()));
        }
        Transition::Stay
    }

    fn render(&self, ctx: &SceneContext, frame: &mut Frame) {
        self.renderer
            .render_game_over(frame, &self.summary, &ctx.metrics);
    }
}
