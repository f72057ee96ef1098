use ratatui::Frame;

use crate::input::KeyAction;
use crate::render::Renderer;
use crate::scene::{Scene, SceneContext, Transition};

use super::GameScene;

/// "Press Space To Start"
pub struct TitleScene {
    renderer: Renderer,
}

impl TitleScene {
    pub fn new() -> Self {
        Self {
            renderer: Renderer::new(),
        }
    }
}

impl Default for TitleScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for TitleScene {
    fn name(&self) -> &'static str {
        "title"
    }

    fn process_input(&mut self, ctx: &mut SceneContext, actions: &[KeyAction]) -> Transition {
        if actions.contains(&KeyAction::Start) {
            return Transition::Switch(Box::new(GameScene::new(ctx)));
        }
        Transition::Stay
    }

    fn render(&self, ctx: &SceneContext, frame: &mut Frame) {
        self.renderer.render_title(frame, &ctx.metrics);
    }
}
