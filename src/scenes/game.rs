use log::info;
use ratatui::Frame;

use crate::game::{GameEngine, GameState};
use crate::input::KeyAction;
use crate::render::Renderer;
use crate::scene::{Scene, SceneContext, Transition};

use super::{GameOverScene, RoundSummary};

/// One round of snake
pub struct GameScene {
    engine: GameEngine,
    state: GameState,
    renderer: Renderer,
}

impl GameScene {
    pub fn new(ctx: &mut SceneContext) -> Self {
        let mut engine = GameEngine::with_seed(ctx.config.clone(), ctx.next_seed());
        let state = engine.reset();
        ctx.metrics.on_game_start();
        info!("round started, food at {:?}", state.food);

        Self {
            engine,
            state,
            renderer: Renderer::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "game"
    }

    fn process_input(&mut self, _ctx: &mut SceneContext, actions: &[KeyAction]) -> Transition {
        for action in actions {
            if let KeyAction::Turn(direction) = action {
                self.state.snake.turn(*direction);
            }
        }
        Transition::Stay
    }

    fn update(&mut self, ctx: &mut SceneContext) -> Transition {
        let result = self.engine.step(&mut self.state);
        if !result.terminated {
            return Transition::Stay;
        }

        let new_best = ctx.metrics.on_game_over(self.state.score);
        info!(
            "round over after {} steps, score {} ({})",
            self.state.steps,
            self.state.score,
            result
                .collision
                .map(|c| c.describe())
                .unwrap_or("board cleared")
        );

        let summary = RoundSummary {
            score: self.state.score,
            length: self.state.snake.len(),
            collision: result.collision,
            new_best,
        };
        Transition::Switch(Box::new(GameOverScene::new(summary)))
    }

    fn render(&self, ctx: &SceneContext, frame: &mut Frame) {
        self.renderer.render_game(frame, &self.state, &ctx.metrics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, Position};

    fn setup() -> (SceneContext, GameScene) {
        let mut ctx = SceneContext::new(GameConfig {
            seed: Some(3),
            ..GameConfig::default()
        });
        let scene = GameScene::new(&mut ctx);
        (ctx, scene)
    }

    #[test]
    fn test_starting_layout() {
        let (_ctx, scene) = setup();
        let state = scene.state();
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.snake.head(), Position::new(5, 0));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_turn_then_update_moves_down() {
        let (mut ctx, mut scene) = setup();
        scene.state_mut().food = Some(Position::new(14, 14));

        let t = scene.process_input(&mut ctx, &[KeyAction::Turn(Direction::Down)]);
        assert!(t.is_stay());
        assert!(scene.update(&mut ctx).is_stay());
        assert_eq!(scene.state().snake.head(), Position::new(5, 1));
    }

    #[test]
    fn test_eating_scores() {
        let (mut ctx, mut scene) = setup();
        let ahead = scene.state().snake.next_head();
        scene.state_mut().food = Some(ahead);

        assert!(scene.update(&mut ctx).is_stay());
        assert_eq!(scene.state().score, 1);
        assert_eq!(scene.state().snake.len(), 6);
    }

    #[test]
    fn test_wall_hit_switches_to_game_over() {
        let (mut ctx, mut scene) = setup();
        scene.state_mut().food = Some(Position::new(14, 14));

        // Heading up from the top row leaves the board immediately.
        scene.process_input(&mut ctx, &[KeyAction::Turn(Direction::Up)]);
        let t = scene.update(&mut ctx);

        match t {
            Transition::Switch(next) => assert_eq!(next.name(), "game_over"),
            other => panic!("expected game over, got {:?}", other),
        }
        assert_eq!(ctx.metrics.games_played, 1);
        assert_eq!(ctx.metrics.last_score, Some(0));
        assert!(!scene.state().is_alive);
    }
}
