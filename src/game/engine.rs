use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, GameState, Position, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    /// Whether the round is over, by collision or by filling the board
    pub terminated: bool,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            ate_food: false,
            collision: None,
            terminated,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create an engine with a fixed seed for reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Reset the game to initial state: a snake lying along the top row,
    /// head at column `initial_snake_length`, heading right
    pub fn reset(&mut self) -> GameState {
        let length = self.config.initial_snake_length;
        let snake = Snake::new(Position::new(length as i32, 0), Direction::Right, length);

        let mut state = GameState {
            snake,
            food: None,
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            score: 0,
            steps: 0,
            is_alive: true,
        };
        state.food = self.spawn_food(&state);
        state
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult::idle(true);
        }

        let new_head = state.snake.next_head();
        state.steps += 1;

        if let Some(collision) = self.check_collision(state, new_head) {
            state.is_alive = false;
            debug!("snake {} at {:?}", collision.describe(), new_head);
            return StepResult {
                ate_food: false,
                collision: Some(collision),
                terminated: true,
            };
        }

        let ate_food = state.food == Some(new_head);
        state.snake.move_snake(ate_food);

        if ate_food {
            state.score += 1;
            state.food = self.spawn_food(state);
            debug!("food eaten, score {}", state.score);

            if state.food.is_none() {
                // Nowhere left to put food: the board is cleared.
                state.is_alive = false;
                return StepResult {
                    ate_food,
                    collision: None,
                    terminated: true,
                };
            }
        }

        StepResult {
            ate_food,
            collision: None,
            terminated: false,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_after_move(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a random cell not covered by the snake
    fn spawn_food(&mut self, state: &GameState) -> Option<Position> {
        if state.is_board_full() {
            return None;
        }

        let free: Vec<Position> = (0..state.grid_height as i32)
            .flat_map(|y| (0..state.grid_width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !state.snake.occupies(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::small(), 7)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 1);
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.snake.head(), Position::new(5, 0));
        assert_eq!(state.snake.tail(), Position::new(1, 0));
        assert_eq!(state.snake.direction, Direction::Right);

        let food = state.food.unwrap();
        assert!(state.is_in_bounds(food));
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn test_config_seed_is_used() {
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        let a = GameEngine::new(config).reset();
        let b = GameEngine::with_seed(GameConfig::default(), 99).reset();
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let a = GameEngine::with_seed(GameConfig::default(), 99).reset();
        let b = GameEngine::with_seed(GameConfig::default(), 99).reset();
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Some(Position::new(9, 9));
        let initial_head = state.snake.head();

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(!result.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), initial_head.moved_by(1, 0));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = engine.reset();

        state.food = Some(state.snake.next_head());
        let initial_length = state.snake.len();

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), initial_length + 1);
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left, 3),
            Position::new(5, 5),
            10,
            10,
        );

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.collision, Some(CollisionType::Wall));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        state.snake.turn(Direction::Down);
        engine.step(&mut state);
        state.snake.turn(Direction::Left);
        engine.step(&mut state);
        state.snake.turn(Direction::Up);
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_chasing_own_tail_is_allowed() {
        let mut engine = engine();

        // Length 4 in a tight loop: the head always enters the cell the tail leaves.
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        let mut state = GameState::new(snake, Position::new(0, 0), 10, 10);

        for turn in [Direction::Down, Direction::Left, Direction::Up, Direction::Right] {
            state.snake.turn(turn);
            let result = engine.step(&mut state);
            assert!(!result.terminated, "died turning {:?}", turn);
        }
        assert!(state.is_alive);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = engine.reset();

        state.snake.turn(Direction::Left);
        engine.step(&mut state);

        assert_eq!(state.snake.direction, Direction::Right);
        assert!(state.is_alive);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.is_alive = false;
        let steps_before = state.steps;

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before);
    }

    #[test]
    fn test_filling_board_ends_round() {
        let mut engine = GameEngine::with_seed(GameConfig::new(2, 2), 3);
        // Three cells covered, food on the last one.
        let snake = Snake::new(Position::new(1, 1), Direction::Left, 1);
        let mut state = GameState::new(snake, Position::new(0, 1), 2, 2);
        state.snake.body.push_back(Position::new(1, 0));
        state.snake.body.push_back(Position::new(0, 0));

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert!(result.terminated);
        assert_eq!(result.collision, None);
        assert_eq!(state.food, None);
        assert!(!state.is_alive);
    }
}
