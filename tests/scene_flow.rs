use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use scene_snake::game::GameConfig;
use scene_snake::scene::SceneRunner;
use scene_snake::scenes::TitleScene;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn runner() -> SceneRunner {
    let config = GameConfig {
        seed: Some(2024),
        ..GameConfig::default()
    };
    SceneRunner::new(config, Box::new(TitleScene::new()))
}

#[test]
fn test_full_cycle_title_game_over_title() {
    let mut runner = runner();
    assert_eq!(runner.active_scene(), Some("title"));

    assert!(runner.advance_frame(&[key(KeyCode::Char(' '))]));
    assert_eq!(runner.active_scene(), Some("game"));

    // Top row, turning up: straight into the wall
    assert!(runner.advance_frame(&[key(KeyCode::Up)]));
    assert_eq!(runner.active_scene(), Some("game_over"));
    assert_eq!(runner.context().metrics.games_played, 1);

    assert!(runner.advance_frame(&[key(KeyCode::Char(' '))]));
    assert_eq!(runner.active_scene(), Some("title"));

    assert!(!runner.advance_frame(&[key(KeyCode::Esc)]));
    assert_eq!(runner.active_scene(), None);
}

#[test]
fn test_idle_snake_hits_right_wall() {
    let mut runner = runner();
    runner.advance_frame(&[key(KeyCode::Char(' '))]);

    // Head starts at column 5 on a 15 wide board: nine safe moves, the tenth leaves it
    for _ in 0..9 {
        runner.advance_frame(&[]);
        assert_eq!(runner.active_scene(), Some("game"));
    }
    runner.advance_frame(&[]);
    assert_eq!(runner.active_scene(), Some("game_over"));
}

#[test]
fn test_reverse_key_is_ignored() {
    let mut runner = runner();
    runner.advance_frame(&[key(KeyCode::Char(' '))]);

    // Left while travelling right would fold the snake onto itself
    runner.advance_frame(&[key(KeyCode::Left)]);
    assert_eq!(runner.active_scene(), Some("game"));
}

#[test]
fn test_up_then_left_in_one_frame_does_not_reverse() {
    let mut runner = runner();
    runner.advance_frame(&[key(KeyCode::Char(' '))]);
    runner.advance_frame(&[key(KeyCode::Down)]);

    // Travelling down: Left then Up within one frame keeps the snake alive
    runner.advance_frame(&[key(KeyCode::Left), key(KeyCode::Up)]);
    assert_eq!(runner.active_scene(), Some("game"));
}

#[test]
fn test_every_scene_renders() {
    let mut runner = runner();
    let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();

    terminal.draw(|frame| runner.render_frame(frame)).unwrap();
    runner.advance_frame(&[key(KeyCode::Char(' '))]);
    terminal.draw(|frame| runner.render_frame(frame)).unwrap();
    runner.advance_frame(&[key(KeyCode::Up)]);
    terminal.draw(|frame| runner.render_frame(frame)).unwrap();

    let buffer = terminal.backend().buffer();
    let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
    assert!(text.contains("GAME OVER"));
}
