use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};

use super::{Scene, SceneContext, Transition};
use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction};

/// Fixed-timestep loop that drives the active scene
pub struct SceneRunner {
    active: Option<Box<dyn Scene>>,
    context: SceneContext,
    input_handler: InputHandler,
}

impl SceneRunner {
    pub fn new(config: GameConfig, starting_scene: Box<dyn Scene>) -> Self {
        Self {
            active: Some(starting_scene),
            context: SceneContext::new(config),
            input_handler: InputHandler::new(),
        }
    }

    /// True while a scene is active
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Name of the active scene, if any
    pub fn active_scene(&self) -> Option<&'static str> {
        self.active.as_ref().map(|scene| scene.name())
    }

    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    /// Run until no scene is left. The terminal is restored even if the loop fails.
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.context.config.tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Key events collected between two ticks
        let mut pending_keys: Vec<KeyEvent> = Vec::new();

        info!(
            "scene loop started at {} fps in {:?}",
            self.context.config.fps,
            self.active_scene()
        );

        while self.is_running() {
            tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => pending_keys.push(key),
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        return Err(err).context("Failed to read terminal event");
                    }
                    None => {
                        warn!("terminal event stream closed");
                        self.apply(Transition::Quit);
                    }
                },

                _ = tick_timer.tick() => {
                    let transition = self.process_frame(&pending_keys);
                    pending_keys.clear();

                    self.context.metrics.update();
                    terminal
                        .draw(|frame| self.render_frame(frame))
                        .context("Failed to draw frame")?;

                    self.apply(transition);
                }

                _ = tokio::signal::ctrl_c() => {
                    self.apply(Transition::Quit);
                }
            }
        }

        info!("scene loop finished");
        Ok(())
    }

    /// One complete frame without a terminal: input, update, then scene swap
    ///
    /// Returns whether a scene is still active.
    pub fn advance_frame(&mut self, keys: &[KeyEvent]) -> bool {
        let transition = self.process_frame(keys);
        self.apply(transition);
        self.is_running()
    }

    /// Draw the active scene
    pub fn render_frame(&self, frame: &mut Frame) {
        if let Some(scene) = &self.active {
            scene.render(&self.context, frame);
        }
    }

    /// Filter quit requests, then run the scene's input and update hooks
    fn process_frame(&mut self, keys: &[KeyEvent]) -> Transition {
        let Some(scene) = self.active.as_mut() else {
            return Transition::Quit;
        };

        let mut transition = Transition::Stay;
        let mut actions = Vec::with_capacity(keys.len());

        for key in keys {
            match self.input_handler.handle_key_event(*key) {
                KeyAction::Quit => {
                    debug!("quit requested by {:?}", key.code);
                    transition = Transition::Quit;
                }
                KeyAction::None => {}
                action => actions.push(action),
            }
        }

        transition = transition.then(scene.process_input(&mut self.context, &actions));
        transition.then(scene.update(&mut self.context))
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::Switch(next) => {
                info!(
                    "switching scene {} -> {}",
                    self.active_scene().unwrap_or("none"),
                    next.name()
                );
                self.active = Some(next);
            }
            Transition::Quit => {
                if let Some(scene) = self.active.take() {
                    info!("terminating from scene {}", scene.name());
                }
            }
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
