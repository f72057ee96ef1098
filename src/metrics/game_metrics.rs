use std::time::{Duration, Instant};

/// Counters for the current session. Nothing here outlives the process.
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub last_score: Option<u32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            last_score: None,
        }
    }

    /// Refresh the round clock
    pub fn update(&mut self) {
        self.elapsed_time = self.round_start.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished round; returns true when it set a new session best
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.update();
        self.games_played += 1;
        self.last_score = Some(final_score);
        if final_score > self.high_score {
            self.high_score = final_score;
            return true;
        }
        false
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
