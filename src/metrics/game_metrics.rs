use std::time::{Duration, Instant};

/// Per-session statistics shown in the header
pub struct GameMetrics {
    /// Set while the clock is running
    pub running_since: Option<Instant>,
    /// Play time banked from earlier running stretches
    pub banked_time: Duration,
    pub elapsed_time: Duration,
    /// Best final score; `None` until a game has ended
    pub high_score: Option<i32>,
    pub longest_snake: usize,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked_time: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            high_score: None,
            longest_snake: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.banked_time
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or(Duration::ZERO);
    }

    /// Fresh board: clock reset and stopped
    pub fn on_game_reset(&mut self) {
        self.running_since = None;
        self.banked_time = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_start(&mut self) {
        self.on_game_reset();
        self.resume_clock();
    }

    pub fn on_pause(&mut self) {
        self.stop_clock();
    }

    pub fn on_resume(&mut self) {
        self.resume_clock();
    }

    pub fn on_length_change(&mut self, length: usize) {
        self.longest_snake = self.longest_snake.max(length);
    }

    pub fn on_game_over(&mut self, final_score: i32) {
        self.stop_clock();
        self.games_played += 1;
        self.high_score = Some(match self.high_score {
            Some(best) => best.max(final_score),
            None => final_score,
        });
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    fn resume_clock(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked_time += since.elapsed();
        }
        self.update();
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.high_score, None);

        metrics.on_game_over(-4);
        assert_eq!(metrics.high_score, Some(-4));
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(-9);
        assert_eq!(metrics.high_score, Some(-4)); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, Some(15)); // Should update
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_longest_snake() {
        let mut metrics = GameMetrics::new();
        metrics.on_length_change(3);
        metrics.on_length_change(8);
        metrics.on_length_change(5);
        assert_eq!(metrics.longest_snake, 8);
    }

    #[test]
    fn test_clock_stopped_until_start() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 20);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(20));
        metrics.on_pause();
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(30));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);

        metrics.on_resume();
        std::thread::sleep(Duration::from_millis(10));
        metrics.update();
        assert!(metrics.elapsed_time > frozen);
    }

    #[test]
    fn test_reset_clears_clock() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_start();
        std::thread::sleep(Duration::from_millis(10));
        metrics.on_game_reset();
        metrics.update();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
