use std::collections::VecDeque;

use serde::Serialize;

use crate::game::{GameOutcome, Player};

/// Result of a single episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    pub outcome: GameOutcome,
    pub game_length: usize,
}

/// Per-run win/loss/draw tallies, seen from player one's seat, plus the
/// lifetime episode count that survives across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingStats {
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f32,
    pub total_episodes: u64,
    pub final_epsilon: Option<f32>,
}

impl TrainingStats {
    /// Zero the per-run counters. The lifetime count is kept.
    pub fn reset(&mut self) {
        self.episodes = 0;
        self.wins = 0;
        self.losses = 0;
        self.draws = 0;
        self.win_rate = 0.0;
        self.final_epsilon = None;
    }

    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Player::One) => self.wins += 1,
            GameOutcome::Winner(Player::Two) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.episodes += 1;
        self.total_episodes += 1;
        // episodes >= 1 here
        self.win_rate = self.wins as f32 / self.episodes as f32;
    }
}

/// Rolling-window metrics for progress logging.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    update_losses: VecDeque<f32>,
    capacity: usize,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            update_losses: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    pub fn record_update(&mut self, loss: f32) {
        self.update_losses.push_back(loss);
        if self.update_losses.len() > self.capacity {
            self.update_losses.pop_front();
        }
    }

    /// Player one's win rate over the window.
    pub fn win_rate(&self) -> f32 {
        self.rate(|r| r.outcome == GameOutcome::Winner(Player::One))
    }

    pub fn draw_rate(&self) -> f32 {
        self.rate(|r| r.outcome == GameOutcome::Draw)
    }

    fn rate(&self, pred: impl Fn(&EpisodeResult) -> bool) -> f32 {
        let n = self.episode_results.len();
        if n == 0 {
            return 0.0;
        }
        self.episode_results.iter().filter(|r| pred(r)).count() as f32 / n as f32
    }

    pub fn average_loss(&self) -> f32 {
        let n = self.update_losses.len();
        if n == 0 {
            return 0.0;
        }
        self.update_losses.iter().sum::<f32>() / n as f32
    }

    pub fn average_game_length(&self) -> f32 {
        let n = self.episode_results.len();
        if n == 0 {
            return 0.0;
        }
        let total: usize = self.episode_results.iter().map(|r| r.game_length).sum();
        total as f32 / n as f32
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}
