//! Statistics across the episodes of a play session
//!
//! Keeps rolling windows of episode rewards, lengths and fruit counts so that
//! long sessions report smoothed numbers, plus lifetime totals.

use std::collections::VecDeque;

use super::episode_stats::{EpisodeRecord, TerminationReason};

/// Session statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use snake_env::metrics::{EpisodeStatistics, SessionStats};
///
/// let mut stats = SessionStats::new(100);
/// stats.record_episode(&EpisodeStatistics::new().to_record());
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.mean_fruits(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in timesteps (rolling window)
    episode_lengths: VecDeque<u32>,

    /// Fruits eaten per episode (rolling window)
    episode_fruits: VecDeque<u32>,

    /// Episodes ended per termination reason, indexed like `TerminationReason::ALL`
    terminations: [usize; TerminationReason::ALL.len()],

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of timesteps taken
    total_steps: u64,

    /// Most fruits eaten in a single episode
    best_fruits: u32,

    /// Window size for rolling averages
    window_size: usize,
}

impl SessionStats {
    /// Create a new tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_fruits: VecDeque::with_capacity(window_size),
            terminations: [0; TerminationReason::ALL.len()],
            total_episodes: 0,
            total_steps: 0,
            best_fruits: 0,
            window_size,
        }
    }

    /// Record a finished episode
    pub fn record_episode(&mut self, record: &EpisodeRecord) {
        Self::push_deque(
            &mut self.episode_rewards,
            record.sum_episode_rewards,
            self.window_size,
        );
        Self::push_deque(
            &mut self.episode_lengths,
            record.timesteps_survived,
            self.window_size,
        );
        Self::push_deque(
            &mut self.episode_fruits,
            record.fruits_eaten,
            self.window_size,
        );

        if let Some(reason) = record.termination_reason {
            if let Some(i) = TerminationReason::ALL.iter().position(|&r| r == reason) {
                self.terminations[i] += 1;
            }
        }

        self.total_episodes += 1;
        self.total_steps += u64::from(record.timesteps_survived);
        self.best_fruits = self.best_fruits.max(record.fruits_eaten);
    }

    /// Mean episode reward over the rolling window, 0.0 when empty
    pub fn mean_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f32>() / self.episode_rewards.len() as f32
        }
    }

    /// Mean episode length over the rolling window
    pub fn mean_length(&self) -> f32 {
        Self::mean_u32(&self.episode_lengths)
    }

    /// Mean fruits eaten per episode over the rolling window
    pub fn mean_fruits(&self) -> f32 {
        Self::mean_u32(&self.episode_fruits)
    }

    /// Population standard deviation of fruits eaten over the rolling window
    pub fn stddev_fruits(&self) -> f32 {
        if self.episode_fruits.is_empty() {
            return 0.0;
        }
        let mean = self.mean_fruits();
        let variance = self
            .episode_fruits
            .iter()
            .map(|&f| (f as f32 - mean).powi(2))
            .sum::<f32>()
            / self.episode_fruits.len() as f32;
        variance.sqrt()
    }

    /// Number of episodes that ended for `reason`
    pub fn terminations(&self, reason: TerminationReason) -> usize {
        TerminationReason::ALL
            .iter()
            .position(|&r| r == reason)
            .map_or(0, |i| self.terminations[i])
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn best_fruits(&self) -> u32 {
        self.best_fruits
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Fruits: {:.1} +/- {:.1} | Best: {} | Len: {:.1} | Wall: {} | Body: {} | Limit: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_reward(),
            self.mean_fruits(),
            self.stddev_fruits(),
            self.best_fruits,
            self.mean_length(),
            self.terminations(TerminationReason::HitWall),
            self.terminations(TerminationReason::HitOwnBody),
            self.terminations(TerminationReason::TimestepLimitExceeded),
        )
    }

    fn mean_u32(deque: &VecDeque<u32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().map(|&v| v as f32).sum::<f32>() / deque.len() as f32
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new(100)
    }
}
