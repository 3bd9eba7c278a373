//! Rolling episode statistics
//!
//! Tracks reward, length and score of recently finished episodes so training
//! progress can be summarised in log lines and the HUD.

use std::collections::VecDeque;

/// Episode statistics with rolling averages
///
/// # Example
///
/// ```rust
/// use qsnake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(15.5, 150, 5);
///
/// assert_eq!(stats.total_episodes(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f64>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<u32>,

    /// Episode scores (food eaten) (rolling window)
    episode_scores: VecDeque<u32>,

    /// Total number of episodes recorded
    total_episodes: usize,

    /// Total number of ticks across recorded episodes
    total_steps: u64,

    /// Highest score of any recorded episode
    best_score: u32,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a new tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record_episode(&mut self, reward: f64, length: u32, score: u32) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += u64::from(length);
        self.best_score = self.best_score.max(score);
    }

    /// Mean episode reward over the rolling window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f64 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f64>() / self.episode_rewards.len() as f64
        }
    }

    pub fn mean_episode_length(&self) -> f64 {
        Self::mean_u32(&self.episode_lengths)
    }

    pub fn mean_episode_score(&self) -> f64 {
        Self::mean_u32(&self.episode_scores)
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Len: {:.1} | Best: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.mean_episode_length(),
            self.best_score,
        )
    }

    fn mean_u32(deque: &VecDeque<u32>) -> f64 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().map(|&v| f64::from(v)).sum::<f64>() / deque.len() as f64
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let stats = TrainingStats::new(100);
        assert_eq!(stats.window_size(), 100);
        assert_eq!(stats.total_episodes(), 0);
        assert_eq!(stats.total_steps(), 0);
    }

    #[test]
    fn test_record_episode() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(10.0, 50, 3);

        assert_eq!(stats.total_episodes(), 1);
        assert_eq!(stats.total_steps(), 50);
        assert!((stats.mean_episode_reward() - 10.0).abs() < 1e-9);
        assert!((stats.mean_episode_length() - 50.0).abs() < 1e-9);
        assert!((stats.mean_episode_score() - 3.0).abs() < 1e-9);
        assert_eq!(stats.best_score(), 3);
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = TrainingStats::new(3);

        stats.record_episode(1.0, 10, 1);
        stats.record_episode(2.0, 20, 2);
        stats.record_episode(3.0, 30, 3);
        assert!((stats.mean_episode_reward() - 2.0).abs() < 1e-9);

        // A 4th episode evicts the first
        stats.record_episode(4.0, 40, 0);

        assert_eq!(stats.total_episodes(), 4);
        assert!((stats.mean_episode_reward() - 3.0).abs() < 1e-9);
        // Best score survives eviction
        assert_eq!(stats.best_score(), 3);
    }

    #[test]
    fn test_total_steps_accumulate() {
        let mut stats = TrainingStats::new(2);

        stats.record_episode(1.0, 10, 1);
        stats.record_episode(2.0, 20, 2);
        stats.record_episode(3.0, 30, 3);

        assert_eq!(stats.total_steps(), 60);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(15.5, 150, 5);

        let summary = stats.format_summary();
        assert!(summary.contains("Episodes: 1"));
        assert!(summary.contains("Steps: 150"));
        assert!(summary.contains("Reward: 15.50"));
        assert!(summary.contains("Score: 5.00"));
        assert!(summary.contains("Len: 150.0"));
        assert!(summary.contains("Best: 5"));
    }

    #[test]
    fn test_empty_stats() {
        let stats = TrainingStats::new(100);

        assert_eq!(stats.mean_episode_reward(), 0.0);
        assert_eq!(stats.mean_episode_length(), 0.0);
        assert_eq!(stats.mean_episode_score(), 0.0);
    }
}
