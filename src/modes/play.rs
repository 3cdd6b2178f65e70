//! Headless play mode
//!
//! Runs an agent against the environment for a number of episodes, logging
//! each finished episode and keeping session-wide statistics.
//!
//! # Example
//!
//! ```rust
//! use snake_env::agent::RandomAgent;
//! use snake_env::game::{Environment, LevelConfig};
//! use snake_env::modes::{PlayConfig, PlayMode};
//!
//! let env = Environment::with_seed(LevelConfig::default(), 7);
//! let mut play = PlayMode::new(env, RandomAgent::new(7), PlayConfig::new(3));
//! let stats = play.run()?;
//! assert_eq!(stats.total_episodes(), 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use tracing::info;

use crate::agent::Agent;
use crate::game::Environment;
use crate::metrics::{EpisodeRecord, SessionStats};

/// Configuration for play mode
#[derive(Debug, Clone)]
pub struct PlayConfig {
    /// Number of episodes to play
    pub num_episodes: usize,

    /// Log a session summary every N episodes (0 disables it)
    pub log_frequency: usize,

    /// Episodes kept for rolling averages
    pub window_size: usize,
}

impl PlayConfig {
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            log_frequency: 100,
            window_size: 100,
        }
    }
}

/// Plays episodes of an agent against an environment
pub struct PlayMode<A: Agent> {
    env: Environment,
    agent: A,
    stats: SessionStats,
    records: Vec<EpisodeRecord>,
    config: PlayConfig,
}

impl<A: Agent> PlayMode<A> {
    pub fn new(env: Environment, agent: A, config: PlayConfig) -> Self {
        Self {
            env,
            agent,
            stats: SessionStats::new(config.window_size),
            records: Vec::with_capacity(config.num_episodes),
            config,
        }
    }

    /// Play every configured episode
    pub fn run(&mut self) -> Result<&SessionStats> {
        for episode in 0..self.config.num_episodes {
            let record = self
                .run_episode()
                .with_context(|| format!("Episode {} failed", episode + 1))?;

            info!(
                episode = episode + 1,
                of = self.config.num_episodes,
                timesteps = record.timesteps_survived,
                fruits = record.fruits_eaten,
                reward = record.sum_episode_rewards,
                reason = record
                    .termination_reason
                    .map(|r| r.as_str())
                    .unwrap_or("none"),
                "Episode finished"
            );

            if self.config.log_frequency > 0 && (episode + 1) % self.config.log_frequency == 0 {
                info!("{}", self.stats.format_summary());
            }
        }

        Ok(&self.stats)
    }

    /// Play a single episode to its end and record it
    pub fn run_episode(&mut self) -> Result<EpisodeRecord> {
        let mut timestep = self.env.new_episode()?;
        self.agent.begin_episode();

        while !timestep.is_episode_end {
            let action = self.agent.act(&timestep.observation, timestep.reward);
            self.env.choose_action(action);
            timestep = self.env.timestep()?;
        }

        self.agent.end_episode();

        let record = self.env.stats().to_record();
        self.stats.record_episode(&record);
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Records of every episode played so far, oldest first
    pub fn records(&self) -> &[EpisodeRecord] {
        &self.records
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }
}
