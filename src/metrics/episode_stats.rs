//! Per-episode statistics kept by the environment

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Action;

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    HitWall,
    HitOwnBody,
    TimestepLimitExceeded,
}

impl TerminationReason {
    pub const ALL: [TerminationReason; 3] = [
        TerminationReason::HitWall,
        TerminationReason::HitOwnBody,
        TerminationReason::TimestepLimitExceeded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::HitWall => "hit_wall",
            TerminationReason::HitOwnBody => "hit_own_body",
            TerminationReason::TimestepLimitExceeded => "timestep_limit_exceeded",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters for the episode in progress
///
/// Reset by the environment at the start of every episode. Read access is
/// public; only the environment updates the counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeStatistics {
    timesteps_survived: u32,
    sum_episode_rewards: f32,
    fruits_eaten: u32,
    termination_reason: Option<TerminationReason>,
    action_counter: [u32; Action::ALL.len()],
}

impl EpisodeStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timesteps_survived(&self) -> u32 {
        self.timesteps_survived
    }

    pub fn sum_episode_rewards(&self) -> f32 {
        self.sum_episode_rewards
    }

    pub fn fruits_eaten(&self) -> u32 {
        self.fruits_eaten
    }

    pub fn termination_reason(&self) -> Option<TerminationReason> {
        self.termination_reason
    }

    /// How many timesteps were taken with `action` pending
    pub fn action_count(&self, action: Action) -> u32 {
        self.action_counter[action.index()]
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn record_timestep(&mut self, timestep: u32, action: Action, reward: f32) {
        self.timesteps_survived = timestep;
        self.sum_episode_rewards += reward;
        self.action_counter[action.index()] += 1;
    }

    pub(crate) fn record_fruit(&mut self) {
        self.fruits_eaten += 1;
    }

    pub(crate) fn record_termination(&mut self, reason: TerminationReason) {
        self.termination_reason = Some(reason);
    }

    /// Flat snapshot for logging or tabular output
    pub fn to_record(&self) -> EpisodeRecord {
        EpisodeRecord {
            timesteps_survived: self.timesteps_survived,
            sum_episode_rewards: self.sum_episode_rewards,
            fruits_eaten: self.fruits_eaten,
            termination_reason: self.termination_reason,
            maintain_direction: self.action_count(Action::MaintainDirection),
            turn_left: self.action_count(Action::TurnLeft),
            turn_right: self.action_count(Action::TurnRight),
            reverse_direction: self.action_count(Action::ReverseDirection),
        }
    }
}

/// One row of episode statistics with a fixed column set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub timesteps_survived: u32,
    pub sum_episode_rewards: f32,
    pub fruits_eaten: u32,
    pub termination_reason: Option<TerminationReason>,
    pub maintain_direction: u32,
    pub turn_left: u32,
    pub turn_right: u32,
    pub reverse_direction: u32,
}

impl EpisodeRecord {
    /// Column names, in the same order as [`EpisodeRecord::values`]
    pub fn columns() -> &'static [&'static str] {
        &[
            "timesteps_survived",
            "sum_episode_rewards",
            "fruits_eaten",
            "termination_reason",
            "maintain_direction",
            "turn_left",
            "turn_right",
            "reverse_direction",
        ]
    }

    /// Cell values as text; a missing termination reason is an empty cell
    pub fn values(&self) -> Vec<String> {
        vec![
            self.timesteps_survived.to_string(),
            self.sum_episode_rewards.to_string(),
            self.fruits_eaten.to_string(),
            self.termination_reason
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
            self.maintain_direction.to_string(),
            self.turn_left.to_string(),
            self.turn_right.to_string(),
            self.reverse_direction.to_string(),
        ]
    }
}
