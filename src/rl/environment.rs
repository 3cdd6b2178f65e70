use anyhow::Result;

use super::observation::create_observation;
use crate::game::{Action, Environment, LevelConfig};

/// Snake environment with a gym-style interface
///
/// Wraps the game [`Environment`] and provides:
/// - Flat `f32` observations (4-channel grid, see [`create_observation`])
/// - Discrete action space (3 actions: Maintain, TurnLeft, TurnRight)
/// - Standard RL interface (reset, step)
#[derive(Debug)]
pub struct GymEnvironment {
    env: Environment,
}

impl GymEnvironment {
    /// Create a new environment and start its first episode
    pub fn new(level: LevelConfig, seed: u64) -> Result<Self> {
        let mut env = Environment::with_seed(level, seed);
        env.new_episode()?;
        Ok(Self { env })
    }

    /// Reseed fruit placement; takes effect from the next fruit
    pub fn seed(&mut self, seed: u64) {
        self.env.seed(seed);
    }

    /// Reset the environment and return the initial observation
    pub fn reset(&mut self) -> Result<Vec<f32>> {
        let result = self.env.new_episode()?;
        Ok(create_observation(&result.observation))
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Maintain direction
    /// - 1: Turn left
    /// - 2: Turn right
    ///
    /// Returns: (observation, reward, done)
    pub fn step(&mut self, action_idx: usize) -> Result<(Vec<f32>, f32, bool)> {
        self.env.choose_action(action_from_index(action_idx));
        let result = self.env.timestep()?;
        Ok((
            create_observation(&result.observation),
            result.reward,
            result.is_episode_end,
        ))
    }

    /// Current observation without stepping
    pub fn observation(&self) -> Result<Vec<f32>> {
        Ok(create_observation(&self.env.observation()?))
    }

    /// Size of the discrete action space
    pub fn num_actions(&self) -> usize {
        self.env.num_actions()
    }

    /// Underlying game environment (for statistics and debugging)
    pub fn inner(&self) -> &Environment {
        &self.env
    }
}

/// Convert a discrete action index to a game [`Action`]
///
/// - 0 → MaintainDirection
/// - 1 → TurnLeft
/// - 2 → TurnRight
/// - other → MaintainDirection
pub fn action_from_index(idx: usize) -> Action {
    Action::CORE.get(idx).copied().unwrap_or_default()
}
