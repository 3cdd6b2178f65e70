use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Reward values handed out by the environment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    /// Multiplied by the snake length after eating a fruit
    pub ate_fruit: f32,
    /// Reward for an ordinary step (usually zero or slightly negative)
    pub timestep: f32,
    /// Reward for the step on which the snake dies; replaces the step reward
    pub died: f32,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            ate_fruit: 1.0,
            timestep: 0.0,
            died: -1.0,
        }
    }
}

/// Level definition: the map plus the rules of an episode
///
/// Deserializes from the JSON level format:
///
/// ```json
/// {
///   "field": ["#####", "#.S.#", "#...#", "#...#", "#####"],
///   "initial_snake_length": 2,
///   "max_step_limit": 1000,
///   "rewards": { "ate_fruit": 1, "timestep": 0, "died": -1 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Rows of the level map, top to bottom
    pub field: Vec<String>,
    /// Length of the snake at the start of an episode
    #[serde(default = "default_initial_snake_length")]
    pub initial_snake_length: usize,
    pub rewards: Rewards,
    /// Episodes end after this many timesteps
    #[serde(default = "default_max_step_limit")]
    pub max_step_limit: u32,
}

fn default_initial_snake_length() -> usize {
    3
}

fn default_max_step_limit() -> u32 {
    1000
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::blank(10)
    }
}

impl LevelConfig {
    /// Walled square level with nothing inside but the snake head marker
    ///
    /// The head sits at `(size / 2, size / 2 - 1)`. Sizes below 5 are raised
    /// to 5 so a default-length snake always fits.
    ///
    /// ```rust
    /// use snake_env::game::LevelConfig;
    ///
    /// let level = LevelConfig::blank(5);
    /// assert_eq!(level.field, ["#####", "#.S.#", "#...#", "#...#", "#####"]);
    /// ```
    pub fn blank(size: usize) -> Self {
        let size = size.max(5);
        let head = (size / 2, size / 2 - 1);
        let field = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| {
                        if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                            '#'
                        } else if (x, y) == head {
                            'S'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            field,
            initial_snake_length: default_initial_snake_length(),
            rewards: Rewards::default(),
            max_step_limit: default_max_step_limit(),
        }
    }

    /// Parse a level definition from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Failed to parse level definition")?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Load a level definition from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read level file: {:?}", path))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid level file: {:?}", path))
    }

    /// Check the values the map parser does not cover
    pub fn validate(&self) -> Result<(), String> {
        if self.field.is_empty() {
            return Err("field must contain at least one row".to_string());
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        if self.max_step_limit == 0 {
            return Err("max_step_limit must be at least 1".to_string());
        }

        let rewards = [
            ("ate_fruit", self.rewards.ate_fruit),
            ("timestep", self.rewards.timestep),
            ("died", self.rewards.died),
        ];
        for (name, value) in rewards {
            if !value.is_finite() {
                return Err(format!("rewards.{} must be finite, got {}", name, value));
            }
        }

        Ok(())
    }
}
