//! Reinforcement learning interface for the Snake game
//!
//! Provides:
//! - 4-channel grid observations (head, body, fruit, walls)
//! - Gym-style environment with index-based actions

pub mod environment;
pub mod observation;

pub use environment::{action_from_index, GymEnvironment};
pub use observation::{create_observation, observation_shape, OBSERVATION_CHANNELS};
