//! Core game logic module for Snake
//!
//! This module contains the simulation engine without any I/O or rendering
//! dependencies: the field, the snake, and the environment that drives
//! episodes one timestep at a time.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{LevelConfig, Rewards};
pub use engine::{Environment, EpisodeState, TimestepResult};
pub use error::{GameError, GameResult};
pub use field::Field;
pub use snake::Snake;
pub use state::{CellType, Observation, Point};
