//! Snake Env - A Snake simulation engine for reinforcement learning
//!
//! This library provides:
//! - Core game logic: field, snake, level configs and the episode engine (game module)
//! - Per-episode and per-session statistics (metrics module)
//! - Simple baseline agents (agent module)
//! - A gym-style wrapper with tensor observations (rl module)
//! - A headless mode that plays agents through many episodes (modes module)

pub mod agent;
pub mod game;
pub mod metrics;
pub mod modes;
pub mod rl;
