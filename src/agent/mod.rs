//! Agents that play the Snake environment
//!
//! An agent sees the grid snapshot and the reward of the previous step and
//! answers with an [`Action`]. The environment never depends on a concrete
//! agent; learned policies live outside this crate and plug in through the
//! same trait.

pub mod random;
pub mod scripted;

pub use random::RandomAgent;
pub use scripted::ScriptedAgent;

use crate::game::{Action, Observation};

/// Decision-maker driving the snake
pub trait Agent {
    /// Reset any per-episode state
    fn begin_episode(&mut self) {}

    /// Choose the next action from the current observation and the reward
    /// received for the previous step
    fn act(&mut self, observation: &Observation, reward: f32) -> Action;

    /// Called once the episode has ended
    fn end_episode(&mut self) {}
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn begin_episode(&mut self) {
        (**self).begin_episode();
    }

    fn act(&mut self, observation: &Observation, reward: f32) -> Action {
        (**self).act(observation, reward)
    }

    fn end_episode(&mut self) {
        (**self).end_episode();
    }
}
