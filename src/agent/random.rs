use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::Agent;
use crate::game::{Action, Observation};

/// Picks uniformly from a fixed action set every step
#[derive(Debug, Clone)]
pub struct RandomAgent {
    actions: Vec<Action>,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    /// Random agent over [`Action::CORE`]
    pub fn new(seed: u64) -> Self {
        Self::with_actions(Action::CORE.to_vec(), seed)
    }

    /// Random agent over a custom action set; an empty set always maintains direction
    pub fn with_actions(actions: Vec<Action>, seed: u64) -> Self {
        Self {
            actions,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, _observation: &Observation, _reward: f32) -> Action {
        self.actions
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
    }
}
