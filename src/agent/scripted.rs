use super::Agent;
use crate::game::{Action, Observation};

/// Replays a fixed action sequence, then keeps maintaining direction
///
/// The script restarts from the beginning on every episode.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    script: Vec<Action>,
    cursor: usize,
}

impl ScriptedAgent {
    pub fn new(script: Vec<Action>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Parse a script of one-letter action codes such as `"MMLRR"`
    ///
    /// Whitespace is skipped; returns the first unknown code as the error.
    pub fn parse(codes: &str) -> Result<Self, char> {
        let script = codes
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Action::from_code(c).ok_or(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(script))
    }

    /// Actions still to be replayed this episode
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.cursor)
    }
}

impl Agent for ScriptedAgent {
    fn begin_episode(&mut self) {
        self.cursor = 0;
    }

    fn act(&mut self, _observation: &Observation, _reward: f32) -> Action {
        let action = self.script.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        action
    }
}
