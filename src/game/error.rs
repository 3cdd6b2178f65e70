use thiserror::Error;

/// Errors raised while building a level or running an episode
///
/// All of these point at a misconfigured level or a misused engine; none of
/// them is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid level cell symbol '{symbol}' at ({x}, {y})")]
    InvalidLevelSymbol { symbol: char, x: usize, y: usize },

    #[error("level row {row} has {found} cells, expected {expected}")]
    RaggedLevelRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid level configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("level map is empty")]
    EmptyLevel,

    #[error("initial snake position not specified on the level map")]
    NoSnakeOnLevel,

    #[error("a snake of length {length} does not fit below the head marker")]
    SnakeDoesNotFit { length: usize },

    #[error("no empty cells left to place a fruit")]
    NoEmptyCellsAvailable,

    #[error("no episode in progress; call new_episode() first")]
    EpisodeNotStarted,
}

pub type GameResult<T> = Result<T, GameError>;
