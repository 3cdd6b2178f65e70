pub mod episode_stats;
pub mod session_stats;

pub use episode_stats::{EpisodeRecord, EpisodeStatistics, TerminationReason};
pub use session_stats::SessionStats;
