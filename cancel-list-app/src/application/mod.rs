mod get_leaderboard;
mod record_vote;
mod resolve_period;

#[cfg(test)]
pub(crate) mod memory;

pub use get_leaderboard::GetLeaderboard;
pub use record_vote::RecordVote;
pub use resolve_period::ResolvePeriod;

use crate::domain::{Item, Period, Vote};
use cancel_list_errors::AppError;
use std::future::Future;

/// Backend view of "which period is current". `Ok(None)` means no period is configured.
pub trait PeriodSource: Send + Sync {
    fn current_period(&self) -> impl Future<Output = Result<Option<Period>, AppError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The (period, voter) pair already had a vote.
    Duplicate,
}

pub trait VoteStore: Send + Sync {
    fn insert_vote(&self, vote: &Vote) -> impl Future<Output = Result<InsertOutcome, AppError>> + Send;
}

/// Per-period vote aggregate. Counts are computed on every call.
pub trait LeaderboardSource: Send + Sync {
    fn ranked_items(&self, period_id: &str) -> impl Future<Output = Result<Vec<Item>, AppError>> + Send;
}
