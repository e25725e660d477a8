use super::{Item, PeriodView, Standings};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// What the leaderboard page shows: ranked items plus the current period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub items: Vec<Item>,
    pub period: Option<PeriodView>,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standings(&self) -> Standings {
        Standings::from_ranked(self.items.clone())
    }

    pub fn voting_at(&self, now: DateTime<Utc>) -> Voting {
        Voting::evaluate(self.period.as_ref(), now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Voting {
    Open { remaining: Duration },
    Locked,
}

impl Voting {
    /// Advisory only. The server re-checks the period when a vote arrives.
    pub fn evaluate(period: Option<&PeriodView>, now: DateTime<Utc>) -> Self {
        let Some(period) = period else {
            return Self::Locked;
        };
        if period.is_closed {
            return Self::Locked;
        }
        match period.ends_at {
            Some(ends_at) if ends_at > now => Self::Open {
                remaining: ends_at - now,
            },
            _ => Self::Locked,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }
}

/// Client-side page state, re-evaluated on every countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardState {
    Loading,
    Ready(Voting),
    Error(String),
}

impl BoardState {
    pub fn evaluate<E: ToString>(
        board: Option<&Result<Board, E>>,
        now: DateTime<Utc>,
    ) -> Self {
        match board {
            None => Self::Loading,
            Some(Ok(board)) => Self::Ready(board.voting_at(now)),
            Some(Err(err)) => Self::Error(err.to_string()),
        }
    }

    pub fn voting_locked(&self) -> bool {
        !matches!(self, Self::Ready(Voting::Open { .. }))
    }

    pub fn banner(&self) -> String {
        match self {
            Self::Loading => "Loading…".to_string(),
            Self::Ready(Voting::Open { remaining }) => {
                format!("Voting ends in: {}", format_remaining(*remaining))
            }
            Self::Ready(Voting::Locked) => {
                "Voting is closed. Come back for the next period.".to_string()
            }
            Self::Error(message) => format!("Error: {message}"),
        }
    }
}

pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let mins = (total % 3_600) / 60;
    let secs = total % 60;

    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m {secs}s")
    }
}
