use cancel_list_errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// End of a voting period as read from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodEnd {
    At(DateTime<Utc>),
    Missing,
    Unparseable(String),
}

impl PeriodEnd {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::Missing,
            Some(value) => match DateTime::parse_from_rfc3339(value) {
                Ok(at) => Self::At(at.with_timezone(&Utc)),
                Err(_) => Self::Unparseable(value.to_string()),
            },
        }
    }

    pub fn at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(at) => Some(*at),
            Self::Missing | Self::Unparseable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub id: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: PeriodEnd,
    pub is_closed: bool,
}

impl Period {
    pub fn new(id: impl Into<String>, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            starts_at: Some(starts_at),
            ends_at: PeriodEnd::At(ends_at),
            is_closed: false,
        }
    }

    pub fn closed(mut self) -> Self {
        self.is_closed = true;
        self
    }

    /// Checks the closed flag, then the end time, in that order.
    /// Returns the end of the window when a vote at `now` is accepted.
    pub fn ensure_open(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
        if self.is_closed {
            return Err(AppError::VotingClosed);
        }

        let ends_at = match &self.ends_at {
            PeriodEnd::At(at) => *at,
            PeriodEnd::Missing => {
                return Err(AppError::MisconfiguredPeriod(
                    "current period has no end time".to_string(),
                ))
            }
            PeriodEnd::Unparseable(raw) => {
                return Err(AppError::MisconfiguredPeriod(format!(
                    "current period end time is invalid: {raw}"
                )))
            }
        };

        if now >= ends_at {
            return Err(AppError::PeriodEnded);
        }

        Ok(ends_at)
    }

    pub fn view(&self) -> PeriodView {
        PeriodView {
            id: self.id.clone(),
            is_closed: self.is_closed,
            ends_at: self.ends_at.at(),
        }
    }
}

/// The part of a period that clients get to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodView {
    pub id: String,
    pub is_closed: bool,
    pub ends_at: Option<DateTime<Utc>>,
}
