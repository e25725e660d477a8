use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("Missing itemId")]
    MissingItem,

    #[error("Unknown itemId: {0}")]
    InvalidItem(String),

    #[error("No active voting period.")]
    NoActivePeriod,

    #[error("Voting is closed for this period.")]
    VotingClosed,

    #[error("Voting for this week has ended.")]
    PeriodEnded,

    #[error("Current period is misconfigured: {0}")]
    MisconfiguredPeriod(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Coarse classification used for status codes and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ClientInput,
    VotingClosed,
    ServerConfig,
    Storage,
}

impl FromStr for AppError {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("Missing itemId") {
            Ok(AppError::MissingItem)
        } else if let Some(rest) = s.strip_prefix("Unknown itemId: ") {
            Ok(AppError::InvalidItem(rest.to_string()))
        } else if s.starts_with("No active voting period") {
            Ok(AppError::NoActivePeriod)
        } else if s.starts_with("Voting is closed") {
            Ok(AppError::VotingClosed)
        } else if s.starts_with("Voting for this week has ended") {
            Ok(AppError::PeriodEnded)
        } else if let Some(rest) = s.strip_prefix("Current period is misconfigured: ") {
            Ok(AppError::MisconfiguredPeriod(rest.to_string()))
        } else if let Some(rest) = s.strip_prefix("Storage error: ") {
            Ok(AppError::Storage(rest.to_string()))
        } else {
            Ok(AppError::Storage(s.to_string()))
        }
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingItem | Self::InvalidItem(_) => ErrorKind::ClientInput,
            Self::NoActivePeriod | Self::VotingClosed | Self::PeriodEnded => {
                ErrorKind::VotingClosed
            }
            Self::MisconfiguredPeriod(_) => ErrorKind::ServerConfig,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::ClientInput => 400,
            ErrorKind::VotingClosed => 403,
            ErrorKind::ServerConfig | ErrorKind::Storage => 500,
        }
    }

    /// Message safe to show in the page banner.
    pub fn user_message(&self) -> &str {
        match self {
            Self::MissingItem | Self::InvalidItem(_) => "That item can't be voted on.",
            Self::NoActivePeriod | Self::VotingClosed | Self::PeriodEnded => {
                "Voting is closed right now."
            }
            Self::MisconfiguredPeriod(_) | Self::Storage(_) => {
                "Something went wrong on our side. Try again later."
            }
        }
    }
}

#[cfg(feature = "ssr")]
mod ssr_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        error: String,
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorResponse { error: self.to_string() })).into_response()
        }
    }
}
