use super::PeriodView;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub item_id: String,
    pub period_id: String,
    pub voter_key: String,
}

impl Vote {
    pub fn new(item_id: impl Into<String>, period_id: impl Into<String>, voter_key: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            period_id: period_id.into(),
            voter_key: voter_key.into(),
        }
    }
}

/// Outcome of a vote that passed validation. A repeat vote in the same
/// period is reported through `already_voted`, not as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResult {
    pub already_voted: bool,
    pub period: PeriodView,
}

impl VoteResult {
    pub fn message(&self) -> &'static str {
        if self.already_voted {
            "1 vote per week!"
        } else {
            "Vote counted!"
        }
    }
}
