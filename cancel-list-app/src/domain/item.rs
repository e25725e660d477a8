use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A leaderboard entry. `votes` is the count for one period, computed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub votes: u64,
    #[serde(skip)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>, votes: u64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: None,
            votes,
            created_at: None,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    /// "3 votes", "1 vote", prefixed with the category when there is one.
    pub fn subtitle(&self) -> String {
        let plural = if self.votes == 1 { "" } else { "s" };
        match self.category.as_deref() {
            Some(category) if !category.is_empty() => {
                format!("{category} • {} vote{plural}", self.votes)
            }
            _ => format!("{} vote{plural}", self.votes),
        }
    }
}

/// Orders by votes descending, then oldest first, then id.
pub fn rank_items(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then_with(|| created_order(a.created_at, b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    items
}

// Unknown creation times sort after known ones.
fn created_order(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
