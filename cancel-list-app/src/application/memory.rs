//! In-memory backend for service tests.

use super::{InsertOutcome, LeaderboardSource, PeriodSource, VoteStore};
use crate::domain::{Item, Period, Vote};
use cancel_list_errors::AppError;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    period: Option<Period>,
    period_error: Option<AppError>,
    items: Vec<Item>,
    votes: Vec<Vote>,
    fail_writes: bool,
    fail_leaderboard: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn with_period(period: Period) -> Self {
        let store = Self::default();
        store.state.lock().unwrap().period = Some(period);
        store
    }

    pub fn add_item(&self, item: Item) {
        self.state.lock().unwrap().items.push(item);
    }

    pub fn fail_period_reads(&self, err: AppError) {
        self.state.lock().unwrap().period_error = Some(err);
    }

    pub fn fail_writes(&self) {
        self.state.lock().unwrap().fail_writes = true;
    }

    pub fn fail_leaderboard_reads(&self) {
        self.state.lock().unwrap().fail_leaderboard = true;
    }

    pub fn vote_count(&self) -> usize {
        self.state.lock().unwrap().votes.len()
    }
}

impl PeriodSource for MemoryStore {
    async fn current_period(&self) -> Result<Option<Period>, AppError> {
        let state = self.state.lock().unwrap();
        match &state.period_error {
            Some(err) => Err(err.clone()),
            None => Ok(state.period.clone()),
        }
    }
}

impl VoteStore for MemoryStore {
    async fn insert_vote(&self, vote: &Vote) -> Result<InsertOutcome, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(AppError::Storage("write rejected".into()));
        }
        if state
            .votes
            .iter()
            .any(|v| v.period_id == vote.period_id && v.voter_key == vote.voter_key)
        {
            return Ok(InsertOutcome::Duplicate);
        }
        if !state.items.iter().any(|i| i.id == vote.item_id) {
            return Err(AppError::InvalidItem(vote.item_id.clone()));
        }
        state.votes.push(vote.clone());
        Ok(InsertOutcome::Inserted)
    }
}

impl LeaderboardSource for MemoryStore {
    async fn ranked_items(&self, period_id: &str) -> Result<Vec<Item>, AppError> {
        let state = self.state.lock().unwrap();
        if state.fail_leaderboard {
            return Err(AppError::Storage("aggregate failed".into()));
        }
        Ok(state
            .items
            .iter()
            .map(|item| {
                let votes = state
                    .votes
                    .iter()
                    .filter(|v| v.period_id == period_id && v.item_id == item.id)
                    .count();
                Item {
                    votes: votes as u64,
                    ..item.clone()
                }
            })
            .collect())
    }
}
