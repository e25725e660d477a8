use super::entities::vote;
use crate::application::{InsertOutcome, VoteStore};
use crate::domain::Vote;
use cancel_list_errors::AppError;
use sea_orm::{entity::*, DatabaseConnection, DbErr, SqlErr};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct VoteRepository {
    db: Arc<DatabaseConnection>,
}

impl VoteRepository {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    pub async fn create(
        &self,
        item_id: Uuid,
        period_id: Uuid,
        voter_key: &str,
    ) -> Result<vote::Model, DbErr> {
        let active = vote::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_id: Set(item_id),
            period_id: Set(period_id),
            voter_key: Set(voter_key.to_string()),
            created_at: Set(Some(chrono::Utc::now())),
        };
        active.insert(self.db.as_ref()).await
    }
}

impl VoteStore for VoteRepository {
    async fn insert_vote(&self, vote: &Vote) -> Result<InsertOutcome, AppError> {
        let item_id = Uuid::parse_str(&vote.item_id)
            .map_err(|_| AppError::InvalidItem(vote.item_id.clone()))?;
        let period_id = Uuid::parse_str(&vote.period_id).map_err(|_| {
            AppError::MisconfiguredPeriod(format!("period id is not a uuid: {}", vote.period_id))
        })?;

        match self.create(item_id, period_id, &vote.voter_key).await {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) => insert_failure(e.sql_err(), &vote.item_id, e.to_string()),
        }
    }
}

/// Only constraint violations carry a domain meaning; anything else is storage.
fn insert_failure(
    sql_err: Option<SqlErr>,
    item_id: &str,
    message: String,
) -> Result<InsertOutcome, AppError> {
    match sql_err {
        // votes_one_per_voter_per_period
        Some(SqlErr::UniqueConstraintViolation(_)) => Ok(InsertOutcome::Duplicate),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            Err(AppError::InvalidItem(item_id.to_string()))
        }
        _ => Err(AppError::Storage(message)),
    }
}
