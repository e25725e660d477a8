use crate::application::LeaderboardSource;
use crate::domain::Item;
use cancel_list_errors::AppError;
use sea_orm::prelude::DateTimeUtc;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, Statement};
use std::sync::Arc;
use uuid::Uuid;

const LEADERBOARD_SQL: &str =
    "SELECT id, title, category, votes, created_at FROM leaderboard($1)";

#[derive(Debug, FromQueryResult)]
struct LeaderboardRow {
    id: Uuid,
    title: String,
    category: Option<String>,
    votes: i64,
    created_at: Option<DateTimeUtc>,
}

impl From<LeaderboardRow> for Item {
    fn from(row: LeaderboardRow) -> Self {
        Item::new(row.id.to_string(), row.title, u64::try_from(row.votes).unwrap_or(0))
            .with_category(row.category)
            .with_created_at(row.created_at)
    }
}

#[derive(Clone)]
pub struct LeaderboardRepository {
    db: Arc<DatabaseConnection>,
}

impl LeaderboardRepository {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    pub async fn for_period(&self, period_id: Uuid) -> Result<Vec<Item>, DbErr> {
        let rows = LeaderboardRow::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            LEADERBOARD_SQL,
            [period_id.into()],
        ))
        .all(self.db.as_ref())
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }
}

impl LeaderboardSource for LeaderboardRepository {
    async fn ranked_items(&self, period_id: &str) -> Result<Vec<Item>, AppError> {
        let period_id = Uuid::parse_str(period_id)
            .map_err(|_| AppError::Storage(format!("invalid period id: {period_id}")))?;
        self.for_period(period_id)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{MockDatabase, Value};
    use std::collections::BTreeMap;

    fn row(id: Uuid, title: &str, category: Option<&str>, votes: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", id.into()),
            ("title", title.to_string().into()),
            ("category", category.map(str::to_string).into()),
            ("votes", votes.into()),
            ("created_at", Some(Utc::now()).into()),
        ])
    }

    #[tokio::test]
    async fn test_rows_map_to_items() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                row(first, "Socks with sandals", Some("Fashion"), 4),
                row(second, "Reply all", None, 1),
            ]])
            .into_connection();

        let items = LeaderboardRepository::new(db)
            .ranked_items(&Uuid::new_v4().to_string())
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, first.to_string());
        assert_eq!(items[0].category.as_deref(), Some("Fashion"));
        assert_eq!(items[0].votes, 4);
        assert_eq!(items[1].category, None);
    }

    #[tokio::test]
    async fn test_invalid_period_id_is_server_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = LeaderboardRepository::new(db)
            .ranked_items("p1")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_query_failure_is_storage_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("function leaderboard does not exist".into())])
            .into_connection();
        let err = LeaderboardRepository::new(db)
            .ranked_items(&Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
