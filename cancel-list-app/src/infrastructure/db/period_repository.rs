use super::entities::{period, Period as PeriodEntity};
use crate::application::PeriodSource;
use crate::domain::{utc_week_range, Period, PeriodEnd};
use cancel_list_errors::AppError;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::*, query::*, DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, Statement,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

const CURRENT_PERIOD_SQL: &str = "SELECT to_jsonb(p) AS period FROM current_period() p";

#[derive(Debug, FromQueryResult)]
struct CurrentPeriodRow {
    period: serde_json::Value,
}

/// Row shape as the backend may return it. Older schemas spell the
/// columns `start_at` / `end_at`.
#[derive(Debug, Deserialize)]
struct PeriodRecord {
    id: serde_json::Value,
    is_closed: Option<bool>,
    starts_at: Option<String>,
    start_at: Option<String>,
    ends_at: Option<String>,
    end_at: Option<String>,
}

impl PeriodRecord {
    fn into_period(self) -> Period {
        let id = match self.id {
            serde_json::Value::String(id) => id,
            other => other.to_string(),
        };
        let starts_at = self
            .starts_at
            .or(self.start_at)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|at| at.with_timezone(&Utc));

        Period {
            id,
            starts_at,
            ends_at: PeriodEnd::parse(self.ends_at.or(self.end_at).as_deref()),
            is_closed: self.is_closed.unwrap_or(false),
        }
    }
}

fn period_from_json(value: serde_json::Value) -> Result<Period, AppError> {
    serde_json::from_value::<PeriodRecord>(value)
        .map(PeriodRecord::into_period)
        .map_err(|e| AppError::MisconfiguredPeriod(format!("unreadable period row: {e}")))
}

#[derive(Clone)]
pub struct PeriodRepository {
    db: Arc<DatabaseConnection>,
}

impl PeriodRepository {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    pub async fn find_current(&self) -> Result<Option<serde_json::Value>, DbErr> {
        let row = CurrentPeriodRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            CURRENT_PERIOD_SQL,
        ))
        .one(self.db.as_ref())
        .await?;
        Ok(row.map(|r| r.period))
    }

    /// Closes periods whose end has passed and makes sure the week
    /// containing `now` has a period.
    pub async fn ensure_week(&self, now: DateTime<Utc>) -> Result<(), DbErr> {
        let closed = PeriodEntity::update_many()
            .col_expr(period::Column::IsClosed, Expr::value(true))
            .filter(period::Column::IsClosed.eq(false))
            .filter(period::Column::EndsAt.lte(now))
            .exec(self.db.as_ref())
            .await?;
        if closed.rows_affected > 0 {
            tracing::info!("Closed {} ended period(s)", closed.rows_affected);
        }

        let (starts_at, ends_at) = utc_week_range(now);
        let existing = PeriodEntity::find()
            .filter(period::Column::StartsAt.eq(starts_at))
            .one(self.db.as_ref())
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        let active = period::ActiveModel {
            id: Set(Uuid::new_v4()),
            starts_at: Set(starts_at),
            ends_at: Set(ends_at),
            is_closed: Set(false),
            created_at: Set(Some(Utc::now())),
        };
        let created = active.insert(self.db.as_ref()).await?;
        tracing::info!(
            "Created period {} ({} to {})",
            created.id,
            created.starts_at,
            created.ends_at
        );
        Ok(())
    }
}

impl PeriodSource for PeriodRepository {
    async fn current_period(&self) -> Result<Option<Period>, AppError> {
        let row = self
            .find_current()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        row.map(period_from_json).transpose()
    }
}
