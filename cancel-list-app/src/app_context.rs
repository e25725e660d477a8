use crate::application::{GetLeaderboard, RecordVote, ResolvePeriod};
use crate::config::Config;
use crate::infrastructure::db::{
    create_connection, run_migrations, LeaderboardRepository, PeriodRepository, VoteRepository,
};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub record_vote: Arc<RecordVote<PeriodRepository, VoteRepository>>,
    pub get_leaderboard: Arc<GetLeaderboard<PeriodRepository, LeaderboardRepository>>,
    pub periods: PeriodRepository,
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let db = Arc::new(db);
        let periods = PeriodRepository::new(db.clone());

        Self {
            record_vote: Arc::new(RecordVote::new(
                ResolvePeriod::new(periods.clone()),
                VoteRepository::new(db.clone()),
            )),
            get_leaderboard: Arc::new(GetLeaderboard::new(
                ResolvePeriod::new(periods.clone()),
                LeaderboardRepository::new(db),
            )),
            periods,
            config: Arc::new(config),
        }
    }

    /// Connects, migrates and runs the startup rollover as configured.
    pub async fn connect(config: Config) -> Result<Self, DbErr> {
        let db = create_connection(&config.database_url).await?;
        tracing::info!("Connected to database");

        if config.run_migrations {
            run_migrations(&db).await?;
        }

        let ctx = Self::new(db, config);
        if ctx.config.ensure_weekly_period {
            ctx.periods.ensure_week(chrono::Utc::now()).await?;
        }

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VoterKey;
    use cancel_list_errors::AppError;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_context_shares_one_mock_connection() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<BTreeMap<&str, Value>>::new(),
                Vec::<BTreeMap<&str, Value>>::new(),
            ])
            .into_connection();
        let config = Config {
            database_url: "postgres://unused".into(),
            run_migrations: false,
            ensure_weekly_period: false,
            cookie_secure: false,
            site_url: None,
        };

        let ctx = AppContext::new(db, config);
        let copy = ctx.clone();

        let board = ctx.get_leaderboard.board().await.unwrap();
        assert!(board.items.is_empty());

        let voter = VoterKey::parse("v1").unwrap();
        let err = copy.record_vote.execute(Some("i1"), &voter).await.unwrap_err();
        assert_eq!(err, AppError::NoActivePeriod);
    }
}
