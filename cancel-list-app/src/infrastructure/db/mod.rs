pub mod entities;
mod leaderboard_repository;
mod period_repository;
mod vote_repository;

pub use leaderboard_repository::LeaderboardRepository;
pub use period_repository::PeriodRepository;
pub use vote_repository::VoteRepository;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use std::time::Duration;

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Applies the schema. Every statement is idempotent, so this runs on each start.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Function bodies contain semicolons; the file is sent in one piece.
    let migration = include_str!("../../../../migrations/001_initial.sql");
    db.execute_unprepared(migration).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
