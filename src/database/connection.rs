use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::BotError;

// 5 base connections plus 10 overflow.
const MAX_CONNECTIONS: u32 = 15;

/// Owns the connection pool. Constructed once at startup and passed into the
/// dispatcher and the reminder service; closed exactly once during shutdown.
#[derive(Clone)]
pub struct DatabaseManager {
    pub pool: SqlitePool,
}

impl DatabaseManager {
    /// Opens a bounded pool. Connections are liveness-checked before each
    /// acquire and enforce foreign keys so employee deletion cascades onto
    /// duties.
    pub async fn new(database_url: &str) -> Result<Self, BotError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .test_before_acquire(true)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), BotError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Disposes the pool so a fresh manager can be constructed afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
