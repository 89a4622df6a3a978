use chrono::NaiveDate;
use thiserror::Error;

/// Error taxonomy for the bot.
///
/// Handler-local variants (validation, permission, not-found, conflict) are
/// turned into user-facing replies at the dispatch boundary; database and
/// Telegram errors bubble up to be logged there. Only `Config` may terminate
/// the process, and only during startup.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error("This command is only available to administrators.")]
    Permission,
    #[error("{0}")]
    NotFound(String),
    #[error("Duty for {0} was just assigned by someone else. Check /duty and retry if needed.")]
    Conflict(NaiveDate),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Result alias used by command handlers.
pub type HandlerResult<T = ()> = Result<T, BotError>;
