//! Process bootstrap: configuration, database, admin sync, the reminder
//! loop, the health server and the Telegram dispatcher. Configuration errors
//! are the only thing allowed to terminate the process, and only here.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duty_roster_bot::bot::handlers::BotHandler;
use duty_roster_bot::config::Config;
use duty_roster_bot::database::connection::DatabaseManager;
use duty_roster_bot::database::models::Employee;
use duty_roster_bot::services::health::HealthService;
use duty_roster_bot::services::reminder::ReminderService;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("duty_roster_bot={},tower_http=warn", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Duty Roster Bot v{}", env!("CARGO_PKG_VERSION"));

    info!("Initializing database connection...");
    let db = DatabaseManager::new(&config.database_url).await?;
    db.run_migrations().await?;
    Employee::sync_admins(&db.pool, &config.admin_ids).await?;
    let db_shared = Arc::new(db.clone());
    info!(
        "Database initialized, {} admin id(s) synced",
        config.admin_ids.len()
    );

    let bot = Bot::new(config.bot_token.clone());
    let handler = BotHandler::new(db.clone(), config.clone());

    let shutdown = CancellationToken::new();
    let reminder = ReminderService::new(
        bot.clone(),
        db_shared.clone(),
        config.reminder_hour,
        config.reminder_minute,
        config.tz,
        shutdown.clone(),
    )?;
    let reminder_task = tokio::spawn(reminder.run());

    let health_service = HealthService::new(db_shared);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;
    info!("Health check server starting on port {}", config.http_port);

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {e}");
        }
    });

    // Either task finishing means we are shutting down.
    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {e}");
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {e}");
            }
        }
    }

    shutdown.cancel();
    let _ = reminder_task.await;
    db.close().await;

    info!("Application stopped");
    Ok(())
}
