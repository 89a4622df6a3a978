use std::sync::Arc;

use chrono::NaiveTime;
use chrono_tz::Tz;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::database::connection::DatabaseManager;
use crate::database::models::{Duty, Employee};
use crate::error::BotError;
use crate::utils::datetime::{duration_until_next_fire, format_date, today_in};
use crate::utils::html::escape_html;

/// Fires once per calendar day at the configured wall-clock time in the
/// configured timezone and notifies whoever is on duty that day.
///
/// `notified` is only set after Telegram accepted the message, so a failed
/// send is retried on the next tick (at-least-once). Ticks missed while the
/// process was down are not backfilled; `tick_now` re-triggers explicitly.
pub struct ReminderService {
    bot: Bot,
    db: Arc<DatabaseManager>,
    fire_at: NaiveTime,
    tz: Tz,
    shutdown: CancellationToken,
}

impl ReminderService {
    pub fn new(
        bot: Bot,
        db: Arc<DatabaseManager>,
        hour: u32,
        minute: u32,
        tz: Tz,
        shutdown: CancellationToken,
    ) -> Result<Self, BotError> {
        let fire_at = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            BotError::Config(format!("invalid reminder time {hour:02}:{minute:02}"))
        })?;

        Ok(Self {
            bot,
            db,
            fire_at,
            tz,
            shutdown,
        })
    }

    /// Runs until the shutdown token is cancelled.
    pub async fn run(self) {
        info!(
            "Reminder service started: daily at {} ({})",
            self.fire_at.format("%H:%M"),
            self.tz
        );

        loop {
            let sleep_for = duration_until_next_fire(self.fire_at, self.tz);
            debug!("Next reminder tick in {} minutes", sleep_for.as_secs() / 60);

            tokio::select! {
                _ = tokio::time::sleep(sleep_for) => {}
                _ = self.shutdown.cancelled() => {
                    info!("Reminder service stopped");
                    return;
                }
            }

            if let Err(e) = send_due_reminder(&self.bot, &self.db, self.tz).await {
                error!("Reminder tick failed: {e}");
            }
        }
    }

    /// Manual trigger outside the schedule.
    pub async fn tick_now(&self) -> Result<(), BotError> {
        send_due_reminder(&self.bot, &self.db, self.tz).await
    }
}

async fn send_due_reminder(bot: &Bot, db: &DatabaseManager, tz: Tz) -> Result<(), BotError> {
    let today = today_in(tz);

    let Some(duty) = Duty::due_unnotified(&db.pool, today).await? else {
        debug!("No unnotified duty for {today}");
        return Ok(());
    };

    let Some(employee) = Employee::find_by_id(&db.pool, duty.employee_id).await? else {
        error!(
            "Duty {} references missing employee {}",
            duty.id, duty.employee_id
        );
        return Ok(());
    };

    let text = format!(
        "<b>Duty reminder</b>\n\n\
         {}, you are on duty today, {}.",
        escape_html(&employee.full_name),
        format_date(today),
    );

    bot.send_message(ChatId(employee.telegram_id), text)
        .parse_mode(ParseMode::Html)
        .await?;

    // Send confirmed; only now does the flag flip.
    Duty::mark_notified(&db.pool, duty.id).await?;
    info!(
        "Duty reminder for {} delivered to {}",
        today, employee.telegram_id
    );
    Ok(())
}
