use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::info;

use crate::database::connection::DatabaseManager;
use crate::database::models::{Duty, Employee};
use crate::error::{BotError, HandlerResult};
use crate::utils::datetime::format_date;
use crate::utils::html::escape_html;
use crate::utils::validation::{parse_date_arg, parse_handle};

/// `/setduty YYYY-MM-DD @handle` — upsert the assignment for a date.
pub async fn handle_set_duty(
    bot: &Bot,
    msg: &Message,
    db: &DatabaseManager,
    date_arg: &str,
    handle_arg: &str,
) -> HandlerResult {
    let date = parse_date_arg(date_arg)?;
    let username = parse_handle(handle_arg)?;

    let Some(employee) = Employee::find_by_username(&db.pool, &username).await? else {
        return Err(BotError::NotFound(format!(
            "I don't know @{username} yet. Ask them to message the bot (/start) first."
        )));
    };
    if !employee.is_active {
        return Err(BotError::NotFound(format!(
            "@{username} is not on the roster. Add them with /addemployee first."
        )));
    }

    let (duty, reassigned) = Duty::assign(&db.pool, date, employee.id).await?;
    info!(
        "Duty {} set for {} -> employee {}",
        duty.id, duty.date, employee.telegram_id
    );

    let verb = if reassigned { "reassigned to" } else { "assigned to" };
    let text = format!(
        "Duty for {} {} <b>{}</b>.",
        format_date(date),
        verb,
        escape_html(&employee.display_name()),
    );

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// `/removeduty YYYY-MM-DD` — clear the assignment for a date. A missing
/// assignment is a reported no-op, not an error.
pub async fn handle_remove_duty(
    bot: &Bot,
    msg: &Message,
    db: &DatabaseManager,
    date_arg: &str,
) -> HandlerResult {
    let date = parse_date_arg(date_arg)?;

    let text = if Duty::remove(&db.pool, date).await? {
        info!("Duty for {date} removed");
        format!("Duty for {} removed.", format_date(date))
    } else {
        format!("Nothing to remove: no duty was assigned for {}.", format_date(date))
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}
