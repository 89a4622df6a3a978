use chrono_tz::Tz;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::database::connection::DatabaseManager;
use crate::database::models::{Duty, Employee};
use crate::error::{BotError, HandlerResult};
use crate::utils::datetime::{format_date, today_in};
use crate::utils::html::escape_html;

/// `/duty` — who is on duty today, in the configured timezone.
pub async fn handle_duty(
    bot: &Bot,
    msg: &Message,
    db: &DatabaseManager,
    tz: Tz,
) -> HandlerResult {
    let today = today_in(tz);

    let text = match Duty::assignee(&db.pool, today).await? {
        Some(employee) => format!(
            "On duty {}: <b>{}</b>",
            format_date(today),
            escape_html(&employee.display_name()),
        ),
        None => format!("No one is assigned for {} yet.", format_date(today)),
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// `/myduties` — the caller's assignments from today onwards.
pub async fn handle_my_duties(
    bot: &Bot,
    msg: &Message,
    caller_id: i64,
    db: &DatabaseManager,
    tz: Tz,
) -> HandlerResult {
    let Some(employee) = Employee::find_by_telegram_id(&db.pool, caller_id).await? else {
        return Err(BotError::NotFound(
            "You are not registered yet. Send /start first.".to_string(),
        ));
    };

    let duties = Duty::upcoming_for_employee(&db.pool, employee.id, today_in(tz)).await?;

    let text = if duties.is_empty() {
        "You have no upcoming duties.".to_string()
    } else {
        let mut text = String::from("<b>Your upcoming duties:</b>\n");
        for duty in &duties {
            text.push_str(&format!("• {}\n", format_date(duty.date)));
        }
        text
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
