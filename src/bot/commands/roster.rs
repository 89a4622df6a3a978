use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::info;

use crate::database::connection::DatabaseManager;
use crate::database::models::Employee;
use crate::error::{BotError, HandlerResult};
use crate::utils::html::escape_html;
use crate::utils::validation::parse_handle;

/// `/employees` — active roster, alphabetical.
pub async fn handle_employees(bot: &Bot, msg: &Message, db: &DatabaseManager) -> HandlerResult {
    let employees = Employee::list_active(&db.pool).await?;

    let text = if employees.is_empty() {
        "The roster is empty. Add people with /addemployee @handle.".to_string()
    } else {
        let mut text = format!("<b>Active employees ({}):</b>\n", employees.len());
        for employee in &employees {
            text.push_str(&format!("• {}\n", escape_html(&employee.display_name())));
        }
        text
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// `/addemployee @handle` — activate a known user. Binding a handle to a
/// Telegram id requires that the person messaged the bot at least once.
pub async fn handle_add_employee(
    bot: &Bot,
    msg: &Message,
    db: &DatabaseManager,
    handle: &str,
) -> HandlerResult {
    let username = parse_handle(handle)?;

    let Some(employee) = Employee::find_by_username(&db.pool, &username).await? else {
        return Err(BotError::NotFound(format!(
            "I don't know @{username} yet. Ask them to message the bot (/start) first."
        )));
    };

    let text = if employee.is_active {
        format!(
            "<b>{}</b> is already on the roster.",
            escape_html(&employee.display_name())
        )
    } else {
        Employee::activate(&db.pool, employee.id).await?;
        info!("Employee {} activated", employee.telegram_id);
        format!(
            "<b>{}</b> added to the roster.",
            escape_html(&employee.display_name())
        )
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
