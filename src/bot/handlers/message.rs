use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{ParseMode, User};

use crate::bot::commands::{self, help_text, Command};
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::database::models::Employee;
use crate::error::{BotError, HandlerResult};
use crate::utils::html::escape_html;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

type DispatchResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Per-request error boundary. Handler-local errors become user-facing
/// replies; persistence and unexpected errors are logged and answered with a
/// generic failure message, so one bad request never takes the process down.
/// Every error path replies to the invoking user.
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    db: DatabaseManager,
    config: Arc<Config>,
) -> DispatchResult {
    // Commands always come from a user account; channel posts have no sender.
    let Some(user) = msg.from().cloned() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id.0;
    let command = cmd.as_str();

    log_command_start(command, user_id, chat_id);

    match dispatch(&bot, &msg, &user, cmd, &db, &config).await {
        Ok(()) => log_command_success(command, user_id, chat_id),
        Err(BotError::Telegram(err)) => return Err(err.into()),
        Err(
            err @ (BotError::Validation(_)
            | BotError::Permission
            | BotError::NotFound(_)
            | BotError::Conflict(_)),
        ) => {
            log_command_error(command, user_id, chat_id, &err.to_string());
            bot.send_message(msg.chat.id, err.to_string()).await?;
        }
        Err(err) => {
            log_command_error(command, user_id, chat_id, &err.to_string());
            bot.send_message(
                msg.chat.id,
                "Something went wrong on our side. Please try again later.",
            )
            .await?;
        }
    }

    Ok(())
}

async fn dispatch(
    bot: &Bot,
    msg: &Message,
    user: &User,
    cmd: Command,
    db: &DatabaseManager,
    config: &Config,
) -> HandlerResult {
    let caller_id = user.id.0 as i64;

    if cmd.is_admin_only() && !Employee::is_admin(&db.pool, caller_id).await? {
        return Err(BotError::Permission);
    }

    match cmd {
        Command::Start => handle_start(bot, msg, user, db).await,
        Command::Help => handle_help(bot, msg, caller_id, db).await,
        Command::Duty => commands::duty::handle_duty(bot, msg, db, config.tz).await,
        Command::MyDuties => {
            commands::duty::handle_my_duties(bot, msg, caller_id, db, config.tz).await
        }
        Command::Employees => commands::roster::handle_employees(bot, msg, db).await,
        Command::AddEmployee { handle } => {
            commands::roster::handle_add_employee(bot, msg, db, &handle).await
        }
        Command::SetDuty { date, handle } => {
            commands::assignment::handle_set_duty(bot, msg, db, &date, &handle).await
        }
        Command::RemoveDuty { date } => {
            commands::assignment::handle_remove_duty(bot, msg, db, &date).await
        }
    }
}

/// `/start` — greeting plus first-seen registration, so admins can later
/// bind the caller's handle with /addemployee.
async fn handle_start(bot: &Bot, msg: &Message, user: &User, db: &DatabaseManager) -> HandlerResult {
    let full_name = user.full_name();
    let employee = Employee::register(
        &db.pool,
        user.id.0 as i64,
        user.username.as_deref(),
        &full_name,
    )
    .await?;
    tracing::info!(
        "User {} ({:?}) started the bot",
        employee.telegram_id,
        employee.username
    );

    let text = format!(
        "Hi, <b>{}</b>!\n\n\
         I keep the support team's duty roster: who is on call each day, \
         and a daily reminder for whoever is up.\n\n\
         Use /help to see what I can do.",
        escape_html(&full_name)
    );

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// `/help` — command list, with the admin section only for admins.
async fn handle_help(
    bot: &Bot,
    msg: &Message,
    caller_id: i64,
    db: &DatabaseManager,
) -> HandlerResult {
    let is_admin = Employee::is_admin(&db.pool, caller_id).await?;

    bot.send_message(msg.chat.id, help_text(is_admin))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
