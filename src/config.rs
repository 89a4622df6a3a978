use std::env;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::error::BotError;
use crate::utils::validation::parse_admin_ids;

/// Application settings loaded from environment variables.
///
/// Required: `BOT_TOKEN`, `DATABASE_URL`, `ADMIN_IDS`. Everything else has a
/// default. Loading fails fast before any network connection is attempted.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub database_url: String,
    pub admin_ids: Vec<i64>,
    pub reminder_hour: u32,
    pub reminder_minute: u32,
    pub tz: Tz,
    pub log_level: String,
    pub http_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        let bot_token = required("BOT_TOKEN")?;
        let database_url = required("DATABASE_URL")?;

        let admin_ids = parse_admin_ids(&required("ADMIN_IDS")?)
            .map_err(|e| BotError::Config(format!("ADMIN_IDS: {e}")))?;

        let reminder_hour = bounded_int("REMINDER_HOUR", 9, 23)?;
        let reminder_minute = bounded_int("REMINDER_MINUTE", 0, 59)?;

        let tz_name = optional("TZ").unwrap_or_else(|| "Europe/Moscow".to_string());
        let tz = Tz::from_str(tz_name.trim())
            .map_err(|_| BotError::Config(format!("TZ is not a known timezone: {tz_name}")))?;

        let log_level = optional("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .trim()
            .to_lowercase();

        let http_port = match optional("HTTP_PORT") {
            None => 3000,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| BotError::Config("Invalid HTTP_PORT".to_string()))?,
        };

        Ok(Config {
            bot_token,
            database_url,
            admin_ids,
            reminder_hour,
            reminder_minute,
            tz,
            log_level,
            http_port,
        })
    }
}

fn required(name: &str) -> Result<String, BotError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BotError::Config(format!("{name} must be set"))),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn bounded_int(name: &str, default: u32, max: u32) -> Result<u32, BotError> {
    let Some(raw) = optional(name) else {
        return Ok(default);
    };
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| BotError::Config(format!("{name} must be an integer")))?;
    if value > max {
        return Err(BotError::Config(format!("{name} must be at most {max}")));
    }
    Ok(value)
}
