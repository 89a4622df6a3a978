use chrono::NaiveDate;

use crate::error::BotError;

/// Parses a `@handle` command argument. The leading `@` is optional; the
/// stored form never carries it.
pub fn parse_handle(raw: &str) -> Result<String, BotError> {
    let trimmed = raw.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);

    if handle.is_empty() {
        return Err(BotError::Validation(
            "Expected a handle like @username.".to_string(),
        ));
    }
    if handle.len() > 32 || !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(BotError::Validation(format!(
            "'{trimmed}' is not a valid handle."
        )));
    }

    Ok(handle.to_string())
}

/// Parses an ISO `YYYY-MM-DD` command argument.
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate, BotError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        BotError::Validation(format!(
            "'{}' is not a date in YYYY-MM-DD format.",
            raw.trim()
        ))
    })
}

/// Parses the comma-separated admin id list. Empty segments are skipped; a
/// non-numeric segment is an error, not a silent drop.
pub fn parse_admin_ids(raw: &str) -> Result<Vec<i64>, BotError> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id: i64 = part.parse().map_err(|_| {
            BotError::Validation(format!("'{part}' is not a numeric user id"))
        })?;
        ids.push(id);
    }
    Ok(ids)
}
