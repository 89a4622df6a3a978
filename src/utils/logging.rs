use tracing::{error, info};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user_id: i64, chat_id: i64) {
    info!("CMD_START: {} by {} in chat {}", command, user_id, chat_id);
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user_id: i64, chat_id: i64) {
    info!("CMD_OK: {} by {} in chat {}", command, user_id, chat_id);
}

/// Logs command failure with consistent format
pub fn log_command_error(command: &str, user_id: i64, chat_id: i64, err: &str) {
    error!(
        "CMD_ERROR: {} by {} in chat {} - {}",
        command, user_id, chat_id, err
    );
}
