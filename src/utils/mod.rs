/// Timezone-aware date helpers
pub mod datetime;
/// Escaping for Telegram HTML parse mode
pub mod html;
/// Structured log helpers for command handling
pub mod logging;
/// Command-argument and configuration validation
pub mod validation;
