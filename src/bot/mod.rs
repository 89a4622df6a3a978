/// Command grammar and per-command business logic
pub mod commands;
/// Dispatch schema and the per-request error boundary
pub mod handlers;
