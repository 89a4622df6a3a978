/// HTTP liveness and readiness endpoints
pub mod health;
/// Daily duty reminder loop
pub mod reminder;
