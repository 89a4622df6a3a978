/// Connection pool management
pub mod connection;
/// Entity types and their queries
pub mod models;
