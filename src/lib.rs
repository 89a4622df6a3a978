//! # Duty Roster Bot
//!
//! A Telegram bot that manages a support team's duty roster: one on-call
//! employee per calendar date, admin commands to maintain the roster, and a
//! daily reminder sent to whoever is on duty.
//!
//! ## Features
//! - Roster maintenance through admin commands
//! - One duty assignment per date, enforced by the schema
//! - Daily timezone-aware duty reminders
//! - Persistent storage with SQLite

/// Bot command definitions, handlers and dispatch schema
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database connection pool, models and migrations
pub mod database;
/// Error taxonomy shared by handlers and services
pub mod error;
/// Background services: duty reminders and health endpoints
pub mod services;
/// Utility functions for dates, validation and formatting
pub mod utils;
