//! # Myanmar Reminder Bot
//!
//! A Telegram bot that tracks per-chat reminder tasks and announces
//! Myanmar public holidays.
//!
//! ## Features
//! - One-time, daily, weekday, and weekly reminders at a chosen minute
//! - Per-chat IANA timezones with a configurable default
//! - Quiet hours during which nothing is delivered
//! - A daily holiday digest sent once per calendar day
//! - Persistent storage with SQLite

/// Bot command definitions and message handlers
pub mod bot;
/// Configuration from environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// The reminder scheduler and its supporting services
pub mod services;
/// Parsing and validation helpers
pub mod utils;
