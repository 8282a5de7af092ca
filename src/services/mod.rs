/// Expiring in-memory dedup sets used by the scheduler
pub mod dedup;
/// HTTP health-check endpoints
pub mod health;
/// The notification sink trait and its Telegram implementation
pub mod notifier;
/// The polling reminder engine and holiday announcements
pub mod scheduler;
/// IANA timezone resolution with fail-soft fallback
pub mod timezone;
