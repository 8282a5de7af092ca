use crate::services::scheduler::{QuietHours, SchedulerConfig};
use crate::utils::datetime::parse_time;
use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    /// Applied to every chat that never ran /timezone.
    pub default_timezone: Tz,
    pub tick_interval_secs: u64,
    pub quiet_start: (u32, u32),
    pub quiet_end: (u32, u32),
    pub holiday_notify_hour: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/reminders.db".to_string());
        let database_url = if database_url.trim().is_empty() {
            "sqlite:./data/reminders.db".to_string()
        } else {
            database_url
        };

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        // Strict at startup: a misconfigured default zone should fail
        // loudly here, not fall back silently at tick time.
        let tz_str = env::var("DEFAULT_TIMEZONE").unwrap_or_else(|_| "Asia/Yangon".to_string());
        let default_timezone: Tz = tz_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid DEFAULT_TIMEZONE: {tz_str}"))?;

        let tick_str = env::var("TICK_INTERVAL_SECS").unwrap_or_else(|_| "10".to_string());
        let tick_interval_secs: u64 = tick_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid TICK_INTERVAL_SECS"))?;
        if tick_interval_secs == 0 {
            return Err(anyhow!("TICK_INTERVAL_SECS must be at least 1"));
        }

        let quiet_start_str = env::var("QUIET_HOURS_START").unwrap_or_else(|_| "00:00".to_string());
        let quiet_start = parse_time(&quiet_start_str)
            .map_err(|e| anyhow!("Invalid QUIET_HOURS_START: {e}"))?;

        let quiet_end_str = env::var("QUIET_HOURS_END").unwrap_or_else(|_| "07:00".to_string());
        let quiet_end =
            parse_time(&quiet_end_str).map_err(|e| anyhow!("Invalid QUIET_HOURS_END: {e}"))?;

        let notify_str = env::var("HOLIDAY_NOTIFY_HOUR").unwrap_or_else(|_| "9".to_string());
        let holiday_notify_hour: u32 = notify_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HOLIDAY_NOTIFY_HOUR"))?;
        if holiday_notify_hour > 23 {
            return Err(anyhow!("HOLIDAY_NOTIFY_HOUR must be between 0 and 23"));
        }

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            default_timezone,
            tick_interval_secs,
            quiet_start,
            quiet_end,
            holiday_notify_hour,
        })
    }

    /// The scheduler's view of this configuration.
    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            tick_interval: Duration::from_secs(self.tick_interval_secs),
            default_timezone: self.default_timezone,
            quiet_hours: QuietHours::new(
                self.quiet_start.0,
                self.quiet_start.1,
                self.quiet_end.0,
                self.quiet_end.1,
            ),
            holiday_notify_hour: self.holiday_notify_hour,
        }
    }
}
