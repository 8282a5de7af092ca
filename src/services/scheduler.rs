use crate::database::connection::DatabaseManager;
use crate::database::models::{Holiday, Recurrence, Task, UserPref};
use crate::services::dedup::DedupLedger;
use crate::services::notifier::Notifier;
use crate::services::timezone;
use anyhow::Result;
use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Fired-reminder keys only need to outlive the scheduled minute.
const FIRED_KEY_TTL: Duration = Duration::from_secs(90);
/// The holiday marker must expire before the next day's window.
const HOLIDAY_MARKER_TTL: Duration = Duration::from_secs(3600);

/// Local-time window during which no reminders are delivered.
///
/// Stored as minutes of day, half-open `[start, end)`. A window whose
/// start equals its end is empty; a window with start > end wraps
/// across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuietHours {
    start: u32,
    end: u32,
}

impl QuietHours {
    pub fn new(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Self {
        Self {
            start: start_hour * 60 + start_minute,
            end: end_hour * 60 + end_minute,
        }
    }

    /// Whether a local (hour, minute) falls inside the window. Total:
    /// every input maps to a boolean.
    pub fn suppresses(&self, hour: u32, minute: u32) -> bool {
        let m = hour * 60 + minute;
        if self.start == self.end {
            false
        } else if self.start < self.end {
            m >= self.start && m < self.end
        } else {
            m >= self.start || m < self.end
        }
    }
}

/// Tunables for the polling loop, all sourced from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub tick_interval: Duration,
    pub default_timezone: Tz,
    pub quiet_hours: QuietHours,
    /// Local hour (0-23) at which the holiday digest goes out.
    pub holiday_notify_hour: u32,
}

/// The reminder engine.
///
/// Polls on a fixed interval and evaluates every active task against
/// its owner's wall clock: exact-minute match, recurrence filter,
/// quiet hours, and a short-lived dedup ledger so a minute observed by
/// several ticks fires at most once. A minute missed entirely (process
/// downtime) is skipped, not caught up; the task fires again at its
/// next natural occurrence.
pub struct SchedulerService<N: Notifier> {
    db: Arc<DatabaseManager>,
    notifier: N,
    config: SchedulerConfig,
    fired: DedupLedger,
    announced: DedupLedger,
}

impl<N: Notifier> SchedulerService<N> {
    pub fn new(db: Arc<DatabaseManager>, notifier: N, config: SchedulerConfig) -> Self {
        Self {
            db,
            notifier,
            config,
            fired: DedupLedger::new(FIRED_KEY_TTL),
            announced: DedupLedger::new(HOLIDAY_MARKER_TTL),
        }
    }

    pub async fn run(self) {
        info!(
            "Scheduler started - polling every {}s, quiet hours {:?}",
            self.config.tick_interval.as_secs(),
            self.config.quiet_hours
        );

        let mut interval = tokio::time::interval(self.config.tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.tick_at(Utc::now()).await;
        }
    }

    /// One full evaluation pass at the given instant. Takes the clock
    /// as a parameter so tests can drive the engine deterministically.
    /// Nothing in here escalates: a failed pass is retried on the next
    /// timer firing.
    pub async fn tick_at(&self, now_utc: DateTime<Utc>) {
        if let Err(e) = self.announce_holidays(now_utc).await {
            error!("Holiday announcement pass failed: {}", e);
        }

        let tasks = match Task::list_active(&self.db.pool).await {
            Ok(tasks) => tasks,
            Err(e) => {
                error!("Failed to load active tasks, skipping tick: {}", e);
                return;
            }
        };

        for task in &tasks {
            self.evaluate_task(task, now_utc).await;
        }
    }

    /// Evaluates a single task. Errors are contained here so one bad
    /// task never blocks the rest of the tick.
    async fn evaluate_task(&self, task: &Task, now_utc: DateTime<Utc>) {
        // A failed preference read is not a missing preference: falling
        // back to the default zone here could fire at the wrong wall
        // clock. Skip the task; the next tick retries the lookup.
        let stored = match UserPref::timezone_of(&self.db.pool, task.chat_id).await {
            Ok(zone) => zone,
            Err(e) => {
                warn!(
                    "Skipping task {} this tick, timezone lookup for chat {} failed: {}",
                    task.id, task.chat_id, e
                );
                return;
            }
        };
        let tz = timezone::resolve(stored.as_deref(), self.config.default_timezone);
        let local = timezone::local_time(now_utc, tz);

        let key = fire_key(&task.id, &local);
        if self.fired.contains(&key) {
            return;
        }
        if !should_fire(task, &local, &self.config.quiet_hours) {
            return;
        }

        match self.notifier.send_reminder(task.chat_id, &task.text).await {
            Ok(()) => {
                // Recorded only after a successful send, so a transient
                // failure is retried on the next tick within the minute.
                self.fired.insert(key);
                info!("Sent reminder {} to chat {}", task.id, task.chat_id);

                if task.recurrence() == Recurrence::Once {
                    if let Err(e) = Task::deactivate(&self.db.pool, &task.id).await {
                        error!("Failed to deactivate one-time task {}: {}", task.id, e);
                    }
                }
            }
            Err(e) => {
                error!(
                    "Failed to send reminder {} to chat {}: {}",
                    task.id, task.chat_id, e
                );
            }
        }
    }

    /// Once per calendar day, announces today's holidays to every chat
    /// whose local clock is inside the notification hour. The marker
    /// expires hourly, well before the (month, day) window recurs.
    async fn announce_holidays(&self, now_utc: DateTime<Utc>) -> Result<()> {
        let today = timezone::local_time(now_utc, self.config.default_timezone);
        let (month, day) = (today.month(), today.day());

        let holidays = Holiday::find_by_month_day(&self.db.pool, month, day).await?;
        if holidays.is_empty() {
            return Ok(());
        }

        let marker = format!("{month}-{day}");
        if self.announced.contains(&marker) {
            return Ok(());
        }

        let names: Vec<String> = holidays.into_iter().map(|h| h.name).collect();
        let users = UserPref::list_all(&self.db.pool).await?;

        for user in &users {
            let tz = timezone::resolve(Some(&user.timezone), self.config.default_timezone);
            let local = timezone::local_time(now_utc, tz);
            if local.hour() != self.config.holiday_notify_hour {
                continue;
            }

            match self.notifier.send_holiday_digest(user.chat_id, &names).await {
                Ok(()) => info!("Sent holiday digest to chat {}", user.chat_id),
                Err(e) => error!("Failed to send holiday digest to chat {}: {}", user.chat_id, e),
            }
        }

        self.announced.insert(marker);
        Ok(())
    }
}

/// Dedup key for one task at one local minute. The local date keeps
/// keys from colliding across days; the minute component lets the same
/// task fire again at its next occurrence.
fn fire_key(task_id: &str, local: &DateTime<Tz>) -> String {
    format!("{}-{}", task_id, local.format("%Y-%m-%dT%H:%M"))
}

/// Pure eligibility check: quiet hours, recurrence filter, and the
/// exact-minute match, in that order.
pub fn should_fire(task: &Task, local: &DateTime<Tz>, quiet: &QuietHours) -> bool {
    let (hour, minute) = (local.hour(), local.minute());

    if quiet.suppresses(hour, minute) {
        return false;
    }
    if !recurrence_matches(task, local.weekday().num_days_from_sunday()) {
        return false;
    }

    i64::from(hour) == task.hour && i64::from(minute) == task.minute
}

fn recurrence_matches(task: &Task, weekday_from_sunday: u32) -> bool {
    match task.recurrence() {
        Recurrence::Once | Recurrence::Daily => true,
        Recurrence::Weekdays => (1..=5).contains(&weekday_from_sunday),
        Recurrence::Weekly => task.week_day == Some(i64::from(weekday_from_sunday)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use chrono::TimeZone;

    fn task(hour: i64, minute: i64, recurrence: &str, week_day: Option<i64>) -> Task {
        Task {
            id: "test-task".to_string(),
            chat_id: 1,
            text: "test".to_string(),
            hour,
            minute,
            recurrence: recurrence.to_string(),
            week_day,
            active: true,
            created_at: String::new(),
        }
    }

    fn yangon(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        chrono_tz::Asia::Yangon
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .expect("valid local time")
    }

    // Quiet hours disabled unless a test is about them.
    const NO_QUIET: QuietHours = QuietHours { start: 0, end: 0 };

    #[test]
    fn quiet_hours_boundaries_are_half_open() {
        let quiet = QuietHours::new(0, 0, 7, 0);

        assert!(quiet.suppresses(0, 0));
        assert!(quiet.suppresses(0, 3));
        assert!(quiet.suppresses(6, 59));
        assert!(!quiet.suppresses(7, 0));
        assert!(!quiet.suppresses(12, 0));
        assert!(!quiet.suppresses(23, 59));
    }

    #[test]
    fn quiet_hours_alternate_window() {
        // The 00:05-06:30 variant: 00:03 is outside, 00:05 inside.
        let quiet = QuietHours::new(0, 5, 6, 30);

        assert!(!quiet.suppresses(0, 3));
        assert!(quiet.suppresses(0, 5));
        assert!(quiet.suppresses(6, 29));
        assert!(!quiet.suppresses(6, 30));
    }

    #[test]
    fn quiet_hours_wrap_across_midnight() {
        let quiet = QuietHours::new(22, 0, 6, 0);

        assert!(quiet.suppresses(23, 0));
        assert!(quiet.suppresses(2, 0));
        assert!(!quiet.suppresses(12, 0));
        assert!(!quiet.suppresses(21, 59));
    }

    #[test]
    fn quiet_hours_empty_window_suppresses_nothing() {
        assert!(!NO_QUIET.suppresses(0, 0));
        assert!(!NO_QUIET.suppresses(3, 30));
    }

    #[test]
    fn daily_task_requires_exact_minute() {
        let t = task(9, 0, "daily", None);

        // 2026-03-02 is a Monday.
        assert!(should_fire(&t, &yangon(2026, 3, 2, 9, 0), &NO_QUIET));
        assert!(!should_fire(&t, &yangon(2026, 3, 2, 8, 59), &NO_QUIET));
        assert!(!should_fire(&t, &yangon(2026, 3, 2, 9, 1), &NO_QUIET));
    }

    #[test]
    fn weekdays_task_skips_weekends() {
        let t = task(9, 0, "weekdays", None);

        assert!(should_fire(&t, &yangon(2026, 3, 2, 9, 0), &NO_QUIET)); // Monday
        assert!(should_fire(&t, &yangon(2026, 3, 6, 9, 0), &NO_QUIET)); // Friday
        assert!(!should_fire(&t, &yangon(2026, 3, 7, 9, 0), &NO_QUIET)); // Saturday
        assert!(!should_fire(&t, &yangon(2026, 3, 8, 9, 0), &NO_QUIET)); // Sunday
    }

    #[test]
    fn weekly_task_fires_on_stored_weekday_only() {
        // week_day 5 = Friday; 2026-03-06 is a Friday.
        let t = task(17, 0, "weekly", Some(5));

        assert!(should_fire(&t, &yangon(2026, 3, 6, 17, 0), &NO_QUIET));
        assert!(!should_fire(&t, &yangon(2026, 3, 5, 17, 0), &NO_QUIET)); // Thursday
        assert!(!should_fire(&t, &yangon(2026, 3, 7, 17, 0), &NO_QUIET)); // Saturday
    }

    #[test]
    fn once_task_is_always_date_eligible() {
        let t = task(12, 30, "once", None);

        assert!(should_fire(&t, &yangon(2026, 3, 7, 12, 30), &NO_QUIET)); // Saturday too
        assert!(!should_fire(&t, &yangon(2026, 3, 7, 12, 31), &NO_QUIET));
    }

    #[test]
    fn quiet_hours_beat_every_recurrence() {
        let quiet = QuietHours::new(0, 0, 7, 0);

        for recurrence in ["once", "daily", "weekdays", "weekly"] {
            let t = task(3, 0, recurrence, Some(1));
            assert!(
                !should_fire(&t, &yangon(2026, 3, 2, 3, 0), &quiet),
                "{recurrence} fired inside quiet hours"
            );
        }
    }

    #[test]
    fn fire_keys_distinguish_days_and_minutes() {
        let a = fire_key("t1", &yangon(2026, 3, 2, 9, 0));
        let b = fire_key("t1", &yangon(2026, 3, 3, 9, 0));
        let c = fire_key("t1", &yangon(2026, 3, 2, 9, 1));
        let d = fire_key("t2", &yangon(2026, 3, 2, 9, 0));

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a, fire_key("t1", &yangon(2026, 3, 2, 9, 0)));
    }
}
