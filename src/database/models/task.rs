use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Firing pattern of a reminder task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recurrence {
    /// Fires once at the next matching minute, then deactivates.
    Once,
    /// Fires every day.
    Daily,
    /// Fires Monday through Friday only.
    Weekdays,
    /// Fires on one specific weekday (stored separately on the task).
    Weekly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Once => "once",
            Recurrence::Daily => "daily",
            Recurrence::Weekdays => "weekdays",
            Recurrence::Weekly => "weekly",
        }
    }
}

impl FromStr for Recurrence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(Recurrence::Once),
            "daily" => Ok(Recurrence::Daily),
            "weekdays" => Ok(Recurrence::Weekdays),
            "weekly" => Ok(Recurrence::Weekly),
            other => Err(format!("unknown recurrence: {other}")),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reminder definition owned by one chat.
///
/// `hour`/`minute` are wall-clock values in the owner's timezone.
/// `week_day` (0 = Sunday .. 6 = Saturday) is only meaningful for
/// weekly tasks and is enforced at creation time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub chat_id: i64,
    pub text: String,
    pub hour: i64,
    pub minute: i64,
    pub recurrence: String,
    pub week_day: Option<i64>,
    pub active: bool,
    pub created_at: String,
}

impl Task {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        text: String,
        hour: u32,
        minute: u32,
        recurrence: Recurrence,
        week_day: Option<u8>,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();
        // Weekly tasks carry a weekday; the column stays NULL for the rest.
        let week_day = match recurrence {
            Recurrence::Weekly => week_day.map(i64::from),
            _ => None,
        };

        sqlx::query(
            "INSERT INTO tasks (id, chat_id, text, hour, minute, recurrence, week_day, active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?)",
        )
        .bind(&id)
        .bind(chat_id)
        .bind(&text)
        .bind(i64::from(hour))
        .bind(i64::from(minute))
        .bind(recurrence.as_str())
        .bind(week_day)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok(Task {
            id,
            chat_id,
            text,
            hour: i64::from(hour),
            minute: i64::from(minute),
            recurrence: recurrence.as_str().to_string(),
            week_day,
            active: true,
            created_at,
        })
    }

    /// Every active task across all chats, in creation order.
    pub async fn list_active(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT id, chat_id, text, hour, minute, recurrence, week_day, active, created_at
             FROM tasks
             WHERE active = 1
             ORDER BY created_at",
        )
        .fetch_all(pool)
        .await
    }

    /// Active tasks for one chat, ordered by scheduled time of day.
    pub async fn find_by_chat(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT id, chat_id, text, hour, minute, recurrence, week_day, active, created_at
             FROM tasks
             WHERE chat_id = ? AND active = 1
             ORDER BY hour, minute, created_at",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await
    }

    /// Soft-deletes a task. A no-op when the row no longer exists, so
    /// the scheduler can race a concurrent user delete safely.
    pub async fn deactivate(pool: &sqlx::SqlitePool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE tasks SET active = 0 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Parsed recurrence, defaulting to `once` if the stored value is
    /// ever out of vocabulary.
    pub fn recurrence(&self) -> Recurrence {
        Recurrence::from_str(&self.recurrence).unwrap_or(Recurrence::Once)
    }
}
