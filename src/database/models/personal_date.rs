use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// What a personal date commemorates. Determines the emoji shown next
/// to it and how an attached start year is phrased (age vs. years
/// together).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateKind {
    Birthday,
    Anniversary,
    Custom,
}

impl DateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateKind::Birthday => "birthday",
            DateKind::Anniversary => "anniversary",
            DateKind::Custom => "custom",
        }
    }

    /// Guesses the kind from the date's name, as typed by the user.
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("birth") {
            DateKind::Birthday
        } else if lower.contains("anniversary") {
            DateKind::Anniversary
        } else {
            DateKind::Custom
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            DateKind::Birthday => "🎂",
            DateKind::Anniversary => "💕",
            DateKind::Custom => "📅",
        }
    }
}

impl FromStr for DateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "birthday" => Ok(DateKind::Birthday),
            "anniversary" => Ok(DateKind::Anniversary),
            "custom" => Ok(DateKind::Custom),
            other => Err(format!("unknown date kind: {other}")),
        }
    }
}

impl fmt::Display for DateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A yearly date tracked by one chat. `start_year` is the birth year
/// for birthdays and the starting year for anniversaries; it stays
/// NULL when the user gave only month and day.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PersonalDate {
    pub id: String,
    pub chat_id: i64,
    pub name: String,
    pub month: i64,
    pub day: i64,
    pub start_year: Option<i64>,
    pub kind: String,
    pub emoji: String,
    pub created_at: String,
}

impl PersonalDate {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        name: String,
        month: u32,
        day: u32,
        start_year: Option<i32>,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();
        let kind = DateKind::classify(&name);

        sqlx::query(
            "INSERT INTO personal_dates (id, chat_id, name, month, day, start_year, kind, emoji, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(chat_id)
        .bind(&name)
        .bind(i64::from(month))
        .bind(i64::from(day))
        .bind(start_year.map(i64::from))
        .bind(kind.as_str())
        .bind(kind.emoji())
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok(PersonalDate {
            id,
            chat_id,
            name,
            month: i64::from(month),
            day: i64::from(day),
            start_year: start_year.map(i64::from),
            kind: kind.as_str().to_string(),
            emoji: kind.emoji().to_string(),
            created_at,
        })
    }

    /// All dates for one chat, in calendar order. This ordering defines
    /// the numbering shown by /today and consumed by /deletedate.
    pub async fn find_by_chat(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, PersonalDate>(
            "SELECT id, chat_id, name, month, day, start_year, kind, emoji, created_at
             FROM personal_dates
             WHERE chat_id = ?
             ORDER BY month, day, name",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await
    }

    /// Dates for one chat falling on a calendar (month, day).
    pub async fn find_by_chat_and_day(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        month: u32,
        day: u32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, PersonalDate>(
            "SELECT id, chat_id, name, month, day, start_year, kind, emoji, created_at
             FROM personal_dates
             WHERE chat_id = ? AND month = ? AND day = ?
             ORDER BY name",
        )
        .bind(chat_id)
        .bind(i64::from(month))
        .bind(i64::from(day))
        .fetch_all(pool)
        .await
    }

    /// Case-insensitive name lookup, used to reject duplicates at
    /// creation time.
    pub async fn find_by_name(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PersonalDate>(
            "SELECT id, chat_id, name, month, day, start_year, kind, emoji, created_at
             FROM personal_dates
             WHERE chat_id = ? AND LOWER(name) = LOWER(?)",
        )
        .bind(chat_id)
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Hard delete. Personal dates have no firing history to preserve,
    /// unlike reminder tasks.
    pub async fn delete(pool: &sqlx::SqlitePool, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM personal_dates WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Parsed kind, defaulting to `custom` if the stored value is ever
    /// out of vocabulary.
    pub fn kind(&self) -> DateKind {
        DateKind::from_str(&self.kind).unwrap_or(DateKind::Custom)
    }
}
