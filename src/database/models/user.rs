use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-chat settings. Currently just the IANA timezone name.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserPref {
    pub chat_id: i64,
    pub timezone: String,
    pub created_at: String,
    pub updated_at: String,
}

impl UserPref {
    /// Inserts or updates the stored timezone for a chat. The zone
    /// string must already have passed strict validation.
    pub async fn upsert_timezone(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        timezone: &str,
    ) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (chat_id, timezone, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (chat_id) DO UPDATE SET timezone = excluded.timezone,
                                                 updated_at = excluded.updated_at",
        )
        .bind(chat_id)
        .bind(timezone)
        .bind(&now)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_chat_id(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserPref>(
            "SELECT chat_id, timezone, created_at, updated_at FROM users WHERE chat_id = ?",
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }

    /// The stored zone name for a chat, if the chat ever set one.
    pub async fn timezone_of(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT timezone FROM users WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_optional(pool)
            .await
    }

    /// All known chats, used by the daily holiday announcement pass.
    pub async fn list_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserPref>(
            "SELECT chat_id, timezone, created_at, updated_at FROM users ORDER BY chat_id",
        )
        .fetch_all(pool)
        .await
    }
}
