use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One public holiday entry. Rows are written by the external holiday
/// sync job; the bot only reads them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub month: i64,
    pub day: i64,
    pub year: i64,
    pub kind: Option<String>,
    pub country: String,
}

impl Holiday {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        name: String,
        description: Option<String>,
        month: u32,
        day: u32,
        year: i32,
        kind: Option<String>,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO holidays (id, name, description, month, day, year, kind, country)
             VALUES (?, ?, ?, ?, ?, ?, ?, 'MM')",
        )
        .bind(&id)
        .bind(&name)
        .bind(&description)
        .bind(i64::from(month))
        .bind(i64::from(day))
        .bind(i64::from(year))
        .bind(&kind)
        .execute(pool)
        .await?;

        Ok(Holiday {
            id,
            name,
            description,
            month: i64::from(month),
            day: i64::from(day),
            year: i64::from(year),
            kind,
            country: "MM".to_string(),
        })
    }

    /// Year-agnostic lookup for the daily digest: every stored holiday
    /// falling on this calendar (month, day).
    pub async fn find_by_month_day(
        pool: &sqlx::SqlitePool,
        month: u32,
        day: u32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Holiday>(
            "SELECT id, name, description, month, day, year, kind, country
             FROM holidays
             WHERE month = ? AND day = ?
             ORDER BY name",
        )
        .bind(i64::from(month))
        .bind(i64::from(day))
        .fetch_all(pool)
        .await
    }

    /// Holidays in one month of one year, for the /today digest.
    pub async fn find_by_month(
        pool: &sqlx::SqlitePool,
        month: u32,
        year: i32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Holiday>(
            "SELECT id, name, description, month, day, year, kind, country
             FROM holidays
             WHERE month = ? AND year = ?
             ORDER BY day, name",
        )
        .bind(i64::from(month))
        .bind(i64::from(year))
        .fetch_all(pool)
        .await
    }

    /// All holidays for one calendar year, for the /holidays command.
    pub async fn find_by_year(
        pool: &sqlx::SqlitePool,
        year: i32,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Holiday>(
            "SELECT id, name, description, month, day, year, kind, country
             FROM holidays
             WHERE year = ?
             ORDER BY month, day, name",
        )
        .bind(i64::from(year))
        .fetch_all(pool)
        .await
    }
}
