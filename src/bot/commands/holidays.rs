use crate::database::{connection::DatabaseManager, models::*};
use chrono::{Datelike, Utc};
use teloxide::prelude::*;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub async fn handle_holidays(bot: Bot, msg: Message, db: &DatabaseManager) -> ResponseResult<()> {
    let year = Utc::now().year();

    let holidays = match Holiday::find_by_year(&db.pool, year).await {
        Ok(holidays) => holidays,
        Err(e) => {
            tracing::error!("Failed to load holidays for {}: {}", year, e);
            bot.send_message(msg.chat.id, "❌ Could not load the holiday list.").await?;
            return Ok(());
        }
    };

    if holidays.is_empty() {
        bot.send_message(
            msg.chat.id,
            format!("No holidays stored for {year} yet. They appear after the next sync."),
        )
        .await?;
        return Ok(());
    }

    let mut message_text = format!("🇲🇲 Myanmar holidays in {year}:\n\n");
    for holiday in &holidays {
        let month = MONTHS
            .get((holiday.month - 1) as usize)
            .copied()
            .unwrap_or("?");
        message_text.push_str(&format!("• {} {:02} - {}\n", month, holiday.day, holiday.name));
    }

    bot.send_message(msg.chat.id, message_text).await?;
    Ok(())
}
