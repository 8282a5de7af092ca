use crate::database::{connection::DatabaseManager, models::*};
use teloxide::prelude::*;

/// Removes the N-th personal date as numbered by /today.
pub async fn handle_deletedate(
    bot: Bot,
    msg: Message,
    index: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    let index: usize = match index.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            bot.send_message(msg.chat.id, "Usage: /deletedate <number> (see /today for numbers)")
                .await?;
            return Ok(());
        }
    };

    let dates = match PersonalDate::find_by_chat(&db.pool, chat_id).await {
        Ok(dates) => dates,
        Err(e) => {
            tracing::error!("Failed to list personal dates for chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "❌ Could not load your dates.").await?;
            return Ok(());
        }
    };

    if index == 0 || index > dates.len() {
        bot.send_message(
            msg.chat.id,
            format!("No date #{index}. You have {} (see /today).", dates.len()),
        )
        .await?;
        return Ok(());
    }

    let date = &dates[index - 1];
    match PersonalDate::delete(&db.pool, &date.id).await {
        Ok(()) => {
            bot.send_message(msg.chat.id, format!("✅ Deleted: {} {}", date.emoji, date.name))
                .await?;
        }
        Err(e) => {
            tracing::error!("Failed to delete personal date {}: {}", date.id, e);
            bot.send_message(msg.chat.id, "❌ Could not delete the date. Please try again.")
                .await?;
        }
    }

    Ok(())
}
