use crate::database::{connection::DatabaseManager, models::*};
use crate::services::timezone::{local_time, validate_zone};
use chrono::Utc;
use teloxide::prelude::*;

/// Sets the chat's timezone. Validation here is strict, unlike the
/// scheduler's fail-soft resolver: a typo is rejected at write time so
/// a bad zone name never reaches the database.
pub async fn handle_timezone(
    bot: Bot,
    msg: Message,
    zone: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;
    let zone = zone.trim();

    if zone.is_empty() {
        let current = UserPref::timezone_of(&db.pool, chat_id)
            .await
            .ok()
            .flatten();
        let text = match current {
            Some(tz) => format!(
                "Your timezone is {tz}.\n\nChange it with /timezone <zone>, e.g. /timezone Asia/Yangon"
            ),
            None => "You have no timezone set; the default applies.\n\nSet one with /timezone <zone>, e.g. /timezone Asia/Yangon".to_string(),
        };
        bot.send_message(msg.chat.id, text).await?;
        return Ok(());
    }

    let tz = match validate_zone(zone) {
        Ok(tz) => tz,
        Err(e) => {
            bot.send_message(
                msg.chat.id,
                format!("❌ {e}\n\nUse an IANA name such as Asia/Yangon or Europe/Berlin."),
            )
            .await?;
            return Ok(());
        }
    };

    match UserPref::upsert_timezone(&db.pool, chat_id, &tz.to_string()).await {
        Ok(()) => {
            let now = local_time(Utc::now(), tz);
            bot.send_message(
                msg.chat.id,
                format!(
                    "🕐 Timezone set to {tz}. Your local time is {}.",
                    now.format("%H:%M")
                ),
            )
            .await?;
        }
        Err(e) => {
            tracing::error!("Failed to store timezone for chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "❌ Could not save your timezone. Please try again.")
                .await?;
        }
    }

    Ok(())
}
