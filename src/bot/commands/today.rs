use crate::database::{connection::DatabaseManager, models::*};
use crate::services::timezone;
use crate::utils::{countdown, datetime};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use teloxide::prelude::*;

/// Sends the daily digest: holidays and personal dates falling today,
/// the rest of this month's holidays, and every tracked date with a
/// countdown. The numbering shown here is what /deletedate consumes.
pub async fn handle_today(bot: Bot, msg: Message, db: &DatabaseManager) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    // "Today" is the chat's local date. Matches the users-table
    // default when no preference is stored.
    let stored = UserPref::timezone_of(&db.pool, chat_id).await.ok().flatten();
    let tz = timezone::resolve(stored.as_deref(), chrono_tz::Asia::Yangon);
    let today = timezone::local_time(Utc::now(), tz).date_naive();

    let text = match today_digest(&db.pool, chat_id, today).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to build today digest for chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "❌ Could not load today's events.").await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Builds the digest text for one chat on one local date.
pub async fn today_digest(
    pool: &sqlx::SqlitePool,
    chat_id: i64,
    today: NaiveDate,
) -> Result<String> {
    let (month, day, year) = (today.month(), today.day(), today.year());

    let today_holidays = Holiday::find_by_month_day(pool, month, day).await?;
    let today_dates = PersonalDate::find_by_chat_and_day(pool, chat_id, month, day).await?;
    let month_holidays = Holiday::find_by_month(pool, month, year).await?;
    let all_dates = PersonalDate::find_by_chat(pool, chat_id).await?;

    let weekday = datetime::weekday_name(i64::from(today.weekday().num_days_from_sunday()));
    let mut text = format!(
        "📅 Today - {weekday}, {} {day}, {year}\n",
        countdown::month_name(month)
    );

    if !today_holidays.is_empty() || !today_dates.is_empty() {
        text.push_str("\n🎉 Today's Events\n");
        for holiday in &today_holidays {
            text.push_str(&format!("  • 🇲🇲 {}\n", holiday.name));
        }
        for date in &today_dates {
            text.push_str(&format!(
                "  • {} {}{}\n",
                date.emoji,
                date.name,
                anniversary_note(date, year)
            ));
        }
    }

    let upcoming: Vec<&Holiday> = month_holidays
        .iter()
        .filter(|h| h.day >= i64::from(day))
        .collect();
    if !upcoming.is_empty() {
        text.push_str("\n📆 Holidays This Month\n");
        for holiday in upcoming {
            let until = countdown::days_until(month, holiday.day as u32, today)
                .map(countdown::format_countdown)
                .unwrap_or_default();
            text.push_str(&format!(
                "  • {} {:02} - {} ({until})\n",
                countdown::short_month_name(month),
                holiday.day,
                holiday.name
            ));
        }
    }

    if !all_dates.is_empty() {
        text.push_str("\n📌 Your Dates\n");
        for (i, date) in all_dates.iter().enumerate() {
            let until = countdown::days_until(date.month as u32, date.day as u32, today)
                .map(countdown::format_countdown)
                .unwrap_or_default();
            text.push_str(&format!(
                "  {}. {} {}{}\n     📅 {}/{}   ⏳ {until}\n",
                i + 1,
                date.emoji,
                date.name,
                anniversary_note(date, year),
                date.month,
                date.day
            ));
        }
    } else if today_holidays.is_empty() && month_holidays.is_empty() {
        text.push_str("\nNo events. Use /adddate to add a date!");
    }

    Ok(text)
}

/// Age or years-together suffix for dates that carry a start year.
fn anniversary_note(date: &PersonalDate, current_year: i32) -> String {
    let Some(start_year) = date.start_year else {
        return String::new();
    };
    let line = match date.kind() {
        DateKind::Birthday => countdown::format_age(start_year, i64::from(current_year)),
        _ => countdown::format_years_together(start_year, i64::from(current_year)),
    };
    line.map(|l| format!(" ({l})")).unwrap_or_default()
}
