use crate::database::{connection::DatabaseManager, models::*};
use crate::utils::datetime::{format_time, parse_time, parse_weekday, weekday_name};
use crate::utils::validation::{validate_reminder_text, validate_telegram_chat_id};
use anyhow::{anyhow, Result};
use teloxide::prelude::*;

const USAGE: &str = "Usage: /remind HH:MM <once|daily|weekdays|sun..sat> <text>\n\
    Examples:\n\
    /remind 09:00 daily Standup\n\
    /remind 17:00 fri Weekly report\n\
    /remind 20:30 once Call mom";

/// Parsed arguments of a /remind command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemindArgs {
    pub hour: u32,
    pub minute: u32,
    pub recurrence: Recurrence,
    pub week_day: Option<u8>,
    pub text: String,
}

/// Parses "HH:MM <schedule> <text>". The schedule token is either a
/// recurrence keyword or a weekday name, which means weekly on that day.
pub fn parse_remind_args(input: &str) -> Result<RemindArgs> {
    let input = input.trim();
    let (time_str, rest) = input
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow!("Missing schedule and text"))?;
    let (hour, minute) = parse_time(time_str)?;

    let rest = rest.trim_start();
    let (kind_str, text) = rest
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow!("Missing reminder text"))?;
    let text = text.trim();
    validate_reminder_text(text)?;

    let (recurrence, week_day) = match kind_str.to_lowercase().as_str() {
        "once" => (Recurrence::Once, None),
        "daily" => (Recurrence::Daily, None),
        "weekdays" => (Recurrence::Weekdays, None),
        other => match parse_weekday(other) {
            Some(day) => (Recurrence::Weekly, Some(day as u8)),
            None => {
                return Err(anyhow!(
                    "Unknown schedule '{other}' - use once, daily, weekdays, or a weekday name"
                ))
            }
        },
    };

    Ok(RemindArgs {
        hour,
        minute,
        recurrence,
        week_day,
        text: text.to_string(),
    })
}

fn describe_schedule(args: &RemindArgs) -> String {
    match args.recurrence {
        Recurrence::Once => "once".to_string(),
        Recurrence::Daily => "every day".to_string(),
        Recurrence::Weekdays => "on weekdays (Mon-Fri)".to_string(),
        Recurrence::Weekly => format!(
            "every {}",
            weekday_name(args.week_day.map(i64::from).unwrap_or(0))
        ),
    }
}

pub async fn handle_remind(
    bot: Bot,
    msg: Message,
    input: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    if let Err(e) = validate_telegram_chat_id(chat_id) {
        bot.send_message(msg.chat.id, format!("❌ Invalid chat: {e}")).await?;
        return Ok(());
    }

    let args = match parse_remind_args(&input) {
        Ok(args) => args,
        Err(e) => {
            bot.send_message(msg.chat.id, format!("❌ {e}\n\n{USAGE}")).await?;
            return Ok(());
        }
    };

    match Task::create(
        &db.pool,
        chat_id,
        args.text.clone(),
        args.hour,
        args.minute,
        args.recurrence,
        args.week_day,
    )
    .await
    {
        Ok(task) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "✅ Reminder set for {} {} (your local time):\n{}",
                    format_time(task.hour, task.minute),
                    describe_schedule(&args),
                    task.text
                ),
            )
            .await?;
        }
        Err(e) => {
            tracing::error!("Failed to create task for chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "❌ Could not save the reminder. Please try again.")
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn parse_daily() {
        let args = parse_remind_args("09:00 daily Standup").expect("valid input");
        assert_eq!(args.hour, 9);
        assert_eq!(args.minute, 0);
        assert_eq!(args.recurrence, Recurrence::Daily);
        assert_eq!(args.week_day, None);
        assert_eq!(args.text, "Standup");
    }

    #[test]
    fn parse_weekly_by_weekday_name() {
        let args = parse_remind_args("17:00 fri Weekly report").expect("valid input");
        assert_eq!(args.recurrence, Recurrence::Weekly);
        assert_eq!(args.week_day, Some(5));
        assert_eq!(args.text, "Weekly report");
    }

    #[test]
    fn parse_once_with_multiword_text() {
        let args = parse_remind_args("20:30 once Call mom about dinner").expect("valid input");
        assert_eq!(args.recurrence, Recurrence::Once);
        assert_eq!(args.text, "Call mom about dinner");
    }

    #[test]
    fn parse_weekdays() {
        let args = parse_remind_args("07:15 weekdays Pack lunch").expect("valid input");
        assert_eq!(args.recurrence, Recurrence::Weekdays);
        assert_eq!((args.hour, args.minute), (7, 15));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(parse_remind_args("").is_err());
        assert!(parse_remind_args("09:00").is_err());
        assert!(parse_remind_args("09:00 daily").is_err());
        assert!(parse_remind_args("25:00 daily text").is_err());
        assert!(parse_remind_args("09:00 fortnightly text").is_err());
        assert!(parse_remind_args("09:00 daily    ").is_err());
    }
}
