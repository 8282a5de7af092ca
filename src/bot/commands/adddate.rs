use crate::database::{connection::DatabaseManager, models::*};
use crate::utils::countdown;
use anyhow::{anyhow, Result};
use chrono::{Datelike, Utc};
use teloxide::prelude::*;

const USAGE: &str = "Usage: /adddate <MM-DD> [YYYY] <name>\n\n\
Examples:\n\
/adddate 12-25 Christmas\n\
/adddate 03-15 1990 My Birthday\n\
/adddate 08-20 2020 Anniversary";

/// Parsed /adddate arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct AddDateArgs {
    pub month: u32,
    pub day: u32,
    pub year: Option<i32>,
    pub name: String,
}

/// Parses "MM-DD [YYYY] name" or "YYYY-MM-DD name". Slashes work as
/// date separators too.
pub fn parse_adddate_args(input: &str) -> Result<AddDateArgs> {
    let mut tokens = input.split_whitespace();
    let date_token = tokens.next().ok_or_else(|| anyhow!("missing date"))?;

    let parts: Vec<&str> = date_token.split(['-', '/']).collect();
    let (month, day, mut year) = match parts.as_slice() {
        [m, d] => (parse_component(m)?, parse_component(d)?, None),
        [y, m, d] if y.len() == 4 => (
            parse_component(m)?,
            parse_component(d)?,
            Some(parse_year(y)?),
        ),
        _ => return Err(anyhow!("invalid date, use MM-DD or YYYY-MM-DD")),
    };

    if !countdown::is_valid_month_day(month, day) {
        return Err(anyhow!("invalid date, check month and day"));
    }

    let mut rest: Vec<&str> = tokens.collect();

    // A bare 4-digit token right after the date is the year.
    if year.is_none() {
        let leading_year = rest
            .first()
            .is_some_and(|t| t.len() == 4 && t.chars().all(|c| c.is_ascii_digit()));
        if leading_year {
            year = Some(parse_year(rest.remove(0))?);
        }
    }

    let name = rest.join(" ");
    if name.chars().count() < 2 {
        return Err(anyhow!("name must be at least 2 characters"));
    }

    Ok(AddDateArgs {
        month,
        day,
        year,
        name,
    })
}

fn parse_component(s: &str) -> Result<u32> {
    s.parse()
        .map_err(|_| anyhow!("invalid date, use MM-DD or YYYY-MM-DD"))
}

fn parse_year(s: &str) -> Result<i32> {
    let year: i32 = s.parse().map_err(|_| anyhow!("invalid year"))?;
    if !(1900..=2100).contains(&year) {
        return Err(anyhow!("invalid year, use 1900-2100"));
    }
    Ok(year)
}

/// Adds a personal date for the chat and confirms with a countdown,
/// plus an age or years-together line when a year was given.
pub async fn handle_adddate(
    bot: Bot,
    msg: Message,
    input: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    let args = match parse_adddate_args(&input) {
        Ok(args) => args,
        Err(e) => {
            bot.send_message(msg.chat.id, format!("❌ {e}\n\n{USAGE}")).await?;
            return Ok(());
        }
    };

    match PersonalDate::find_by_name(&db.pool, chat_id, &args.name).await {
        Ok(Some(_)) => {
            bot.send_message(msg.chat.id, format!("❌ \"{}\" already exists.", args.name))
                .await?;
            return Ok(());
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to check for duplicate date in chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "❌ Could not save the date. Please try again.")
                .await?;
            return Ok(());
        }
    }

    let date = match PersonalDate::create(
        &db.pool,
        chat_id,
        args.name,
        args.month,
        args.day,
        args.year,
    )
    .await
    {
        Ok(date) => date,
        Err(e) => {
            tracing::error!("Failed to create personal date for chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "❌ Could not save the date. Please try again.")
                .await?;
            return Ok(());
        }
    };

    let today = Utc::now().date_naive();
    let countdown_line = countdown::days_until(args.month, args.day, today)
        .map(countdown::format_countdown)
        .unwrap_or_default();

    let mut text = format!(
        "✅ Added!\n\n{} {}\n📆 {} {}\n⏳ {}",
        date.emoji,
        date.name,
        countdown::short_month_name(args.month),
        args.day,
        countdown_line
    );
    if let Some(start_year) = date.start_year {
        let line = match date.kind() {
            DateKind::Birthday => countdown::format_age(start_year, i64::from(today.year())),
            _ => countdown::format_years_together(start_year, i64::from(today.year())),
        };
        if let Some(line) = line {
            text.push('\n');
            text.push_str(&line);
        }
    }

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn parses_month_day_and_name() {
        let args = parse_adddate_args("12-25 Christmas").expect("valid input");
        assert_eq!((args.month, args.day, args.year), (12, 25, None));
        assert_eq!(args.name, "Christmas");
    }

    #[test]
    fn parses_year_as_separate_token() {
        let args = parse_adddate_args("03-15 1990 My Birthday").expect("valid input");
        assert_eq!((args.month, args.day, args.year), (3, 15, Some(1990)));
        assert_eq!(args.name, "My Birthday");
    }

    #[test]
    fn parses_iso_style_date() {
        let args = parse_adddate_args("2020-08-20 Anniversary").expect("valid input");
        assert_eq!((args.month, args.day, args.year), (8, 20, Some(2020)));
        assert_eq!(args.name, "Anniversary");
    }

    #[test]
    fn slash_separators_work() {
        let args = parse_adddate_args("12/25 Christmas").expect("valid input");
        assert_eq!((args.month, args.day), (12, 25));
    }

    #[test]
    fn four_digit_name_is_not_eaten_as_a_year() {
        // Years outside 1900-2100 are rejected rather than silently
        // treated as part of the name.
        assert!(parse_adddate_args("12-25 3000 Party").is_err());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_adddate_args("").is_err());
        assert!(parse_adddate_args("13-01 Impossible").is_err());
        assert!(parse_adddate_args("02-30 Impossible").is_err());
        assert!(parse_adddate_args("12-25").is_err());
        assert!(parse_adddate_args("12-25 X").is_err());
        assert!(parse_adddate_args("12-25 1800 Too Old").is_err());
        assert!(parse_adddate_args("christmas day").is_err());
    }
}
