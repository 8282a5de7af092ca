use anyhow::{anyhow, Result};

/// Parses a "HH:MM" time of day into (hour, minute).
pub fn parse_time(input: &str) -> Result<(u32, u32)> {
    let (hour_str, minute_str) = input
        .trim()
        .split_once(':')
        .ok_or_else(|| anyhow!("Time must look like HH:MM, e.g. 09:30"))?;

    let hour: u32 = hour_str
        .parse()
        .map_err(|_| anyhow!("Invalid hour: {hour_str}"))?;
    let minute: u32 = minute_str
        .parse()
        .map_err(|_| anyhow!("Invalid minute: {minute_str}"))?;

    if hour > 23 {
        return Err(anyhow!("Hour must be between 0 and 23"));
    }
    if minute > 59 {
        return Err(anyhow!("Minute must be between 0 and 59"));
    }

    Ok((hour, minute))
}

pub fn format_time(hour: i64, minute: i64) -> String {
    format!("{hour:02}:{minute:02}")
}

/// Parses a weekday name ("sun".."sat", full names accepted) into the
/// Sunday-based index used by task rows.
pub fn parse_weekday(input: &str) -> Option<u32> {
    match input.trim().to_lowercase().as_str() {
        "sun" | "sunday" => Some(0),
        "mon" | "monday" => Some(1),
        "tue" | "tuesday" => Some(2),
        "wed" | "wednesday" => Some(3),
        "thu" | "thursday" => Some(4),
        "fri" | "friday" => Some(5),
        "sat" | "saturday" => Some(6),
        _ => None,
    }
}

pub fn weekday_name(weekday_from_sunday: i64) -> &'static str {
    match weekday_from_sunday {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "?",
    }
}
