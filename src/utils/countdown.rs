use chrono::NaiveDate;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

pub fn short_month_name(month: u32) -> &'static str {
    SHORT_MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

/// Whether (month, day) names a real calendar day in at least some
/// year. Feb 29 is accepted; it resolves to the next leap year.
pub fn is_valid_month_day(month: u32, day: u32) -> bool {
    if !(1..=12).contains(&month) || day == 0 {
        return false;
    }
    let max = match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    };
    day <= max
}

/// The next calendar occurrence of a yearly (month, day) on or after
/// `today`. For Feb 29 this is the next leap year, hence the short
/// year scan. None only for inputs that name no real day.
pub fn next_occurrence(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    use chrono::Datelike;

    (today.year()..=today.year() + 8)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|date| *date >= today)
}

/// Whole days from `today` until the next occurrence of (month, day).
/// Zero means the date is today.
pub fn days_until(month: u32, day: u32, today: NaiveDate) -> Option<i64> {
    next_occurrence(month, day, today).map(|date| (date - today).num_days())
}

/// Human countdown for a day count: exact under a week, then rounded
/// down to weeks, months, and years.
pub fn format_countdown(days: i64) -> String {
    if days == 0 {
        return "🎉 Today!".to_string();
    }
    if days == 1 {
        return "Tomorrow".to_string();
    }
    if days < 7 {
        return format!("{days} days");
    }
    if days < 30 {
        let weeks = days / 7;
        return if weeks == 1 {
            "1 week".to_string()
        } else {
            format!("{weeks} weeks")
        };
    }
    if days < 365 {
        let months = days / 30;
        return if months == 1 {
            "1 month".to_string()
        } else {
            format!("{months} months")
        };
    }
    let years = days / 365;
    let remaining_months = (days % 365) / 30;
    if remaining_months == 0 {
        if years == 1 {
            "1 year".to_string()
        } else {
            format!("{years} years")
        }
    } else {
        format!("{years}y {remaining_months}m")
    }
}

/// Age line for a birthday with a known birth year.
pub fn format_age(birth_year: i64, current_year: i64) -> Option<String> {
    let age = current_year - birth_year;
    if age < 0 {
        return None;
    }
    Some(match age {
        0 => "Just born".to_string(),
        1 => "1 year old".to_string(),
        n => format!("{n} years old"),
    })
}

/// Duration line for an anniversary with a known starting year.
pub fn format_years_together(start_year: i64, current_year: i64) -> Option<String> {
    let years = current_year - start_year;
    if years < 0 {
        return None;
    }
    Some(match years {
        0 => "Just started".to_string(),
        1 => "1 year together".to_string(),
        n => format!("{n} years together"),
    })
}
