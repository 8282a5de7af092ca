/// Countdown and yearly-date math for the /today digest
pub mod countdown;
/// Time-of-day and weekday parsing/formatting helpers
pub mod datetime;
/// Input validation for command arguments
pub mod validation;
