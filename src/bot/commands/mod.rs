pub mod adddate;
pub mod delete;
pub mod deletedate;
pub mod holidays;
pub mod list;
pub mod remind;
pub mod timezone;
pub mod today;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Reminder bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Add a reminder: /remind HH:MM <once|daily|weekdays|sun..sat> <text>")]
    Remind { input: String },
    #[command(description = "List your active reminders")]
    List,
    #[command(description = "Delete a reminder by its /list number")]
    Delete { index: String },
    #[command(description = "Set your timezone (IANA name, e.g. Asia/Yangon)")]
    Timezone { zone: String },
    #[command(description = "Show this year's Myanmar holidays")]
    Holidays,
    #[command(description = "Today's holidays and your dates with countdowns")]
    Today,
    #[command(description = "Track a yearly date: /adddate MM-DD [YYYY] <name>")]
    Adddate { input: String },
    #[command(description = "Remove a date by its /today number")]
    Deletedate { index: String },
}
