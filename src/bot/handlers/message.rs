use crate::bot::commands::Command;
use crate::database::connection::DatabaseManager;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    db: DatabaseManager,
) -> ResponseResult<()> {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        Command::Start => {
            bot.send_message(
                msg.chat.id,
                "👋 Welcome! I keep track of your reminders, personal dates, and Myanmar public holidays.\n\n\
                 Add a reminder with /remind 09:00 daily Standup\n\
                 Track a birthday with /adddate 03-15 1990 Mom's Birthday\n\
                 See today's events with /today\n\
                 Set your timezone with /timezone Asia/Yangon\n\
                 Use /help to see all commands.",
            )
            .await?;
        }
        Command::Remind { input } => {
            crate::bot::commands::remind::handle_remind(bot, msg, input, &db).await?;
        }
        Command::List => {
            crate::bot::commands::list::handle_list(bot, msg, &db).await?;
        }
        Command::Delete { index } => {
            crate::bot::commands::delete::handle_delete(bot, msg, index, &db).await?;
        }
        Command::Timezone { zone } => {
            crate::bot::commands::timezone::handle_timezone(bot, msg, zone, &db).await?;
        }
        Command::Holidays => {
            crate::bot::commands::holidays::handle_holidays(bot, msg, &db).await?;
        }
        Command::Today => {
            crate::bot::commands::today::handle_today(bot, msg, &db).await?;
        }
        Command::Adddate { input } => {
            crate::bot::commands::adddate::handle_adddate(bot, msg, input, &db).await?;
        }
        Command::Deletedate { index } => {
            crate::bot::commands::deletedate::handle_deletedate(bot, msg, index, &db).await?;
        }
    }
    Ok(())
}
