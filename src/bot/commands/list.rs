use crate::database::{connection::DatabaseManager, models::*};
use crate::utils::datetime::{format_time, weekday_name};
use teloxide::prelude::*;

pub async fn handle_list(bot: Bot, msg: Message, db: &DatabaseManager) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    let tasks = match Task::find_by_chat(&db.pool, chat_id).await {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::error!("Failed to list tasks for chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "❌ Could not load your reminders.").await?;
            return Ok(());
        }
    };

    if tasks.is_empty() {
        bot.send_message(
            msg.chat.id,
            "You have no active reminders.\n\nAdd one with /remind HH:MM <once|daily|weekdays|sun..sat> <text>",
        )
        .await?;
        return Ok(());
    }

    let mut message_text = String::from("📋 Your reminders:\n\n");
    for (i, task) in tasks.iter().enumerate() {
        message_text.push_str(&format!(
            "{}. {} {} - {}\n",
            i + 1,
            format_time(task.hour, task.minute),
            schedule_label(task),
            task.text
        ));
    }
    message_text.push_str("\nDelete one with /delete <number>");

    bot.send_message(msg.chat.id, message_text).await?;
    Ok(())
}

fn schedule_label(task: &Task) -> String {
    match task.recurrence() {
        Recurrence::Once => "(once)".to_string(),
        Recurrence::Daily => "(daily)".to_string(),
        Recurrence::Weekdays => "(weekdays)".to_string(),
        Recurrence::Weekly => format!("(every {})", weekday_name(task.week_day.unwrap_or(0))),
    }
}
