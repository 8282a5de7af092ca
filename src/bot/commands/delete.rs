use crate::database::{connection::DatabaseManager, models::*};
use teloxide::prelude::*;

/// Deactivates the N-th reminder as numbered by /list. Deactivation is
/// a soft delete; the scheduler tolerates the row disappearing from
/// its active set mid-tick.
pub async fn handle_delete(
    bot: Bot,
    msg: Message,
    index: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id.0;

    let index: usize = match index.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            bot.send_message(msg.chat.id, "Usage: /delete <number> (see /list for numbers)")
                .await?;
            return Ok(());
        }
    };

    let tasks = match Task::find_by_chat(&db.pool, chat_id).await {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::error!("Failed to list tasks for chat {}: {}", chat_id, e);
            bot.send_message(msg.chat.id, "❌ Could not load your reminders.").await?;
            return Ok(());
        }
    };

    if index == 0 || index > tasks.len() {
        bot.send_message(
            msg.chat.id,
            format!("No reminder #{index}. You have {} (see /list).", tasks.len()),
        )
        .await?;
        return Ok(());
    }

    let task = &tasks[index - 1];
    match Task::deactivate(&db.pool, &task.id).await {
        Ok(()) => {
            bot.send_message(msg.chat.id, format!("🗑️ Deleted reminder: {}", task.text))
                .await?;
        }
        Err(e) => {
            tracing::error!("Failed to deactivate task {}: {}", task.id, e);
            bot.send_message(msg.chat.id, "❌ Could not delete the reminder. Please try again.")
                .await?;
        }
    }

    Ok(())
}
