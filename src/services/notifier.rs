use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::ChatId;

/// Outbound message capability consumed by the scheduler. The
/// scheduler is generic over this trait so its firing behavior can be
/// exercised in tests without a live Telegram connection.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Delivers one reminder to its owner.
    async fn send_reminder(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Delivers the daily holiday digest to one owner.
    async fn send_holiday_digest(&self, chat_id: i64, names: &[String]) -> Result<()>;
}

/// Production sink backed by the teloxide bot.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl Notifier for TelegramNotifier {
    async fn send_reminder(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), format!("⏰ Reminder: {text}"))
            .await?;
        Ok(())
    }

    async fn send_holiday_digest(&self, chat_id: i64, names: &[String]) -> Result<()> {
        let listing = names
            .iter()
            .map(|n| format!("🇲🇲 {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        self.bot
            .send_message(ChatId(chat_id), format!("🎉 Today is a Holiday!\n\n{listing}"))
            .await?;
        Ok(())
    }
}
