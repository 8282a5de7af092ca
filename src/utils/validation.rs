use anyhow::{anyhow, Result};

pub fn validate_reminder_text(text: &str) -> Result<()> {
    let text = text.trim();

    if text.is_empty() {
        return Err(anyhow!("Reminder text cannot be empty"));
    }

    if text.len() > 500 {
        return Err(anyhow!("Reminder text cannot be longer than 500 characters"));
    }

    Ok(())
}

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }

    // Positive IDs are private chats, bounded by Telegram's user id range
    if chat_id > 2147483647 {
        return Err(anyhow!("Invalid user chat ID range"));
    }

    // Negative IDs are groups/supergroups; reject values beyond the
    // known supergroup range
    if chat_id < -2000000000000 {
        return Err(anyhow!("Chat ID out of valid range"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reminder_text_valid() {
        assert!(validate_reminder_text("Standup").is_ok());
        assert!(validate_reminder_text("  take out the trash  ").is_ok());
        assert!(validate_reminder_text(&"a".repeat(500)).is_ok());
    }

    #[test]
    fn test_validate_reminder_text_invalid() {
        assert!(validate_reminder_text("").is_err());
        assert!(validate_reminder_text("   ").is_err());
        assert!(validate_reminder_text(&"a".repeat(501)).is_err());
    }

    #[test]
    fn test_validate_telegram_chat_id_valid() {
        // Private chat (positive)
        assert!(validate_telegram_chat_id(12345).is_ok());
        assert!(validate_telegram_chat_id(987654321).is_ok());

        // Group chat (negative)
        assert!(validate_telegram_chat_id(-12345).is_ok());

        // Supergroup (very negative)
        assert!(validate_telegram_chat_id(-1001234567890).is_ok());
    }

    #[test]
    fn test_validate_telegram_chat_id_invalid() {
        assert!(validate_telegram_chat_id(0).is_err());
        assert!(validate_telegram_chat_id(3000000000).is_err());
        assert!(validate_telegram_chat_id(-3000000000000).is_err());
    }
}
