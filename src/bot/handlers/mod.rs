pub mod message;

use crate::database::connection::DatabaseManager;
use teloxide::{
    dispatching::{dialogue, UpdateHandler},
    prelude::*,
};

pub struct BotHandler {
    pub db: DatabaseManager,
}

impl BotHandler {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let db = self.db.clone();

        dialogue::enter::<Update, teloxide::dispatching::dialogue::InMemStorage<()>, (), _>()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let db = db.clone();
                        async move {
                            message::command_handler(bot, msg, cmd, db)
                                .await
                                .map_err(Into::into)
                        }
                    }),
            )
    }
}
