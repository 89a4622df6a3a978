pub mod general_message;
pub mod message;

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::config::Config;
use crate::database::connection::DatabaseManager;

/// Wires commands and fallback messages to their handlers. The pool and the
/// settings are injected here at startup; nothing else is shared.
pub struct BotHandler {
    db: DatabaseManager,
    config: Arc<Config>,
}

impl BotHandler {
    pub fn new(db: DatabaseManager, config: Arc<Config>) -> Self {
        Self { db, config }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        use teloxide::dispatching::UpdateFilterExt;

        let db = self.db.clone();
        let config = self.config.clone();

        dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<crate::bot::commands::Command>()
                    .endpoint(move |bot, msg, cmd| {
                        let db = db.clone();
                        let config = config.clone();
                        async move { message::command_handler(bot, msg, cmd, db, config).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .endpoint(|bot, msg| async move {
                        general_message::handle_general_message(bot, msg).await
                    }),
            )
    }
}
