use teloxide::prelude::*;

type DispatchResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Fallback for messages that did not parse as a known command. Slash input
/// gets an explicit rejection so no command is ever silently dropped; plain
/// chatter is ignored.
pub async fn handle_general_message(bot: Bot, msg: Message) -> DispatchResult {
    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            let verb = text.split_whitespace().next().unwrap_or(text);
            bot.send_message(
                msg.chat.id,
                format!(
                    "Unrecognized or malformed command: {verb}\n\
                     Use /help to see the available commands."
                ),
            )
            .await?;
        }
    }
    Ok(())
}
