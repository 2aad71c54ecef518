use nagging_bot_api_structs::dtos::{CallbackQueryDTO, MessageDTO, UpdateDTO};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, error};

#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, message: &MessageDTO) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
pub trait CallbackHandler: Send + Sync {
    async fn handle(&self, callback: &CallbackQueryDTO) -> anyhow::Result<()>;
}

/// Routes updates to the registered handlers.
///
/// Callback queries go exclusively to the callback handler. Messages whose
/// text starts with `/` go to the handler registered for their first token.
/// Everything else is dropped.
#[derive(Default)]
pub struct Dispatcher {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
    callback: Option<Arc<dyn CallbackHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `command`, e.g. `/start`
    pub fn register_command(&mut self, command: &str, handler: Arc<dyn CommandHandler>) {
        self.commands.insert(command.to_string(), handler);
    }

    pub fn register_callback(&mut self, handler: Arc<dyn CallbackHandler>) {
        self.callback = Some(handler);
    }

    /// Handler failures are logged and never returned, so one bad update
    /// cannot stop the processing of the ones after it.
    pub async fn dispatch(&self, update: &UpdateDTO) {
        if let (Some(callback), Some(handler)) = (&update.callback_query, &self.callback) {
            if let Err(e) = handler.handle(callback).await {
                error!(
                    "Callback handler failed for update {}: {:?}",
                    update.update_id, e
                );
            }
            return;
        }

        let message = match &update.message {
            Some(message) => message,
            None => return,
        };
        let command = match message.text.as_deref().and_then(command_token) {
            Some(command) => command,
            None => return,
        };
        match self.commands.get(command) {
            Some(handler) => {
                if let Err(e) = handler.handle(message).await {
                    error!("Command handler failed for {}: {:?}", command, e);
                }
            }
            None => debug!("Ignoring unknown command {}", command),
        }
    }
}

/// The leading `/command` token of a message, without a `@botname` suffix
fn command_token(text: &str) -> Option<&str> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    let token = text.split(char::is_whitespace).next().unwrap_or(text);
    Some(token.split('@').next().unwrap_or(token))
}
