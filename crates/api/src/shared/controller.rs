use crate::{error::NagError, telegram::dispatcher::CommandHandler};
use nagging_bot_api_structs::dtos::{MessageDTO, TelegramUserDTO};
use nagging_bot_domain::User;
use nagging_bot_infra::{telegram::Responder, NagContext};
use std::sync::Arc;
use tracing::debug;

/// Turns a text command from a sender into the text replied to them
#[async_trait::async_trait]
pub trait CommandController: Send + Sync {
    /// `args` is everything after the command token, trimmed
    async fn handle(
        &self,
        sender: &TelegramUserDTO,
        args: &str,
        ctx: &NagContext,
    ) -> Result<String, NagError>;
}

/// Connects a `CommandController` to the dispatcher: runs it and sends the
/// reply, or the error text, back to the chat the command came from.
pub struct CommandRoute<C> {
    controller: C,
    ctx: NagContext,
    responder: Arc<dyn Responder>,
}

impl<C: CommandController> CommandRoute<C> {
    pub fn new(controller: C, ctx: NagContext, responder: Arc<dyn Responder>) -> Self {
        Self {
            controller,
            ctx,
            responder,
        }
    }
}

#[async_trait::async_trait]
impl<C: CommandController> CommandHandler for CommandRoute<C> {
    async fn handle(&self, message: &MessageDTO) -> anyhow::Result<()> {
        let sender = match &message.from {
            Some(sender) => sender,
            None => {
                debug!(
                    "Ignoring command without sender in chat {}",
                    message.chat.id
                );
                return Ok(());
            }
        };
        let args = command_args(message.text.as_deref().unwrap_or_default());

        let reply = match self.controller.handle(sender, args, &self.ctx).await {
            Ok(reply) => reply,
            Err(e) => e.to_string(),
        };
        self.responder
            .send_message(message.chat.id, &reply, None)
            .await
    }
}

/// Everything after the leading command token
pub fn command_args(text: &str) -> &str {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(idx) => text[idx..].trim(),
        None => "",
    }
}

/// The profile of the sender as a `User` that has not been persisted yet
pub fn user_from_sender(sender: &TelegramUserDTO) -> User {
    let mut user = User::new(sender.id);
    user.username = sender.username.clone().unwrap_or_default();
    user.first_name = sender.first_name.clone();
    user.last_name = sender.last_name.clone().unwrap_or_default();
    user.language = sender.language_code.clone().unwrap_or_default();
    user
}
