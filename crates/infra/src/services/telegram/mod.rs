mod bot_api;

pub use bot_api::{BotApiError, TelegramBotApi};
use nagging_bot_api_structs::dtos::{InlineKeyboardMarkupDTO, UpdateDTO};

/// Outbound side of the messaging transport
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkupDTO>,
    ) -> anyhow::Result<()>;

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkupDTO>,
    ) -> anyhow::Result<()>;
}

/// Inbound side of the messaging transport.
///
/// Every update with an id lower than `offset` is treated as acknowledged
/// and will not be returned again.
#[async_trait::async_trait]
pub trait UpdateSource: Send + Sync {
    async fn fetch_updates(&self, offset: i64) -> anyhow::Result<Vec<UpdateDTO>>;
}
