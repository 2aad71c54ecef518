use crate::{
    dtos::{InlineKeyboardMarkupDTO, MessageDTO},
    shared::APIEnvelope,
};
use serde::{de::IgnoredAny, Deserialize, Serialize};

pub mod send_message {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub chat_id: i64,
        pub text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub reply_markup: Option<InlineKeyboardMarkupDTO>,
    }

    pub type APIResponse = APIEnvelope<MessageDTO>;
}

pub mod edit_message_text {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub chat_id: i64,
        pub message_id: i64,
        pub text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub reply_markup: Option<InlineKeyboardMarkupDTO>,
    }

    /// Either the edited message or `true`, neither is used
    pub type APIResponse = APIEnvelope<IgnoredAny>;
}
