use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UpdateDTO {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageDTO>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQueryDTO>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MessageDTO {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<TelegramUserDTO>,
    pub chat: ChatDTO,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatDTO {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct TelegramUserDTO {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// Sent when a user taps an inline keyboard button
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CallbackQueryDTO {
    pub id: String,
    pub from: TelegramUserDTO,
    /// The message carrying the keyboard, absent when it is too old
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<MessageDTO>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_decodes_message_update() {
        let raw = r#"{
            "update_id": 10,
            "message": {
                "message_id": 3,
                "from": {"id": 42, "is_bot": false, "first_name": "Ada", "language_code": "en"},
                "chat": {"id": 42, "type": "private"},
                "date": 1700000000,
                "text": "/start"
            }
        }"#;
        let update: UpdateDTO = serde_json::from_str(raw).unwrap();
        assert_eq!(update.update_id, 10);
        assert!(update.callback_query.is_none());
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("/start"));
        let from = message.from.unwrap();
        assert_eq!(from.first_name, "Ada");
        assert_eq!(from.username, None);
    }

    #[test]
    fn it_decodes_callback_update() {
        let raw = r#"{
            "update_id": 11,
            "callback_query": {
                "id": "abc",
                "from": {"id": 42, "is_bot": false, "first_name": "Ada"},
                "message": {"message_id": 7, "chat": {"id": 42}},
                "data": "occ:5:done"
            }
        }"#;
        let update: UpdateDTO = serde_json::from_str(raw).unwrap();
        let cb = update.callback_query.unwrap();
        assert_eq!(cb.data.as_deref(), Some("occ:5:done"));
        assert_eq!(cb.message.unwrap().message_id, 7);
    }
}
