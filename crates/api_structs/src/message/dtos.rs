use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct InlineKeyboardMarkupDTO {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButtonDTO>>,
}

impl InlineKeyboardMarkupDTO {
    /// A markup without any buttons. Sending it removes an existing keyboard.
    pub fn empty() -> Self {
        Self {
            inline_keyboard: Vec::new(),
        }
    }

    pub fn single_row(buttons: Vec<InlineKeyboardButtonDTO>) -> Self {
        Self {
            inline_keyboard: vec![buttons],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct InlineKeyboardButtonDTO {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButtonDTO {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}
