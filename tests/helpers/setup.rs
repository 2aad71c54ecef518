use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use nagging_bot_api_structs::dtos::{
    CallbackQueryDTO, ChatDTO, InlineKeyboardMarkupDTO, MessageDTO, TelegramUserDTO, UpdateDTO,
};
use nagging_bot_domain::{Occurrence, Reminder, User};
use nagging_bot_infra::{
    telegram::{Responder, UpdateSource},
    Config, FixedSys, NagContext,
};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 19, 8, 0, 0).unwrap()
}

/// In-memory context with the clock fixed at `now()`
pub fn setup_context() -> NagContext {
    let mut ctx = NagContext::create_inmemory(Config::new("token"));
    ctx.sys = Arc::new(FixedSys(now()));
    ctx
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub chat_id: i64,
    pub text: String,
    pub markup: Option<InlineKeyboardMarkupDTO>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditedMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
}

/// Records everything sent through it, or rejects everything when failing
#[derive(Default)]
pub struct RecordingResponder {
    pub failing: bool,
    pub sent: Mutex<Vec<SentMessage>>,
    pub edited: Mutex<Vec<EditedMessage>>,
}

impl RecordingResponder {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn edited(&self) -> Vec<EditedMessage> {
        self.edited.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Responder for RecordingResponder {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkupDTO>,
    ) -> anyhow::Result<()> {
        if self.failing {
            anyhow::bail!("transport is down");
        }
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            text: text.to_string(),
            markup,
        });
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        _markup: Option<InlineKeyboardMarkupDTO>,
    ) -> anyhow::Result<()> {
        if self.failing {
            anyhow::bail!("transport is down");
        }
        self.edited.lock().unwrap().push(EditedMessage {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Hands out the queued batches once, then nothing
#[derive(Default)]
pub struct ScriptedSource {
    batches: Mutex<VecDeque<Vec<UpdateDTO>>>,
}

impl ScriptedSource {
    pub fn new(batches: Vec<Vec<UpdateDTO>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
        }
    }
}

#[async_trait::async_trait]
impl UpdateSource for ScriptedSource {
    async fn fetch_updates(&self, offset: i64) -> anyhow::Result<Vec<UpdateDTO>> {
        let batch = self.batches.lock().unwrap().pop_front().unwrap_or_default();
        Ok(batch.into_iter().filter(|u| u.update_id >= offset).collect())
    }
}

pub fn sender(id: i64) -> TelegramUserDTO {
    TelegramUserDTO {
        id,
        first_name: "Ada".into(),
        ..Default::default()
    }
}

pub fn message(message_id: i64, from: i64, text: &str) -> MessageDTO {
    MessageDTO {
        message_id,
        from: Some(sender(from)),
        chat: ChatDTO { id: from },
        text: Some(text.into()),
    }
}

pub fn command_update(update_id: i64, from: i64, text: &str) -> UpdateDTO {
    UpdateDTO {
        update_id,
        message: Some(message(update_id, from, text)),
        callback_query: None,
    }
}

pub fn callback_update(update_id: i64, from: i64, data: &str, message: MessageDTO) -> UpdateDTO {
    UpdateDTO {
        update_id,
        message: None,
        callback_query: Some(CallbackQueryDTO {
            id: update_id.to_string(),
            from: sender(from),
            message: Some(message),
            data: Some(data.into()),
        }),
    }
}

/// A user with external id `external_id` owning one reminder with a
/// single occurrence that fired a minute ago
pub async fn insert_due_occurrence(ctx: &NagContext, external_id: i64) -> (Reminder, Occurrence) {
    let user = ctx
        .repos
        .users
        .upsert(&User::new(external_id))
        .await
        .unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
    let reminder = Reminder::new(
        user.id,
        "Pill".into(),
        "VitC".into(),
        day,
        day,
        Vec::new(),
        chrono_tz::UTC,
    )
    .unwrap();
    let reminder = ctx.repos.reminders.create(&reminder).await.unwrap();
    let occurrence = ctx
        .repos
        .occurrences
        .create(&Occurrence::new(
            reminder.id,
            now() - chrono::Duration::minutes(1),
        ))
        .await
        .unwrap();
    (reminder, occurrence)
}
