use super::{Delivery, Notifier, NotifyError};
use crate::telegram::status_ui::initial_markup;
use chrono::SecondsFormat;
use nagging_bot_infra::{telegram::Responder, IUserRepo};
use std::sync::Arc;

/// Sends the occurrence to the chat of the `User` owning its `Reminder`,
/// with Done / Ignore buttons attached.
pub struct TelegramNotifier {
    users: Arc<dyn IUserRepo>,
    responder: Arc<dyn Responder>,
}

impl TelegramNotifier {
    pub fn new(users: Arc<dyn IUserRepo>, responder: Arc<dyn Responder>) -> Self {
        Self { users, responder }
    }
}

fn delivery_text(delivery: &Delivery, name: &str, description: &str) -> String {
    format!(
        "Reminder: {}\n{}\nOccurrence #{} at {}",
        name,
        description,
        delivery.occurrence.id,
        delivery
            .occurrence
            .fire_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, delivery: &Delivery) -> Result<(), NotifyError> {
        let reminder = delivery
            .reminder
            .as_ref()
            .ok_or(NotifyError::MissingReminder(delivery.occurrence.id))?;

        let user = self
            .users
            .get(reminder.user_id)
            .await
            .map_err(NotifyError::Store)?;
        let chat_id = match user {
            Some(user) if user.external_id != 0 => user.external_id,
            _ => return Err(NotifyError::NoRecipient(reminder.user_id)),
        };

        let text = delivery_text(delivery, &reminder.name, &reminder.description);
        self.responder
            .send_message(chat_id, &text, Some(initial_markup(delivery.occurrence.id)))
            .await
            .map_err(NotifyError::Transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use nagging_bot_api_structs::dtos::InlineKeyboardMarkupDTO;
    use nagging_bot_domain::{Occurrence, Reminder, User};
    use nagging_bot_infra::Repos;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingResponder {
        sent: Mutex<Vec<(i64, String, Option<InlineKeyboardMarkupDTO>)>>,
    }

    #[async_trait::async_trait]
    impl Responder for RecordingResponder {
        async fn send_message(
            &self,
            chat_id: i64,
            text: &str,
            markup: Option<InlineKeyboardMarkupDTO>,
        ) -> anyhow::Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id, text.to_string(), markup));
            Ok(())
        }

        async fn edit_message_text(
            &self,
            _chat_id: i64,
            _message_id: i64,
            _text: &str,
            _markup: Option<InlineKeyboardMarkupDTO>,
        ) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn delivery(user_id: i64, with_reminder: bool) -> Delivery {
        let date = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        let mut reminder = Reminder::new(
            user_id,
            "Pill".into(),
            "VitC".into(),
            date,
            date,
            vec![],
            chrono_tz::UTC,
        )
        .unwrap();
        reminder.id = 1;
        let mut occurrence =
            Occurrence::new(1, Utc.with_ymd_and_hms(2026, 1, 19, 7, 0, 0).unwrap());
        occurrence.id = 4;
        Delivery {
            occurrence,
            reminder: if with_reminder { Some(reminder) } else { None },
        }
    }

    #[tokio::test]
    async fn it_sends_to_the_owner_chat() {
        let repos = Repos::create_inmemory();
        let user = repos.users.upsert(&User::new(42)).await.unwrap();
        let responder = Arc::new(RecordingResponder::default());
        let notifier = TelegramNotifier::new(repos.users.clone(), responder.clone());

        notifier.send(&delivery(user.id, true)).await.unwrap();

        let sent = responder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (chat_id, text, markup) = &sent[0];
        assert_eq!(*chat_id, 42);
        assert_eq!(
            text,
            "Reminder: Pill\nVitC\nOccurrence #4 at 2026-01-19T07:00:00Z"
        );
        assert_eq!(markup.as_ref(), Some(&initial_markup(4)));
    }

    #[tokio::test]
    async fn it_fails_without_reminder_or_recipient() {
        let repos = Repos::create_inmemory();
        let responder = Arc::new(RecordingResponder::default());
        let notifier = TelegramNotifier::new(repos.users.clone(), responder.clone());

        let err = notifier.send(&delivery(1, false)).await.unwrap_err();
        assert!(matches!(err, NotifyError::MissingReminder(4)));

        let err = notifier.send(&delivery(77, true)).await.unwrap_err();
        assert!(matches!(err, NotifyError::NoRecipient(77)));
        assert!(responder.sent.lock().unwrap().is_empty());
    }
}
