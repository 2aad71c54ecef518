use crate::error::NagError;
use crate::shared::{
    controller::CommandController,
    usecase::{execute, UseCase},
};
use nagging_bot_api_structs::dtos::TelegramUserDTO;
use nagging_bot_domain::{format_date, Reminder};
use nagging_bot_infra::NagContext;

const MAX_LISTED: usize = 20;

pub struct ListRemindersController;

#[async_trait::async_trait]
impl CommandController for ListRemindersController {
    async fn handle(
        &self,
        sender: &TelegramUserDTO,
        _args: &str,
        ctx: &NagContext,
    ) -> Result<String, NagError> {
        let usecase = ListRemindersUseCase {
            external_id: sender.id,
        };
        let reminders = execute(usecase, ctx).await.map_err(NagError::from)?;
        if reminders.is_empty() {
            return Ok("No reminders found.".into());
        }

        let mut reply = format!("Your reminders (latest up to {}):", MAX_LISTED);
        for reminder in &reminders {
            reply.push('\n');
            reply.push_str(&reminder_line(reminder));
        }
        Ok(reply)
    }
}

fn reminder_line(reminder: &Reminder) -> String {
    let times = if reminder.times_of_day.is_empty() {
        "n/a".to_string()
    } else {
        reminder
            .times_of_day
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(";")
    };
    format!(
        "#{}: {} | {} | {} to {} | TZ={} | Times={}",
        reminder.id,
        reminder.name,
        reminder.description,
        format_date(&reminder.start_date),
        format_date(&reminder.end_date),
        reminder.timezone.name(),
        times
    )
}

/// Newest reminders of the person with the given external id first.
/// Someone who never talked to the bot simply has none.
#[derive(Debug)]
pub struct ListRemindersUseCase {
    pub external_id: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(anyhow::Error),
}

impl From<UseCaseError> for NagError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(_) => {
                Self::InternalError("Failed to list reminders".into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for ListRemindersUseCase {
    type Response = Vec<Reminder>;
    type Error = UseCaseError;

    const NAME: &'static str = "ListReminders";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx
            .repos
            .users
            .get_by_external_id(self.external_id)
            .await
            .map_err(UseCaseError::StorageError)?
        {
            Some(user) => user,
            None => return Ok(Vec::new()),
        };

        let mut reminders = ctx
            .repos
            .reminders
            .list_by_user(user.id)
            .await
            .map_err(UseCaseError::StorageError)?;
        reminders.sort_by(|a, b| b.id.cmp(&a.id));
        reminders.truncate(MAX_LISTED);
        Ok(reminders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use nagging_bot_domain::{TimeOfDay, User};
    use nagging_bot_infra::Config;

    fn sender(id: i64) -> TelegramUserDTO {
        TelegramUserDTO {
            id,
            first_name: "Ada".into(),
            ..Default::default()
        }
    }

    async fn insert_reminders(ctx: &NagContext, external_id: i64, count: usize) -> User {
        let user = ctx.repos.users.upsert(&User::new(external_id)).await.unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        for i in 0..count {
            let reminder = Reminder::new(
                user.id,
                format!("Pill{}", i),
                "VitC".into(),
                day,
                day,
                vec![
                    TimeOfDay::new(19, 0).unwrap(),
                    TimeOfDay::new(8, 5).unwrap(),
                ],
                chrono_tz::Europe::Warsaw,
            )
            .unwrap();
            ctx.repos.reminders.create(&reminder).await.unwrap();
        }
        user
    }

    #[tokio::test]
    async fn unknown_sender_has_no_reminders() {
        let ctx = NagContext::create_inmemory(Config::new("token"));
        let reply = ListRemindersController
            .handle(&sender(7), "", &ctx)
            .await
            .unwrap();
        assert_eq!(reply, "No reminders found.");
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let ctx = NagContext::create_inmemory(Config::new("token"));
        insert_reminders(&ctx, 7, 2).await;
        insert_reminders(&ctx, 8, 1).await;

        let reply = ListRemindersController
            .handle(&sender(7), "", &ctx)
            .await
            .unwrap();
        assert_eq!(
            reply,
            "Your reminders (latest up to 20):\n\
             #2: Pill1 | VitC | 19.01.2026 to 19.01.2026 | TZ=Europe/Warsaw | Times=08:05;19:00\n\
             #1: Pill0 | VitC | 19.01.2026 to 19.01.2026 | TZ=Europe/Warsaw | Times=08:05;19:00"
        );
    }

    #[tokio::test]
    async fn lists_at_most_twenty() {
        let ctx = NagContext::create_inmemory(Config::new("token"));
        insert_reminders(&ctx, 7, 25).await;

        let mut usecase = ListRemindersUseCase { external_id: 7 };
        let reminders = usecase.execute(&ctx).await.unwrap();
        assert_eq!(reminders.len(), 20);
        assert_eq!(reminders[0].id, 25);
        assert_eq!(reminders[19].id, 6);
    }
}
