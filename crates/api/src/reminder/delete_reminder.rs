use crate::error::NagError;
use crate::shared::{
    controller::CommandController,
    usecase::{execute, UseCase},
};
use nagging_bot_api_structs::dtos::TelegramUserDTO;
use nagging_bot_domain::{Reminder, ID};
use nagging_bot_infra::NagContext;
use tracing::info;

pub struct DeleteReminderController;

#[async_trait::async_trait]
impl CommandController for DeleteReminderController {
    async fn handle(
        &self,
        sender: &TelegramUserDTO,
        args: &str,
        ctx: &NagContext,
    ) -> Result<String, NagError> {
        let mut tokens = args.split_whitespace();
        let reminder_id = match (tokens.next(), tokens.next()) {
            (Some(token), None) => token
                .parse::<ID>()
                .map_err(|_| NagError::BadClientData("Invalid id".into()))?,
            _ => return Err(NagError::BadClientData("Usage: /delete <reminder_id>".into())),
        };

        let usecase = DeleteReminderUseCase {
            external_id: sender.id,
            reminder_id,
        };
        execute(usecase, ctx).await.map_err(NagError::from)?;
        Ok("Reminder deleted".into())
    }
}

/// Removes a reminder together with all of its occurrences. Only the
/// owner of the reminder is allowed to do so.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub external_id: i64,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound,
    NotOwner,
    StorageError(anyhow::Error),
    OccurrencesNotDeleted(anyhow::Error),
    ReminderNotDeleted(anyhow::Error),
}

impl From<UseCaseError> for NagError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => Self::NotFound("Reminder not found".into()),
            UseCaseError::NotOwner => {
                Self::Unauthorized("Cannot delete reminder of another user".into())
            }
            UseCaseError::StorageError(_) => Self::InternalError("Failed to delete".into()),
            UseCaseError::OccurrencesNotDeleted(_) => {
                Self::InternalError("Failed to delete occurrences".into())
            }
            UseCaseError::ReminderNotDeleted(_) => {
                Self::InternalError("Failed to delete reminder".into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        let user = ctx
            .repos
            .users
            .get_by_external_id(self.external_id)
            .await
            .map_err(UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound)?;
        let reminder = ctx
            .repos
            .reminders
            .get(self.reminder_id)
            .await
            .map_err(UseCaseError::StorageError)?
            .ok_or(UseCaseError::NotFound)?;
        if reminder.user_id != user.id {
            return Err(UseCaseError::NotOwner);
        }

        // Occurrences first so that no orphan is left behind for the scheduler
        let res = ctx
            .repos
            .occurrences
            .delete_by_reminder(reminder.id)
            .await
            .map_err(UseCaseError::OccurrencesNotDeleted)?;
        ctx.repos
            .reminders
            .delete(reminder.id)
            .await
            .map_err(UseCaseError::ReminderNotDeleted)?;
        info!(
            "Deleted reminder {} with {} occurrences",
            reminder.id, res.deleted_count
        );

        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use nagging_bot_domain::{Occurrence, User};
    use nagging_bot_infra::Config;

    fn sender(id: i64) -> TelegramUserDTO {
        TelegramUserDTO {
            id,
            first_name: "Ada".into(),
            ..Default::default()
        }
    }

    async fn setup() -> (NagContext, Reminder) {
        let ctx = NagContext::create_inmemory(Config::new("token"));
        let owner = ctx.repos.users.upsert(&User::new(7)).await.unwrap();
        ctx.repos.users.upsert(&User::new(8)).await.unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        let reminder = Reminder::new(
            owner.id,
            "Pill".into(),
            "VitC".into(),
            day,
            day,
            Vec::new(),
            chrono_tz::UTC,
        )
        .unwrap();
        let reminder = ctx.repos.reminders.create(&reminder).await.unwrap();
        let fire_at = Utc.with_ymd_and_hms(2026, 1, 19, 8, 0, 0).unwrap();
        ctx.repos
            .occurrences
            .create(&Occurrence::new(reminder.id, fire_at))
            .await
            .unwrap();
        (ctx, reminder)
    }

    async fn delete(ctx: &NagContext, external_id: i64, args: &str) -> String {
        match DeleteReminderController
            .handle(&sender(external_id), args, ctx)
            .await
        {
            Ok(reply) => reply,
            Err(e) => e.to_string(),
        }
    }

    #[tokio::test]
    async fn owner_deletes_reminder_and_occurrences() {
        let (ctx, reminder) = setup().await;

        assert_eq!(delete(&ctx, 7, "1").await, "Reminder deleted");
        assert!(ctx.repos.reminders.get(reminder.id).await.unwrap().is_none());
        assert!(ctx
            .repos
            .occurrences
            .list_by_reminder(reminder.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(delete(&ctx, 7, "1").await, "Reminder not found");
    }

    #[tokio::test]
    async fn other_user_can_not_delete() {
        let (ctx, reminder) = setup().await;

        assert_eq!(
            delete(&ctx, 8, "1").await,
            "Cannot delete reminder of another user"
        );
        assert_eq!(delete(&ctx, 9, "1").await, "Reminder not found");
        assert!(ctx.repos.reminders.get(reminder.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rejects_malformed_arguments() {
        let (ctx, _) = setup().await;

        assert_eq!(delete(&ctx, 7, "").await, "Usage: /delete <reminder_id>");
        assert_eq!(delete(&ctx, 7, "1 2").await, "Usage: /delete <reminder_id>");
        assert_eq!(delete(&ctx, 7, "one").await, "Invalid id");
    }
}
