use crate::error::NagError;
use crate::shared::{
    controller::{user_from_sender, CommandController},
    usecase::{execute, UseCase},
};
use crate::user::RegisterUserUseCase;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use nagging_bot_api_structs::dtos::TelegramUserDTO;
use nagging_bot_domain::{Occurrence, Reminder, User};
use nagging_bot_infra::NagContext;
use tracing::{error, info};

const FIRST_OFFSET_SECS: i64 = 2;
const STEP_SECS: i64 = 10;
const LAST_OFFSET_SECS: i64 = 40;

pub struct CreateDemoReminderController;

#[async_trait::async_trait]
impl CommandController for CreateDemoReminderController {
    async fn handle(
        &self,
        sender: &TelegramUserDTO,
        _args: &str,
        ctx: &NagContext,
    ) -> Result<String, NagError> {
        let usecase = CreateDemoReminderUseCase {
            user: user_from_sender(sender),
            allowed_external_id: ctx.config.demo_user_id,
        };
        let res = execute(usecase, ctx).await.map_err(NagError::from)?;
        info!(
            "Demo reminder {} created with {} occurrences",
            res.reminder.id,
            res.occurrences.len()
        );
        Ok(format!(
            "Demo reminder created with occurrences until {}",
            res.until.to_rfc3339_opts(SecondsFormat::Secs, true)
        ))
    }
}

/// Creates a reminder whose occurrences fire every few seconds in the
/// near future. Restricted to a single configured account.
#[derive(Debug)]
pub struct CreateDemoReminderUseCase {
    pub user: User,
    pub allowed_external_id: Option<i64>,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
    pub occurrences: Vec<Occurrence>,
    pub until: DateTime<Utc>,
}

#[derive(Debug)]
pub enum UseCaseError {
    Unauthorized,
    UserStorageError,
    StorageError(anyhow::Error),
}

impl From<UseCaseError> for NagError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Unauthorized => Self::Unauthorized("Unauthorized for /test".into()),
            UseCaseError::UserStorageError => Self::InternalError("Failed to save user".into()),
            UseCaseError::StorageError(_) => {
                Self::InternalError("Failed to create demo reminder".into())
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CreateDemoReminderUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateDemoReminder";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        if self.allowed_external_id != Some(self.user.external_id) {
            return Err(UseCaseError::Unauthorized);
        }

        let register_user = RegisterUserUseCase {
            user: self.user.clone(),
        };
        let user = execute(register_user, ctx)
            .await
            .map_err(|_| UseCaseError::UserStorageError)?;

        let now = ctx.sys.now_utc();
        let first = now + Duration::seconds(FIRST_OFFSET_SECS);
        let until = now + Duration::seconds(LAST_OFFSET_SECS);
        let reminder = Reminder::new(
            user.id,
            "Demo reminder".into(),
            "Demo occurrences every 10 seconds".into(),
            first.date_naive(),
            until.date_naive(),
            Vec::new(),
            chrono_tz::UTC,
        )
        .map_err(|e| UseCaseError::StorageError(e.into()))?;
        let reminder = ctx
            .repos
            .reminders
            .create(&reminder)
            .await
            .map_err(UseCaseError::StorageError)?;

        let mut occurrences = Vec::new();
        let mut fire_at = first;
        while fire_at <= until {
            match ctx
                .repos
                .occurrences
                .create(&Occurrence::new(reminder.id, fire_at))
                .await
            {
                Ok(occurrence) => occurrences.push(occurrence),
                Err(e) => error!(
                    "Unable to create demo occurrence at {} for reminder {}: {:?}",
                    fire_at, reminder.id, e
                ),
            }
            fire_at = fire_at + Duration::seconds(STEP_SECS);
        }

        Ok(UseCaseRes {
            reminder,
            occurrences,
            until,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use nagging_bot_infra::{Config, FixedSys};
    use std::sync::Arc;

    fn context(demo_user_id: Option<i64>) -> NagContext {
        let mut config = Config::new("token");
        config.demo_user_id = demo_user_id;
        let mut ctx = NagContext::create_inmemory(config);
        ctx.sys = Arc::new(FixedSys(Utc.with_ymd_and_hms(2026, 1, 19, 8, 0, 0).unwrap()));
        ctx
    }

    fn sender(id: i64) -> TelegramUserDTO {
        TelegramUserDTO {
            id,
            first_name: "Ada".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn demo_user_gets_occurrences_every_ten_seconds() {
        let ctx = context(Some(42));

        let reply = CreateDemoReminderController
            .handle(&sender(42), "", &ctx)
            .await
            .unwrap();
        assert_eq!(
            reply,
            "Demo reminder created with occurrences until 2026-01-19T08:00:40Z"
        );

        let occurrences = ctx.repos.occurrences.list_by_reminder(1).await.unwrap();
        let seconds = occurrences
            .iter()
            .map(|o| (o.fire_at - ctx.sys.now_utc()).num_seconds())
            .collect::<Vec<_>>();
        assert_eq!(seconds, vec![2, 12, 22, 32]);
    }

    #[tokio::test]
    async fn other_users_are_rejected() {
        for ctx in [context(Some(42)), context(None)] {
            let err = CreateDemoReminderController
                .handle(&sender(7), "", &ctx)
                .await
                .unwrap_err();
            assert_eq!(err, NagError::Unauthorized("Unauthorized for /test".into()));
            assert!(ctx.repos.users.get_by_external_id(7).await.unwrap().is_none());
        }
    }
}
