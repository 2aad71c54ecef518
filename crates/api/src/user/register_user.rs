use crate::error::NagError;
use crate::shared::{
    controller::{user_from_sender, CommandController},
    usecase::{execute, UseCase},
};
use nagging_bot_api_structs::dtos::TelegramUserDTO;
use nagging_bot_domain::User;
use nagging_bot_infra::NagContext;
use tracing::info;

pub struct StartController;

#[async_trait::async_trait]
impl CommandController for StartController {
    async fn handle(
        &self,
        sender: &TelegramUserDTO,
        _args: &str,
        ctx: &NagContext,
    ) -> Result<String, NagError> {
        let usecase = RegisterUserUseCase {
            user: user_from_sender(sender),
        };
        let user = execute(usecase, ctx).await.map_err(NagError::from)?;
        info!(
            "Registered user {} (external id {}, username {:?}, language {:?})",
            user.id, user.external_id, user.username, user.language
        );

        let greeting = if user.first_name.is_empty() {
            "Hi!".to_string()
        } else {
            format!("Hi, {}!", user.first_name)
        };
        Ok(format!(
            "{} I will nag you until your reminders are done.\nCreate one with /reminder Name_Description_StartDate_EndDate_HH:MM;HH:MM_TimeZone\nSee them with /list, remove one with /delete <reminder_id>",
            greeting
        ))
    }
}

/// Stores the profile of a person talking to the bot, keyed by their
/// external id
#[derive(Debug)]
pub struct RegisterUserUseCase {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(anyhow::Error),
}

impl From<UseCaseError> for NagError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(_) => Self::InternalError("Failed to save user".into()),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for RegisterUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "RegisterUser";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .users
            .upsert(&self.user)
            .await
            .map_err(UseCaseError::StorageError)
    }
}
