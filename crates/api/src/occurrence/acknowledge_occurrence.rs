use crate::shared::usecase::{execute, UseCase};
use crate::telegram::{
    callbacks::{decode_occurrence_callback, OccurrenceAction, NOOP_CALLBACK},
    dispatcher::CallbackHandler,
    status_ui::{final_markup, final_text},
};
use nagging_bot_api_structs::dtos::CallbackQueryDTO;
use nagging_bot_domain::{OccurrenceStatus, ID};
use nagging_bot_infra::{telegram::Responder, NagContext};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, warn};

const UNKNOWN_ACTION_REPLY: &str = "Unable to apply this action";

/// Handles taps on the Done / Ignore buttons of a delivered occurrence
pub struct OccurrenceCallbackHandler {
    ctx: NagContext,
    responder: Arc<dyn Responder>,
}

impl OccurrenceCallbackHandler {
    pub fn new(ctx: NagContext, responder: Arc<dyn Responder>) -> Self {
        Self { ctx, responder }
    }
}

#[async_trait::async_trait]
impl CallbackHandler for OccurrenceCallbackHandler {
    async fn handle(&self, callback: &CallbackQueryDTO) -> anyhow::Result<()> {
        let data = match callback.data.as_deref() {
            Some(data) if !data.is_empty() && data != NOOP_CALLBACK => data,
            _ => return Ok(()),
        };
        let (occurrence_id, action) = match decode_occurrence_callback(data) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Ignoring callback: {}", e);
                if let Some(message) = &callback.message {
                    self.responder
                        .send_message(message.chat.id, UNKNOWN_ACTION_REPLY, None)
                        .await?;
                }
                return Ok(());
            }
        };

        let usecase = AcknowledgeOccurrenceUseCase {
            occurrence_id,
            action,
        };
        let status = match execute(usecase, &self.ctx).await {
            Ok(Some(status)) => status,
            Ok(None) => {
                debug!("Callback for unknown occurrence {}", occurrence_id);
                return Ok(());
            }
            // Already logged by execute
            Err(_) => return Ok(()),
        };

        // The status change stands even if the message cannot be updated
        if let Some(message) = &callback.message {
            let text = final_text(message.text.as_deref().unwrap_or_default(), status);
            if let Err(e) = self
                .responder
                .edit_message_text(
                    message.chat.id,
                    message.message_id,
                    &text,
                    Some(final_markup()),
                )
                .await
            {
                error!(
                    "Unable to update message of occurrence {}: {:?}",
                    occurrence_id, e
                );
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct AcknowledgeOccurrenceUseCase {
    pub occurrence_id: ID,
    pub action: OccurrenceAction,
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Unable to acknowledge occurrence: {0}")]
    StorageError(anyhow::Error),
}

#[async_trait::async_trait]
impl UseCase for AcknowledgeOccurrenceUseCase {
    /// Status of the `Occurrence` afterwards, `None` if it does not exist
    type Response = Option<OccurrenceStatus>;
    type Error = UseCaseError;

    const NAME: &'static str = "AcknowledgeOccurrence";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        let occurrences = &ctx.repos.occurrences;
        let occurrence = match occurrences
            .get(self.occurrence_id)
            .await
            .map_err(UseCaseError::StorageError)?
        {
            Some(occurrence) => occurrence,
            None => return Ok(None),
        };

        let target = self.action.status();
        if !occurrence.status.can_transition_to(target) {
            return Ok(Some(occurrence.status));
        }
        if occurrences
            .update_status(occurrence.id, target)
            .await
            .map_err(UseCaseError::StorageError)?
        {
            return Ok(Some(target));
        }

        // Lost a race against another update, report what is stored now
        Ok(occurrences
            .get(occurrence.id)
            .await
            .map_err(UseCaseError::StorageError)?
            .map(|o| o.status))
    }
}
