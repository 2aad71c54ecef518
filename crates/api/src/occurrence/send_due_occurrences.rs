use crate::{
    notifier::{Delivery, Notifier},
    shared::usecase::UseCase,
};
use nagging_bot_domain::OccurrenceStatus;
use nagging_bot_infra::NagContext;
use std::{fmt::Debug, sync::Arc};
use thiserror::Error;
use tracing::{error, warn};

/// Delivers every `Created` occurrence that is due and marks the delivered
/// ones as `Sent`. Failures only affect the occurrence they happened for,
/// undelivered occurrences stay `Created` and are retried on the next run.
pub struct SendDueOccurrencesUseCase {
    pub notifier: Arc<dyn Notifier>,
}

impl Debug for SendDueOccurrencesUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendDueOccurrencesUseCase").finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// Occurrences found due
    pub due: usize,
    /// Occurrences the notifier accepted
    pub sent: usize,
    /// Occurrences the notifier rejected
    pub failed: usize,
}

#[derive(Error, Debug)]
pub enum UseCaseError {
    #[error("Unable to list due occurrences: {0}")]
    StorageError(anyhow::Error),
}

#[async_trait::async_trait]
impl UseCase for SendDueOccurrencesUseCase {
    type Response = TickSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "SendDueOccurrences";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now_utc();
        let due = ctx
            .repos
            .occurrences
            .list_pending_in_range(None, now)
            .await
            .map_err(UseCaseError::StorageError)?;

        let mut summary = TickSummary {
            due: due.len(),
            ..Default::default()
        };
        for occurrence in due {
            // The reminder only enriches the delivery, a failed lookup does not block it
            let reminder = match ctx.repos.reminders.get(occurrence.reminder_id).await {
                Ok(reminder) => reminder,
                Err(e) => {
                    warn!(
                        "Unable to load reminder {} for occurrence {}: {:?}",
                        occurrence.reminder_id, occurrence.id, e
                    );
                    None
                }
            };
            let delivery = Delivery {
                occurrence,
                reminder,
            };

            if let Err(e) = self.notifier.send(&delivery).await {
                warn!(
                    "Delivery of occurrence {} failed, retrying later: {}",
                    delivery.occurrence.id, e
                );
                summary.failed += 1;
                continue;
            }
            summary.sent += 1;

            if let Err(e) = ctx
                .repos
                .occurrences
                .update_status(delivery.occurrence.id, OccurrenceStatus::Sent)
                .await
            {
                error!(
                    "Unable to mark occurrence {} as sent: {:?}",
                    delivery.occurrence.id, e
                );
            }
        }

        Ok(summary)
    }
}
