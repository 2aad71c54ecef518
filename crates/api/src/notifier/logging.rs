use super::{Delivery, Notifier, NotifyError};
use tracing::info;

/// Writes every delivery to the log
pub struct LoggingNotifier;

#[async_trait::async_trait]
impl Notifier for LoggingNotifier {
    async fn send(&self, delivery: &Delivery) -> Result<(), NotifyError> {
        let (name, description) = match &delivery.reminder {
            Some(reminder) => (reminder.name.as_str(), reminder.description.as_str()),
            None => ("", ""),
        };
        info!(
            occurrence_id = delivery.occurrence.id,
            reminder_id = delivery.occurrence.reminder_id,
            "Occurrence {} sent | reminder={:?} desc={:?}",
            delivery.occurrence.id,
            name,
            description
        );
        Ok(())
    }
}
