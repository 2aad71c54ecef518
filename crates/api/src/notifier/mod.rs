mod fan_out;
mod logging;
mod telegram;

pub use fan_out::FanOutNotifier;
pub use logging::LoggingNotifier;
use nagging_bot_domain::{Occurrence, Reminder, ID};
pub use telegram::TelegramNotifier;
use thiserror::Error;

/// What gets delivered for one due `Occurrence`. The `Reminder` is missing
/// when it could not be looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub occurrence: Occurrence,
    pub reminder: Option<Reminder>,
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Reminder of occurrence {0} is missing")]
    MissingReminder(ID),
    #[error("User {0} has no chat to deliver to")]
    NoRecipient(ID),
    #[error("Store lookup failed: {0}")]
    Store(anyhow::Error),
    #[error("Transport failed: {0}")]
    Transport(anyhow::Error),
}

/// A channel occurrences are delivered through
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, delivery: &Delivery) -> Result<(), NotifyError>;
}
