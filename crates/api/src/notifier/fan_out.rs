use super::{Delivery, Notifier, NotifyError};
use std::sync::Arc;
use tracing::error;

/// Delivers to every sink in order.
///
/// A failing sink is logged and the remaining sinks are still attempted.
/// The fan-out itself always succeeds.
pub struct FanOutNotifier {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl FanOutNotifier {
    pub fn new(sinks: Vec<Arc<dyn Notifier>>) -> Self {
        Self { sinks }
    }
}

#[async_trait::async_trait]
impl Notifier for FanOutNotifier {
    async fn send(&self, delivery: &Delivery) -> Result<(), NotifyError> {
        for (index, sink) in self.sinks.iter().enumerate() {
            if let Err(e) = sink.send(delivery).await {
                error!(
                    "Notifier sink {} failed for occurrence {}: {}",
                    index, delivery.occurrence.id, e
                );
            }
        }
        Ok(())
    }
}
