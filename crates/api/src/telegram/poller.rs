use super::dispatcher::Dispatcher;
use crate::job_schedulers::LoopExit;
use nagging_bot_api_structs::dtos::UpdateDTO;
use nagging_bot_infra::telegram::UpdateSource;
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Wait before the next attempt after fetching updates failed
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// The inbound loop: fetches batches of updates and hands them to the
/// `Dispatcher` in order.
pub struct Poller {
    source: Arc<dyn UpdateSource>,
    dispatcher: Arc<Dispatcher>,
    poll_interval: Duration,
    offset: i64,
}

impl Poller {
    pub fn new(
        source: Arc<dyn UpdateSource>,
        dispatcher: Arc<Dispatcher>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            dispatcher,
            poll_interval,
            offset: 0,
        }
    }

    /// Id of the next update to fetch
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Fetches and dispatches one batch, returns how many updates it held
    pub async fn poll_once(&mut self) -> anyhow::Result<usize> {
        let updates = self.source.fetch_updates(self.offset).await?;
        Ok(self.handle_batch(updates).await)
    }

    async fn handle_batch(&mut self, updates: Vec<UpdateDTO>) -> usize {
        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset = self.offset.max(last + 1);
        }
        for update in &updates {
            self.dispatcher.dispatch(update).await;
        }
        updates.len()
    }

    /// Runs until `cancel` fires. A batch that is being dispatched is
    /// finished before returning.
    pub async fn run(mut self, cancel: CancellationToken) -> LoopExit {
        info!("Poller started at offset {}", self.offset);
        loop {
            let fetched = tokio::select! {
                _ = cancel.cancelled() => break,
                res = self.source.fetch_updates(self.offset) => res,
            };
            let wait = match fetched {
                Ok(updates) => {
                    self.handle_batch(updates).await;
                    self.poll_interval
                }
                Err(e) => {
                    error!("Polling for updates failed: {:?}", e);
                    RETRY_DELAY
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }
        }
        info!("Poller stopped at offset {}", self.offset);
        LoopExit::Cancelled
    }
}
