use crate::{
    notifier::Notifier,
    occurrence::send_due_occurrences::{SendDueOccurrencesUseCase, TickSummary},
    shared::usecase::execute,
};
use nagging_bot_infra::NagContext;
use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Used instead of a zero tick interval
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// How a long running loop ended. Loops only end when asked to, failures
/// inside them are logged and retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Cancelled,
}

/// Periodically delivers every due `Occurrence` through the `Notifier`
pub struct Scheduler {
    ctx: NagContext,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(ctx: NagContext, notifier: Arc<dyn Notifier>) -> Self {
        let mut interval = ctx.config.scheduler_interval;
        if interval.is_zero() {
            warn!(
                "Scheduler interval must be positive, falling back to {:?}",
                DEFAULT_TICK_INTERVAL
            );
            interval = DEFAULT_TICK_INTERVAL;
        }
        Self {
            ctx,
            notifier,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// One pass over the due occurrences
    pub async fn tick(&self) -> anyhow::Result<TickSummary> {
        let usecase = SendDueOccurrencesUseCase {
            notifier: self.notifier.clone(),
        };
        Ok(execute(usecase, &self.ctx).await?)
    }

    /// Ticks every `interval` until `cancel` fires. A tick in progress is
    /// finished before returning.
    pub async fn run(&self, cancel: CancellationToken) -> LoopExit {
        info!("Scheduler started with interval {:?}", self.interval);
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match self.tick().await {
                Ok(summary) if summary.due > 0 => info!(
                    "Scheduler tick: due={} sent={} failed={}",
                    summary.due, summary.sent, summary.failed
                ),
                Ok(_) => debug!("Scheduler tick: nothing due"),
                Err(e) => error!("Scheduler tick failed: {:?}", e),
            }
        }
        info!("Scheduler stopped");
        LoopExit::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{Delivery, NotifyError};
    use nagging_bot_domain::Occurrence;
    use nagging_bot_infra::Config;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingNotifier(AtomicUsize);

    #[async_trait::async_trait]
    impl Notifier for CountingNotifier {
        async fn send(&self, _delivery: &Delivery) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn context(interval: Duration) -> NagContext {
        let mut config = Config::new("token");
        config.scheduler_interval = interval;
        NagContext::create_inmemory(config)
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let scheduler = Scheduler::new(
            context(Duration::ZERO),
            Arc::new(CountingNotifier::default()),
        );
        assert_eq!(scheduler.interval(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn run_ticks_until_cancelled() {
        let ctx = context(Duration::from_secs(1));
        let past = chrono::Utc::now() - chrono::Duration::seconds(1);
        ctx.repos
            .occurrences
            .create(&Occurrence::new(1, past))
            .await
            .unwrap();
        let notifier = Arc::new(CountingNotifier::default());
        let scheduler = Scheduler::new(ctx.clone(), notifier.clone());
        let cancel = CancellationToken::new();

        let run = {
            let cancel = cancel.clone();
            tokio::spawn(async move { scheduler.run(cancel).await })
        };
        tokio::time::sleep(Duration::from_millis(3500)).await;
        cancel.cancel();

        assert_eq!(run.await.unwrap(), LoopExit::Cancelled);
        // Sent on the first tick, never again
        assert_eq!(notifier.0.load(Ordering::SeqCst), 1);
    }
}
