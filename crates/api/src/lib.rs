mod error;
mod job_schedulers;
mod notifier;
mod occurrence;
mod reminder;
mod shared;
mod telegram;
mod user;

pub use error::NagError;
pub use job_schedulers::{LoopExit, Scheduler};
pub use notifier::{Delivery, FanOutNotifier, LoggingNotifier, Notifier, NotifyError, TelegramNotifier};
pub use occurrence::send_due_occurrences::TickSummary;
pub use telegram::{
    bot_commands,
    callbacks::{encode_occurrence_callback, OccurrenceAction},
    dispatcher::Dispatcher,
    poller::Poller,
};

use nagging_bot_infra::{
    telegram::{Responder, TelegramBotApi, UpdateSource},
    NagContext,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Every command and callback the bot understands
pub fn configure_dispatcher(ctx: &NagContext, responder: &Arc<dyn Responder>) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    user::configure_commands(&mut dispatcher, ctx, responder);
    reminder::configure_commands(&mut dispatcher, ctx, responder);
    occurrence::configure_callbacks(&mut dispatcher, ctx, responder);
    dispatcher
}

/// The running bot: an inbound loop answering updates and an outbound
/// loop delivering due occurrences.
pub struct Application {
    scheduler: Scheduler,
    poller: Poller,
}

impl Application {
    pub async fn new(context: NagContext, bot_api: Arc<TelegramBotApi>) -> Self {
        if let Err(e) = bot_api.set_my_commands(bot_commands()).await {
            warn!("Unable to register bot commands: {:?}", e);
        }
        let responder: Arc<dyn Responder> = bot_api.clone();
        let source: Arc<dyn UpdateSource> = bot_api;
        Self::with_transport(context, responder, source)
    }

    /// Builds the application on top of any transport
    pub fn with_transport(
        context: NagContext,
        responder: Arc<dyn Responder>,
        source: Arc<dyn UpdateSource>,
    ) -> Self {
        let sinks: Vec<Arc<dyn Notifier>> = vec![
            Arc::new(LoggingNotifier),
            Arc::new(TelegramNotifier::new(
                context.repos.users.clone(),
                responder.clone(),
            )),
        ];
        let scheduler = Scheduler::new(context.clone(), Arc::new(FanOutNotifier::new(sinks)));

        let dispatcher = configure_dispatcher(&context, &responder);
        let poller = Poller::new(
            source,
            Arc::new(dispatcher),
            context.config.poll_interval,
        );

        Self { scheduler, poller }
    }

    /// Runs both loops until `cancel` fires and they have wound down
    pub async fn start(self, cancel: CancellationToken) -> anyhow::Result<()> {
        let Self { scheduler, poller } = self;

        let scheduler = {
            let cancel = cancel.clone();
            tokio::spawn(async move { scheduler.run(cancel).await })
        };
        let poller = tokio::spawn(poller.run(cancel));

        let (scheduler, poller) = tokio::join!(scheduler, poller);
        let mut failed = false;
        for (name, exit) in [("Scheduler", scheduler), ("Poller", poller)] {
            match exit {
                Ok(LoopExit::Cancelled) => info!("{} exited after cancellation", name),
                Err(e) => {
                    error!("{} task failed: {:?}", name, e);
                    failed = true;
                }
            }
        }
        if failed {
            anyhow::bail!("A background loop of the application failed");
        }
        Ok(())
    }
}
