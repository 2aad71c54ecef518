mod telemetry;

use nagging_bot_api::Application;
use nagging_bot_infra::{setup_context, telegram::TelegramBotApi, Config};
use std::sync::Arc;
use telemetry::{get_subscriber, init_subscriber};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("nagging_bot".into(), "info".into());
    init_subscriber(subscriber)?;

    let config = Config::from_env()?;
    let bot_api = Arc::new(TelegramBotApi::new(&config)?);
    let context = setup_context(config).await?;

    let app = Application::new(context, bot_api).await;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received interrupt, shutting down"),
                Err(e) => error!("Unable to listen for the interrupt signal: {:?}", e),
            }
            cancel.cancel();
        });
    }

    app.start(cancel).await
}
