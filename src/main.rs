mod config;
mod error;
mod homework;
mod logging;
mod notifier;
mod poller;
mod practicum;
mod verdict;

use std::time::Duration;

use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::info;

use crate::config::{Credentials, Settings};
use crate::notifier::TelegramNotifier;
use crate::poller::Poller;
use crate::practicum::PracticumClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config_path = Settings::default_path();
    let settings = Settings::load(&config_path)?;

    // Initialize logging
    logging::init(&settings.logging)?;
    info!("Configuration loaded from: {}", config_path.display());
    info!("  Endpoint: {}", settings.poller.endpoint);
    info!("  Retry period: {}s", settings.poller.retry_period_secs);
    info!("  Initial cursor: {:?}", settings.poller.initial_cursor);

    // Nothing touches the network until every credential is present.
    let credentials = Credentials::from_env().context("Refusing to start")?;

    let api = PracticumClient::new(&settings.poller.endpoint, &credentials.practicum_token);
    let notifier = TelegramNotifier::new(
        Bot::new(&credentials.telegram_token),
        &credentials.telegram_chat_id,
    );

    let poller = Poller::new(
        api,
        notifier,
        settings.poller.initial_cursor.initial(),
        Duration::from_secs(settings.poller.retry_period_secs),
    );

    info!("Bot is starting...");
    poller.run().await;

    Ok(())
}
