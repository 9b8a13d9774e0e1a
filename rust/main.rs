mod config;
mod error;
mod logger;
mod models;
mod parse;
mod poller;
mod practicum;
mod telegram;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Config;
use crate::poller::Poller;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logger::init_logging();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Configuration is incomplete, refusing to start");
            return Err(err).context("Failed to load configuration");
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let api = PracticumClient::new(&config).context("Failed to build homework API client")?;
    let notifier = TelegramNotifier::new(&config).context("Failed to build Telegram client")?;

    tracing::info!(endpoint = %config.endpoint, "Starting homework status bot");

    let poller = Poller::new(api, notifier, config.retry_period, Utc::now().timestamp());
    poller.run().await;

    Ok(())
}
