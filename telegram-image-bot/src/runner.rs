use anyhow::{Context, Result};
use dbot_core::{init_tracing, Bot as CoreBot};
use dbot_telegram::{run_webhook, TelegramBotAdapter};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::components::{build_generator, build_handler_chain, build_teloxide_bot};
use crate::config::BotConfig;

/// Main entry: validate config, init logging, build components, then serve the webhook until the
/// server stops.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    if let Some(dir) = Path::new(&config.telegram.log_file).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        }
    }
    init_tracing(&config.telegram.log_file)?;

    if config.telegram.has_placeholder_token() {
        error!("TELEGRAM_BOT_TOKEN still holds the placeholder value; Telegram will reject requests");
    }

    info!(
        port = config.telegram.port,
        webhook_hostname = ?config.telegram.webhook_hostname,
        replicate_configured = config.replicate.has_token(),
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config.telegram)?;
    let bot: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let generator = build_generator(&config.replicate);
    let handler_chain = build_handler_chain(bot, generator);

    info!("Bot started successfully");

    run_webhook(&teloxide_bot, handler_chain, &config.telegram).await
}
