//! Component factory: builds the teloxide bot, the generation client and the handler chain from
//! config. Isolates assembly logic from the runner.

use anyhow::{Context, Result};
use dbot_core::Bot as CoreBot;
use dbot_telegram::TelegramConfig;
use handler_chain::HandlerChain;
use image_generation_client::{mask_token, ImageGenerator, ReplicateClient, ReplicateConfig};
use image_handlers::{ImageGenerationHandler, StartHandler};
use std::sync::Arc;
use teloxide::Bot;
use tracing::{error, info};

/// teloxide bot for the configured token, pointed at TELEGRAM_API_URL when set.
pub fn build_teloxide_bot(config: &TelegramConfig) -> Result<Bot> {
    let bot = Bot::new(config.bot_token.clone());
    match config.telegram_api_url {
        Some(ref url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            info!(api_url = %url, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Replicate client for the configured token; None (logged) when no token is set.
pub fn build_generator(config: &ReplicateConfig) -> Option<Arc<dyn ImageGenerator>> {
    match ReplicateClient::from_config(config) {
        Some(client) => {
            info!(
                model = %client.model(),
                api_url = %config.api_url,
                api_token = %config.api_token.as_deref().map(mask_token).unwrap_or_default(),
                "Replicate client ready"
            );
            Some(Arc::new(client))
        }
        None => {
            error!("REPLICATE_API_TOKEN not set; image requests will be answered with a configuration message");
            None
        }
    }
}

/// `/start` greeting first, then the prompt → image handler.
pub fn build_handler_chain(
    bot: Arc<dyn CoreBot>,
    generator: Option<Arc<dyn ImageGenerator>>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(StartHandler::new(bot.clone())))
        .add_handler(Arc::new(ImageGenerationHandler::new(bot, generator)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_generator_without_token_is_none() {
        assert!(build_generator(&ReplicateConfig::default()).is_none());
    }

    #[test]
    fn test_build_generator_with_token() {
        let config = ReplicateConfig {
            api_token: Some("r8_0123456789abcdef".to_string()),
            ..Default::default()
        };
        assert!(build_generator(&config).is_some());
    }

    #[test]
    fn test_build_teloxide_bot_rejects_bad_api_url() {
        let mut config = TelegramConfig::with_token("123:abc".to_string());
        config.telegram_api_url = Some("not a url".to_string());
        assert!(build_teloxide_bot(&config).is_err());
    }

    #[test]
    fn test_build_teloxide_bot_uses_api_url() {
        let mut config = TelegramConfig::with_token("123:abc".to_string());
        config.telegram_api_url = Some("http://127.0.0.1:8081/".to_string());
        let bot = build_teloxide_bot(&config).unwrap();
        assert_eq!(bot.api_url().as_str(), "http://127.0.0.1:8081/");
    }
}
