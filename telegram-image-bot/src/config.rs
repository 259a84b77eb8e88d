//! Application config: Telegram transport settings plus Replicate access settings.

use anyhow::Result;
use dbot_telegram::TelegramConfig;
use image_generation_client::ReplicateConfig;

/// Full bot configuration, loaded from env.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub replicate: ReplicateConfig,
}

impl BotConfig {
    /// Loads both sections. `token` overrides TELEGRAM_BOT_TOKEN / BOT_TOKEN when provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            telegram: TelegramConfig::load(token)?,
            replicate: ReplicateConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        self.replicate.validate()?;
        Ok(())
    }
}
