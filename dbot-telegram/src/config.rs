//! Telegram transport config: bot token, optional API URL, public hostname for the webhook, listen port, log path.
//! Loaded from env: TELEGRAM_BOT_TOKEN (or BOT_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL),
//! RENDER_EXTERNAL_HOSTNAME (or WEBHOOK_HOSTNAME), PORT, LOG_FILE.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILE: &str = "logs/telegram-image-bot.log";
const TOKEN_PLACEHOLDER: &str = "YOUR_TELEGRAM_BOT_TOKEN";

/// Telegram connectivity and webhook serving settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    /// Externally visible host (no scheme); the webhook is registered as `https://{host}/webhook`.
    pub webhook_hostname: Option<String>,
    pub port: u16,
    pub log_file: String,
}

impl TelegramConfig {
    /// Loads from env. `token` overrides TELEGRAM_BOT_TOKEN / BOT_TOKEN when provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("TELEGRAM_BOT_TOKEN")
                .or_else(|_| env::var("BOT_TOKEN"))
                .context("TELEGRAM_BOT_TOKEN (or BOT_TOKEN) not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let webhook_hostname = env::var("RENDER_EXTERNAL_HOSTNAME")
            .or_else(|_| env::var("WEBHOOK_HOSTNAME"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            webhook_hostname,
            port,
            log_file,
        })
    }

    /// Builds config with the given token; everything else at defaults.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            webhook_hostname: None,
            port: DEFAULT_PORT,
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }

    /// Validate config (API URL must parse; hostname must be a bare host).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("Telegram bot token is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref host) = self.webhook_hostname {
            if host.contains("://") || host.contains('/') {
                anyhow::bail!(
                    "RENDER_EXTERNAL_HOSTNAME must be a bare hostname without scheme or path: {}",
                    host
                );
            }
        }
        Ok(())
    }

    /// True when the token still holds the sample placeholder value.
    pub fn has_placeholder_token(&self) -> bool {
        self.bot_token == TOKEN_PLACEHOLDER
    }
}
