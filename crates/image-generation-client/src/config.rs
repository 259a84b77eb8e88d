//! Replicate configuration loaded from environment variables.

use anyhow::Result;
use std::env;

use crate::replicate::DEEPFLOYD_IF_MODEL;

pub const DEFAULT_REPLICATE_API_URL: &str = "https://api.replicate.com/v1";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Value shipped in sample configs; treated as "not configured".
const TOKEN_PLACEHOLDER: &str = "YOUR_REPLICATE_API_TOKEN";

/// Replicate access settings. A missing token is not an error here: the bot still starts and
/// answers generation requests with a configuration message.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    /// REPLICATE_API_TOKEN; None when unset, blank or the placeholder.
    pub api_token: Option<String>,
    /// REPLICATE_API_URL
    pub api_url: String,
    /// REPLICATE_MODEL, `owner/name:version` or `owner/name`
    pub model: String,
    /// REPLICATE_POLL_INTERVAL_MS
    pub poll_interval_ms: u64,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_url: DEFAULT_REPLICATE_API_URL.to_string(),
            model: DEEPFLOYD_IF_MODEL.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ReplicateConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_token = env::var("REPLICATE_API_TOKEN")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != TOKEN_PLACEHOLDER);
        let api_url = env::var("REPLICATE_API_URL")
            .unwrap_or_else(|_| DEFAULT_REPLICATE_API_URL.to_string());
        let model = env::var("REPLICATE_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEEPFLOYD_IF_MODEL.to_string());
        let poll_interval_ms = env::var("REPLICATE_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);

        Ok(Self {
            api_token,
            api_url,
            model,
            poll_interval_ms,
        })
    }

    /// Validate config (api_url must be a valid URL).
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("REPLICATE_API_URL is not a valid URL: {}", self.api_url);
        }
        if self.poll_interval_ms == 0 {
            anyhow::bail!("REPLICATE_POLL_INTERVAL_MS must be greater than 0");
        }
        Ok(())
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }
}
