//! Text-to-image generation client.
//!
//! [`ImageGenerator`] is the seam the bot depends on; [`ReplicateClient`] implements it against the
//! Replicate predictions API (create a prediction, poll it until it settles, return output URLs).

mod config;
mod error;
mod replicate;
mod types;

use async_trait::async_trait;

pub use config::{ReplicateConfig, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REPLICATE_API_URL};
pub use error::{GenerationClientError, Result};
pub use replicate::{ReplicateClient, DEEPFLOYD_IF_MODEL};
pub use types::{GenerationRequest, Prediction, PredictionStatus, PredictionUrls, IMAGE_SIZE};

/// Generates images for a prompt and returns the URLs of the results, in service order.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>>;
}

/// Masks an API token for safe logging: first 7 chars + "***" + last 4 chars.
/// Tokens of 11 chars or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
