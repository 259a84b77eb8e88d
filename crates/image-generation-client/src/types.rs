//! Wire types for the Replicate predictions API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GenerationClientError, Result};

/// Fixed output edge length in pixels.
pub const IMAGE_SIZE: u32 = 256;

/// Model input for one generation. Serialized as the prediction's `input` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

impl GenerationRequest {
    /// Request for `prompt` at the fixed 256×256 size.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            width: IMAGE_SIZE,
            height: IMAGE_SIZE,
        }
    }
}

/// Body of `POST /predictions` (versioned models) or `POST /models/{owner}/{name}/predictions`.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePrediction<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
    pub input: &'a GenerationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionUrls {
    pub get: String,
}

/// A prediction as returned by create and get calls.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    pub urls: PredictionUrls,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl Prediction {
    /// Output URLs of a succeeded prediction. Only a non-empty list of strings is accepted.
    pub fn output_urls(&self) -> Result<Vec<String>> {
        match &self.output {
            None | Some(Value::Null) => Err(GenerationClientError::EmptyOutput),
            Some(Value::Array(items)) => {
                if items.is_empty() {
                    return Err(GenerationClientError::EmptyOutput);
                }
                items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or_else(|| {
                            GenerationClientError::MalformedOutput(format!(
                                "expected URL string, got {}",
                                item
                            ))
                        })
                    })
                    .collect()
            }
            Some(other) => Err(GenerationClientError::MalformedOutput(format!(
                "expected list of URLs, got {}",
                other
            ))),
        }
    }

    /// Human-readable error text reported by the service, if any.
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "no error detail".to_string(),
            Some(other) => other.to_string(),
        }
    }
}
