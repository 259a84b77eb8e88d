use thiserror::Error;

/// Failures talking to the image generation service.
#[derive(Error, Debug)]
pub enum GenerationClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Replicate API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Prediction {id} ended with status {status}: {message}")]
    PredictionFailed {
        id: String,
        status: String,
        message: String,
    },

    #[error("Prediction returned no output")]
    EmptyOutput,

    #[error("Prediction output has an unexpected format: {0}")]
    MalformedOutput(String),

    #[error("Invalid model identifier: {0}")]
    InvalidModel(String),
}

impl GenerationClientError {
    /// True when the service answered but its output was missing or unusable.
    pub fn is_bad_output(&self) -> bool {
        matches!(self, Self::EmptyOutput | Self::MalformedOutput(_))
    }
}

pub type Result<T> = std::result::Result<T, GenerationClientError>;
