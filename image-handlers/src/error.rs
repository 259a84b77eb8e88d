//! Failure kinds of one generation attempt and the chat text each one produces.

use image_generation_client::GenerationClientError;
use thiserror::Error;

const MSG_EMPTY_PROMPT: &str = "Please provide a text prompt!";
const MSG_MISSING_CREDENTIAL: &str =
    "Replicate API token not set. Cannot generate image. Please inform the bot administrator.";
const MSG_DOWNLOAD_FAILED: &str = "Failed to download generated image. Please try again.";
const MSG_NO_OUTPUT: &str =
    "Failed to generate image. No output from Replicate or unexpected format.";
const MSG_UNEXPECTED: &str = "An error occurred during image generation. Please try again later or with a simpler prompt.\n\
     Ensure your Replicate API token is correct and valid.";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Replicate API token is not configured")]
    MissingCredential,

    #[error("No prompt text")]
    EmptyPrompt,

    #[error("Image download failed: {0}")]
    Download(String),

    #[error("Generation service returned no usable output: {0}")]
    Upstream(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl GenerationError {
    /// Plain-text reply shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => MSG_MISSING_CREDENTIAL,
            Self::EmptyPrompt => MSG_EMPTY_PROMPT,
            Self::Download(_) => MSG_DOWNLOAD_FAILED,
            Self::Upstream(_) => MSG_NO_OUTPUT,
            Self::Unexpected(_) => MSG_UNEXPECTED,
        }
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::EmptyPrompt => "empty_prompt",
            Self::Download(_) => "download",
            Self::Upstream(_) => "upstream",
            Self::Unexpected(_) => "unexpected",
        }
    }
}

impl From<GenerationClientError> for GenerationError {
    fn from(err: GenerationClientError) -> Self {
        if err.is_bad_output() {
            Self::Upstream(err.to_string())
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

impl From<dbot_core::DbotError> for GenerationError {
    fn from(err: dbot_core::DbotError) -> Self {
        Self::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_kinds() {
        assert_eq!(
            GenerationError::from(GenerationClientError::EmptyOutput).kind(),
            "upstream"
        );
        assert_eq!(
            GenerationError::from(GenerationClientError::MalformedOutput("{}".into())).kind(),
            "upstream"
        );
        assert_eq!(
            GenerationError::from(GenerationClientError::Api {
                status: 401,
                body: "Invalid token".into()
            })
            .kind(),
            "unexpected"
        );
        assert_eq!(
            GenerationError::from(GenerationClientError::PredictionFailed {
                id: "p".into(),
                status: "failed".into(),
                message: "CUDA out of memory".into()
            })
            .kind(),
            "unexpected"
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            GenerationError::EmptyPrompt.user_message(),
            "Please provide a text prompt!"
        );
        assert!(GenerationError::Download("404".into())
            .user_message()
            .starts_with("Failed to download"));
        assert!(GenerationError::Unexpected("x".into())
            .user_message()
            .contains("Replicate API token is correct"));
    }
}
