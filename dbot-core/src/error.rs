//! Error type for the bot core.

use thiserror::Error;

/// Failures of outbound chat operations.
#[derive(Error, Debug)]
pub enum DbotError {
    /// The transport rejected or failed the request.
    #[error("Bot error: {0}")]
    Bot(String),

    /// A message id that the transport cannot address.
    #[error("Invalid message_id: {0}")]
    InvalidMessageId(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
