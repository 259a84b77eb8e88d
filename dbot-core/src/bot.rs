//! Bot abstraction for sending, photo-replying and deleting chat messages.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide and tests substitute
//! recording mocks.

use crate::error::{DbotError, Result};
use crate::types::Chat;
use async_trait::async_trait;

/// Abstraction for outbound chat operations. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a text message and returns its id (for a later `delete_message`). Ids are transport-specific strings.
    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String>;
    /// Uploads raw image bytes as a photo, with an optional caption.
    async fn send_photo(&self, chat: &Chat, image: Vec<u8>, caption: Option<&str>) -> Result<()>;
    /// Deletes a message previously sent by the bot.
    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()>;
}

/// Parses a message id string into an i32. Used by transports whose ids are numeric.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::InvalidMessageId(s.to_string()))
}
