//! `/start` greeting.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::info;

pub const START_MESSAGE: &str = "Hello! Send me a text prompt, and I'll generate an image using DeepFloyd IF (via Replicate.com).\n\
     Image generation can take a bit, please be patient.";

/// Replies to `/start` with usage instructions and stops the chain; other messages pass through.
pub struct StartHandler {
    bot: Arc<dyn CoreBot>,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn CoreBot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.command() != Some("start") {
            return Ok(HandlerResponse::Continue);
        }
        info!(user_id = message.user.id, chat_id = message.chat.id, "Start command");
        self.bot.send_message(&message.chat, START_MESSAGE).await?;
        Ok(HandlerResponse::Stop)
    }
}
