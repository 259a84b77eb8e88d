//! Image generation handler: treats every non-command text message as a prompt, generates an
//! image through an [`ImageGenerator`], downloads it and sends it back as a photo. Messages
//! without text (stickers, photos, member joins) are left to other handlers.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use image_generation_client::{GenerationRequest, ImageGenerator};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::download::download_image;
use crate::error::GenerationError;

/// Image generation handler.
///
/// Empty prompts and a missing service credential are answered with one reply and nothing else.
/// Otherwise an interim "generating" message is sent, the image is generated and delivered, and
/// the interim message is deleted afterwards whether or not delivery worked.
#[derive(Clone)]
pub struct ImageGenerationHandler {
    bot: Arc<dyn CoreBot>,
    /// None when no API token is configured.
    generator: Option<Arc<dyn ImageGenerator>>,
    http: reqwest::Client,
}

impl ImageGenerationHandler {
    pub fn new(bot: Arc<dyn CoreBot>, generator: Option<Arc<dyn ImageGenerator>>) -> Self {
        Self {
            bot,
            generator,
            http: reqwest::Client::new(),
        }
    }

    /// Uses the given client for image downloads.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Checks the request can be attempted at all: non-blank prompt, then a configured generator.
    /// The prompt is passed on and echoed exactly as the user typed it.
    fn check_request<'a>(
        &'a self,
        message: &'a Message,
    ) -> std::result::Result<(&'a str, &'a Arc<dyn ImageGenerator>), GenerationError> {
        let prompt = message.content.as_str();
        if prompt.trim().is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }
        let generator = self
            .generator
            .as_ref()
            .ok_or(GenerationError::MissingCredential)?;
        Ok((prompt, generator))
    }

    /// Generate → take first URL → download → send photo.
    async fn generate_and_send(
        &self,
        message: &Message,
        generator: &Arc<dyn ImageGenerator>,
        prompt: &str,
    ) -> std::result::Result<(), GenerationError> {
        let urls = generator.generate(&GenerationRequest::new(prompt)).await?;
        let image_url = urls
            .first()
            .ok_or_else(|| GenerationError::Upstream("no output URLs".to_string()))?;
        info!(image_url = %image_url, "Image URL from generation service");

        let image = download_image(&self.http, image_url).await?;

        let caption = format!("Generated for: '{}'", prompt);
        self.bot
            .send_photo(&message.chat, image, Some(&caption))
            .await?;
        Ok(())
    }

    /// Logs the failure and sends its user-facing text.
    async fn report(&self, message: &Message, err: &GenerationError) {
        error!(
            error = %err,
            kind = err.kind(),
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Image generation failed"
        );
        if let Err(e) = self.bot.send_message(&message.chat, err.user_message()).await {
            error!(error = %e, chat_id = message.chat.id, "Failed to send error reply");
        }
    }

    async fn delete_status(&self, message: &Message, status_id: &str) {
        if let Err(e) = self.bot.delete_message(&message.chat, status_id).await {
            warn!(error = %e, chat_id = message.chat.id, status_id = %status_id, "Failed to delete interim message");
        }
    }
}

#[async_trait]
impl Handler for ImageGenerationHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() || message.is_command() {
            return Ok(HandlerResponse::Continue);
        }

        let (prompt, generator) = match self.check_request(message) {
            Ok(checked) => checked,
            Err(e) => {
                self.report(message, &e).await;
                return Ok(HandlerResponse::Stop);
            }
        };

        info!(
            user_id = message.user.id,
            prompt_preview = %prompt.chars().take(50).collect::<String>(),
            "Processing image generation request"
        );

        let status_text = format!("Generating image for: '{}'\nThis might take a while...", prompt);
        let status_id = match self
            .bot
            .send_message_and_return_id(&message.chat, &status_text)
            .await
        {
            Ok(id) => id,
            Err(e) => {
                self.report(message, &GenerationError::from(e)).await;
                return Ok(HandlerResponse::Stop);
            }
        };

        match self.generate_and_send(message, generator, prompt).await {
            Ok(()) => info!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                "Image generated and sent successfully"
            ),
            Err(e) => self.report(message, &e).await,
        }
        self.delete_status(message, &status_id).await;

        Ok(HandlerResponse::Stop)
    }
}
