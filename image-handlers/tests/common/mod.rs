//! Recording mocks for [`dbot_core::Bot`] and [`image_generation_client::ImageGenerator`].
//!
//! Both write into one shared [`CallLog`] so tests can assert on the exact order of chat
//! operations and generation calls.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, DbotError, Message, Result, User};
use image_generation_client::{GenerationClientError, GenerationRequest, ImageGenerator};

/// Id the mock bot assigns to the interim message.
pub const STATUS_ID: &str = "900";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SendMessage(String),
    SendStatus(String),
    SendPhoto { bytes: Vec<u8>, caption: Option<String> },
    Delete(String),
    Generate { prompt: String, width: u32, height: u32 },
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap().clone()
}

pub struct MockBot {
    log: CallLog,
    fail_photo: bool,
}

impl MockBot {
    pub fn new(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            log,
            fail_photo: false,
        })
    }

    /// A bot whose `send_photo` fails (e.g. Telegram rejects the upload).
    pub fn failing_photo(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            log,
            fail_photo: true,
        })
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.record(Call::SendMessage(text.to_string()));
        Ok(())
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> Result<String> {
        self.record(Call::SendStatus(text.to_string()));
        Ok(STATUS_ID.to_string())
    }

    async fn send_photo(&self, _chat: &Chat, image: Vec<u8>, caption: Option<&str>) -> Result<()> {
        if self.fail_photo {
            return Err(DbotError::Bot("Bad Request: IMAGE_PROCESS_FAILED".to_string()));
        }
        self.record(Call::SendPhoto {
            bytes: image,
            caption: caption.map(str::to_string),
        });
        Ok(())
    }

    async fn delete_message(&self, _chat: &Chat, message_id: &str) -> Result<()> {
        self.record(Call::Delete(message_id.to_string()));
        Ok(())
    }
}

/// What the mock generator answers with.
pub enum Outcome {
    Urls(Vec<String>),
    EmptyOutput,
    ApiError(u16),
}

pub struct MockGenerator {
    log: CallLog,
    outcome: Outcome,
}

impl MockGenerator {
    pub fn new(log: CallLog, outcome: Outcome) -> Arc<dyn ImageGenerator> {
        Arc::new(Self { log, outcome })
    }
}

#[async_trait]
impl ImageGenerator for MockGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> image_generation_client::Result<Vec<String>> {
        self.log.lock().unwrap().push(Call::Generate {
            prompt: request.prompt.clone(),
            width: request.width,
            height: request.height,
        });
        match &self.outcome {
            Outcome::Urls(urls) => Ok(urls.clone()),
            Outcome::EmptyOutput => Err(GenerationClientError::EmptyOutput),
            Outcome::ApiError(status) => Err(GenerationClientError::Api {
                status: *status,
                body: "upstream said no".to_string(),
            }),
        }
    }
}

pub fn text_message(content: &str) -> Message {
    Message {
        id: "10".to_string(),
        user: User {
            id: 123,
            username: Some("ann".to_string()),
            first_name: Some("Ann".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

/// A message without text, as decoded from a sticker or a member-join service message.
pub fn non_text_message() -> Message {
    let mut message = text_message("");
    message.message_type = "other".to_string();
    message
}
