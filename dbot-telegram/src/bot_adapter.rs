//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{parse_message_id, Bot as CoreBot, Chat, DbotError, Result};
use teloxide::{
    prelude::*,
    types::{ChatId, InputFile, MessageId},
};

/// File name Telegram shows for uploaded images.
const PHOTO_FILE_NAME: &str = "image.png";

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn send_message_and_return_id(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn send_photo(&self, chat: &Chat, image: Vec<u8>, caption: Option<&str>) -> Result<()> {
        let photo = InputFile::memory(image).file_name(PHOTO_FILE_NAME);
        let request = self.bot.send_photo(ChatId(chat.id), photo);
        let request = match caption {
            Some(caption) => request.caption(caption.to_string()),
            None => request,
        };
        request
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn delete_message(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .delete_message(ChatId(chat.id), MessageId(id))
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

    fn chat() -> Chat {
        Chat {
            id: 123,
            chat_type: "private".to_string(),
        }
    }

    fn adapter_for(server: &mockito::ServerGuard) -> TelegramBotAdapter {
        let url = reqwest::Url::parse(&server.url()).unwrap();
        TelegramBotAdapter::new(teloxide::Bot::new(TEST_BOT_TOKEN).set_api_url(url))
    }

    /// **Test: send_message_and_return_id returns the id Telegram assigned to the sent message.**
    #[tokio::test]
    async fn test_send_message_and_return_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", format!("/bot{}/SendMessage", TEST_BOT_TOKEN).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "ok": true,
                "result": {
                    "message_id": 555,
                    "date": 1706529600,
                    "chat": {"id": 123, "type": "private", "first_name": "Ann"},
                    "from": {"id": 987654321, "is_bot": true, "first_name": "ImageBot", "username": "imagebot"},
                    "text": "Generating image..."
                }
            }"#,
            )
            .create_async()
            .await;

        let id = adapter_for(&server)
            .send_message_and_return_id(&chat(), "Generating image...")
            .await
            .unwrap();

        assert_eq!(id, "555");
        mock.assert_async().await;
    }

    /// **Test: delete_message calls DeleteMessage with the parsed id.**
    #[tokio::test]
    async fn test_delete_message() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("POST", format!("/bot{}/DeleteMessage", TEST_BOT_TOKEN).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "result": true}"#)
            .expect(1)
            .create_async()
            .await;

        adapter_for(&server)
            .delete_message(&chat(), "555")
            .await
            .unwrap();
        ok.assert_async().await;
    }

    /// **Test: send_photo uploads the bytes as multipart with file name and caption.**
    #[tokio::test]
    async fn test_send_photo_uploads_multipart_with_caption() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", format!("/bot{}/SendPhoto", TEST_BOT_TOKEN).as_str())
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="chat_id""#.to_string()),
                Matcher::Regex(r#"name="caption""#.to_string()),
                Matcher::Regex("Generated for: 'a fox'".to_string()),
                Matcher::Regex(r#"filename="image.png""#.to_string()),
                Matcher::Regex("fake-image-bytes".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "ok": true,
                "result": {
                    "message_id": 556,
                    "date": 1706529600,
                    "chat": {"id": 123, "type": "private", "first_name": "Ann"},
                    "from": {"id": 987654321, "is_bot": true, "first_name": "ImageBot", "username": "imagebot"},
                    "photo": [{"file_id": "AgACAgIAAxkB", "file_unique_id": "AQADAgAT", "width": 256, "height": 256, "file_size": 16}],
                    "caption": "Generated for: 'a fox'"
                }
            }"#,
            )
            .expect(1)
            .create_async()
            .await;

        adapter_for(&server)
            .send_photo(&chat(), b"fake-image-bytes".to_vec(), Some("Generated for: 'a fox'"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_photo_api_error_is_bot_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", format!("/bot{}/SendPhoto", TEST_BOT_TOKEN).as_str())
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: IMAGE_PROCESS_FAILED"}"#)
            .create_async()
            .await;

        let err = adapter_for(&server)
            .send_photo(&chat(), b"fake-image-bytes".to_vec(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DbotError::Bot(_)));
    }

    #[tokio::test]
    async fn test_delete_message_rejects_non_numeric_id() {
        let server = mockito::Server::new_async().await;
        let err = adapter_for(&server)
            .delete_message(&chat(), "not-a-number")
            .await
            .unwrap_err();
        assert!(matches!(err, DbotError::InvalidMessageId(_)));
    }
}
