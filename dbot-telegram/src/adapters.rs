//! Adapters from Telegram (teloxide) types to dbot_core types.

use dbot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};
use teloxide::types::{Update, UpdateKind};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let text = self.0.text();
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: chat_type(&self.0.chat),
            },
            content: text.unwrap_or("").to_string(),
            message_type: if text.is_some() { "text" } else { "other" }.to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

fn chat_type(chat: &teloxide::types::Chat) -> String {
    if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    }
    .to_string()
}

/// Converts an update to a core message. Only plain `message` updates are handled; edits,
/// callbacks and other kinds yield None.
pub fn update_to_core(update: &Update) -> Option<Message> {
    match &update.kind {
        UpdateKind::Message(msg) => Some(TelegramMessageWrapper(msg).to_core()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_update(json: &str) -> Update {
        serde_json::from_str(json).expect("valid update json")
    }

    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    #[test]
    fn test_text_message_update_to_core() {
        let update = parse_update(
            r#"{
                "update_id": 1001,
                "message": {
                    "message_id": 77,
                    "date": 1706529600,
                    "chat": {"id": 456, "type": "private", "first_name": "Ann"},
                    "from": {"id": 123, "is_bot": false, "first_name": "Ann", "username": "ann"},
                    "text": "a watercolor fox"
                }
            }"#,
        );

        let message = update_to_core(&update).expect("message update");

        assert_eq!(message.id, "77");
        assert_eq!(message.chat.id, 456);
        assert_eq!(message.chat.chat_type, "private");
        assert_eq!(message.user.id, 123);
        assert_eq!(message.user.username.as_deref(), Some("ann"));
        assert_eq!(message.content, "a watercolor fox");
        assert_eq!(message.message_type, "text");
    }

    #[test]
    fn test_message_without_text_has_empty_content() {
        let update = parse_update(
            r#"{
                "update_id": 1002,
                "message": {
                    "message_id": 78,
                    "date": 1706529600,
                    "chat": {"id": -100, "type": "group", "title": "Artists"},
                    "from": {"id": 123, "is_bot": false, "first_name": "Ann"},
                    "photo": [
                        {"file_id": "f", "file_unique_id": "u", "file_size": 1024, "width": 90, "height": 90}
                    ]
                }
            }"#,
        );

        let message = update_to_core(&update).expect("message update");

        assert_eq!(message.content, "");
        assert_eq!(message.message_type, "other");
        assert_eq!(message.chat.chat_type, "group");
    }

    #[test]
    fn test_edited_message_is_ignored() {
        let update = parse_update(
            r#"{
                "update_id": 1003,
                "edited_message": {
                    "message_id": 79,
                    "date": 1706529600,
                    "edit_date": 1706529700,
                    "chat": {"id": 456, "type": "private", "first_name": "Ann"},
                    "from": {"id": 123, "is_bot": false, "first_name": "Ann"},
                    "text": "edited"
                }
            }"#,
        );

        assert!(update_to_core(&update).is_none());
    }
}
