//! # dbot-telegram
//!
//! Telegram transport layer: adapters from teloxide types to core types, the [`dbot_core::Bot`]
//! implementation, transport config, and the webhook receiver that feeds a [`handler_chain::HandlerChain`].
//! No generation logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod webhook;

pub use adapters::{update_to_core, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, DEFAULT_PORT};
pub use webhook::{
    register_webhook, run_webhook, webhook_router, webhook_url, HEALTH_TEXT, WEBHOOK_PATH,
};
