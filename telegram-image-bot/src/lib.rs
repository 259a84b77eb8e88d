//! # telegram-image-bot
//!
//! Application crate: CLI, combined config, component wiring and the runner that serves the
//! Telegram webhook. Generation logic lives in `image-handlers` and `image-generation-client`.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_generator, build_handler_chain, build_teloxide_bot};
pub use config::BotConfig;
pub use runner::run_bot;
