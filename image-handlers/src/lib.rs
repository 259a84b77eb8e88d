//! # image-handlers
//!
//! Handlers for the image bot's chain: [`StartHandler`] answers `/start`, and
//! [`ImageGenerationHandler`] turns any other text message into a generated image reply.

mod download;
mod error;
mod image_generation_handler;
mod start_handler;

pub use download::download_image;
pub use error::GenerationError;
pub use image_generation_handler::ImageGenerationHandler;
pub use start_handler::{StartHandler, START_MESSAGE};
