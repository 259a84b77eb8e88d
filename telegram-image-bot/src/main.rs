//! Binary for the image bot. `.env` is loaded before config so local runs need no exports.

use anyhow::Result;
use clap::Parser;
use telegram_image_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
    }
}
