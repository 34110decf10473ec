// src/main.rs
use std::fs::OpenOptions;
use std::sync::Mutex;

use dotenvy::dotenv;
use securebank_dashboard::{cli, config::Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = Settings::from_env()?;

    // The terminal belongs to the TUI, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!(base_url = %settings.base_url, "starting dashboard client");
    cli::run(&settings).await
}
