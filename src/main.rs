mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use estate_portal::api::ApiClient;
use estate_portal::config::Config;
use estate_portal::storage::FileStorage;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }
    debug!("API: {}, storage: {}", config.api_url, config.storage_dir.display());

    let storage = Arc::new(FileStorage::new(&config.storage_dir));
    let api = ApiClient::new(&config, storage)?;

    commands::run(cli, api).await
}
