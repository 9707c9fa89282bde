// ABOUTME: Entry point of the `rstore` server binary
// ABOUTME: Loads .env, installs logging, reads configuration and starts the server

use rstore_cli::config::Config;
use rstore_config::constants::RUST_LOG;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(RUST_LOG).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Reseller Store settings server");

    rstore_cli::run_server(config).await
}
