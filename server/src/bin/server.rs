//! Process server binary.
//!
//! Loads configuration, installs tracing and serves `/process` until Ctrl+C.

use tracing_subscriber::EnvFilter;

use process_server_lib::config::AppConfig;
use process_server_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load();
    tracing::info!(port = config.server_port, "Starting process server");

    server::start_server(config).await
}
