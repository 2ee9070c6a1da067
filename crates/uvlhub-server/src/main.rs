//! UVLHub Server - Main entry point

use anyhow::Result;
use tracing::info;
use uvlhub_common::logging::{init_logging, LogConfig};
use uvlhub_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("uvlhub-server")
        .filter_directives("uvlhub_server=debug,tower_http=debug,sqlx=info")
        .build()
        .with_env_overrides()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting UVLHub Server");

    let config = Config::load()?;
    info!(
        backend = ?config.catalog.backend,
        "Configuration loaded - server will bind to {}:{}",
        config.server.host,
        config.server.port
    );

    api::serve(config).await
}
