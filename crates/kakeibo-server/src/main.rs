// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Server - Main entry point
//
// Reads the Notion credential from the environment once, then serves the
// proxy endpoint until stopped.

use kakeibo_server::{start_server, Config, NotionClient};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kakeibo_server=info".parse().unwrap()),
        )
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    let store = Arc::new(NotionClient::new(config.notion));

    if let Err(e) = start_server(store, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
