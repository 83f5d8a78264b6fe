// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Server - Configuration
//
// All configuration is read from the environment exactly once at startup
// and carried in owned structs from then on. Nothing reads the environment
// after this point, and there is no runtime reconfiguration path.

use kakeibo_core::AppError;

/// Default port for the proxy server
const DEFAULT_PORT: u16 = 8787;

/// Credential and target database for the Notion API.
/// Owned exclusively by the NotionClient it is passed into.
#[derive(Debug, Clone)]
pub struct NotionConfig {
    /// Integration secret, sent as a bearer token
    pub api_key: String,
    /// Id of the expense database
    pub database_id: String,
}

/// Full server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the proxy HTTP server
    pub port: u16,
    pub notion: NotionConfig,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `NOTION_API_KEY` and `NOTION_DATABASE_ID` are required;
    /// `KAKEIBO_PORT` defaults to 8787.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = require_env("NOTION_API_KEY")?;
        let database_id = require_env("NOTION_DATABASE_ID")?;

        let port = match std::env::var("KAKEIBO_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::InvalidConfig(format!("KAKEIBO_PORT is not a valid port: {}", raw))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            notion: NotionConfig {
                api_key,
                database_id,
            },
        })
    }
}

fn require_env(name: &str) -> Result<String, AppError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::InvalidConfig(format!("{} is not set", name))),
    }
}
