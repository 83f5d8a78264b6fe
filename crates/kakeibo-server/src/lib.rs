// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Server - Notion proxy
//
// This crate is the trust boundary of the system: it is the only place the
// Notion credential exists. The browser-facing session crate only ever
// talks to the proxy endpoint defined here.

pub mod config;
pub mod notion;
pub mod proxy;
pub mod store;

// Re-export commonly used items
pub use config::{Config, NotionConfig};
pub use notion::NotionClient;
pub use proxy::{create_router, start_server};
pub use store::RemoteStore;
