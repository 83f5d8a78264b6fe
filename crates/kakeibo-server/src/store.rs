// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Server - Remote store interface

use async_trait::async_trait;
use kakeibo_core::{AppError, Expense, NewExpense};

/// The three operations the proxy dispatches to the external store.
///
/// `NotionClient` is the production implementation; tests drive the proxy
/// against in-memory implementations instead.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Read-only connectivity check against the configured database
    async fn probe(&self) -> Result<(), AppError>;

    /// Append one expense. Not retried; the store enforces its own schema.
    async fn insert(&self, expense: &NewExpense) -> Result<(), AppError>;

    /// All expenses, newest first. Ordering is the remote query's, not ours.
    async fn list(&self) -> Result<Vec<Expense>, AppError>;
}
