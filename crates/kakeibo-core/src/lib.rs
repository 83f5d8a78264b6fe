// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Core - Shared logic for the server and session crates
//
// This crate provides:
// - Expense and NewExpense domain types
// - The proxy wire protocol (ProxyRequest / ProxyResponse)
// - AppError, the single error type of the workspace
// - The schema mapper between expenses and Notion page properties
//
// HTTP-facing code lives in separate crates.

pub mod mapper;
pub mod types;

// Re-export commonly used items
pub use mapper::{from_remote_document, to_remote_document, RemotePage, RemoteProperties};
pub use types::{AppError, ErrorMessage, Expense, NewExpense, ProxyRequest, ProxyResponse};
