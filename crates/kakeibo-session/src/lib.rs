// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Session - Client-side session state
//
// The component view layers hold on to. It knows the proxy endpoint's wire
// protocol and nothing about Notion: no credential, no schema, no error
// detail. Everything a view sees is an expense list, a bool, or nothing.

pub mod session;

pub use session::ExpenseSession;
