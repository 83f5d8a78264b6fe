// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Core - Type definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted expense as read back from the Notion database.
///
/// The `id` is assigned by Notion at creation and is immutable; expenses
/// have no update or delete lifecycle, only append and full-list read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Opaque page id assigned by the remote store
    pub id: String,
    /// Non-negative amount; currency formatting is a view concern
    pub amount: f64,
    /// Short label like "現金" or "クレジットカード" (UI-suggested, open set)
    pub payment_method: String,
    /// Free-text description of what the money was spent on
    pub purpose: String,
    /// ISO-8601 timestamp of when the expense occurred
    pub date: String,
}

/// An expense that has not been persisted yet.
///
/// Every field is defaulted on deserialization: a partial payload is still
/// forwarded to the remote store, which enforces its own schema. The proxy
/// never rejects an expense on the caller's behalf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub date: String,
}

impl NewExpense {
    /// Build an expense dated at the current instant, with millisecond
    /// precision to match the timestamps views submit.
    pub fn now(amount: f64, payment_method: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            amount,
            payment_method: payment_method.into(),
            purpose: purpose.into(),
            date: chrono::Utc::now()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

/// Request body accepted by the proxy endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyRequest {
    /// One of "testConnection", "addExpense", "getExpenses"
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Uniform response envelope returned by the proxy endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Vec<Expense>>,
}

impl ProxyResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            expenses: None,
        }
    }

    pub fn ok_with_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            success: true,
            error: None,
            expenses: Some(expenses),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(ErrorMessage {
                message: message.into(),
            }),
            expenses: None,
        }
    }

    /// Failure shape for reads: callers treat the empty list as the safe
    /// degraded state, so it is present even when the query failed.
    pub fn failure_with_empty_expenses(message: impl Into<String>) -> Self {
        Self {
            expenses: Some(Vec::new()),
            ..Self::failure(message)
        }
    }
}

/// Human-readable error detail crossing the proxy boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppError {
    /// The human-readable detail, without the variant prefix. This is the
    /// only part of an error that crosses the proxy boundary.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(m)
            | Self::Remote(m)
            | Self::Protocol(m)
            | Self::Serialization(m)
            | Self::InvalidConfig(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_wire_shape_is_camel_case() {
        let expense = Expense {
            id: "abc".to_string(),
            amount: 1500.0,
            payment_method: "現金".to_string(),
            purpose: "昼食".to_string(),
            date: "2024-01-01T00:00:00.000Z".to_string(),
        };

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["paymentMethod"], "現金");
        assert_eq!(value["amount"], 1500.0);
    }

    #[test]
    fn test_new_expense_defaults_missing_fields() {
        let partial: NewExpense = serde_json::from_value(serde_json::json!({
            "amount": 300
        }))
        .unwrap();

        assert_eq!(partial.amount, 300.0);
        assert_eq!(partial.payment_method, "");
        assert_eq!(partial.purpose, "");
        assert_eq!(partial.date, "");
    }

    #[test]
    fn test_now_uses_millisecond_utc_timestamp() {
        let expense = NewExpense::now(300.0, "現金", "電車代");
        assert!(expense.date.ends_with('Z'));
        // "2024-01-01T00:00:00.000Z" is 24 chars
        assert_eq!(expense.date.len(), 24);
    }

    #[test]
    fn test_failure_envelope_skips_absent_expenses() {
        let value = serde_json::to_value(ProxyResponse::failure("boom")).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["message"], "boom");
        assert!(value.get("expenses").is_none());
    }

    #[test]
    fn test_read_failure_envelope_carries_empty_list() {
        let value =
            serde_json::to_value(ProxyResponse::failure_with_empty_expenses("boom")).unwrap();
        assert_eq!(value["expenses"], serde_json::json!([]));
    }
}
