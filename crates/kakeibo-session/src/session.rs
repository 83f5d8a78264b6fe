// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Session - Session state over the proxy endpoint
//
// Connectivity is probed exactly once, when the session is constructed,
// and cached for its whole lifetime. The flag is advisory: operations are
// always attempted regardless of it. Known weak contract, kept on purpose:
// a probe that succeeded before a network outage stays true until the
// session is rebuilt, and a failed read is indistinguishable from an empty
// database here. Callers that care track their own error flag.

use kakeibo_core::{AppError, Expense, NewExpense, ProxyRequest, ProxyResponse};
use reqwest::Client;

/// Session over the proxy endpoint, held by view layers
pub struct ExpenseSession {
    http: Client,
    endpoint: String,
    connected: bool,
}

impl ExpenseSession {
    /// Build a session against the proxy at `base_url` and resolve the
    /// connectivity flag with a single testConnection probe.
    pub async fn connect(base_url: impl Into<String>) -> Self {
        let http = Client::new();
        let endpoint = format!("{}/api/notion", base_url.into().trim_end_matches('/'));

        let connected = match request(&http, &endpoint, "testConnection", None).await {
            Ok(response) => response.success,
            Err(e) => {
                tracing::warn!("Connectivity probe failed: {}", e);
                false
            }
        };

        Self {
            http,
            endpoint,
            connected,
        }
    }

    /// The cached result of the initial probe; never revalidated
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Submit one expense. Returns whether the remote call succeeded;
    /// transport failures collapse to `false` rather than propagating.
    pub async fn add_expense(&self, expense: &NewExpense) -> bool {
        let payload = match serde_json::to_value(expense) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Failed to encode expense: {}", e);
                return false;
            }
        };

        match request(&self.http, &self.endpoint, "addExpense", Some(payload)).await {
            Ok(response) => response.success,
            Err(e) => {
                tracing::warn!("Failed to add expense: {}", e);
                false
            }
        }
    }

    /// Fetch all expenses, newest first. Any failure yields an empty list.
    pub async fn get_expenses(&self) -> Vec<Expense> {
        match request(&self.http, &self.endpoint, "getExpenses", None).await {
            Ok(response) => {
                if let Some(error) = &response.error {
                    tracing::warn!("Failed to fetch expenses: {}", error.message);
                }
                response.expenses.unwrap_or_default()
            }
            Err(e) => {
                tracing::warn!("Failed to fetch expenses: {}", e);
                Vec::new()
            }
        }
    }
}

/// One proxy round trip. This is the only place session errors exist in
/// typed form; every public operation collapses them at its boundary.
async fn request(
    http: &Client,
    endpoint: &str,
    action: &str,
    payload: Option<serde_json::Value>,
) -> Result<ProxyResponse, AppError> {
    let body = ProxyRequest {
        action: action.to_string(),
        payload,
    };

    let response = http
        .post(endpoint)
        .json(&body)
        .send()
        .await
        .map_err(|e| AppError::Transport(format!("Request failed: {}", e)))?;

    response
        .json::<ProxyResponse>()
        .await
        .map_err(|e| AppError::Serialization(format!("Failed to parse response: {}", e)))
}
