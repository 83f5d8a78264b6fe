// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Server - Notion API client
//
// The only component holding the outbound credential. Wraps the three
// remote calls (retrieve database, create page, query sorted by date) and
// collapses every failure into one opaque message for the proxy to log and
// forward.

use crate::config::NotionConfig;
use crate::store::RemoteStore;
use async_trait::async_trait;
use kakeibo_core::{from_remote_document, to_remote_document, AppError, Expense, NewExpense};
use kakeibo_core::{RemotePage, RemoteProperties};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// Client for the Notion API, constructed once at startup
pub struct NotionClient {
    http: Client,
    config: NotionConfig,
    base_url: String,
}

#[derive(Serialize)]
struct CreatePageRequest<'a> {
    parent: PageParent<'a>,
    properties: RemoteProperties,
}

#[derive(Serialize)]
struct PageParent<'a> {
    database_id: &'a str,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    sorts: [QuerySort<'a>; 1],
}

#[derive(Serialize)]
struct QuerySort<'a> {
    property: &'a str,
    direction: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<RemotePage>,
}

/// Error body shape returned by the Notion API
#[derive(Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    message: String,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Self {
        Self {
            http: Client::new(),
            config,
            base_url: NOTION_API_BASE.to_string(),
        }
    }

    fn database_url(&self) -> String {
        format!("{}/databases/{}", self.base_url, self.config.database_id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, AppError> {
        let response = request
            .bearer_auth(&self.config.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AppError::Transport(format!("Cannot connect to the Notion API - {}", e))
                } else if e.is_timeout() {
                    AppError::Transport("Request to the Notion API timed out".to_string())
                } else {
                    AppError::Transport(format!("Request failed: {}", e))
                }
            })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Remote(remote_error_message(status, &body)))
        }
    }
}

/// Extract the Notion error body's message, falling back to a generic
/// string when the body carries none.
fn remote_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<NotionErrorBody>(body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Notion API returned status {}", status))
}

#[async_trait]
impl RemoteStore for NotionClient {
    async fn probe(&self) -> Result<(), AppError> {
        self.send(self.http.get(self.database_url())).await?;
        Ok(())
    }

    async fn insert(&self, expense: &NewExpense) -> Result<(), AppError> {
        let request = CreatePageRequest {
            parent: PageParent {
                database_id: &self.config.database_id,
            },
            properties: to_remote_document(expense),
        };

        self.send(
            self.http
                .post(format!("{}/pages", self.base_url))
                .json(&request),
        )
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Expense>, AppError> {
        let request = QueryRequest {
            sorts: [QuerySort {
                property: "日付",
                direction: "descending",
            }],
        };

        let response = self
            .send(
                self.http
                    .post(format!("{}/query", self.database_url()))
                    .json(&request),
            )
            .await?;

        let query: QueryResponse = response
            .json()
            .await
            .map_err(|e| AppError::Serialization(format!("Failed to parse query response: {}", e)))?;

        Ok(query.results.iter().map(from_remote_document).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_taken_from_notion_body() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find database"}"#;
        assert_eq!(
            remote_error_message(StatusCode::NOT_FOUND, body),
            "Could not find database"
        );
    }

    #[test]
    fn test_error_message_falls_back_without_body() {
        assert_eq!(
            remote_error_message(StatusCode::BAD_GATEWAY, ""),
            "Notion API returned status 502 Bad Gateway"
        );
    }

    #[test]
    fn test_query_sort_wire_shape() {
        let request = QueryRequest {
            sorts: [QuerySort {
                property: "日付",
                direction: "descending",
            }],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "sorts": [{ "property": "日付", "direction": "descending" }]
            })
        );
    }
}
