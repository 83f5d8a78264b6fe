// SPDX-License-Identifier: AGPL-3.0
// Kakeibo Server - Proxy endpoint
//
// One POST route, action-dispatched, returning the uniform envelope.
// Every failure is logged here before the response goes out; only the
// error message itself crosses the boundary.

use crate::store::RemoteStore;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use kakeibo_core::{AppError, NewExpense, ProxyRequest, ProxyResponse};
use std::net::SocketAddr;
use std::sync::Arc;

/// Create the Axum router for the proxy server
pub fn create_router(store: Arc<dyn RemoteStore>) -> Router {
    Router::new()
        .route(
            "/api/notion",
            post(proxy_handler).fallback(method_not_allowed_handler),
        )
        .with_state(store)
}

/// Fixed 405 for anything that is not a POST, sent before the body is read
async fn method_not_allowed_handler() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "message": "Only POST requests are allowed" })),
    )
}

/// Single entry point: dispatches `{action, payload}` to the remote store
async fn proxy_handler(
    State(store): State<Arc<dyn RemoteStore>>,
    Json(request): Json<ProxyRequest>,
) -> Response {
    match request.action.as_str() {
        "testConnection" => match store.probe().await {
            Ok(()) => (StatusCode::OK, Json(ProxyResponse::ok())).into_response(),
            Err(e) => {
                tracing::error!("Notion connection error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ProxyResponse::failure(e.message())),
                )
                    .into_response()
            }
        },

        "addExpense" => {
            let expense: NewExpense = match parse_payload(request.payload) {
                Ok(expense) => expense,
                Err(e) => {
                    tracing::error!("Error adding expense: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ProxyResponse::failure(e.message())),
                    )
                        .into_response();
                }
            };

            match store.insert(&expense).await {
                Ok(()) => (StatusCode::OK, Json(ProxyResponse::ok())).into_response(),
                Err(e) => {
                    tracing::error!("Error adding expense: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ProxyResponse::failure(e.message())),
                    )
                        .into_response()
                }
            }
        }

        "getExpenses" => match store.list().await {
            Ok(expenses) => (
                StatusCode::OK,
                Json(ProxyResponse::ok_with_expenses(expenses)),
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Error getting expenses: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ProxyResponse::failure_with_empty_expenses(e.message())),
                )
                    .into_response()
            }
        },

        other => {
            tracing::warn!("Rejected unknown action: {}", other);
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": "Invalid action" })),
            )
                .into_response()
        }
    }
}

/// Deserialize the addExpense payload. Absent fields default rather than
/// fail; only a payload that is not an object at all is an error.
fn parse_payload(payload: Option<serde_json::Value>) -> Result<NewExpense, AppError> {
    let payload = payload.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(payload)
        .map_err(|e| AppError::Protocol(format!("Malformed expense payload: {}", e)))
}

/// Start the proxy HTTP server
pub async fn start_server(store: Arc<dyn RemoteStore>, port: u16) -> Result<(), AppError> {
    let app = create_router(store);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("Starting proxy server on port {}", port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Transport(format!("Failed to bind to port {}: {}", port, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Transport(format!("Server error: {}", e)))?;

    Ok(())
}
