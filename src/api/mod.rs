//! HTTP API - the question endpoint and a health check.
//!
//! Routes:
//! * `POST /api/query-ai` with `{ "question": "..." }`
//! * `GET /health`

pub mod health;
pub mod query;

use crate::llm::SupplierSummarizer;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// State shared by every request.
pub struct AppState {
    /// Pooled database connection
    pub db: DatabaseConnection,
    /// Include the underlying error text in 500 responses
    pub expose_error_details: bool,
    /// Supplier summarizer, `None` when LLM summaries are off
    pub summarizer: Option<Arc<dyn SupplierSummarizer>>,
}

/// Successful answer body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyBody {
    /// Answer text
    pub reply: String,
}

/// Error body for 4xx and 5xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Localized message
    pub error: String,
    /// Underlying error, only when details are exposed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub(crate) fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: Option<String>,
) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
            details,
        }),
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/query-ai",
            post(query::query_ai).fallback(method_not_allowed),
        )
        .route("/health", get(health::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    pub fn app(db: DatabaseConnection, expose_error_details: bool) -> Router {
        router(Arc::new(AppState {
            db,
            expose_error_details,
            summarizer: None,
        }))
    }

    pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/query-ai")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}
