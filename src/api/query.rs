//! `POST /api/query-ai` - answers one free-text question.

use super::{AppState, ReplyBody, error_response};
use crate::{
    handlers::{self, Reply, failure_message},
    router::route_question,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, instrument, warn};

const MISSING_QUESTION: &str = "חסרה שאלה או שהשאלה לא תקינה";

/// Request body.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// Free-text question in Hebrew or English
    pub question: String,
}

/// Routes the question, answers it and maps the outcome to a status code.
#[instrument(skip_all)]
pub async fn query_ai(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Response {
    let question = match payload {
        Ok(Json(request)) if !request.question.trim().is_empty() => {
            request.question.trim().to_string()
        }
        Ok(_) => {
            warn!("Rejected blank question");
            return error_response(StatusCode::BAD_REQUEST, MISSING_QUESTION, None);
        }
        Err(rejection) => {
            warn!("Rejected question body: {rejection}");
            return error_response(StatusCode::BAD_REQUEST, MISSING_QUESTION, None);
        }
    };

    let routed = route_question(&question, Local::now().naive_local());
    let summarizer = state.summarizer.as_deref();

    match handlers::answer(&state.db, summarizer, &question, &routed).await {
        Ok(Reply::Answer(reply)) => (StatusCode::OK, Json(ReplyBody { reply })).into_response(),
        Ok(Reply::OutOfScope(message) | Reply::NotUnderstood(message)) => {
            error_response(StatusCode::BAD_REQUEST, message, None)
        }
        Err(e) => {
            error!("Failed to answer {} question: {e}", routed.intent.name());
            let details = state.expose_error_details.then(|| e.to_string());
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                failure_message(&routed.intent, routed.language),
                details,
            )
        }
    }
}
