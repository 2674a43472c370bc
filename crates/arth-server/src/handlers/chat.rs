//! Advisory chat handler

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{get_user_id, AppError, AppState};
use arth_core::FinancialSummary;

/// Successful chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/chat - Answer a question against the supplied summary
///
/// Body: `{ "question": string, "summary": FinancialSummary }`. The body is
/// parsed here rather than by the `Json` extractor so every rejection keeps
/// the `{ "error": string }` shape.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let payload: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|_| AppError::bad_request("Invalid JSON body"))?
    };

    let question = payload.get("question").and_then(Value::as_str);
    let summary = payload
        .get("summary")
        .filter(|s| !s.is_null())
        .map(|s| serde_json::from_value::<FinancialSummary>(s.clone()).unwrap_or_default());

    debug!(user = %get_user_id(&headers), "Chat request");

    let reply = state.advisor.advise(question, summary).await;

    match reply.failure_kind {
        None => Ok(Json(ChatResponse { reply: reply.text })),
        Some(kind) if kind.is_client_error() => Err(AppError::bad_request(&reply.text)),
        Some(_) => Err(AppError::internal(&reply.text)),
    }
}

/// Any non-POST method on /api/chat
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}
