//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, CreateSessionResponse, ErrorResponse, SuccessResponse,
    TranscriptResponse, TurnView,
};
use super::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // The homepage with the chat terminal
        .route("/", get(serve_index))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id/close", post(close_session))
        // SSE streaming
        .route("/api/sessions/:id/stream", get(stream_session))
        // Visitor input
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/transcript", get(get_transcript))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_index() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - page not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Sessions
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state.sessions.create().await;
    Json(CreateSessionResponse {
        session_id,
        bot_name: state.bot_name.to_string(),
    })
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.sessions.close(&id).await.map_err(AppError::NotFound)?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let handle = state.sessions.get(&id).await.map_err(AppError::NotFound)?;

    // Subscribe before the snapshot so nothing falls between them
    let broadcast_rx = handle.subscribe();
    let init_event = handle.init_event().await;

    Ok(sse_stream(
        init_event,
        broadcast_rx,
        Arc::clone(&state.bot_name),
    ))
}

async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let handle = state.sessions.get(&id).await.map_err(AppError::NotFound)?;
    let turns = handle.transcript().await;

    Ok(Json(TranscriptResponse {
        turns: TurnView::list(&turns, &state.bot_name),
        pending: handle.is_pending(),
    }))
}

// ============================================================
// Visitor Input
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let handle = state.sessions.get(&id).await.map_err(AppError::NotFound)?;
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    handle.submit(req.text).await.map_err(AppError::Internal)?;

    Ok(Json(ChatResponse { queued: true }))
}

async fn get_version() -> &'static str {
    concat!("homepage_chat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
