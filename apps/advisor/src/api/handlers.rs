//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every mutating handler takes the write lock, so operations on the single
//! session are applied one at a time.

use super::{
    AppState,
    types::{
        AdvanceResponse, AnswerRequest, CatalogResponse, ErrorResponse, HealthResponse,
        ResultsResponse, RetreatResponse, SessionResponse,
    },
};
use advisor_core::AdvisorError;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Status code for an engine error.
fn error_status(error: &AdvisorError) -> StatusCode {
    match error {
        AdvisorError::UnknownQuestion(_) | AdvisorError::UnknownOption { .. } => {
            StatusCode::BAD_REQUEST
        }
        AdvisorError::NotCompleted => StatusCode::CONFLICT,
        e if e.is_storage() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map an engine error onto a status code and JSON body.
fn error_response(error: &AdvisorError) -> Response {
    let status = error_status(error);
    if status.is_server_error() {
        tracing::warn!(error = %error, "request failed");
    }
    (status, Json(ErrorResponse::new(error.to_string()))).into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// READ HANDLERS
// =============================================================================

/// Get the question catalog.
pub async fn catalog_handler(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.read().await;
    (StatusCode::OK, Json(CatalogResponse::from_engine(&engine)))
}

/// Get the current session.
pub async fn session_handler(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.engine.read().await;
    (StatusCode::OK, Json(SessionResponse::from_engine(&engine)))
}

/// Get the final result. 409 until the quiz is completed.
pub async fn results_handler(State(state): State<AppState>) -> Response {
    let engine = state.engine.read().await;
    match engine.assessment() {
        Ok(assessment) => (StatusCode::OK, Json(ResultsResponse::from(assessment))).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// SESSION HANDLERS
// =============================================================================

/// Begin a fresh attempt.
pub async fn start_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut engine = state.engine.write().await;
    engine.start();
    (StatusCode::OK, Json(SessionResponse::from_engine(&engine)))
}

/// Record an answer. 400 for an unknown question or option.
pub async fn answer_handler(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Response {
    let mut engine = state.engine.write().await;
    match engine.select_option(&request.question_id, &request.value) {
        Ok(()) => (StatusCode::OK, Json(SessionResponse::from_engine(&engine))).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "rejected answer");
            error_response(&e)
        }
    }
}

/// Move to the next question, or finish on the last one.
pub async fn advance_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut engine = state.engine.write().await;
    let outcome = engine.advance();
    let response = AdvanceResponse {
        outcome,
        session: SessionResponse::from_engine(&engine),
    };
    (StatusCode::OK, Json(response))
}

/// Move back one question.
pub async fn retreat_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut engine = state.engine.write().await;
    let moved = engine.retreat();
    let response = RetreatResponse {
        moved,
        session: SessionResponse::from_engine(&engine),
    };
    (StatusCode::OK, Json(response))
}

/// Discard the attempt and the saved slot.
pub async fn restart_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut engine = state.engine.write().await;
    engine.restart();
    (StatusCode::OK, Json(SessionResponse::from_engine(&engine)))
}

// =============================================================================
// TESTS
// =============================================================================
