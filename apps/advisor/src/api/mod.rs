//! # Advisor HTTP API Module
//!
//! This module exposes the quiz engine over HTTP using axum, for a browser
//! front-end that renders the screens itself.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /catalog` - Questions and options
//! - `GET /session` - Current session and screen
//! - `POST /session/start` - Begin the quiz
//! - `POST /session/answer` - Record an answer
//! - `POST /session/advance` - Next question, or finish on the last one
//! - `POST /session/retreat` - Previous question
//! - `POST /session/restart` - Discard the attempt
//! - `GET /results` - Score, level and recommendations
//!
//! ## Configuration (Environment Variables)
//!
//! - `ADVISOR_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `advisor::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    advance_handler, answer_handler, catalog_handler, health_handler, restart_handler,
    results_handler, retreat_handler, session_handler, start_handler,
};
#[allow(unused_imports)]
pub use types::{
    AdvanceResponse, AnswerRequest, CatalogResponse, ErrorResponse, HealthResponse, ResultsResponse,
    RetreatResponse, SessionResponse,
};

use advisor_core::{AdvisorError, QuizEngine};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request bodies are a question id and an option value.
const MAX_BODY_SIZE: usize = 16 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the quiz engine.
#[derive(Clone)]
pub struct AppState {
    /// The engine owning the single session.
    pub engine: Arc<RwLock<QuizEngine>>,
}

impl AppState {
    /// Create new app state with an engine.
    #[must_use]
    pub fn new(engine: QuizEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `ADVISOR_CORS_ORIGINS`.
///
/// - "*": allows all origins
/// - unset: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("ADVISOR_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (ADVISOR_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in ADVISOR_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No ADVISOR_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/catalog", get(handlers::catalog_handler))
        .route("/session", get(handlers::session_handler))
        .route("/session/start", post(handlers::start_handler))
        .route("/session/answer", post(handlers::answer_handler))
        .route("/session/advance", post(handlers::advance_handler))
        .route("/session/retreat", post(handlers::retreat_handler))
        .route("/session/restart", post(handlers::restart_handler))
        .route("/results", get(handlers::results_handler))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, engine: QuizEngine) -> Result<(), AdvisorError> {
    let state = AppState::new(engine);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AdvisorError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Advisor HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| AdvisorError::IoError(format!("Server error: {}", e)))
}
