//! Integration tests for the Advisor HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use advisor::api::{
    AdvanceResponse, AppState, CatalogResponse, ErrorResponse, HealthResponse, ResultsResponse,
    RetreatResponse, SessionResponse, create_router,
};
use advisor_core::{
    Advance, Catalog, Level, QuizEngine, Screen, SessionStore, StorageBackend,
};
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server over a fresh in-memory engine.
fn create_test_server() -> TestServer {
    let state = AppState::new(QuizEngine::in_memory());
    TestServer::new(create_router(state)).unwrap()
}

async fn answer(server: &TestServer, question_id: &str, value: &str) -> SessionResponse {
    let response = server
        .post("/session/answer")
        .json(&json!({ "question_id": question_id, "value": value }))
        .await;
    response.assert_status_ok();
    response.json()
}

async fn advance(server: &TestServer) -> AdvanceResponse {
    let response = server.post("/session/advance").await;
    response.assert_status_ok();
    response.json()
}

/// Answer every built-in question and finish.
async fn complete_quiz(server: &TestServer, values: [&str; 5]) -> AdvanceResponse {
    let ids = [
        "business_type",
        "employee_count",
        "scheduling_method",
        "overtime_tracking",
        "schedule_changes",
    ];
    server.post("/session/start").await.assert_status_ok();
    let mut last = None;
    for (id, value) in ids.iter().zip(values) {
        answer(server, id, value).await;
        last = Some(advance(server).await);
    }
    last.unwrap()
}

// =============================================================================
// HEALTH & CATALOG
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_catalog_lists_builtin_questions() {
    let server = create_test_server();

    let response = server.get("/catalog").await;

    response.assert_status_ok();
    let catalog: CatalogResponse = response.json();
    assert_eq!(catalog.questions, Catalog::builtin().questions());
    assert_eq!(catalog.questions[0].id, "business_type");
}

#[tokio::test]
async fn test_catalog_uses_type_field() {
    let server = create_test_server();

    let body: serde_json::Value = server.get("/catalog").await.json();

    assert_eq!(body["questions"][0]["type"], "context");
    assert_eq!(body["questions"][2]["type"], "diagnostic");
}

// =============================================================================
// SESSION FLOW
// =============================================================================

#[tokio::test]
async fn test_initial_session_is_welcome() {
    let server = create_test_server();

    let session: SessionResponse = server.get("/session").await.json();

    assert_eq!(session.step, 0);
    assert_eq!(session.screen, Screen::Welcome);
    assert!(session.question.is_none());
    assert!(session.progress.is_none());
}

#[tokio::test]
async fn test_start_shows_first_question() {
    let server = create_test_server();

    let response = server.post("/session/start").await;

    response.assert_status_ok();
    let session: SessionResponse = response.json();
    assert_eq!(session.step, 1);
    assert_eq!(session.screen, Screen::Question { index: 0 });
    assert_eq!(session.question.unwrap().id, "business_type");
    assert_eq!(session.progress.unwrap().position, 1);
    assert!(!session.can_advance);
}

#[tokio::test]
async fn test_advance_without_answer_is_blocked() {
    let server = create_test_server();
    server.post("/session/start").await;

    let advanced = advance(&server).await;

    assert_eq!(advanced.outcome, Advance::Blocked);
    assert_eq!(advanced.session.step, 1);
}

#[tokio::test]
async fn test_answer_enables_advance() {
    let server = create_test_server();
    server.post("/session/start").await;

    let session = answer(&server, "business_type", "hotel").await;
    assert!(session.can_advance);
    assert_eq!(session.answers.get("business_type").map(String::as_str), Some("hotel"));

    let advanced = advance(&server).await;
    assert_eq!(advanced.outcome, Advance::Moved { step: 2 });
    assert_eq!(advanced.session.question.unwrap().id, "employee_count");
}

#[tokio::test]
async fn test_full_quiz_reaches_results() {
    let server = create_test_server();

    let finished = complete_quiz(
        &server,
        ["restaurant", "11-30", "excel", "approximate", "weekly"],
    )
    .await;

    assert_eq!(
        finished.outcome,
        Advance::Finished {
            score: 58,
            level: Level::Structured
        }
    );
    assert_eq!(finished.session.screen, Screen::Results);
    assert_eq!(finished.session.step, 6);

    let response = server.get("/results").await;
    response.assert_status_ok();
    let results: ResultsResponse = response.json();
    assert_eq!(results.score, 58);
    assert_eq!(results.level, Level::Structured);
    assert_eq!((results.range_min, results.range_max), (34, 66));
    assert_eq!(results.name, "Estructurado");
    assert_eq!(results.problems.len(), 3);
    assert_eq!(results.wins.len(), 3);
    assert!(results.share_text.contains("58 puntos"));
    assert!(results.demo_url.starts_with("https://"));
}

#[tokio::test]
async fn test_best_answers_are_optimized() {
    let server = create_test_server();

    complete_quiz(&server, ["other", "50+", "software", "weekly", "rare"]).await;

    let results: ResultsResponse = server.get("/results").await.json();
    assert_eq!(results.score, 100);
    assert_eq!(results.level, Level::Optimized);
}

#[tokio::test]
async fn test_retreat_keeps_answers() {
    let server = create_test_server();
    server.post("/session/start").await;
    answer(&server, "business_type", "retail").await;
    advance(&server).await;

    let response = server.post("/session/retreat").await;

    response.assert_status_ok();
    let retreated: RetreatResponse = response.json();
    assert!(retreated.moved);
    assert_eq!(retreated.session.step, 1);
    assert!(retreated.session.can_advance);

    let again: RetreatResponse = server.post("/session/retreat").await.json();
    assert!(!again.moved);
}

#[tokio::test]
async fn test_retreat_from_results_reopens_last_question() {
    let server = create_test_server();
    complete_quiz(&server, ["hotel", "1-10", "paper", "no_idea", "daily"]).await;

    let retreated: RetreatResponse = server.post("/session/retreat").await.json();

    assert!(retreated.moved);
    assert_eq!(retreated.session.step, 5);
    assert_eq!(retreated.session.screen, Screen::Question { index: 4 });
    assert!(retreated.session.score.is_none());
    assert!(retreated.session.level.is_none());
    server
        .get("/results")
        .await
        .assert_status(StatusCode::CONFLICT);

    answer(&server, "schedule_changes", "rare").await;
    let finished = advance(&server).await;
    assert_eq!(
        finished.outcome,
        Advance::Finished {
            score: 50,
            level: Level::Structured
        }
    );
}

#[tokio::test]
async fn test_restart_returns_to_welcome() {
    let server = create_test_server();
    complete_quiz(&server, ["hotel", "1-10", "paper", "no_idea", "daily"]).await;

    let response = server.post("/session/restart").await;

    response.assert_status_ok();
    let session: SessionResponse = response.json();
    assert_eq!(session.step, 0);
    assert_eq!(session.screen, Screen::Welcome);
    assert!(session.answers.is_empty());
    assert!(session.score.is_none());
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

#[tokio::test]
async fn test_unknown_option_is_bad_request() {
    let server = create_test_server();
    server.post("/session/start").await;

    let response = server
        .post("/session/answer")
        .json(&json!({ "question_id": "business_type", "value": "castle" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: ErrorResponse = response.json();
    assert!(error.error.contains("castle"));

    let session: SessionResponse = server.get("/session").await.json();
    assert!(session.answers.is_empty());
}

#[tokio::test]
async fn test_unknown_question_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/session/answer")
        .json(&json!({ "question_id": "favourite_color", "value": "blue" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_results_before_completion_is_conflict() {
    let server = create_test_server();
    server.post("/session/start").await;

    let response = server.get("/results").await;

    response.assert_status(StatusCode::CONFLICT);
}

// =============================================================================
// PERSISTENCE
// =============================================================================

#[tokio::test]
async fn test_progress_survives_server_restart() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("advisor.db");

    {
        let store = SessionStore::new(StorageBackend::open_or_unavailable(&path));
        let server =
            TestServer::new(create_router(AppState::new(QuizEngine::new(Catalog::builtin(), store))))
                .unwrap();
        server.post("/session/start").await;
        answer(&server, "business_type", "hotel").await;
        advance(&server).await;
        answer(&server, "employee_count", "31-50").await;
    }

    let store = SessionStore::new(StorageBackend::open_or_unavailable(&path));
    let server =
        TestServer::new(create_router(AppState::new(QuizEngine::new(Catalog::builtin(), store))))
            .unwrap();

    let session: SessionResponse = server.get("/session").await.json();
    assert_eq!(session.step, 2);
    assert_eq!(session.answers.len(), 2);
    assert_eq!(
        session.answers.get("employee_count").map(String::as_str),
        Some("31-50")
    );
}
