//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use advisor_core::{
    Advance, Assessment, DEMO_URL, Level, LevelClassifier, Progress, Question, QuizEngine, Screen,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// CATALOG RESPONSE
// =============================================================================

/// The question catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub questions: Vec<Question>,
}

impl CatalogResponse {
    #[must_use]
    pub fn from_engine(engine: &QuizEngine) -> Self {
        Self {
            questions: engine.catalog().questions().to_vec(),
        }
    }
}

// =============================================================================
// SESSION RESPONSE
// =============================================================================

/// Snapshot of the session plus what the front-end needs to draw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub step: usize,
    #[serde(flatten)]
    pub screen: Screen,
    pub answers: BTreeMap<String, String>,
    pub score: Option<u8>,
    pub level: Option<Level>,
    /// Present on question screens.
    pub progress: Option<Progress>,
    /// The question on screen, if any.
    pub question: Option<Question>,
    /// Whether the current question has an answer (enables "next").
    pub can_advance: bool,
}

impl SessionResponse {
    #[must_use]
    pub fn from_engine(engine: &QuizEngine) -> Self {
        let session = engine.session();
        let question = engine.current_question().cloned();
        let can_advance = question
            .as_ref()
            .is_some_and(|q| session.answers.contains_key(&q.id));

        Self {
            step: session.step,
            screen: engine.screen(),
            answers: session.answers.clone(),
            score: session.score,
            level: session.level,
            progress: engine.progress(),
            question,
            can_advance,
        }
    }
}

// =============================================================================
// ANSWER REQUEST
// =============================================================================

/// Record `value` as the answer to `question_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub question_id: String,
    pub value: String,
}

// =============================================================================
// NAVIGATION RESPONSES
// =============================================================================

/// Result of `POST /session/advance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceResponse {
    #[serde(flatten)]
    pub outcome: Advance,
    pub session: SessionResponse,
}

/// Result of `POST /session/retreat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetreatResponse {
    /// False on the welcome screen and the first question.
    pub moved: bool,
    pub session: SessionResponse,
}

// =============================================================================
// RESULTS RESPONSE
// =============================================================================

/// Score, level and the recommendations for that level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub score: u8,
    pub level: Level,
    /// Inclusive score range of `level`.
    pub range_min: u8,
    pub range_max: u8,
    pub total: u32,
    pub max: u32,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub diagnosis: String,
    pub problems: Vec<String>,
    pub wins: Vec<String>,
    pub demo_url: String,
    pub share_text: String,
}

impl From<Assessment> for ResultsResponse {
    fn from(assessment: Assessment) -> Self {
        let profile = assessment.profile;
        let (range_min, range_max) = LevelClassifier::new().range(assessment.level);
        Self {
            score: assessment.score,
            level: assessment.level,
            range_min,
            range_max,
            total: assessment.card.total,
            max: assessment.card.max,
            name: profile.name.to_string(),
            icon: profile.icon.to_string(),
            color: profile.color.to_string(),
            diagnosis: profile.diagnosis.to_string(),
            problems: profile.problems.iter().map(|s| s.to_string()).collect(),
            wins: profile.wins.iter().map(|s| s.to_string()).collect(),
            demo_url: DEMO_URL.to_string(),
            share_text: assessment.share_text(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
