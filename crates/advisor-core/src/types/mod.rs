//! # Core Type Definitions
//!
//! This module contains the shared types of the advisor core:
//! - Catalog building blocks (`Question`, `QuizOption`, `QuestionKind`)
//! - Maturity buckets (`Level`)
//! - Error types (`AdvisorError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they are used as map keys

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// QUESTION KIND
// =============================================================================

/// Whether a question is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Segmentation only (business type, team size). Never scored.
    Context,
    /// Scored; every option carries a weight.
    Diagnostic,
}

impl QuestionKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Context => "context",
            QuestionKind::Diagnostic => "diagnostic",
        }
    }
}

// =============================================================================
// OPTION
// =============================================================================

/// A single selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Stable value recorded in the session. Unique within its question.
    pub value: String,
    /// Human-readable label.
    pub label: String,
    /// Integer weight, present only on diagnostic options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u8>,
}

impl QuizOption {
    /// Create an unweighted (context) option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            weight: None,
        }
    }

    /// Create a weighted (diagnostic) option.
    #[must_use]
    pub fn weighted(value: impl Into<String>, label: impl Into<String>, weight: u8) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            weight: Some(weight),
        }
    }
}

// =============================================================================
// QUESTION
// =============================================================================

/// A question definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique question identifier.
    pub id: String,
    /// Prompt shown to the user.
    pub text: String,
    /// Context or diagnostic.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Ordered options.
    pub options: Vec<QuizOption>,
}

impl Question {
    /// Create a new question.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        kind: QuestionKind,
        options: Vec<QuizOption>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            options,
        }
    }

    /// Look up an option by value.
    #[must_use]
    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }

    #[must_use]
    pub fn is_diagnostic(&self) -> bool {
        self.kind == QuestionKind::Diagnostic
    }
}

// =============================================================================
// LEVEL
// =============================================================================

/// Qualitative maturity bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Score 0..=33.
    Reactive,
    /// Score 34..=66.
    Structured,
    /// Score 67..=100.
    Optimized,
}

impl Level {
    /// Machine name, as persisted and sent over the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Reactive => "reactive",
            Level::Structured => "structured",
            Level::Optimized => "optimized",
        }
    }

    /// All levels in ascending order.
    #[must_use]
    pub fn all() -> [Level; 3] {
        [Level::Reactive, Level::Structured, Level::Optimized]
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the advisor core.
///
/// - Use `Result<T, AdvisorError>` for fallible operations
/// - The core never panics; storage errors are absorbed by the engine
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// The question id is not part of the catalog.
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    /// The option value does not belong to the question.
    #[error("Unknown option '{value}' for question '{question}'")]
    UnknownOption { question: String, value: String },

    /// The catalog definition violates a structural rule.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Results were requested before the quiz was completed.
    #[error("Quiz not completed")]
    NotCompleted,

    /// The local store is disabled or could not be reached.
    #[error("Storage unavailable")]
    StorageUnavailable,

    /// The local store refused the write because it is full.
    #[error("Storage quota exceeded: {needed} bytes needed, {limit} bytes allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl AdvisorError {
    /// True for errors raised by a store rather than by the caller.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AdvisorError::StorageUnavailable
                | AdvisorError::QuotaExceeded { .. }
                | AdvisorError::IoError(_)
                | AdvisorError::SerializationError(_)
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(Level::Reactive < Level::Structured);
        assert!(Level::Structured < Level::Optimized);
    }

    #[test]
    fn level_display_is_machine_name() {
        assert_eq!(Level::Structured.to_string(), "structured");
    }

    #[test]
    fn option_lookup() {
        let q = Question::new(
            "q",
            "?",
            QuestionKind::Diagnostic,
            vec![QuizOption::weighted("a", "A", 1), QuizOption::weighted("b", "B", 4)],
        );
        assert_eq!(q.option("b").and_then(|o| o.weight), Some(4));
        assert!(q.option("c").is_none());
    }

    #[test]
    fn storage_errors_are_classified() {
        assert!(AdvisorError::StorageUnavailable.is_storage());
        assert!(!AdvisorError::UnknownQuestion("x".into()).is_storage());
    }
}
