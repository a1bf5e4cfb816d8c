//! # advisor-core
//!
//! The deterministic quiz engine for Clonk Advisor - THE LOGIC.
//!
//! A short shift-scheduling self-assessment: a fixed sequence of
//! multiple-choice questions, a weighted maturity score, a three-way level
//! classification and per-level recommendations.
//!
//! ## Layout
//!
//! - `catalog`: questions and level profiles
//! - `scoring`: weighted score and level thresholds
//! - `session`: state of one attempt, step/screen mapping
//! - `engine`: the state machine driving a session
//! - `persistence` + `storage` + `formats`: resumable sessions in a local store
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies
//! - Integer arithmetic only
//! - Storage failures degrade to in-memory operation, never to an error

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod engine;
pub mod formats;
pub mod persistence;
pub mod primitives;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{AdvisorError, Level, Question, QuestionKind, QuizOption};

// =============================================================================
// RE-EXPORTS: Quiz Engine
// =============================================================================

pub use catalog::{Catalog, DEMO_URL, LevelProfile};
pub use engine::{Advance, Assessment, Progress, QuizEngine};
pub use persistence::SessionStore;
pub use scoring::{LevelClassifier, ScoreCard};
pub use session::{Screen, Session};
pub use storage::{MemoryStore, RedbStore, SlotStore, StorageBackend};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{RecordHeader, session_from_bytes, session_to_bytes};
