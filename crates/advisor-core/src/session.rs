//! # Session Module
//!
//! The mutable state of one quiz attempt.
//!
//! A `Session` is plain data: step position, recorded answers and, once the
//! quiz is finalized, score and level. Transition rules live in the engine;
//! this module only knows how to interpret a step against a catalog.
//!
//! ## Steps
//!
//! | Step | Screen |
//! |------|--------|
//! | 0 | Welcome |
//! | 1..=N | Question `step - 1` |
//! | N+1 | Results |

use crate::{Catalog, Level, Question};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Step of the welcome screen.
pub const WELCOME_STEP: usize = 0;

/// Step of the first question.
pub const FIRST_QUESTION_STEP: usize = 1;

// =============================================================================
// SCREEN
// =============================================================================

/// The screen a step maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    Welcome,
    /// Zero-based index into the catalog.
    Question { index: usize },
    Results,
}

impl Screen {
    /// Map `step` onto a screen of `catalog`.
    ///
    /// Steps past the results step are treated as results.
    #[must_use]
    pub fn from_step(step: usize, catalog: &Catalog) -> Self {
        if step == WELCOME_STEP {
            Screen::Welcome
        } else if step <= catalog.len() {
            Screen::Question { index: step - 1 }
        } else {
            Screen::Results
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// The complete state of one quiz attempt.
///
/// Uses BTreeMap for deterministic serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current step (see module docs).
    pub step: usize,
    /// Question id -> chosen option value.
    pub answers: BTreeMap<String, String>,
    /// Normalized score, set only once the quiz is finalized.
    pub score: Option<u8>,
    /// Level, set together with `score`.
    pub level: Option<Level>,
}

impl Session {
    /// Create an empty session on the welcome screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen for the current step.
    #[must_use]
    pub fn screen(&self, catalog: &Catalog) -> Screen {
        Screen::from_step(self.step, catalog)
    }

    /// Question shown at the current step, if any.
    #[must_use]
    pub fn current_question<'c>(&self, catalog: &'c Catalog) -> Option<&'c Question> {
        catalog.at_step(self.step)
    }

    /// Recorded answer for a question.
    #[must_use]
    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// True once score and level are set.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.score.is_some() && self.level.is_some()
    }

    /// True if this session has not reached the results step of `catalog`.
    #[must_use]
    pub fn is_resumable(&self, catalog: &Catalog) -> bool {
        self.step < catalog.results_step()
    }

    /// Drop everything that no longer fits `catalog`.
    ///
    /// Answers that reference unknown questions or options are removed; a step
    /// beyond the results step, or a results step without a score, falls back
    /// to the welcome screen. Returns the number of answers removed.
    pub fn reconcile(&mut self, catalog: &Catalog) -> usize {
        let before = self.answers.len();
        self.answers
            .retain(|question, value| catalog.accepts(question, value));
        let removed = before.saturating_sub(self.answers.len());

        let results = catalog.results_step();
        if self.step > results || (self.step == results && !self.is_finalized()) {
            *self = Session::new();
            return before;
        }
        if self.step < results {
            self.score = None;
            self.level = None;
        }
        removed
    }
}

// =============================================================================
// TESTS
// =============================================================================
