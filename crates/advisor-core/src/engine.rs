//! # Quiz Engine
//!
//! Owns the catalog, the current [`Session`] and the persistence adapter, and
//! implements the quiz state machine:
//!
//! ```text
//! welcome --start--> question[1] --advance--> ... question[N] --advance--> results
//!            ^            <--retreat--                    <--retreat--           |
//!            +--------------------------- restart ----------------------------+
//! ```
//!
//! Every operation is synchronous and bounded. Every state change is saved;
//! storage failures are absorbed by [`SessionStore`] and never reach the
//! caller. The only error an operation returns is an invalid reference passed
//! to [`QuizEngine::select_option`].

use crate::catalog::LevelProfile;
use crate::persistence::SessionStore;
use crate::scoring::ScoreCard;
use crate::session::{FIRST_QUESTION_STEP, Screen};
use crate::{AdvisorError, Catalog, Level, Question, Session};
use serde::{Deserialize, Serialize};

// =============================================================================
// OPERATION OUTCOMES
// =============================================================================

/// What an `advance()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Advance {
    /// Moved to the next question.
    Moved { step: usize },
    /// Left the last question; score and level are now set.
    Finished { score: u8, level: Level },
    /// Precondition not met (no answer, or not on a question). State unchanged.
    Blocked,
}

/// Position within the question sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based question number.
    pub position: usize,
    /// Number of questions.
    pub total: usize,
    /// `position * 100 / total`, rounded down.
    pub percent: u8,
}

/// Final result of a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub score: u8,
    pub level: Level,
    pub card: ScoreCard,
    pub profile: &'static LevelProfile,
}

impl Assessment {
    /// Message offered when the user shares their result.
    #[must_use]
    pub fn share_text(&self) -> String {
        format!(
            "Mi nivel de madurez en gestión de turnos es \"{}\" con {} puntos. ¡Descubre el tuyo!",
            self.profile.name, self.score
        )
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// The quiz engine. One instance per quiz attempt owns the session.
#[derive(Debug)]
pub struct QuizEngine {
    catalog: Catalog,
    session: Session,
    store: SessionStore,
    resumed: bool,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin(), SessionStore::in_memory())
    }
}

impl QuizEngine {
    /// Create an engine, resuming any in-progress session held by `store`.
    ///
    /// A restored session is reconciled against `catalog`: answers that no
    /// longer match are dropped before the session becomes current.
    #[must_use]
    pub fn new(catalog: Catalog, store: SessionStore) -> Self {
        let restored = store.load(&catalog).map(|mut session| {
            let dropped = session.reconcile(&catalog);
            if dropped > 0 {
                tracing::warn!(dropped, "discarded stale answers from saved session");
            }
            session
        });

        let resumed = restored.is_some();
        if let Some(session) = &restored {
            tracing::info!(
                step = session.step,
                answers = session.answers.len(),
                "resumed saved session"
            );
        }

        Self {
            catalog,
            session: restored.unwrap_or_default(),
            store,
            resumed,
        }
    }

    /// Engine over the built-in catalog and a volatile store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn step(&self) -> usize {
        self.session.step
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.session.screen(&self.catalog)
    }

    /// The question on screen, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question(&self.catalog)
    }

    /// The option recorded for `question_id`.
    #[must_use]
    pub fn selected(&self, question_id: &str) -> Option<&str> {
        self.session.answer(question_id)
    }

    /// Position in the question sequence, on question screens only.
    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        match self.screen() {
            Screen::Question { index } => {
                let position = index.saturating_add(1);
                let total = self.catalog.len();
                Some(Progress {
                    position,
                    total,
                    percent: (position.saturating_mul(100) / total.max(1)).min(100) as u8,
                })
            }
            Screen::Welcome | Screen::Results => None,
        }
    }

    /// The final result. Fails until the quiz has been completed.
    pub fn assessment(&self) -> Result<Assessment, AdvisorError> {
        match (self.screen(), self.session.score, self.session.level) {
            (Screen::Results, Some(score), Some(level)) => Ok(Assessment {
                score,
                level,
                card: ScoreCard::compute(&self.catalog, &self.session.answers),
                profile: level.profile(),
            }),
            _ => Err(AdvisorError::NotCompleted),
        }
    }

    /// True if the session was restored from the store at construction.
    #[must_use]
    pub fn was_resumed(&self) -> bool {
        self.resumed
    }

    /// Get a reference to the persistence adapter.
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Begin a fresh attempt on the first question.
    pub fn start(&mut self) {
        self.session = Session {
            step: FIRST_QUESTION_STEP,
            ..Session::default()
        };
        tracing::debug!("quiz started");
        self.persist();
    }

    /// Record `value` as the answer to `question_id`.
    ///
    /// Re-selecting overwrites the previous answer. An unknown question or
    /// option is rejected and the session is left unchanged.
    pub fn select_option(&mut self, question_id: &str, value: &str) -> Result<(), AdvisorError> {
        let question = self
            .catalog
            .question(question_id)
            .ok_or_else(|| AdvisorError::UnknownQuestion(question_id.to_string()))?;

        if question.option(value).is_none() {
            return Err(AdvisorError::UnknownOption {
                question: question_id.to_string(),
                value: value.to_string(),
            });
        }

        self.session
            .answers
            .insert(question_id.to_string(), value.to_string());
        tracing::debug!(question = question_id, value, "option selected");
        self.persist();
        Ok(())
    }

    /// Move past the current question once it has an answer.
    ///
    /// On the last question this finalizes score and level and moves to the
    /// results screen.
    pub fn advance(&mut self) -> Advance {
        let Screen::Question { index } = self.screen() else {
            return Advance::Blocked;
        };
        let answered = self
            .current_question()
            .is_some_and(|q| self.session.answers.contains_key(&q.id));
        if !answered {
            return Advance::Blocked;
        }

        let outcome = if index.saturating_add(1) < self.catalog.len() {
            self.session.step = self.session.step.saturating_add(1);
            Advance::Moved {
                step: self.session.step,
            }
        } else {
            let card = ScoreCard::compute(&self.catalog, &self.session.answers);
            let level = card.level();
            self.session.score = Some(card.score);
            self.session.level = Some(level);
            self.session.step = self.catalog.results_step();
            tracing::info!(score = card.score, level = %level, "quiz completed");
            Advance::Finished {
                score: card.score,
                level,
            }
        };

        self.persist();
        outcome
    }

    /// Go back one step. Returns false when there is nowhere to go.
    ///
    /// From the results screen this returns to the last question and drops
    /// the score and level; they are recomputed on the next `advance()`.
    /// The welcome screen and the first question stay put.
    pub fn retreat(&mut self) -> bool {
        match self.screen() {
            Screen::Question { index } if index > 0 => {
                self.session.step = self.session.step.saturating_sub(1);
            }
            Screen::Results => {
                self.session.step = self.catalog.len();
                self.session.score = None;
                self.session.level = None;
                tracing::debug!("left results");
            }
            Screen::Welcome | Screen::Question { .. } => return false,
        }
        self.persist();
        true
    }

    /// Discard the attempt and the saved slot; back to the welcome screen.
    pub fn restart(&mut self) {
        self.store.clear();
        self.session = Session::new();
        self.resumed = false;
        tracing::debug!("quiz restarted");
    }

    fn persist(&mut self) {
        self.store.save(&self.session);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::WELCOME_STEP;

    fn answer_current(engine: &mut QuizEngine, value: &str) {
        let id = engine
            .current_question()
            .map(|q| q.id.clone())
            .expect("on a question");
        engine.select_option(&id, value).expect("valid option");
    }

    #[test]
    fn start_moves_to_first_question() {
        let mut engine = QuizEngine::in_memory();
        assert_eq!(engine.screen(), Screen::Welcome);

        engine.start();

        assert_eq!(engine.step(), 1);
        assert_eq!(engine.screen(), Screen::Question { index: 0 });
        assert!(engine.session().answers.is_empty());
    }

    #[test]
    fn start_clears_previous_answers() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        answer_current(&mut engine, "hotel");
        engine.advance();

        engine.start();

        assert_eq!(engine.step(), 1);
        assert!(engine.session().answers.is_empty());
    }

    #[test]
    fn advance_without_answer_is_blocked() {
        let mut engine = QuizEngine::in_memory();
        engine.start();

        assert_eq!(engine.advance(), Advance::Blocked);
        assert_eq!(engine.step(), 1);
    }

    #[test]
    fn advance_on_welcome_is_blocked() {
        let mut engine = QuizEngine::in_memory();
        assert_eq!(engine.advance(), Advance::Blocked);
        assert_eq!(engine.step(), WELCOME_STEP);
    }

    #[test]
    fn select_overwrites_previous_answer() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        engine
            .select_option("business_type", "hotel")
            .expect("select");
        engine
            .select_option("business_type", "retail")
            .expect("select");

        assert_eq!(engine.selected("business_type"), Some("retail"));
        assert_eq!(engine.session().answers.len(), 1);
    }

    #[test]
    fn select_unknown_option_leaves_answers() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        engine
            .select_option("business_type", "hotel")
            .expect("select");

        let err = engine
            .select_option("business_type", "castle")
            .expect_err("unknown option");
        assert!(matches!(err, AdvisorError::UnknownOption { .. }));

        let err = engine
            .select_option("favourite_color", "hotel")
            .expect_err("unknown question");
        assert!(matches!(err, AdvisorError::UnknownQuestion(_)));

        assert_eq!(engine.selected("business_type"), Some("hotel"));
        assert_eq!(engine.session().answers.len(), 1);
    }

    #[test]
    fn full_run_reaches_results() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        for value in ["restaurant", "11-30", "excel", "approximate"] {
            answer_current(&mut engine, value);
            assert!(matches!(engine.advance(), Advance::Moved { .. }));
        }
        answer_current(&mut engine, "weekly");

        let outcome = engine.advance();

        assert_eq!(
            outcome,
            Advance::Finished {
                score: 58,
                level: Level::Structured
            }
        );
        assert_eq!(engine.screen(), Screen::Results);
        assert_eq!(engine.step(), 6);

        let assessment = engine.assessment().expect("completed");
        assert_eq!(assessment.score, 58);
        assert_eq!(assessment.profile.name, "Estructurado");
        assert!(assessment.share_text().contains("58 puntos"));
    }

    #[test]
    fn advance_on_results_is_blocked() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        for value in ["hotel", "1-10", "paper", "no_idea", "daily"] {
            answer_current(&mut engine, value);
            engine.advance();
        }
        assert_eq!(engine.screen(), Screen::Results);
        assert_eq!(engine.advance(), Advance::Blocked);
        assert_eq!(engine.screen(), Screen::Results);
    }

    #[test]
    fn retreat_from_results_returns_to_last_question() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        for value in ["hotel", "1-10", "paper", "no_idea", "daily"] {
            answer_current(&mut engine, value);
            engine.advance();
        }
        assert_eq!(engine.step(), 6);

        assert!(engine.retreat());

        assert_eq!(engine.step(), 5);
        assert_eq!(engine.screen(), Screen::Question { index: 4 });
        assert!(engine.session().score.is_none());
        assert!(engine.session().level.is_none());
        assert_eq!(engine.session().answers.len(), 5);
        assert!(matches!(
            engine.assessment(),
            Err(AdvisorError::NotCompleted)
        ));

        answer_current(&mut engine, "rare");
        assert_eq!(
            engine.advance(),
            Advance::Finished {
                score: 50,
                level: Level::Structured
            }
        );
    }

    #[test]
    fn assessment_before_completion_fails() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        assert!(matches!(
            engine.assessment(),
            Err(AdvisorError::NotCompleted)
        ));
    }

    #[test]
    fn retreat_at_first_question_is_noop() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        assert!(!engine.retreat());
        assert_eq!(engine.step(), 1);
    }

    #[test]
    fn retreat_then_advance_restores_state() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        answer_current(&mut engine, "hotel");
        engine.advance();
        answer_current(&mut engine, "31-50");
        engine.advance();
        let before = engine.session().clone();

        assert!(engine.retreat());
        assert_eq!(engine.step(), 2);
        assert!(matches!(engine.advance(), Advance::Moved { step: 3 }));

        assert_eq!(engine.session(), &before);
    }

    #[test]
    fn progress_reports_position() {
        let mut engine = QuizEngine::in_memory();
        assert!(engine.progress().is_none());

        engine.start();
        let progress = engine.progress().expect("on question");
        assert_eq!(progress.position, 1);
        assert_eq!(progress.total, 5);
        assert_eq!(progress.percent, 20);
    }

    #[test]
    fn restart_clears_everything() {
        let mut engine = QuizEngine::in_memory();
        engine.start();
        answer_current(&mut engine, "hotel");
        engine.advance();

        engine.restart();

        assert_eq!(engine.step(), WELCOME_STEP);
        assert_eq!(engine.session(), &Session::new());
        assert_eq!(
            engine.store().try_read().expect("read"),
            None,
            "slot must be cleared"
        );
    }
}
