//! # Maturity Scoring
//!
//! Weighted score over the answered diagnostic questions, and the fixed
//! threshold partition that maps a score to a [`Level`].
//!
//! | Level | Score range |
//! |-------|-------------|
//! | reactive | 0..=33 |
//! | structured | 34..=66 |
//! | optimized | 67..=100 |
//!
//! All arithmetic is integer-only. `round(100 * total / max)` is computed as
//! `(200 * total + max) / (2 * max)`, which rounds halves up for the
//! non-negative values involved.

use crate::primitives::{MAX_OPTION_WEIGHT, MAX_SCORE, REACTIVE_MAX_SCORE, STRUCTURED_MAX_SCORE};
use crate::{Catalog, Level};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// SCORE CARD
// =============================================================================

/// Raw sums and the normalized score for a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Sum of the chosen option weights.
    pub total: u32,
    /// `MAX_OPTION_WEIGHT` per answered diagnostic question.
    pub max: u32,
    /// Number of diagnostic questions that contributed.
    pub answered: usize,
    /// Normalized score in `0..=100`.
    pub score: u8,
}

impl ScoreCard {
    /// Score the diagnostic answers in `answers` against `catalog`.
    ///
    /// Context questions, unanswered questions and answers that do not match
    /// a weighted option are ignored. With nothing to score, the score is 0.
    #[must_use]
    pub fn compute(catalog: &Catalog, answers: &BTreeMap<String, String>) -> Self {
        let mut total: u32 = 0;
        let mut max: u32 = 0;
        let mut answered = 0usize;

        for question in catalog.diagnostic() {
            let weight = answers
                .get(&question.id)
                .and_then(|value| question.option(value))
                .and_then(|option| option.weight);

            if let Some(weight) = weight {
                total = total.saturating_add(u32::from(weight));
                max = max.saturating_add(u32::from(MAX_OPTION_WEIGHT));
                answered = answered.saturating_add(1);
            }
        }

        Self {
            total,
            max,
            answered,
            score: normalize(total, max),
        }
    }

    /// Level for this card's score under the default thresholds.
    #[must_use]
    pub fn level(&self) -> Level {
        LevelClassifier::new().classify(self.score)
    }
}

/// `round(100 * total / max)`, or 0 when `max == 0`.
#[must_use]
pub fn normalize(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let total = u64::from(total.min(max));
    let max = u64::from(max);
    let rounded = total.saturating_mul(200).saturating_add(max) / max.saturating_mul(2);
    rounded.min(u64::from(MAX_SCORE)) as u8
}

// =============================================================================
// LEVEL CLASSIFIER
// =============================================================================

/// Threshold partition from score to level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelClassifier {
    reactive_max: u8,
    structured_max: u8,
}

impl Default for LevelClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelClassifier {
    /// Classifier with the default thresholds (33 / 66).
    #[must_use]
    pub fn new() -> Self {
        Self {
            reactive_max: REACTIVE_MAX_SCORE,
            structured_max: STRUCTURED_MAX_SCORE,
        }
    }

    /// Classify a score.
    #[must_use]
    pub fn classify(&self, score: u8) -> Level {
        if score <= self.reactive_max {
            Level::Reactive
        } else if score <= self.structured_max {
            Level::Structured
        } else {
            Level::Optimized
        }
    }

    /// Inclusive score range covered by `level`.
    #[must_use]
    pub fn range(&self, level: Level) -> (u8, u8) {
        match level {
            Level::Reactive => (0, self.reactive_max),
            Level::Structured => (self.reactive_max.saturating_add(1), self.structured_max),
            Level::Optimized => (self.structured_max.saturating_add(1), MAX_SCORE),
        }
    }
}

impl Level {
    /// Level for `score` under the default thresholds.
    #[must_use]
    pub fn from_score(score: u8) -> Level {
        LevelClassifier::new().classify(score)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn threshold_boundaries() {
        assert_eq!(Level::from_score(0), Level::Reactive);
        assert_eq!(Level::from_score(33), Level::Reactive);
        assert_eq!(Level::from_score(34), Level::Structured);
        assert_eq!(Level::from_score(66), Level::Structured);
        assert_eq!(Level::from_score(67), Level::Optimized);
        assert_eq!(Level::from_score(100), Level::Optimized);
    }

    #[test]
    fn ranges_partition_the_scale() {
        let classifier = LevelClassifier::new();
        assert_eq!(classifier.range(Level::Reactive), (0, 33));
        assert_eq!(classifier.range(Level::Structured), (34, 66));
        assert_eq!(classifier.range(Level::Optimized), (67, 100));
    }

    #[test]
    fn normalize_rounds_half_up() {
        assert_eq!(normalize(1, 8), 13); // 12.5
        assert_eq!(normalize(5, 12), 42); // 41.67
        assert_eq!(normalize(7, 12), 58); // 58.33
        assert_eq!(normalize(3, 4), 75);
    }

    #[test]
    fn normalize_zero_max_is_zero() {
        assert_eq!(normalize(0, 0), 0);
    }

    #[test]
    fn no_diagnostic_answers_scores_zero() {
        let catalog = Catalog::builtin();
        let card = ScoreCard::compute(
            &catalog,
            &answers(&[("business_type", "hotel"), ("employee_count", "1-10")]),
        );
        assert_eq!(card.max, 0);
        assert_eq!(card.score, 0);
        assert_eq!(card.level(), Level::Reactive);
    }

    #[test]
    fn all_maximum_weights_score_hundred() {
        let catalog = Catalog::builtin();
        let card = ScoreCard::compute(
            &catalog,
            &answers(&[
                ("scheduling_method", "software"),
                ("overtime_tracking", "weekly"),
                ("schedule_changes", "rare"),
            ]),
        );
        assert_eq!(card.total, 12);
        assert_eq!(card.max, 12);
        assert_eq!(card.score, 100);
        assert_eq!(card.level(), Level::Optimized);
    }

    #[test]
    fn all_minimum_weights_are_reactive() {
        let catalog = Catalog::builtin();
        let card = ScoreCard::compute(
            &catalog,
            &answers(&[
                ("scheduling_method", "paper"),
                ("overtime_tracking", "no_idea"),
                ("schedule_changes", "daily"),
            ]),
        );
        // Minimum weight is 1, not 0, so the floor is 3 / 12.
        assert_eq!(card.score, 25);
        assert_eq!(card.level(), Level::Reactive);
    }

    #[test]
    fn mixed_answers() {
        let catalog = Catalog::builtin();
        let card = ScoreCard::compute(
            &catalog,
            &answers(&[
                ("scheduling_method", "excel"),
                ("overtime_tracking", "approximate"),
                ("schedule_changes", "weekly"),
            ]),
        );
        // 2 + 3 + 2 = 7 of 12 -> 58.33
        assert_eq!(card.total, 7);
        assert_eq!(card.score, 58);
        assert_eq!(card.level(), Level::Structured);
    }

    #[test]
    fn partial_answers_only_count_answered_questions() {
        let catalog = Catalog::builtin();
        let card = ScoreCard::compute(&catalog, &answers(&[("schedule_changes", "occasional")]));
        assert_eq!(card.answered, 1);
        assert_eq!(card.max, 4);
        assert_eq!(card.score, 75);
    }

    #[test]
    fn unknown_values_are_ignored() {
        let catalog = Catalog::builtin();
        let card = ScoreCard::compute(&catalog, &answers(&[("scheduling_method", "abacus")]));
        assert_eq!(card.answered, 0);
        assert_eq!(card.score, 0);
    }
}
