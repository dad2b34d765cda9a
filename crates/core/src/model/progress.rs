use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//
// ─── GRADE OUTCOME ─────────────────────────────────────────────────────────────
//

/// Result of a single grading action on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeOutcome {
    Correct,
    Incorrect,
}

impl GradeOutcome {
    #[must_use]
    pub fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Durable per-card counters.
///
/// A missing record is equivalent to `ProgressRecord::default()`. The
/// `difficulty` weight is informational only; nothing reorders cards by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub correct: u32,
    pub incorrect: u32,
    pub last_review: Option<DateTime<Utc>>,
    pub difficulty: u32,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(
        correct: u32,
        incorrect: u32,
        last_review: Option<DateTime<Utc>>,
        difficulty: u32,
    ) -> Self {
        Self {
            correct,
            incorrect,
            last_review,
            difficulty,
        }
    }

    /// Apply one grading event.
    ///
    /// Correct: `correct + 1`, weight down by one (floored at 0).
    /// Incorrect: `incorrect + 1`, weight up by one.
    pub fn apply(&mut self, outcome: GradeOutcome, now: DateTime<Utc>) {
        match outcome {
            GradeOutcome::Correct => {
                self.correct = self.correct.saturating_add(1);
                self.difficulty = self.difficulty.saturating_sub(1);
            }
            GradeOutcome::Incorrect => {
                self.incorrect = self.incorrect.saturating_add(1);
                self.difficulty = self.difficulty.saturating_add(1);
            }
        }
        self.last_review = Some(now);
    }

    /// Copying variant of [`ProgressRecord::apply`].
    #[must_use]
    pub fn applied(&self, outcome: GradeOutcome, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.apply(outcome, now);
        next
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    /// A card counts as reviewed once it has been answered correctly at least once.
    #[must_use]
    pub fn is_reviewed(&self) -> bool {
        self.correct > 0
    }

    /// Share of correct answers in percent, `0.0` until the first correct answer.
    #[must_use]
    pub fn mastery_percent(&self) -> f64 {
        if self.correct == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.correct) / f64::from(self.attempts());
        (ratio * 100.0).min(100.0)
    }

    /// Mastery rounded half up to a whole percent.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn mastery_display(&self) -> u8 {
        // mastery_percent is clamped to 0..=100.
        self.mastery_percent().round() as u8
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
