use crate::model::card::Card;
use crate::model::progress::{GradeOutcome, ProgressRecord};

//
// ─── SESSION STATS ─────────────────────────────────────────────────────────────
//

/// Running grade totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl SessionStats {
    /// Seed totals from persisted records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ProgressRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |acc, record| Self {
                total: acc.total.saturating_add(record.attempts()),
                correct: acc.correct.saturating_add(record.correct),
                incorrect: acc.incorrect.saturating_add(record.incorrect),
            })
    }

    pub fn record(&mut self, outcome: GradeOutcome) {
        self.total = self.total.saturating_add(1);
        match outcome {
            GradeOutcome::Correct => self.correct = self.correct.saturating_add(1),
            GradeOutcome::Incorrect => self.incorrect = self.incorrect.saturating_add(1),
        }
    }

    /// Rounded share of correct grades, `0` before the first grade.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn accuracy_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let ratio = f64::from(self.correct) / f64::from(self.total);
        (ratio * 100.0).round().min(100.0) as u8
    }
}

//
// ─── COMPLETION ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    /// Nothing to study yet.
    ComingSoon,
    NotStarted,
    InProgress(u8),
    Complete,
}

/// Reviewed-vs-total count for a group of cards (task or domain).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    pub reviewed: usize,
    pub total: usize,
}

impl Completion {
    /// Count cards for which `progress` reports a reviewed record.
    pub fn for_cards<'c, 'p, F>(cards: impl IntoIterator<Item = &'c Card>, progress: F) -> Self
    where
        F: Fn(&Card) -> Option<&'p ProgressRecord>,
    {
        cards.into_iter().fold(Self::default(), |acc, card| {
            let reviewed = progress(card).is_some_and(ProgressRecord::is_reviewed);
            Self {
                reviewed: acc.reviewed + usize::from(reviewed),
                total: acc.total + 1,
            }
        })
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.reviewed as f64 / self.total as f64 * 100.0
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn status(&self) -> CompletionStatus {
        if self.total == 0 {
            CompletionStatus::ComingSoon
        } else if self.reviewed >= self.total {
            CompletionStatus::Complete
        } else if self.reviewed == 0 {
            CompletionStatus::NotStarted
        } else {
            CompletionStatus::InProgress(self.percent().round() as u8)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::card::{CardBody, Difficulty};
    use crate::model::ids::CardId;

    fn card(id: &str) -> Card {
        Card::new(
            CardId::new(id),
            "T",
            Difficulty::Fundamental,
            "Q?",
            CardBody::Flashcard { answer: None },
        )
        .unwrap()
    }

    #[test]
    fn record_updates_matching_counter() {
        let mut stats = SessionStats::default();
        stats.record(GradeOutcome::Correct);
        stats.record(GradeOutcome::Incorrect);
        stats.record(GradeOutcome::Correct);
        assert_eq!(
            stats,
            SessionStats {
                total: 3,
                correct: 2,
                incorrect: 1
            }
        );
        assert_eq!(stats.accuracy_percent(), 67);
    }

    #[test]
    fn accuracy_is_zero_before_first_grade() {
        assert_eq!(SessionStats::default().accuracy_percent(), 0);
    }

    #[test]
    fn seeds_from_persisted_records() {
        let records = [
            ProgressRecord::new(2, 1, None, 0),
            ProgressRecord::new(0, 3, None, 3),
        ];
        let stats = SessionStats::from_records(records.iter());
        assert_eq!(stats.total, 6);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.incorrect, 4);
    }

    #[test]
    fn completion_counts_cards_with_a_correct_answer() {
        let cards = vec![card("a"), card("b"), card("c")];
        let mut progress = HashMap::new();
        progress.insert(CardId::new("a"), ProgressRecord::new(1, 0, None, 0));
        progress.insert(CardId::new("b"), ProgressRecord::new(0, 2, None, 2));

        let completion = Completion::for_cards(&cards, |c| progress.get(c.id()));
        assert_eq!(completion.reviewed, 1);
        assert_eq!(completion.total, 3);
        assert_eq!(completion.status(), CompletionStatus::InProgress(33));
    }

    #[test]
    fn completion_status_edges() {
        assert_eq!(Completion::default().status(), CompletionStatus::ComingSoon);
        let none = Completion { reviewed: 0, total: 4 };
        assert_eq!(none.status(), CompletionStatus::NotStarted);
        let all = Completion { reviewed: 4, total: 4 };
        assert_eq!(all.status(), CompletionStatus::Complete);
    }
}
