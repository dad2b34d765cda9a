use log::debug;
use study_core::model::{CardId, GradeOutcome};

use super::{GradeReceipt, StudySession};

impl StudySession {
    /// Flashcard graded as known; moves on to the next card.
    pub fn know_it(&mut self) -> Option<GradeReceipt> {
        self.grade_flashcard(GradeOutcome::Correct)
    }

    /// Flashcard graded as not yet known; moves on to the next card.
    pub fn still_learning(&mut self) -> Option<GradeReceipt> {
        self.grade_flashcard(GradeOutcome::Incorrect)
    }

    /// Submit an option of the current multiple-choice card.
    ///
    /// Reveals the explanation and stays on the card. Ignored once an answer
    /// has been submitted, for non-multiple-choice cards, and for
    /// out-of-range options.
    pub fn answer_choice(&mut self, index: usize) -> Option<GradeReceipt> {
        if self.nav.is_revealed() {
            return None;
        }
        let card = self.current_card()?;
        let choice = card.multiple_choice()?;
        if index >= choice.options().len() {
            return None;
        }
        let outcome = GradeOutcome::from_correct(choice.is_correct(index));
        let id = card.id().clone();

        self.selected_answer = Some(index);
        self.nav.reveal();
        Some(self.record(id, outcome))
    }

    fn grade_flashcard(&mut self, outcome: GradeOutcome) -> Option<GradeReceipt> {
        let card = self.current_card()?;
        if card.is_multiple_choice() {
            return None;
        }
        let id = card.id().clone();
        let receipt = self.record(id, outcome);
        self.next();
        Some(receipt)
    }

    // Mirror first, then queue the write; the mirror is the read side for
    // the next grade of the same card.
    fn record(&mut self, id: CardId, outcome: GradeOutcome) -> GradeReceipt {
        let now = self.clock.now();
        let record = self.progress.entry(id.clone()).or_default();
        record.apply(outcome, now);
        let record = record.clone();

        self.stats.record(outcome);
        self.store.put(id.clone(), record.clone());
        debug!("graded {id}: {outcome:?}");

        GradeReceipt {
            card_id: id,
            outcome,
            record,
        }
    }
}
