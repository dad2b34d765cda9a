use chrono::{DateTime, Utc};
use services::StudySession;
use study_core::model::CardId;

use crate::vm::markdown_vm::markdown_to_html;
use crate::vm::time_fmt::format_last_review;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Not yet answered.
    Open,
    Correct,
    /// The option the user picked, when wrong.
    Wrong,
    /// Any other option after answering.
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Open => "choice",
            OptionState::Correct => "choice choice--correct",
            OptionState::Wrong => "choice choice--wrong",
            OptionState::Dimmed => "choice choice--dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardFaceVm {
    Flashcard {
        flipped: bool,
        answer_html: Option<String>,
    },
    MultipleChoice {
        options: Vec<OptionVm>,
        answered: bool,
        answered_correctly: bool,
        explanation_html: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyCardVm {
    pub id: CardId,
    pub position_label: String,
    pub topic: String,
    pub icon: Option<String>,
    pub stars: String,
    pub difficulty: String,
    pub type_label: String,
    pub question: String,
    pub mastery: u8,
    pub review_count_label: String,
    pub last_review_label: String,
    pub face: CardFaceVm,
}

/// Everything the study screen shows for the current card.
#[must_use]
pub fn map_study_card(session: &StudySession, now: DateTime<Utc>) -> Option<StudyCardVm> {
    let card = session.current_card()?;
    let (position, len) = session.position()?;
    let progress = session.card_progress(card.id());

    let face = match card.multiple_choice() {
        Some(choice) => {
            let selected = session.selected_answer();
            let answered = session.is_explanation_shown();
            let options = choice
                .options()
                .iter()
                .enumerate()
                .map(|(index, text)| OptionVm {
                    index,
                    letter: option_letter(index),
                    text: text.clone(),
                    state: option_state(answered, choice.is_correct(index), selected == Some(index)),
                })
                .collect();
            CardFaceVm::MultipleChoice {
                options,
                answered,
                answered_correctly: selected.is_some_and(|i| choice.is_correct(i)),
                explanation_html: answered
                    .then(|| choice.explanation().map(markdown_to_html))
                    .flatten(),
            }
        }
        None => {
            let flipped = session.is_flipped();
            CardFaceVm::Flashcard {
                flipped,
                answer_html: flipped
                    .then(|| card.answer().map(markdown_to_html))
                    .flatten(),
            }
        }
    };

    Some(StudyCardVm {
        id: card.id().clone(),
        position_label: format!("{position} / {len}"),
        topic: card.topic().to_string(),
        icon: card.icon().map(str::to_string),
        stars: "★".repeat(usize::from(card.difficulty().stars())),
        difficulty: card.difficulty().as_str().to_string(),
        type_label: card.card_type().label().to_string(),
        question: card.question().to_string(),
        mastery: progress.mastery_display(),
        review_count_label: review_count_label(progress.attempts()),
        last_review_label: format_last_review(progress.last_review, now),
        face,
    })
}

fn review_count_label(attempts: u32) -> String {
    if attempts == 1 {
        "Reviewed 1 time".to_string()
    } else {
        format!("Reviewed {attempts} times")
    }
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

fn option_state(answered: bool, correct: bool, selected: bool) -> OptionState {
    match (answered, correct, selected) {
        (false, _, _) => OptionState::Open,
        (true, true, _) => OptionState::Correct,
        (true, false, true) => OptionState::Wrong,
        (true, false, false) => OptionState::Dimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_counts_pluralise() {
        assert_eq!(review_count_label(0), "Reviewed 0 times");
        assert_eq!(review_count_label(1), "Reviewed 1 time");
        assert_eq!(review_count_label(4), "Reviewed 4 times");
    }

    #[test]
    fn letters_run_a_to_z() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
        assert_eq!(option_letter(40), '?');
    }

    #[test]
    fn option_states_after_answering() {
        assert_eq!(option_state(false, true, true), OptionState::Open);
        assert_eq!(option_state(true, true, false), OptionState::Correct);
        assert_eq!(option_state(true, false, true), OptionState::Wrong);
        assert_eq!(option_state(true, false, false), OptionState::Dimmed);
    }
}
