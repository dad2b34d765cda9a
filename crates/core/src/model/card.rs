use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::CardId;

//
// ─── CARD ERRORS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card id cannot be empty")]
    EmptyId,

    #[error("card {0} has an empty question")]
    EmptyQuestion(CardId),

    #[error("multiple-choice card needs at least one option")]
    NoOptions,

    #[error("correct answer index {index} is out of range for {len} options")]
    CorrectAnswerOutOfRange { index: usize, len: usize },
}

//
// ─── DIFFICULTY / TYPE ─────────────────────────────────────────────────────────
//

/// Author-assigned difficulty tier of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Fundamental,
    Application,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Fundamental,
        Difficulty::Application,
        Difficulty::Advanced,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Fundamental => "fundamental",
            Difficulty::Application => "application",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Number of stars shown on the difficulty badge.
    #[must_use]
    pub fn stars(self) -> u8 {
        match self {
            Difficulty::Fundamental => 1,
            Difficulty::Application => 2,
            Difficulty::Advanced => 3,
        }
    }
}

/// Flat projection of a card's body, used for filtering and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardType {
    Flashcard,
    MultipleChoice,
    Scenario,
    CodeAnalysis,
    Concept,
}

impl CardType {
    pub const ALL: [CardType; 5] = [
        CardType::Flashcard,
        CardType::MultipleChoice,
        CardType::Scenario,
        CardType::CodeAnalysis,
        CardType::Concept,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CardType::Flashcard => "flashcard",
            CardType::MultipleChoice => "multiple-choice",
            CardType::Scenario => "scenario",
            CardType::CodeAnalysis => "code-analysis",
            CardType::Concept => "concept",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CardType::Flashcard => "Flashcard",
            CardType::MultipleChoice => "Multiple choice",
            CardType::Scenario => "Scenario",
            CardType::CodeAnalysis => "Code analysis",
            CardType::Concept => "Concept",
        }
    }
}

//
// ─── MULTIPLE CHOICE ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RawMultipleChoice {
    options: Vec<String>,
    correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

/// Options of a multiple-choice card. The correct index is always in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMultipleChoice", into = "RawMultipleChoice")]
pub struct MultipleChoice {
    options: Vec<String>,
    correct_answer: usize,
    explanation: Option<String>,
}

impl MultipleChoice {
    /// # Errors
    ///
    /// Returns `CardError::NoOptions` for an empty option list and
    /// `CardError::CorrectAnswerOutOfRange` when the index does not point at an option.
    pub fn new(
        options: Vec<String>,
        correct_answer: usize,
        explanation: Option<String>,
    ) -> Result<Self, CardError> {
        if options.is_empty() {
            return Err(CardError::NoOptions);
        }
        if correct_answer >= options.len() {
            return Err(CardError::CorrectAnswerOutOfRange {
                index: correct_answer,
                len: options.len(),
            });
        }
        Ok(Self {
            options,
            correct_answer,
            explanation,
        })
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer
    }
}

impl TryFrom<RawMultipleChoice> for MultipleChoice {
    type Error = CardError;

    fn try_from(raw: RawMultipleChoice) -> Result<Self, Self::Error> {
        Self::new(raw.options, raw.correct_answer, raw.explanation)
    }
}

impl From<MultipleChoice> for RawMultipleChoice {
    fn from(mc: MultipleChoice) -> Self {
        Self {
            options: mc.options,
            correct_answer: mc.correct_answer,
            explanation: mc.explanation,
        }
    }
}

//
// ─── CARD BODY ─────────────────────────────────────────────────────────────────
//

/// Type-specific content of a card, tagged by `type` in catalog files.
///
/// Only the multiple-choice variant carries options, a correct index and an
/// explanation; every other variant carries an optional markdown answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CardBody {
    Flashcard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer: Option<String>,
    },
    MultipleChoice(MultipleChoice),
    Scenario {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer: Option<String>,
    },
    CodeAnalysis {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer: Option<String>,
    },
    Concept {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer: Option<String>,
    },
}

impl CardBody {
    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self {
            CardBody::Flashcard { .. } => CardType::Flashcard,
            CardBody::MultipleChoice(_) => CardType::MultipleChoice,
            CardBody::Scenario { .. } => CardType::Scenario,
            CardBody::CodeAnalysis { .. } => CardType::CodeAnalysis,
            CardBody::Concept { .. } => CardType::Concept,
        }
    }

    /// Answer text for the flip-style variants.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        match self {
            CardBody::Flashcard { answer }
            | CardBody::Scenario { answer }
            | CardBody::CodeAnalysis { answer }
            | CardBody::Concept { answer } => answer.as_deref(),
            CardBody::MultipleChoice(_) => None,
        }
    }

    #[must_use]
    pub fn multiple_choice(&self) -> Option<&MultipleChoice> {
        match self {
            CardBody::MultipleChoice(mc) => Some(mc),
            _ => None,
        }
    }
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// Immutable study card owned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    topic: String,
    difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    question: String,
    #[serde(flatten)]
    body: CardBody,
}

impl Card {
    /// # Errors
    ///
    /// Returns `CardError::EmptyId` or `CardError::EmptyQuestion` for blank input.
    pub fn new(
        id: CardId,
        topic: impl Into<String>,
        difficulty: Difficulty,
        question: impl Into<String>,
        body: CardBody,
    ) -> Result<Self, CardError> {
        let card = Self {
            id,
            topic: topic.into(),
            difficulty,
            icon: None,
            question: question.into(),
            body,
        };
        card.validate()?;
        Ok(card)
    }

    /// Checks the fields serde cannot enforce on its own.
    ///
    /// # Errors
    ///
    /// Returns `CardError` when the id or question is blank.
    pub fn validate(&self) -> Result<(), CardError> {
        if self.id.is_blank() {
            return Err(CardError::EmptyId);
        }
        if self.question.trim().is_empty() {
            return Err(CardError::EmptyQuestion(self.id.clone()));
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn body(&self) -> &CardBody {
        &self.body
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.body.card_type()
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.body.answer()
    }

    #[must_use]
    pub fn multiple_choice(&self) -> Option<&MultipleChoice> {
        self.body.multiple_choice()
    }

    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        matches!(self.body, CardBody::MultipleChoice(_))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
