//! Per-task card filtering by difficulty, type and topic.

use std::collections::BTreeSet;

use crate::model::{Card, CardType, Difficulty};

/// Active filter selection for the task being studied.
///
/// Difficulty and type sets always keep at least one member. The topic set
/// may be emptied explicitly, which filters every card out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    difficulties: BTreeSet<Difficulty>,
    types: BTreeSet<CardType>,
    topics: BTreeSet<String>,
    available_topics: Vec<String>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::for_cards(&[])
    }
}

impl FilterSelection {
    /// Default selection for a task: every difficulty, every type, every topic.
    #[must_use]
    pub fn for_cards(cards: &[Card]) -> Self {
        let available_topics = distinct_topics(cards);
        Self {
            difficulties: Difficulty::ALL.into_iter().collect(),
            types: CardType::ALL.into_iter().collect(),
            topics: available_topics.iter().cloned().collect(),
            available_topics,
        }
    }

    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        self.difficulties.contains(&card.difficulty())
            && self.types.contains(&card.card_type())
            && self.topics.contains(card.topic())
    }

    /// Stable-order subsequence of `cards` accepted by the selection.
    #[must_use]
    pub fn apply<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }

    /// Toggle a difficulty. Deselecting the last remaining one is refused.
    ///
    /// Returns `true` if the selection changed.
    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) -> bool {
        toggle_keeping_one(&mut self.difficulties, difficulty)
    }

    /// Toggle a card type. Deselecting the last remaining one is refused.
    ///
    /// Returns `true` if the selection changed.
    pub fn toggle_type(&mut self, card_type: CardType) -> bool {
        toggle_keeping_one(&mut self.types, card_type)
    }

    /// Toggle a topic. Unknown topics are ignored.
    pub fn toggle_topic(&mut self, topic: &str) -> bool {
        if !self.available_topics.iter().any(|t| t == topic) {
            return false;
        }
        if !self.topics.remove(topic) {
            self.topics.insert(topic.to_owned());
        }
        true
    }

    pub fn select_all_topics(&mut self) -> bool {
        let all: BTreeSet<String> = self.available_topics.iter().cloned().collect();
        if self.topics == all {
            return false;
        }
        self.topics = all;
        true
    }

    pub fn clear_topics(&mut self) -> bool {
        if self.topics.is_empty() {
            return false;
        }
        self.topics.clear();
        true
    }

    /// Restore the defaults for the current task's topics.
    pub fn reset(&mut self) -> bool {
        let defaults = Self {
            difficulties: Difficulty::ALL.into_iter().collect(),
            types: CardType::ALL.into_iter().collect(),
            topics: self.available_topics.iter().cloned().collect(),
            available_topics: self.available_topics.clone(),
        };
        let changed = *self != defaults;
        *self = defaults;
        changed
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.difficulties.len() == Difficulty::ALL.len()
            && self.types.len() == CardType::ALL.len()
            && self.topics.len() == self.available_topics.len()
    }

    #[must_use]
    pub fn is_difficulty_selected(&self, difficulty: Difficulty) -> bool {
        self.difficulties.contains(&difficulty)
    }

    #[must_use]
    pub fn is_type_selected(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    #[must_use]
    pub fn is_topic_selected(&self, topic: &str) -> bool {
        self.topics.contains(topic)
    }

    pub fn difficulties(&self) -> impl Iterator<Item = Difficulty> + '_ {
        self.difficulties.iter().copied()
    }

    pub fn types(&self) -> impl Iterator<Item = CardType> + '_ {
        self.types.iter().copied()
    }

    /// Topics of the task in order of first appearance.
    #[must_use]
    pub fn available_topics(&self) -> &[String] {
        &self.available_topics
    }

    #[must_use]
    pub fn selected_topic_count(&self) -> usize {
        self.topics.len()
    }
}

/// Distinct topics in order of first appearance.
#[must_use]
pub fn distinct_topics(cards: &[Card]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    cards
        .iter()
        .filter(|card| seen.insert(card.topic()))
        .map(|card| card.topic().to_owned())
        .collect()
}

fn toggle_keeping_one<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.contains(&value) {
        if set.len() == 1 {
            return false;
        }
        set.remove(&value)
    } else {
        set.insert(value)
    }
}
