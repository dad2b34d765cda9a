use study_core::FilterSelection;
use study_core::model::{CardType, Difficulty, DomainId, TaskId};
use study_core::Navigator;

use super::{StudySession, View};

impl StudySession {
    /// Open the task list of a domain. Unknown ids are ignored.
    pub fn select_domain(&mut self, id: &DomainId) -> bool {
        if self.catalog.domain(id).is_none() {
            return false;
        }
        self.leave_task();
        self.domain = Some(id.clone());
        self.view = View::Tasks;
        true
    }

    /// Start studying a task of the selected domain from its first card,
    /// with default filters. Tasks without cards cannot be started.
    pub fn start_task(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.selected_domain().and_then(|domain| domain.task(id)) else {
            return false;
        };
        if !task.has_cards() {
            return false;
        }
        let filters = FilterSelection::for_cards(task.cards());

        self.task = Some(id.clone());
        self.filters = filters;
        self.view = View::Study;
        self.refilter();
        true
    }

    pub fn back_to_tasks(&mut self) {
        self.leave_task();
        self.view = if self.domain.is_some() {
            View::Tasks
        } else {
            View::Catalog
        };
    }

    pub fn back_to_catalog(&mut self) {
        self.leave_task();
        self.domain = None;
        self.view = View::Catalog;
    }

    /// Turn a flashcard over. Multiple-choice cards cannot be flipped.
    pub fn flip(&mut self) -> bool {
        match self.current_card() {
            Some(card) if !card.is_multiple_choice() => {}
            _ => return false,
        }
        if self.nav.is_revealed() {
            self.nav.conceal()
        } else {
            self.nav.reveal()
        }
    }

    /// Advance with wraparound; returns the new 0-based index.
    pub fn next(&mut self) -> Option<usize> {
        self.selected_answer = None;
        self.nav.next()
    }

    /// Step back with wraparound; returns the new 0-based index.
    pub fn previous(&mut self) -> Option<usize> {
        self.selected_answer = None;
        self.nav.previous()
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) -> bool {
        self.update_filters(|f| f.toggle_difficulty(difficulty))
    }

    pub fn toggle_type(&mut self, card_type: CardType) -> bool {
        self.update_filters(|f| f.toggle_type(card_type))
    }

    pub fn toggle_topic(&mut self, topic: &str) -> bool {
        self.update_filters(|f| f.toggle_topic(topic))
    }

    pub fn select_all_topics(&mut self) -> bool {
        self.update_filters(FilterSelection::select_all_topics)
    }

    pub fn clear_topics(&mut self) -> bool {
        self.update_filters(FilterSelection::clear_topics)
    }

    pub fn reset_filters(&mut self) -> bool {
        self.update_filters(FilterSelection::reset)
    }

    // Any effective filter change restarts at the first matching card.
    fn update_filters(&mut self, change: impl FnOnce(&mut FilterSelection) -> bool) -> bool {
        if self.view != View::Study {
            return false;
        }
        let changed = change(&mut self.filters);
        if changed {
            self.refilter();
        }
        changed
    }

    fn refilter(&mut self) {
        let filtered: Vec<usize> = match self.selected_task() {
            Some(task) => task
                .cards()
                .iter()
                .enumerate()
                .filter(|(_, card)| self.filters.matches(card))
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        };
        self.nav = Navigator::start(filtered.len());
        self.filtered = filtered;
        self.selected_answer = None;
    }

    fn leave_task(&mut self) {
        self.task = None;
        self.filters = FilterSelection::default();
        self.filtered.clear();
        self.nav.stop();
        self.selected_answer = None;
    }
}
