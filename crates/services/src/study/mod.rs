//! The owned study session: what the user is looking at and everything graded so far.

use std::collections::HashMap;
use std::sync::Arc;

use study_core::model::{
    Card, CardId, Catalog, Completion, Domain, DomainId, GradeOutcome, ProgressRecord,
    SessionStats, Task, TaskId,
};
use study_core::{Clock, FilterSelection, Navigator};

use crate::progress_store::ProgressStore;

mod grading;
mod navigation;

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Catalog,
    Tasks,
    Study,
}

/// What a grading action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReceipt {
    pub card_id: CardId,
    pub outcome: GradeOutcome,
    pub record: ProgressRecord,
}

/// One user's study session over a catalog.
///
/// Holds the in-memory mirror of persisted progress; every grade updates the
/// mirror first and then queues the same record on the `ProgressStore`.
pub struct StudySession {
    catalog: Arc<Catalog>,
    store: ProgressStore,
    clock: Clock,
    view: View,
    domain: Option<DomainId>,
    task: Option<TaskId>,
    filters: FilterSelection,
    // Indices into the selected task's cards, in task order.
    filtered: Vec<usize>,
    nav: Navigator,
    selected_answer: Option<usize>,
    progress: HashMap<CardId, ProgressRecord>,
    stats: SessionStats,
}

impl StudySession {
    /// Build a session once every stored record has been read.
    ///
    /// Aggregate stats start from the persisted counters.
    pub async fn load(catalog: Arc<Catalog>, store: ProgressStore, clock: Clock) -> Self {
        let records = store.get_all().await;
        let stats = SessionStats::from_records(records.iter().map(|(_, record)| record));
        log::debug!("study session loaded with {} progress records", records.len());
        Self {
            catalog,
            store,
            clock,
            view: View::Catalog,
            domain: None,
            task: None,
            filters: FilterSelection::default(),
            filtered: Vec::new(),
            nav: Navigator::idle(),
            selected_answer: None,
            progress: records.into_iter().collect(),
            stats,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    #[must_use]
    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    #[must_use]
    pub fn selected_domain(&self) -> Option<&Domain> {
        self.domain.as_ref().and_then(|id| self.catalog.domain(id))
    }

    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        let domain = self.selected_domain()?;
        self.task.as_ref().and_then(|id| domain.task(id))
    }

    /// Cards of the selected task accepted by the current filters.
    #[must_use]
    pub fn filtered_cards(&self) -> Vec<&Card> {
        let Some(task) = self.selected_task() else {
            return Vec::new();
        };
        self.filtered
            .iter()
            .filter_map(|&i| task.cards().get(i))
            .collect()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        let task = self.selected_task()?;
        let slot = self.nav.index()?;
        self.filtered.get(slot).and_then(|&i| task.cards().get(i))
    }

    /// 1-based position and filtered length, `None` without a current card.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.nav.index().map(|i| (i + 1, self.nav.len()))
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    /// Flashcard turned to its answer side.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.nav.is_revealed() && self.current_card().is_some_and(|c| !c.is_multiple_choice())
    }

    /// Multiple-choice answer submitted and explanation on screen.
    #[must_use]
    pub fn is_explanation_shown(&self) -> bool {
        self.nav.is_revealed() && self.current_card().is_some_and(Card::is_multiple_choice)
    }

    /// Stored progress for a card, zero when never graded.
    #[must_use]
    pub fn card_progress(&self, id: &CardId) -> ProgressRecord {
        self.progress.get(id).cloned().unwrap_or_default()
    }

    /// Rounded mastery of the current card.
    #[must_use]
    pub fn current_mastery(&self) -> Option<u8> {
        self.current_card()
            .map(|card| self.card_progress(card.id()).mastery_display())
    }

    #[must_use]
    pub fn domain_completion(&self, domain: &Domain) -> Completion {
        Completion::for_cards(domain.cards(), |card| self.progress.get(card.id()))
    }

    #[must_use]
    pub fn task_completion(&self, task: &Task) -> Completion {
        Completion::for_cards(task.cards(), |card| self.progress.get(card.id()))
    }

    /// Completion across the whole catalog.
    #[must_use]
    pub fn catalog_completion(&self) -> Completion {
        Completion::for_cards(
            self.catalog.domains().iter().flat_map(Domain::cards),
            |card| self.progress.get(card.id()),
        )
    }
}
