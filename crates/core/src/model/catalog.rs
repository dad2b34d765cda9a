use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::card::{Card, CardError};
use crate::model::ids::{CardId, DomainId, TaskId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error("duplicate domain id: {0}")]
    DuplicateDomain(DomainId),

    #[error("duplicate task id {task} in domain {domain}")]
    DuplicateTask { domain: DomainId, task: TaskId },

    #[error("duplicate card id: {0}")]
    DuplicateCard(CardId),
}

//
// ─── TASK / DOMAIN ─────────────────────────────────────────────────────────────
//

/// Ordered group of cards covering one exam task statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    #[serde(default)]
    cards: Vec<Card>,
}

impl Task {
    #[must_use]
    pub fn new(id: TaskId, name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            id,
            name: name.into(),
            cards,
        }
    }

    #[must_use]
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Tasks without cards are listed but cannot be studied yet.
    #[must_use]
    pub fn has_cards(&self) -> bool {
        !self.cards.is_empty()
    }
}

/// Top-level exam domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    id: DomainId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Domain {
    #[must_use]
    pub fn new(id: DomainId, name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id,
            name: name.into(),
            subtitle: None,
            icon: None,
            tasks,
        }
    }

    #[must_use]
    pub fn id(&self) -> &DomainId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Every card of the domain across its tasks, in catalog order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.tasks.iter().flat_map(|task| task.cards.iter())
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.tasks.iter().map(|task| task.cards.len()).sum()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

#[derive(Deserialize)]
struct CatalogFile {
    domains: Vec<Domain>,
}

/// Read-only content tree: domains → tasks → cards.
///
/// Built once at startup; card ids are unique across the whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    domains: Vec<Domain>,
    card_index: HashMap<CardId, (usize, usize, usize)>,
}

impl Catalog {
    /// Validate the tree and index cards by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on duplicate ids or invalid cards.
    pub fn new(domains: Vec<Domain>) -> Result<Self, CatalogError> {
        let mut domain_ids = HashSet::new();
        let mut card_index = HashMap::new();

        for (d, domain) in domains.iter().enumerate() {
            if !domain_ids.insert(domain.id.clone()) {
                return Err(CatalogError::DuplicateDomain(domain.id.clone()));
            }

            let mut task_ids = HashSet::new();
            for (t, task) in domain.tasks.iter().enumerate() {
                if !task_ids.insert(task.id.clone()) {
                    return Err(CatalogError::DuplicateTask {
                        domain: domain.id.clone(),
                        task: task.id.clone(),
                    });
                }

                for (c, card) in task.cards.iter().enumerate() {
                    card.validate()?;
                    if card_index.insert(card.id().clone(), (d, t, c)).is_some() {
                        return Err(CatalogError::DuplicateCard(card.id().clone()));
                    }
                }
            }
        }

        Ok(Self {
            domains,
            card_index,
        })
    }

    /// Parse a catalog document (`{"domains": [...]}`).
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input, or validation errors.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.domains)
    }

    #[must_use]
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    #[must_use]
    pub fn domain(&self, id: &DomainId) -> Option<&Domain> {
        self.domains.iter().find(|domain| domain.id() == id)
    }

    #[must_use]
    pub fn task(&self, domain_id: &DomainId, task_id: &TaskId) -> Option<&Task> {
        self.domain(domain_id).and_then(|domain| domain.task(task_id))
    }

    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        let (d, t, c) = *self.card_index.get(id)?;
        self.domains
            .get(d)
            .and_then(|domain| domain.tasks.get(t))
            .and_then(|task| task.cards.get(c))
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.card_index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::{CardBody, Difficulty};

    const SAMPLE: &str = r#"{
        "domains": [
            {
                "id": "domain1",
                "name": "Domain 1: Design Secure Architectures",
                "subtitle": "30% of exam",
                "tasks": [
                    {
                        "id": "task-1.1",
                        "name": "Task 1.1",
                        "cards": [
                            { "id": "a", "topic": "IAM", "difficulty": "fundamental",
                              "type": "flashcard", "question": "Q1", "answer": "A1" },
                            { "id": "b", "topic": "MFA", "difficulty": "advanced",
                              "type": "multiple-choice", "question": "Q2",
                              "options": ["x", "y"], "correct_answer": 1 }
                        ]
                    },
                    { "id": "task-1.2", "name": "Task 1.2", "cards": [] }
                ]
            },
            { "id": "domain2", "name": "Domain 2", "tasks": [] }
        ]
    }"#;

    fn card(id: &str) -> Card {
        Card::new(
            CardId::new(id),
            "Topic",
            Difficulty::Fundamental,
            "Question?",
            CardBody::Flashcard { answer: None },
        )
        .unwrap()
    }

    #[test]
    fn parses_and_indexes_cards() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.domains().len(), 2);
        assert_eq!(catalog.card_count(), 2);

        let b = catalog.card(&CardId::new("b")).expect("card b");
        assert_eq!(b.topic(), "MFA");

        let domain = catalog.domain(&DomainId::new("domain1")).unwrap();
        assert_eq!(domain.subtitle(), Some("30% of exam"));
        assert_eq!(domain.card_count(), 2);

        let empty = catalog
            .task(&DomainId::new("domain1"), &TaskId::new("task-1.2"))
            .unwrap();
        assert!(!empty.has_cards());
    }

    #[test]
    fn domain_cards_span_tasks_in_order() {
        let domain = Domain::new(
            DomainId::new("d"),
            "D",
            vec![
                Task::new(TaskId::new("t1"), "T1", vec![card("1"), card("2")]),
                Task::new(TaskId::new("t2"), "T2", vec![card("3")]),
            ],
        );
        let ids: Vec<&str> = domain.cards().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn duplicate_card_ids_are_rejected() {
        let domains = vec![
            Domain::new(
                DomainId::new("d1"),
                "D1",
                vec![Task::new(TaskId::new("t"), "T", vec![card("dup")])],
            ),
            Domain::new(
                DomainId::new("d2"),
                "D2",
                vec![Task::new(TaskId::new("t"), "T", vec![card("dup")])],
            ),
        ];
        let err = Catalog::new(domains).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCard(id) if id.as_str() == "dup"));
    }

    #[test]
    fn duplicate_task_ids_within_domain_are_rejected() {
        let domains = vec![Domain::new(
            DomainId::new("d1"),
            "D1",
            vec![
                Task::new(TaskId::new("t"), "T", Vec::new()),
                Task::new(TaskId::new("t"), "T again", Vec::new()),
            ],
        )];
        assert!(matches!(
            Catalog::new(domains).unwrap_err(),
            CatalogError::DuplicateTask { .. }
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = Catalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }
}
