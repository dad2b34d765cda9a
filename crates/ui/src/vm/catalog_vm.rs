use services::StudySession;
use study_core::model::{Completion, CompletionStatus, DomainId, SessionStats, TaskId};

/// Aggregate counters shown in the catalog header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderStatsVm {
    pub reviewed: u32,
    pub correct: u32,
    pub accuracy_label: String,
}

#[must_use]
pub fn map_header_stats(stats: SessionStats) -> HeaderStatsVm {
    HeaderStatsVm {
        reviewed: stats.total,
        correct: stats.correct,
        accuracy_label: format!("{}%", stats.accuracy_percent()),
    }
}

#[must_use]
pub fn completion_label(status: CompletionStatus) -> String {
    match status {
        CompletionStatus::ComingSoon => "Coming soon".to_string(),
        CompletionStatus::NotStarted => "Not started".to_string(),
        CompletionStatus::InProgress(percent) => format!("{percent}% done"),
        CompletionStatus::Complete => "Complete".to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainTileVm {
    pub id: DomainId,
    pub name: String,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub card_count_label: String,
    pub completion_label: String,
    /// `N/M reviewed`, absent when the domain has no cards.
    pub reviewed_label: Option<String>,
    pub percent: u8,
    pub enabled: bool,
    pub complete: bool,
}

#[must_use]
pub fn map_domain_tiles(session: &StudySession) -> Vec<DomainTileVm> {
    session
        .catalog()
        .domains()
        .iter()
        .map(|domain| {
            let completion = session.domain_completion(domain);
            let status = completion.status();
            DomainTileVm {
                id: domain.id().clone(),
                name: domain.name().to_string(),
                subtitle: domain.subtitle().map(str::to_string),
                icon: domain.icon().map(str::to_string),
                card_count_label: cards_label(domain.card_count()),
                completion_label: completion_label(status),
                reviewed_label: reviewed_label(completion),
                percent: rounded_percent(completion),
                enabled: status != CompletionStatus::ComingSoon,
                complete: status == CompletionStatus::Complete,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRowVm {
    pub id: TaskId,
    pub name: String,
    pub card_count_label: String,
    pub completion_label: String,
    pub reviewed_label: Option<String>,
    pub percent: u8,
    pub enabled: bool,
}

/// Rows for the selected domain; empty when no domain is selected.
#[must_use]
pub fn map_task_rows(session: &StudySession) -> Vec<TaskRowVm> {
    let Some(domain) = session.selected_domain() else {
        return Vec::new();
    };
    domain
        .tasks()
        .iter()
        .map(|task| {
            let completion = session.task_completion(task);
            TaskRowVm {
                id: task.id().clone(),
                name: task.name().to_string(),
                card_count_label: cards_label(task.cards().len()),
                completion_label: completion_label(completion.status()),
                reviewed_label: reviewed_label(completion),
                percent: rounded_percent(completion),
                enabled: task.has_cards(),
            }
        })
        .collect()
}

fn reviewed_label(completion: Completion) -> Option<String> {
    (completion.total > 0).then(|| format!("{}/{} reviewed", completion.reviewed, completion.total))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_percent(completion: Completion) -> u8 {
    completion.percent().round().clamp(0.0, 100.0) as u8
}

fn cards_label(count: usize) -> String {
    if count == 1 {
        "1 card".to_string()
    } else {
        format!("{count} cards")
    }
}
