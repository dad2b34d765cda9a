use study_core::FilterSelection;
use study_core::model::{CardType, Difficulty};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChipVm<T> {
    pub value: T,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterPanelVm {
    pub difficulties: Vec<ChipVm<Difficulty>>,
    pub types: Vec<ChipVm<CardType>>,
    pub topics: Vec<ChipVm<String>>,
    pub summary: String,
    pub is_default: bool,
}

/// Chips for every difficulty, type and task topic, plus a match summary.
#[must_use]
pub fn map_filter_panel(filters: &FilterSelection, matching: usize, total: usize) -> FilterPanelVm {
    FilterPanelVm {
        difficulties: Difficulty::ALL
            .into_iter()
            .map(|d| ChipVm {
                value: d,
                label: difficulty_label(d),
                selected: filters.is_difficulty_selected(d),
            })
            .collect(),
        types: CardType::ALL
            .into_iter()
            .map(|t| ChipVm {
                value: t,
                label: t.label().to_string(),
                selected: filters.is_type_selected(t),
            })
            .collect(),
        topics: filters
            .available_topics()
            .iter()
            .map(|topic| ChipVm {
                value: topic.clone(),
                label: topic.clone(),
                selected: filters.is_topic_selected(topic),
            })
            .collect(),
        summary: format!("Showing {matching} of {total} cards"),
        is_default: filters.is_default(),
    }
}

fn difficulty_label(difficulty: Difficulty) -> String {
    let name = difficulty.as_str();
    let mut chars = name.chars();
    let title = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect::<String>())
        .unwrap_or_default();
    format!("{} {title}", "★".repeat(usize::from(difficulty.stars())))
}
