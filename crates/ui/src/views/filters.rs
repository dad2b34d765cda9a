use dioxus::prelude::*;
use services::StudySession;

use crate::views::root::update_session;
use crate::vm::FilterPanelVm;

fn chip_class(selected: bool) -> &'static str {
    if selected { "chip chip--on" } else { "chip" }
}

#[component]
pub fn FilterPanel(session: Signal<Option<StudySession>>, vm: FilterPanelVm) -> Element {
    rsx! {
        section { class: "filter-panel",
            div { class: "filter-row",
                span { class: "filter-label", "Difficulty" }
                for chip in vm.difficulties.iter().cloned() {
                    button {
                        key: "{chip.label}",
                        class: chip_class(chip.selected),
                        r#type: "button",
                        onclick: move |_| update_session(session, |s| {
                            s.toggle_difficulty(chip.value);
                        }),
                        "{chip.label}"
                    }
                }
            }
            div { class: "filter-row",
                span { class: "filter-label", "Type" }
                for chip in vm.types.iter().cloned() {
                    button {
                        key: "{chip.label}",
                        class: chip_class(chip.selected),
                        r#type: "button",
                        onclick: move |_| update_session(session, |s| {
                            s.toggle_type(chip.value);
                        }),
                        "{chip.label}"
                    }
                }
            }
            div { class: "filter-row",
                span { class: "filter-label", "Topics" }
                for chip in vm.topics.iter().cloned() {
                    {
                        let topic = chip.value.clone();
                        rsx! {
                            button {
                                key: "{chip.label}",
                                class: chip_class(chip.selected),
                                r#type: "button",
                                onclick: move |_| {
                                    let topic = topic.clone();
                                    update_session(session, move |s| {
                                        s.toggle_topic(&topic);
                                    });
                                },
                                "{chip.label}"
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| update_session(session, |s| {
                        s.select_all_topics();
                    }),
                    "All"
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| update_session(session, |s| {
                        s.clear_topics();
                    }),
                    "Clear"
                }
            }
            div { class: "filter-footer",
                span { class: "filter-summary", "{vm.summary}" }
                if !vm.is_default {
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| update_session(session, |s| {
                            s.reset_filters();
                        }),
                        "Reset filters"
                    }
                }
            }
        }
    }
}
