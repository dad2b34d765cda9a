use dioxus::prelude::*;
use services::StudySession;

use crate::views::root::update_session;
use crate::vm::map_task_rows;

#[component]
pub fn TaskListView(session: Signal<Option<StudySession>>) -> Element {
    let (domain_name, rows) = {
        let guard = session.read();
        let Some(loaded) = guard.as_ref() else {
            return rsx! {};
        };
        let name = loaded
            .selected_domain()
            .map(|domain| domain.name().to_string())
            .unwrap_or_default();
        (name, map_task_rows(loaded))
    };

    rsx! {
        div { class: "page tasks-page",
            header { class: "view-header",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| update_session(session, |s| s.back_to_catalog()),
                    "← Back"
                }
                h2 { class: "view-title", "{domain_name}" }
            }
            div { class: "view-divider" }
            ul { class: "task-list",
                for row in rows {
                    {
                        let id = row.id.clone();
                        rsx! {
                            li { key: "{row.id}",
                                button {
                                    class: "task-row",
                                    r#type: "button",
                                    disabled: !row.enabled,
                                    onclick: move |_| {
                                        let id = id.clone();
                                        update_session(session, move |s| {
                                            s.start_task(&id);
                                        });
                                    },
                                    span { class: "task-name", "{row.name}" }
                                    span { class: "task-meta", "{row.card_count_label}" }
                                    span { class: "completion", "{row.completion_label}" }
                                    if let Some(reviewed) = row.reviewed_label.as_ref() {
                                        span { class: "reviewed-count", "{reviewed}" }
                                        div { class: "progress-bar",
                                            div { class: "progress-fill", style: "width: {row.percent}%" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
