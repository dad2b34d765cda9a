use dioxus::prelude::*;
use services::StudySession;

use crate::context::AppContext;
use crate::views::FilterPanel;
use crate::views::root::update_session;
use crate::vm::{CardFaceVm, StudyCardVm, map_filter_panel, map_study_card};

#[component]
pub fn StudyView(session: Signal<Option<StudySession>>) -> Element {
    let ctx = use_context::<AppContext>();
    let now = ctx.clock().now();

    let (task_name, filter_vm, card) = {
        let guard = session.read();
        let Some(loaded) = guard.as_ref() else {
            return rsx! {};
        };
        let task = loaded.selected_task();
        let total = task.map_or(0, |t| t.cards().len());
        let name = task.map(|t| t.name().to_string()).unwrap_or_default();
        let filters = map_filter_panel(loaded.filters(), loaded.filtered_cards().len(), total);
        (name, filters, map_study_card(loaded, now))
    };
    let position_label = card.as_ref().map(|c| c.position_label.clone());

    rsx! {
        div { class: "page study-page",
            header { class: "view-header",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| update_session(session, |s| s.back_to_tasks()),
                    "← Back"
                }
                h2 { class: "view-title", "{task_name}" }
                if let Some(label) = position_label {
                    span { class: "position", "{label}" }
                }
            }
            FilterPanel { session, vm: filter_vm }
            match card {
                Some(card) => rsx! { StudyCard { session, card } },
                None => rsx! {
                    div { class: "empty-state",
                        p { "No cards match the selected filters." }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| update_session(session, |s| {
                                s.reset_filters();
                            }),
                            "Reset filters"
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StudyCard(session: Signal<Option<StudySession>>, card: StudyCardVm) -> Element {
    let face = card.face.clone();
    rsx! {
        article { class: "study-card",
            div { class: "card-meta",
                if let Some(icon) = card.icon.as_ref() {
                    span { class: "card-icon", "{icon}" }
                }
                span { class: "topic", "{card.topic}" }
                span { class: "badge difficulty difficulty--{card.difficulty}", "{card.stars}" }
                span { class: "badge card-type", "{card.type_label}" }
            }
            div { class: "mastery",
                div { class: "mastery-bar",
                    div { class: "mastery-fill", style: "width: {card.mastery}%" }
                }
                span { class: "mastery-label", "Mastery {card.mastery}%" }
                span { class: "review-count", "{card.review_count_label}" }
                span { class: "last-review", "{card.last_review_label}" }
            }
            h3 { class: "question", "{card.question}" }
            match face {
                CardFaceVm::Flashcard { flipped, answer_html } => rsx! {
                    FlashcardFace { session, flipped, answer_html }
                },
                CardFaceVm::MultipleChoice { options, answered, answered_correctly, explanation_html } => {
                    let (result_class, result_text) = if answered_correctly {
                        ("result result--correct", "Correct!")
                    } else {
                        ("result result--wrong", "Not quite.")
                    };
                    rsx! {
                        div { class: "choices",
                            for option in options {
                                button {
                                    key: "{option.index}",
                                    class: option.state.class(),
                                    r#type: "button",
                                    disabled: answered,
                                    onclick: move |_| update_session(session, |s| {
                                        s.answer_choice(option.index);
                                    }),
                                    span { class: "choice-letter", "{option.letter}" }
                                    span { class: "choice-text", "{option.text}" }
                                }
                            }
                        }
                        if answered {
                            div { class: result_class, "{result_text}" }
                            if let Some(html) = explanation_html {
                                div { class: "explanation", dangerous_inner_html: "{html}" }
                            }
                            button {
                                class: "btn btn-primary",
                                r#type: "button",
                                onclick: move |_| update_session(session, |s| {
                                    s.next();
                                }),
                                "Next question"
                            }
                        }
                    }
                }
            }
            nav { class: "card-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| update_session(session, |s| {
                        s.previous();
                    }),
                    "Previous"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| update_session(session, |s| {
                        s.next();
                    }),
                    "Next"
                }
            }
        }
    }
}

#[component]
fn FlashcardFace(
    session: Signal<Option<StudySession>>,
    flipped: bool,
    answer_html: Option<String>,
) -> Element {
    let face_class = if flipped { "flashcard flashcard--back" } else { "flashcard" };
    rsx! {
        div {
            class: face_class,
            onclick: move |_| update_session(session, |s| {
                s.flip();
            }),
            if flipped {
                match answer_html {
                    Some(html) => rsx! { div { class: "answer", dangerous_inner_html: "{html}" } },
                    None => rsx! { p { class: "answer answer--empty", "No answer text for this card." } },
                }
            } else {
                p { class: "hint", "Click to reveal the answer" }
            }
        }
        if flipped {
            div { class: "grade-actions",
                button {
                    class: "btn btn-success",
                    r#type: "button",
                    onclick: move |_| update_session(session, |s| {
                        s.know_it();
                    }),
                    "I know it"
                }
                button {
                    class: "btn btn-warning",
                    r#type: "button",
                    onclick: move |_| update_session(session, |s| {
                        s.still_learning();
                    }),
                    "Still learning"
                }
            }
        }
    }
}
