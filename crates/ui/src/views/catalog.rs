use dioxus::prelude::*;
use services::StudySession;

use crate::context::AppContext;
use crate::views::root::update_session;
use crate::vm::{map_domain_tiles, map_header_stats};

#[component]
pub fn CatalogView(session: Signal<Option<StudySession>>) -> Element {
    let ctx = use_context::<AppContext>();
    let install = ctx.install_prompt();
    let show_install = install.is_available();

    let (header, tiles) = {
        let guard = session.read();
        let Some(loaded) = guard.as_ref() else {
            return rsx! {};
        };
        (map_header_stats(loaded.stats()), map_domain_tiles(loaded))
    };

    rsx! {
        div { class: "page catalog-page",
            header { class: "view-header",
                h2 { class: "view-title", "Exam Study" }
                div { class: "header-stats",
                    span { class: "stat", "Reviewed: {header.reviewed}" }
                    span { class: "stat", "Correct: {header.correct}" }
                    span { class: "stat", "Accuracy: {header.accuracy_label}" }
                }
                if show_install {
                    button {
                        class: "btn btn-secondary install-btn",
                        r#type: "button",
                        onclick: move |_| install.prompt(),
                        "Install app"
                    }
                }
            }
            div { class: "view-divider" }
            div { class: "domain-grid",
                for tile in tiles {
                    {
                        let id = tile.id.clone();
                        let tile_class = if tile.complete {
                            "domain-tile domain-tile--complete"
                        } else {
                            "domain-tile"
                        };
                        rsx! {
                            button {
                                key: "{tile.id}",
                                class: tile_class,
                                r#type: "button",
                                disabled: !tile.enabled,
                                onclick: move |_| {
                                    let id = id.clone();
                                    update_session(session, move |s| {
                                        s.select_domain(&id);
                                    });
                                },
                                if let Some(icon) = tile.icon.as_ref() {
                                    span { class: "domain-icon", "{icon}" }
                                }
                                h3 { class: "domain-name", "{tile.name}" }
                                if let Some(subtitle) = tile.subtitle.as_ref() {
                                    p { class: "domain-subtitle", "{subtitle}" }
                                }
                                p { class: "domain-meta", "{tile.card_count_label}" }
                                span { class: "completion", "{tile.completion_label}" }
                                if let Some(reviewed) = tile.reviewed_label.as_ref() {
                                    p { class: "reviewed-count", "{reviewed}" }
                                    div { class: "progress-bar",
                                        div { class: "progress-fill", style: "width: {tile.percent}%" }
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
