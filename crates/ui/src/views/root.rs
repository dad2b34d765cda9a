use dioxus::prelude::*;
use services::{StudySession, View};

use crate::context::AppContext;
use crate::views::{CatalogView, StudyView, TaskListView};

/// Loads the study session once, then hands it to the screens.
#[component]
pub fn StudyRoot() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_signal(|| None::<StudySession>);

    use_future(move || {
        let ctx = ctx.clone();
        async move {
            let loaded =
                StudySession::load(ctx.catalog(), ctx.progress_store(), ctx.clock()).await;
            session.set(Some(loaded));
        }
    });

    rsx! { SessionScreen { session } }
}

/// Picks the screen for the session's current view.
#[component]
pub fn SessionScreen(session: Signal<Option<StudySession>>) -> Element {
    let view = session.read().as_ref().map(StudySession::view);
    match view {
        None => rsx! {
            div { class: "page loading",
                p { "Loading your progress..." }
            }
        },
        Some(View::Catalog) => rsx! { CatalogView { session } },
        Some(View::Tasks) => rsx! { TaskListView { session } },
        Some(View::Study) => rsx! { StudyView { session } },
    }
}

/// Apply `change` to the loaded session; no-op while loading.
pub(crate) fn update_session(
    mut session: Signal<Option<StudySession>>,
    change: impl FnOnce(&mut StudySession),
) {
    if let Some(loaded) = session.write().as_mut() {
        change(loaded);
    }
}
