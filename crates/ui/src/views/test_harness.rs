use std::sync::{Arc, Mutex};

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{Clock, ProgressStore, StudySession};
use storage::repository::InMemoryRepository;
use study_core::model::Catalog;
use study_core::time::fixed_now;

use crate::context::{InstallPrompt, UiApp, build_app_context};
use crate::views::{SessionScreen, StudyRoot};

pub const TEST_CATALOG: &str = r#"{
    "domains": [
        {
            "id": "domain1",
            "name": "Design Secure Architectures",
            "subtitle": "30% of scored content",
            "tasks": [
                {
                    "id": "task-1.1",
                    "name": "Secure access to AWS resources",
                    "cards": [
                        { "id": "f1", "topic": "IAM", "difficulty": "fundamental",
                          "type": "flashcard", "question": "What is the root user?",
                          "answer": "**Root user** has full access" },
                        { "id": "m1", "topic": "MFA", "difficulty": "advanced",
                          "type": "multiple-choice", "question": "Which factor?",
                          "options": ["Password", "Hardware key", "Username"],
                          "correct_answer": 1, "explanation": "A *hardware key* is possession." },
                        { "id": "c1", "topic": "IAM", "difficulty": "application",
                          "type": "concept", "question": "Least privilege?" }
                    ]
                },
                { "id": "task-1.2", "name": "Secure workloads", "cards": [] }
            ]
        },
        { "id": "domain2", "name": "Design Resilient Architectures", "tasks": [] }
    ]
}"#;

struct FakeInstallPrompt {
    available: bool,
}

impl InstallPrompt for FakeInstallPrompt {
    fn is_available(&self) -> bool {
        self.available
    }

    fn prompt(&self) {}
}

struct TestApp {
    catalog: Arc<Catalog>,
    store: ProgressStore,
    install: Arc<FakeInstallPrompt>,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn progress_store(&self) -> ProgressStore {
        self.store.clone()
    }

    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn install_prompt(&self) -> Arc<dyn InstallPrompt> {
        self.install.clone()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    // Taken once by the root component; `None` exercises the loading path.
    seed: Arc<Mutex<Option<StudySession>>>,
    preloaded: bool,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let seed = Arc::clone(&props.seed);
    let session = use_signal(move || seed.lock().ok().and_then(|mut slot| slot.take()));

    if props.preloaded {
        rsx! { SessionScreen { session } }
    } else {
        rsx! { StudyRoot {} }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..5 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn test_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::from_json_str(TEST_CATALOG).expect("test catalog"))
}

/// Session over the test catalog backed by `repo`.
pub async fn load_session(repo: InMemoryRepository) -> StudySession {
    let store = ProgressStore::with_repository(Arc::new(repo));
    StudySession::load(test_catalog(), store, Clock::fixed(fixed_now())).await
}

/// Render an already-prepared session.
pub fn setup_view_harness(session: StudySession, install_available: bool) -> ViewHarness {
    let store = session.store().clone();
    build(Some(session), store, install_available)
}

/// Render the loading root over `repo`.
pub fn setup_loading_harness(repo: InMemoryRepository) -> ViewHarness {
    let store = ProgressStore::with_repository(Arc::new(repo));
    build(None, store, false)
}

fn build(session: Option<StudySession>, store: ProgressStore, install_available: bool) -> ViewHarness {
    let app = Arc::new(TestApp {
        catalog: test_catalog(),
        store,
        install: Arc::new(FakeInstallPrompt {
            available: install_available,
        }),
    });
    let preloaded = session.is_some();
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            seed: Arc::new(Mutex::new(session)),
            preloaded,
        },
    );
    ViewHarness { dom }
}
