use storage::repository::{InMemoryRepository, ProgressRepository};
use study_core::model::{CardId, CardType, DomainId, ProgressRecord, TaskId};
use study_core::time::fixed_now;

use super::test_harness::{load_session, setup_loading_harness, setup_view_harness};

async fn studying(repo: InMemoryRepository) -> services::StudySession {
    let mut session = load_session(repo).await;
    assert!(session.select_domain(&DomainId::new("domain1")));
    assert!(session.start_task(&TaskId::new("task-1.1")));
    session
}

#[tokio::test(flavor = "current_thread")]
async fn catalog_view_smoke_renders_tiles_and_stats() {
    let repo = InMemoryRepository::new();
    repo.upsert_progress(&CardId::new("f1"), &ProgressRecord::new(2, 1, Some(fixed_now()), 0))
        .await
        .unwrap();
    let session = load_session(repo).await;

    let mut harness = setup_view_harness(session, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Design Secure Architectures"), "missing domain in {html}");
    assert!(html.contains("33% done"), "missing completion in {html}");
    assert!(html.contains("1/3 reviewed"), "missing reviewed count in {html}");
    assert!(html.contains("width: 33%"), "missing progress bar in {html}");
    assert!(html.contains("Coming soon"), "missing coming soon in {html}");
    assert!(html.contains("Reviewed: 3"), "missing stats in {html}");
    assert!(html.contains("Accuracy: 67%"), "missing accuracy in {html}");
    assert!(!html.contains("Install app"), "unexpected install button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn catalog_view_smoke_shows_install_when_available() {
    let session = load_session(InMemoryRepository::new()).await;
    let mut harness = setup_view_harness(session, true);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Install app"), "missing install button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn root_smoke_loads_session_before_showing_catalog() {
    let mut harness = setup_loading_harness(InMemoryRepository::new());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Loading your progress"), "missing loading in {html}");

    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Design Resilient Architectures"), "missing catalog in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn task_list_smoke_renders_rows() {
    let mut session = load_session(InMemoryRepository::new()).await;
    session.select_domain(&DomainId::new("domain1"));

    let mut harness = setup_view_harness(session, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Secure access to AWS resources"), "missing task in {html}");
    assert!(html.contains("3 cards"), "missing count in {html}");
    assert!(html.contains("Not started"), "missing completion in {html}");
    assert!(html.contains("0/3 reviewed"), "missing reviewed count in {html}");
    assert!(html.contains("Secure workloads"), "missing empty task in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_flashcard_front() {
    let session = studying(InMemoryRepository::new()).await;
    let mut harness = setup_view_harness(session, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("1 / 3"), "missing position in {html}");
    assert!(html.contains("What is the root user?"), "missing question in {html}");
    assert!(html.contains("Click to reveal"), "missing hint in {html}");
    assert!(html.contains("Mastery 0%"), "missing mastery in {html}");
    assert!(html.contains("Reviewed 0 times"), "missing review count in {html}");
    assert!(html.contains("Showing 3 of 3 cards"), "missing filter summary in {html}");
    assert!(!html.contains("I know it"), "grading shown before flip in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_flipped_markdown_answer() {
    let mut session = studying(InMemoryRepository::new()).await;
    assert!(session.flip());
    let mut harness = setup_view_harness(session, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("<strong>Root user</strong>"), "missing answer html in {html}");
    assert!(html.contains("I know it"), "missing grade buttons in {html}");
    assert!(html.contains("Still learning"), "missing grade buttons in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_answered_choice() {
    let mut session = studying(InMemoryRepository::new()).await;
    session.next();
    assert!(session.answer_choice(1).is_some());

    let mut harness = setup_view_harness(session, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Correct!"), "missing result in {html}");
    assert!(html.contains("<em>hardware key</em>"), "missing explanation in {html}");
    assert!(html.contains("Next question"), "missing next in {html}");
    assert!(html.contains("choice--correct"), "missing option styling in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_no_match_state() {
    let mut session = studying(InMemoryRepository::new()).await;
    assert!(session.clear_topics());

    let mut harness = setup_view_harness(session, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No cards match the selected filters."), "missing empty state in {html}");
    assert!(html.contains("Reset filters"), "missing reset in {html}");
    assert!(html.contains("Showing 0 of 3 cards"), "missing summary in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_reflects_type_filter() {
    let mut session = studying(InMemoryRepository::new()).await;
    assert!(session.toggle_type(CardType::Flashcard));

    let mut harness = setup_view_harness(session, false);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("1 / 2"), "missing position in {html}");
    assert!(html.contains("Which factor?"), "missing first remaining card in {html}");
}
