use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use services::ProgressStore;
use storage::repository::{InMemoryRepository, ProgressRepository, StorageError};
use study_core::model::{CardId, GradeOutcome, ProgressRecord};
use study_core::time::fixed_now;

/// Backend that refuses every operation.
struct BrokenRepository;

#[async_trait]
impl ProgressRepository for BrokenRepository {
    async fn get_progress(&self, _id: &CardId) -> Result<Option<ProgressRecord>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn list_progress(&self) -> Result<Vec<(CardId, ProgressRecord)>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn upsert_progress(
        &self,
        _id: &CardId,
        _record: &ProgressRecord,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

/// Backend whose writes take a while and are recorded in arrival order.
#[derive(Clone, Default)]
struct SlowRepository {
    inner: InMemoryRepository,
    writes: Arc<Mutex<Vec<(CardId, u32)>>>,
}

#[async_trait]
impl ProgressRepository for SlowRepository {
    async fn get_progress(&self, id: &CardId) -> Result<Option<ProgressRecord>, StorageError> {
        self.inner.get_progress(id).await
    }

    async fn list_progress(&self) -> Result<Vec<(CardId, ProgressRecord)>, StorageError> {
        self.inner.list_progress().await
    }

    async fn upsert_progress(
        &self,
        id: &CardId,
        record: &ProgressRecord,
    ) -> Result<(), StorageError> {
        // Later writes sleep less; only a serial writer keeps them in order.
        let delay = 20_u64.saturating_sub(u64::from(record.attempts()) * 5);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.writes
            .lock()
            .unwrap()
            .push((id.clone(), record.attempts()));
        self.inner.upsert_progress(id, record).await
    }
}

#[tokio::test]
async fn broken_backend_reads_as_zero_and_swallows_writes() {
    let store = ProgressStore::with_repository(Arc::new(BrokenRepository));
    let id = CardId::new("c");

    assert_eq!(store.get(&id).await, ProgressRecord::default());
    store.put(id.clone(), ProgressRecord::new(4, 0, Some(fixed_now()), 0));
    store.flush().await;

    assert_eq!(store.get(&id).await, ProgressRecord::default());
    assert!(store.get_all().await.is_empty());
}

#[tokio::test]
async fn failed_sqlite_open_degrades_to_empty_store() {
    let store = ProgressStore::sqlite("sqlite:///nonexistent-dir/for/sure/progress.sqlite3");
    let id = CardId::new("c");
    store.put(id.clone(), ProgressRecord::new(1, 0, None, 0));
    store.flush().await;
    assert_eq!(store.get(&id).await, ProgressRecord::default());
}

#[tokio::test]
async fn sqlite_store_persists_across_handles() {
    let url = "sqlite:file:memdb_store_handles?mode=memory&cache=shared";
    let first = ProgressStore::sqlite(url);
    let id = CardId::new("kept");
    let record = ProgressRecord::default().applied(GradeOutcome::Correct, fixed_now());
    first.put(id.clone(), record.clone());
    first.flush().await;

    let second = ProgressStore::sqlite(url);
    assert_eq!(second.get(&id).await, record);
    drop(first);
}

#[tokio::test]
async fn writes_to_one_card_land_in_submission_order() {
    let repo = SlowRepository::default();
    let store = ProgressStore::with_repository(Arc::new(repo.clone()));
    let id = CardId::new("c");

    let mut record = ProgressRecord::default();
    for _ in 0..4 {
        record.apply(GradeOutcome::Incorrect, fixed_now());
        store.put(id.clone(), record.clone());
    }
    store.flush().await;

    let order: Vec<u32> = repo.writes.lock().unwrap().iter().map(|(_, n)| *n).collect();
    assert_eq!(order, vec![1, 2, 3, 4]);
    assert_eq!(store.get(&id).await.incorrect, 4);
}

#[tokio::test]
async fn get_all_returns_every_record() {
    let store = ProgressStore::in_memory();
    store.put(CardId::new("a"), ProgressRecord::new(1, 0, None, 0));
    store.put(CardId::new("b"), ProgressRecord::new(0, 1, None, 1));

    let all = store.get_all().await;
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|(id, r)| id.as_str() == "b" && r.incorrect == 1));
}
