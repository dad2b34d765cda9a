//! Best-effort persistence for per-card progress.
//!
//! Every operation goes through one background task that owns the repository.
//! Requests are handled strictly in submission order, so a `get` issued after
//! a `put` observes that write and two writes to the same card never reorder.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use log::{debug, warn};
use storage::repository::{ProgressRepository, Storage};
use study_core::model::{CardId, ProgressRecord};
use tokio::sync::{mpsc, oneshot};

enum Request {
    Get {
        id: CardId,
        reply: oneshot::Sender<ProgressRecord>,
    },
    GetAll {
        reply: oneshot::Sender<Vec<(CardId, ProgressRecord)>>,
    },
    Put {
        id: CardId,
        record: ProgressRecord,
    },
    Flush {
        reply: oneshot::Sender<()>,
    },
}

/// Cloneable handle to the progress writer task.
///
/// Reads never fail: storage problems are logged and reported as missing data.
/// Writes are fire-and-forget and are never retried.
#[derive(Clone)]
pub struct ProgressStore {
    tx: mpsc::UnboundedSender<Request>,
}

impl ProgressStore {
    /// Spawn the writer task. `open` runs once, on the first request.
    ///
    /// If `open` fails the store keeps answering with zero records and drops
    /// writes for the rest of its life.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn new<F, Fut, E>(open: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Arc<dyn ProgressRepository>, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(open, rx));
        Self { tx }
    }

    /// Wrap an already-open repository.
    pub fn with_repository(repo: Arc<dyn ProgressRepository>) -> Self {
        Self::new(move || async move { Ok::<_, std::convert::Infallible>(repo) })
    }

    /// Store backed by a fresh in-memory repository.
    pub fn in_memory() -> Self {
        Self::with_repository(Storage::in_memory().progress)
    }

    /// Store backed by `SQLite`; the database is opened and migrated lazily.
    pub fn sqlite(database_url: impl Into<String>) -> Self {
        let url = database_url.into();
        Self::new(move || async move { Storage::sqlite(&url).await.map(|s| s.progress) })
    }

    /// Record for `id`, or the zero record when none is stored or storage failed.
    pub async fn get(&self, id: &CardId) -> ProgressRecord {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Get {
            id: id.clone(),
            reply,
        });
        rx.await.unwrap_or_default()
    }

    /// Every stored record, or an empty list when storage failed.
    pub async fn get_all(&self) -> Vec<(CardId, ProgressRecord)> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::GetAll { reply });
        rx.await.unwrap_or_default()
    }

    /// Queue a full replacement of the record for `id`. Returns immediately.
    pub fn put(&self, id: CardId, record: ProgressRecord) {
        self.send(Request::Put { id, record });
    }

    /// Wait until every write queued before this call has been attempted.
    pub async fn flush(&self) {
        let (reply, rx) = oneshot::channel();
        self.send(Request::Flush { reply });
        let _ = rx.await;
    }

    fn send(&self, request: Request) {
        if self.tx.send(request).is_err() {
            warn!("progress writer has stopped; request dropped");
        }
    }
}

async fn run<F, Fut, E>(open: F, mut rx: mpsc::UnboundedReceiver<Request>)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Arc<dyn ProgressRepository>, E>>,
    E: Display,
{
    let Some(first) = rx.recv().await else {
        return;
    };

    let repo = match open().await {
        Ok(repo) => {
            debug!("progress storage opened");
            Some(repo)
        }
        Err(err) => {
            warn!("progress storage unavailable, continuing without persistence: {err}");
            None
        }
    };

    let mut pending = Some(first);
    loop {
        let request = match pending.take() {
            Some(request) => request,
            None => match rx.recv().await {
                Some(request) => request,
                None => break,
            },
        };
        handle(repo.as_deref(), request).await;
    }
    debug!("progress writer finished");
}

async fn handle(repo: Option<&dyn ProgressRepository>, request: Request) {
    match request {
        Request::Get { id, reply } => {
            let record = match repo {
                Some(repo) => match repo.get_progress(&id).await {
                    Ok(found) => found.unwrap_or_default(),
                    Err(err) => {
                        warn!("failed to read progress for {id}: {err}");
                        ProgressRecord::default()
                    }
                },
                None => ProgressRecord::default(),
            };
            let _ = reply.send(record);
        }
        Request::GetAll { reply } => {
            let records = match repo {
                Some(repo) => repo.list_progress().await.unwrap_or_else(|err| {
                    warn!("failed to list progress: {err}");
                    Vec::new()
                }),
                None => Vec::new(),
            };
            let _ = reply.send(records);
        }
        Request::Put { id, record } => {
            let Some(repo) = repo else {
                debug!("progress for {id} not persisted: storage unavailable");
                return;
            };
            match repo.upsert_progress(&id, &record).await {
                Ok(()) => debug!("progress saved for {id}"),
                Err(err) => warn!("failed to save progress for {id}: {err}"),
            }
        }
        Request::Flush { reply } => {
            let _ = reply.send(());
        }
    }
}
