use std::sync::Arc;

use services::{Clock, ProgressStore};
use study_core::model::Catalog;

/// Platform hook for offering an "install app" action.
///
/// Purely presentational: nothing it does feeds progress or filtering.
pub trait InstallPrompt: Send + Sync {
    fn is_available(&self) -> bool;
    fn prompt(&self);
}

/// Install prompt for platforms without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableInstallPrompt;

impl InstallPrompt for UnavailableInstallPrompt {
    fn is_available(&self) -> bool {
        false
    }

    fn prompt(&self) {}
}

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<Catalog>;
    fn progress_store(&self) -> ProgressStore;
    fn clock(&self) -> Clock;
    fn install_prompt(&self) -> Arc<dyn InstallPrompt>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<Catalog>,
    progress_store: ProgressStore,
    clock: Clock,
    install_prompt: Arc<dyn InstallPrompt>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            progress_store: app.progress_store(),
            clock: app.clock(),
            install_prompt: app.install_prompt(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress_store(&self) -> ProgressStore {
        self.progress_store.clone()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn install_prompt(&self) -> Arc<dyn InstallPrompt> {
        Arc::clone(&self.install_prompt)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
