//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use study_core::model::CatalogError;

/// Errors emitted while bootstrapping study services.
///
/// Storage failures never appear here: the progress store logs and absorbs them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServicesError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
