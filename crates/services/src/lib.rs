#![forbid(unsafe_code)]

pub mod catalog_loader;
pub mod error;
pub mod progress_store;
pub mod study;

pub use study_core::Clock;

pub use catalog_loader::{CatalogSource, load_catalog};
pub use error::ServicesError;
pub use progress_store::ProgressStore;
pub use study::{GradeReceipt, StudySession, View};
