mod catalog;
mod filters;
mod root;
mod study;
mod tasks;

pub use catalog::CatalogView;
pub use filters::FilterPanel;
pub use root::{SessionScreen, StudyRoot};
pub use study::StudyView;
pub use tasks::TaskListView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
