mod card;
mod catalog;
mod ids;
mod progress;
mod stats;

pub use ids::{CardId, DomainId, ParseIdError, TaskId};

pub use card::{Card, CardBody, CardError, CardType, Difficulty, MultipleChoice};
pub use catalog::{Catalog, CatalogError, Domain, Task};
pub use progress::{GradeOutcome, ProgressRecord};
pub use stats::{Completion, CompletionStatus, SessionStats};
