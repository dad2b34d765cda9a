#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod model;
pub mod navigator;
pub mod time;

pub use error::Error;
pub use filter::FilterSelection;
pub use navigator::{NavState, Navigator};
pub use time::Clock;
