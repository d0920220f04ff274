//! Data model shared by the history-stats pipeline and its front ends.

mod error;
mod event;
mod query;
mod report;

pub use error::*;
pub use event::*;
pub use query::*;
pub use report::*;
