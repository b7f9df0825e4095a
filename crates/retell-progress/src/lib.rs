//! retell-progress: session log, derived statistics, and persistence.
//!
//! The record log is the only durable state. [`OverallProgress`] is a cache
//! rebuilt from it by [`statistics::recompute`] after every mutation.

pub mod aggregator;
pub mod error;
pub mod model;
pub mod statistics;
pub mod store;

pub use aggregator::ProgressAggregator;
pub use error::{ProgressError, StoreError};
pub use model::{
    sanitize_duration, OverallProgress, ProgressRecord, ProgressSnapshot, TimeWindow,
    MAX_SESSION_SECS,
};
pub use store::{JsonFileStore, MemoryStore, ProgressStore};
