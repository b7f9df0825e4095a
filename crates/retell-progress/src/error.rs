//! Persistence and aggregator error types.
//!
//! Scoring never fails; everything that can go wrong here is about the
//! durable store behind the aggregator.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Failures reported by a [`ProgressStore`](crate::store::ProgressStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be read or written.
    #[error("progress store unavailable at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored data exists but does not deserialize.
    #[error("progress store at {path} is corrupt")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the snapshot failed.
    #[error("failed to serialize progress")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    /// Returns `true` if the stored history itself is unreadable, as opposed
    /// to the store being temporarily unavailable.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

/// Failures surfaced by the [`ProgressAggregator`](crate::ProgressAggregator).
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Persisted history exists but could not be decoded on load.
    #[error("stored progress history is unreadable")]
    CorruptHistory(#[source] StoreError),

    /// The mutation was applied in memory but could not be persisted.
    #[error("progress updated in memory but not persisted")]
    Persist(#[source] StoreError),

    /// A record with this id is already in the log.
    #[error("record {0} already exists")]
    DuplicateRecord(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn sources_are_chained_not_repeated() {
        let parse = serde_json::from_str::<f64>("null").unwrap_err();
        let detail = parse.to_string();
        let err = ProgressError::CorruptHistory(StoreError::Corrupt {
            path: PathBuf::from("records.json"),
            source: parse,
        });

        let store = err.source().unwrap();
        assert_eq!(store.to_string(), "progress store at records.json is corrupt");
        assert_eq!(store.source().unwrap().to_string(), detail);

        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches(&detail).count(), 1);
    }
}
