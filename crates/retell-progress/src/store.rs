//! Durable storage for the record log and its summary.
//!
//! A store is an opaque key/value write and read of two serializable
//! structures. [`JsonFileStore`] keeps them as two JSON files in a directory;
//! [`MemoryStore`] keeps them in process.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::model::{OverallProgress, ProgressRecord, ProgressSnapshot};
use crate::statistics::recompute;

/// Persistence collaborator for the aggregator.
pub trait ProgressStore: Send + Sync {
    /// Persist the full log and its summary.
    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StoreError>;

    /// Load the log and summary. A store that has never been written loads as
    /// an empty snapshot.
    fn load(&self) -> Result<ProgressSnapshot, StoreError>;
}

// ---------------------------------------------------------------------------
// JSON files
// ---------------------------------------------------------------------------

const RECORDS_FILE: &str = "records.json";
const OVERALL_FILE: &str = "overall.json";

/// Two pretty-printed JSON files, `records.json` and `overall.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn records_path(&self) -> PathBuf {
        self.dir.join(RECORDS_FILE)
    }

    pub fn overall_path(&self) -> PathBuf {
        self.dir.join(OVERALL_FILE)
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value).map_err(StoreError::Serialize)?;
        std::fs::write(path, json).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `Ok(None)` when the file does not exist.
    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl ProgressStore for JsonFileStore {
    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        self.write_json(&self.records_path(), &snapshot.records)?;
        self.write_json(&self.overall_path(), &snapshot.overall)?;
        tracing::debug!(
            dir = %self.dir.display(),
            records = snapshot.records.len(),
            "saved progress"
        );
        Ok(())
    }

    fn load(&self) -> Result<ProgressSnapshot, StoreError> {
        let records: Vec<ProgressRecord> = self
            .read_json(&self.records_path())?
            .unwrap_or_default();

        // The summary is a cache; an unreadable one is rebuilt from the log.
        let overall = match self.read_json::<OverallProgress>(&self.overall_path()) {
            Ok(Some(overall)) => overall,
            Ok(None) => recompute(&records),
            Err(e) => {
                tracing::warn!("{e}; rebuilding summary from records");
                recompute(&records)
            }
        };

        Ok(ProgressSnapshot { records, overall })
    }
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

/// Process-local store. Optionally fails every save, for exercising
/// persistence-error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<ProgressSnapshot>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: ProgressSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            ..Self::default()
        }
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the last saved snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ProgressStore for MemoryStore {
    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::other("save disabled"),
            });
        }
        *self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = snapshot.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn load(&self) -> Result<ProgressSnapshot, StoreError> {
        Ok(self.snapshot())
    }
}
