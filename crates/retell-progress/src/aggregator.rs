//! The progress aggregator: owner of the session log.
//!
//! One `RwLock` guards the log and its summary as a single unit. Mutations
//! hold the write lock across mutate, recompute and persist, so readers never
//! see a log and a summary that disagree. Queries share the read lock.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ProgressError, StoreError};
use crate::model::{
    sanitize_duration, OverallProgress, ProgressRecord, ProgressSnapshot, TimeWindow,
};
use crate::statistics::{filter_window, recompute};
use crate::store::ProgressStore;

/// Append-only session log with a derived [`OverallProgress`].
pub struct ProgressAggregator {
    store: Arc<dyn ProgressStore>,
    state: RwLock<ProgressSnapshot>,
}

impl std::fmt::Debug for ProgressAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("ProgressAggregator")
            .field("records", &state.records.len())
            .field("overall", &state.overall)
            .finish()
    }
}

impl ProgressAggregator {
    /// Load the log from `store`.
    ///
    /// An unavailable store starts an empty log. A store whose history exists
    /// but cannot be decoded is reported as [`ProgressError::CorruptHistory`]
    /// so the caller can decide between [`Self::reset_with`] and alerting the
    /// user. The summary is always rebuilt from the loaded records.
    pub fn open(store: Arc<dyn ProgressStore>) -> Result<Self, ProgressError> {
        let stored = match store.load() {
            Ok(snapshot) => snapshot,
            Err(e) if e.is_corrupt() => return Err(ProgressError::CorruptHistory(e)),
            Err(e) => {
                tracing::warn!("{e}; starting with an empty progress log");
                ProgressSnapshot::default()
            }
        };

        let records = stored.records;
        let overall = recompute(&records);
        if overall != stored.overall {
            tracing::debug!("stored summary was stale, using recomputed summary");
        }
        tracing::info!(records = records.len(), "progress log loaded");
        Ok(Self {
            store,
            state: RwLock::new(ProgressSnapshot { records, overall }),
        })
    }

    /// Start from an empty log without reading `store`. The next mutation
    /// overwrites whatever it holds.
    pub fn reset_with(store: Arc<dyn ProgressStore>) -> Self {
        Self {
            store,
            state: RwLock::new(ProgressSnapshot::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ProgressSnapshot> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProgressSnapshot> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Recompute the summary and persist while the write lock is held.
    fn commit(&self, state: &mut ProgressSnapshot) -> Result<(), ProgressError> {
        state.overall = recompute(&state.records);
        self.store.save(state).map_err(|e: StoreError| {
            tracing::warn!("failed to persist progress: {e}");
            ProgressError::Persist(e)
        })
    }

    /// Add a completed session.
    ///
    /// A record whose id is already present is rejected and nothing changes.
    /// On [`ProgressError::Persist`] the record is still in the log. The
    /// duration is sanitized before storing.
    pub fn append(&self, mut record: ProgressRecord) -> Result<(), ProgressError> {
        record.duration_secs = sanitize_duration(record.duration_secs);
        let mut state = self.write();
        if state.records.iter().any(|r| r.id == record.id) {
            return Err(ProgressError::DuplicateRecord(record.id));
        }
        tracing::info!(id = %record.id, mode = %record.mode, overall = record.metrics.overall, "recording session");
        state.records.push(record);
        self.commit(&mut state)
    }

    /// Remove a session by id. Returns whether a record was removed; removing
    /// an unknown id is a no-op that still re-persists the unchanged log.
    pub fn remove(&self, id: Uuid) -> Result<bool, ProgressError> {
        let mut state = self.write();
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        let removed = state.records.len() != before;
        if removed {
            tracing::info!(%id, "removed session");
        } else {
            tracing::debug!(%id, "no session to remove");
        }
        self.commit(&mut state)?;
        Ok(removed)
    }

    /// Drop every session and reset the summary to its zero value.
    pub fn clear(&self) -> Result<(), ProgressError> {
        let mut state = self.write();
        let count = state.records.len();
        state.records.clear();
        tracing::info!(count, "cleared progress log");
        self.commit(&mut state)
    }

    /// Sessions recorded within `window` of the current time.
    pub fn query(&self, window: TimeWindow) -> Vec<ProgressRecord> {
        self.query_at(window, Utc::now())
    }

    /// Sessions recorded within `window` of `now`, in insertion order.
    pub fn query_at(&self, window: TimeWindow, now: DateTime<Utc>) -> Vec<ProgressRecord> {
        let state = self.read();
        filter_window(&state.records, window, now)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Summary over the sessions within `window` of `now`.
    pub fn summarize_at(&self, window: TimeWindow, now: DateTime<Utc>) -> OverallProgress {
        recompute(&self.query_at(window, now))
    }

    /// Summary over the sessions within `window` of the current time.
    pub fn summarize(&self, window: TimeWindow) -> OverallProgress {
        self.summarize_at(window, Utc::now())
    }

    pub fn get(&self, id: Uuid) -> Option<ProgressRecord> {
        self.read().records.iter().find(|r| r.id == id).cloned()
    }

    pub fn overall(&self) -> OverallProgress {
        self.read().overall.clone()
    }

    pub fn records(&self) -> Vec<ProgressRecord> {
        self.read().records.clone()
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Consistent copy of the log and its summary.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};
    use retell_core::model::{PracticeMode, StoryMetrics};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap()
    }

    fn record(score: f64, duration: f64, days_ago: i64) -> ProgressRecord {
        ProgressRecord::new(
            StoryMetrics::from_components(score, score, 0.3 + score / 2.0, score, vec!["x".into()]),
            duration,
            PracticeMode::FreePractice,
        )
        .recorded_at(now() - Duration::days(days_ago))
    }

    fn aggregator() -> (Arc<MemoryStore>, ProgressAggregator) {
        let store = Arc::new(MemoryStore::new());
        let agg = ProgressAggregator::open(store.clone()).unwrap();
        (store, agg)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn append_updates_summary_and_persists() {
        let (store, agg) = aggregator();
        agg.append(record(0.5, 30.0, 1)).unwrap();
        agg.append(record(1.0, 10.0, 0)).unwrap();

        let overall = agg.overall();
        assert_eq!(overall.total_sessions, 2);
        assert!(close(overall.average_similarity, 0.75));
        assert_eq!(overall.total_practice_secs, 40.0);
        assert_eq!(overall.last_practice_at, Some(now()));

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.snapshot(), agg.snapshot());
    }

    #[test]
    fn remove_recomputes_over_survivors() {
        let (_store, agg) = aggregator();
        let records: Vec<ProgressRecord> = (0..5)
            .map(|i| record(i as f64 / 5.0, 10.0 * i as f64, i))
            .collect();
        for r in &records {
            agg.append(r.clone()).unwrap();
        }

        assert!(agg.remove(records[2].id).unwrap());

        let survivors: Vec<&ProgressRecord> =
            records.iter().filter(|r| r.id != records[2].id).collect();
        let n = survivors.len() as f64;
        let overall = agg.overall();
        assert_eq!(overall.total_sessions, 4);
        assert!(close(
            overall.average_fluency,
            survivors.iter().map(|r| r.metrics.fluency).sum::<f64>() / n
        ));
        assert!(close(
            overall.average_coherence,
            survivors.iter().map(|r| r.metrics.coherence).sum::<f64>() / n
        ));
        assert!(close(
            overall.average_overall,
            survivors.iter().map(|r| r.metrics.overall).sum::<f64>() / n
        ));
        assert_eq!(
            overall.total_practice_secs,
            survivors.iter().map(|r| r.duration_secs).sum::<f64>()
        );
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let (_store, agg) = aggregator();
        agg.append(record(0.5, 30.0, 1)).unwrap();
        let before = agg.snapshot();
        assert!(!agg.remove(Uuid::new_v4()).unwrap());
        assert_eq!(agg.snapshot(), before);
    }

    #[test]
    fn clear_resets_to_zero_value() {
        let (store, agg) = aggregator();
        agg.append(record(0.5, 30.0, 1)).unwrap();
        agg.clear().unwrap();
        assert!(agg.query_at(TimeWindow::All, now()).is_empty());
        assert_eq!(agg.overall(), OverallProgress::default());
        assert!(store.snapshot().records.is_empty());
    }

    #[test]
    fn duplicate_append_is_rejected() {
        let (_store, agg) = aggregator();
        let r = record(0.5, 30.0, 1);
        agg.append(r.clone()).unwrap();
        let err = agg.append(r.clone()).unwrap_err();
        assert!(matches!(err, ProgressError::DuplicateRecord(id) if id == r.id));
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn week_window_is_inclusive_of_boundary() {
        let (_store, agg) = aggregator();
        let boundary = record(0.4, 1.0, 7);
        let stale = record(0.6, 1.0, 8);
        agg.append(boundary.clone()).unwrap();
        agg.append(stale.clone()).unwrap();

        let week = agg.query_at(TimeWindow::Week, now());
        assert_eq!(week, vec![boundary]);
        assert_eq!(agg.query_at(TimeWindow::All, now()).len(), 2);
    }

    #[test]
    fn summarize_window() {
        let (_store, agg) = aggregator();
        agg.append(record(0.2, 5.0, 1)).unwrap();
        agg.append(record(0.8, 5.0, 100)).unwrap();

        let week = agg.summarize_at(TimeWindow::Week, now());
        assert_eq!(week.total_sessions, 1);
        assert!(close(week.average_similarity, 0.2));

        let year = agg.summarize_at(TimeWindow::Year, now());
        assert_eq!(year.total_sessions, 2);
        assert_eq!(year, agg.overall());
    }

    #[test]
    fn persist_failure_keeps_mutation() {
        let (store, agg) = aggregator();
        store.set_fail_saves(true);
        let r = record(0.5, 30.0, 1);
        let err = agg.append(r.clone()).unwrap_err();
        assert!(matches!(err, ProgressError::Persist(_)));
        assert_eq!(agg.get(r.id), Some(r));
        assert_eq!(agg.overall().total_sessions, 1);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn open_rebuilds_stale_summary() {
        let records = vec![record(0.5, 12.0, 1)];
        let stale = ProgressSnapshot {
            records: records.clone(),
            overall: OverallProgress::default(),
        };
        let agg = ProgressAggregator::open(Arc::new(MemoryStore::with_snapshot(stale))).unwrap();
        assert_eq!(agg.overall(), recompute(&records));
    }

    #[test]
    fn reset_with_ignores_stored_history() {
        let stored = ProgressSnapshot {
            records: vec![record(0.5, 12.0, 1)],
            overall: OverallProgress::default(),
        };
        let store = Arc::new(MemoryStore::with_snapshot(stored));
        let agg = ProgressAggregator::reset_with(store.clone());
        assert!(agg.is_empty());
        agg.clear().unwrap();
        assert!(store.snapshot().records.is_empty());
    }

    #[test]
    fn concurrent_appends_are_serialized() {
        let (store, agg) = aggregator();
        let agg = Arc::new(agg);
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let agg = Arc::clone(&agg);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        agg.append(record(0.5, 1.0, (t + i) % 30)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let snap = agg.snapshot();
        assert_eq!(snap.records.len(), 200);
        assert_eq!(snap.overall, recompute(&snap.records));
        assert_eq!(store.save_count(), 200);
        assert_eq!(store.snapshot().records.len(), 200);
    }
}
