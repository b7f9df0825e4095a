//! Summary statistics over the record log.
//!
//! Always a full recompute: the summary is never patched incrementally, so
//! removals and clears cannot leave drift behind.

use chrono::{DateTime, Utc};

use crate::model::{OverallProgress, ProgressRecord, TimeWindow};

/// Rebuild the summary from every record. Empty input yields the zero value.
pub fn recompute(records: &[ProgressRecord]) -> OverallProgress {
    if records.is_empty() {
        return OverallProgress::default();
    }

    let n = records.len() as f64;
    let mean = |field: fn(&ProgressRecord) -> f64| records.iter().map(field).sum::<f64>() / n;

    OverallProgress {
        total_sessions: records.len(),
        average_similarity: mean(|r| r.metrics.similarity),
        average_fluency: mean(|r| r.metrics.fluency),
        average_coherence: mean(|r| r.metrics.coherence),
        average_vocabulary: mean(|r| r.metrics.vocabulary),
        average_overall: mean(|r| r.metrics.overall),
        total_practice_secs: records.iter().map(|r| r.duration_secs).sum(),
        last_practice_at: records.iter().map(|r| r.recorded_at).max(),
    }
}

/// Records inside `window` relative to `now`, in log order.
pub fn filter_window<'a>(
    records: &'a [ProgressRecord],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Vec<&'a ProgressRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.recorded_at, now))
        .collect()
}
