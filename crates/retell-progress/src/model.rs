//! Progress data model: scored sessions, the derived summary, and windows.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use retell_core::model::{PracticeMode, StoryMetrics};

/// Longest duration a single session can record.
pub const MAX_SESSION_SECS: f64 = 86_400.0;

/// Clamp a session length to `[0, MAX_SESSION_SECS]`. Non-finite values
/// become zero so every stored duration survives a JSON round trip.
pub fn sanitize_duration(secs: f64) -> f64 {
    if secs.is_finite() {
        secs.clamp(0.0, MAX_SESSION_SECS)
    } else {
        0.0
    }
}

/// One scored session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Unique record identity.
    pub id: Uuid,
    /// When the session was completed.
    pub recorded_at: DateTime<Utc>,
    /// Reference story, for retellings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_id: Option<Uuid>,
    /// Practice prompt, for free practice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_id: Option<Uuid>,
    /// The session's score report.
    pub metrics: StoryMetrics,
    /// Wall-clock session length in seconds.
    pub duration_secs: f64,
    /// Which rule set scored the session.
    pub mode: PracticeMode,
}

impl ProgressRecord {
    /// A new record stamped now. The duration goes through
    /// [`sanitize_duration`].
    pub fn new(metrics: StoryMetrics, duration_secs: f64, mode: PracticeMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            story_id: None,
            prompt_id: None,
            metrics,
            duration_secs: sanitize_duration(duration_secs),
            mode,
        }
    }

    pub fn with_story(mut self, story_id: Uuid) -> Self {
        self.story_id = Some(story_id);
        self
    }

    pub fn with_prompt(mut self, prompt_id: Uuid) -> Self {
        self.prompt_id = Some(prompt_id);
        self
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn recorded_at(mut self, at: DateTime<Utc>) -> Self {
        self.recorded_at = at;
        self
    }
}

/// Summary statistics derived from the full record log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallProgress {
    pub total_sessions: usize,
    pub average_similarity: f64,
    pub average_fluency: f64,
    pub average_coherence: f64,
    pub average_vocabulary: f64,
    pub average_overall: f64,
    /// Sum of session durations in seconds.
    pub total_practice_secs: f64,
    /// Timestamp of the most recent session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_practice_at: Option<DateTime<Utc>>,
}

impl OverallProgress {
    /// True for the zero value (no sessions recorded).
    pub fn is_empty(&self) -> bool {
        self.total_sessions == 0
    }
}

/// The record log together with its summary, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub records: Vec<ProgressRecord>,
    pub overall: OverallProgress,
}

/// Relative reporting window ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    /// Last 365 days.
    Year,
}

impl TimeWindow {
    /// Window length in days, or `None` for all time.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Week => Some(7),
            TimeWindow::Month => Some(30),
            TimeWindow::Year => Some(365),
        }
    }

    /// Earliest timestamp inside the window (inclusive).
    pub fn lower_bound(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|d| now - Duration::days(d))
    }

    /// Whether `at` falls in `[now - window, now]`. `All` contains everything.
    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.lower_bound(now) {
            None => true,
            Some(from) => at >= from && at <= now,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::All => write!(f, "all"),
            TimeWindow::Week => write!(f, "week"),
            TimeWindow::Month => write!(f, "month"),
            TimeWindow::Year => write!(f, "year"),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "week" | "7d" => Ok(TimeWindow::Week),
            "month" | "30d" => Ok(TimeWindow::Month),
            "year" | "365d" => Ok(TimeWindow::Year),
            other => Err(format!("unknown time window: {other}")),
        }
    }
}
