//! Core data model types for retell.
//!
//! [`StoryMetrics`] is the report produced for a single retelling or
//! free-practice session. [`PracticeMode`] tags which rule set scored it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Multi-dimensional quality report for one session.
///
/// Every score lies in `[0, 1]`. `overall` is the unweighted mean of the four
/// component scores. `suggestions` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryMetrics {
    /// Lexical overlap with the reference, or a self-consistency proxy in
    /// free practice.
    pub similarity: f64,
    /// Sentence-length regularity.
    pub fluency: f64,
    /// Transition-word density (floor 0.3 for non-empty transcripts).
    pub coherence: f64,
    /// Type/token ratio.
    pub vocabulary: f64,
    /// Mean of the four component scores.
    pub overall: f64,
    /// Ordered, human-readable improvement hints.
    pub suggestions: Vec<String>,
}

impl StoryMetrics {
    /// Build a report from the four component scores, deriving `overall`.
    pub fn from_components(
        similarity: f64,
        fluency: f64,
        coherence: f64,
        vocabulary: f64,
        suggestions: Vec<String>,
    ) -> Self {
        let overall = (similarity + fluency + coherence + vocabulary) / 4.0;
        Self {
            similarity,
            fluency,
            coherence,
            vocabulary,
            overall,
            suggestions,
        }
    }

    pub fn overall_percentage(&self) -> u32 {
        percentage(self.overall)
    }

    pub fn similarity_percentage(&self) -> u32 {
        percentage(self.similarity)
    }

    pub fn fluency_percentage(&self) -> u32 {
        percentage(self.fluency)
    }

    pub fn coherence_percentage(&self) -> u32 {
        percentage(self.coherence)
    }

    pub fn vocabulary_percentage(&self) -> u32 {
        percentage(self.vocabulary)
    }
}

/// Truncating conversion of a `[0, 1]` score to a whole percentage.
pub fn percentage(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0) as u32
}

/// Which kind of session produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeMode {
    /// Retelling a known reference story.
    Retelling,
    /// Unprompted narration with no reference text.
    FreePractice,
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PracticeMode::Retelling => write!(f, "retelling"),
            PracticeMode::FreePractice => write!(f, "free-practice"),
        }
    }
}

impl FromStr for PracticeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "retelling" | "retell" => Ok(PracticeMode::Retelling),
            "free-practice" | "practice" | "free" => Ok(PracticeMode::FreePractice),
            other => Err(format!("unknown practice mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_is_mean_of_components() {
        let m = StoryMetrics::from_components(1.0, 0.5, 0.3, 0.2, vec!["ok".into()]);
        assert!((m.overall - 0.5).abs() < 1e-12);
    }

    #[test]
    fn percentages_truncate() {
        let m = StoryMetrics::from_components(0.999, 0.505, 0.3, 0.0, vec![]);
        assert_eq!(m.similarity_percentage(), 99);
        assert_eq!(m.fluency_percentage(), 50);
        assert_eq!(m.coherence_percentage(), 30);
        assert_eq!(m.vocabulary_percentage(), 0);
        assert_eq!(percentage(1.4), 100);
    }

    #[test]
    fn practice_mode_display_and_parse() {
        assert_eq!(PracticeMode::Retelling.to_string(), "retelling");
        assert_eq!(PracticeMode::FreePractice.to_string(), "free-practice");
        assert_eq!(
            "Practice".parse::<PracticeMode>().unwrap(),
            PracticeMode::FreePractice
        );
        assert!("karaoke".parse::<PracticeMode>().is_err());
    }

    #[test]
    fn metrics_serde_roundtrip() {
        let m = StoryMetrics::from_components(0.4, 0.9, 0.3, 0.75, vec!["Keep going.".into()]);
        let json = serde_json::to_string(&m).unwrap();
        let back: StoryMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert!(json.contains("\"similarity\""));
    }

    #[test]
    fn practice_mode_serializes_kebab_case() {
        let json = serde_json::to_string(&PracticeMode::FreePractice).unwrap();
        assert_eq!(json, "\"free-practice\"");
    }
}
