//! Scoring engine orchestrator.
//!
//! Runs a [`MetricBackend`] over transcript text for the two supported modes
//! and assembles a [`StoryMetrics`] report. Scoring never fails: degenerate
//! input degrades to low scores instead.

use crate::metrics::{char_count, word_count, LexicalMetrics, MetricBackend};
use crate::model::{PracticeMode, StoryMetrics};
use crate::suggestions::{table_for, SuggestionInputs};

/// Stateless scorer for retellings and free-practice narrations.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine<B = LexicalMetrics> {
    backend: B,
}

impl ScoringEngine<LexicalMetrics> {
    /// Engine backed by the lexical heuristics.
    pub fn lexical() -> Self {
        Self::default()
    }
}

impl<B: MetricBackend> ScoringEngine<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Score a retelling of `reference`.
    ///
    /// Similarity compares against the reference; the other metrics look at
    /// the candidate only.
    pub fn score_retelling(&self, reference: &str, candidate: &str) -> StoryMetrics {
        let words = word_count(candidate);
        let similarity = self.backend.similarity(reference, candidate);
        let fluency = self.backend.fluency(candidate);
        let coherence = self.backend.coherence(candidate);
        let vocabulary = self.backend.vocabulary(candidate);

        let suggestions = table_for(PracticeMode::Retelling).evaluate(&SuggestionInputs {
            similarity: Some(similarity),
            fluency,
            coherence,
            vocabulary,
            candidate_chars: char_count(candidate),
            reference_chars: Some(char_count(reference)),
            duration_secs: None,
            word_count: words,
        });

        let metrics =
            StoryMetrics::from_components(similarity, fluency, coherence, vocabulary, suggestions);
        tracing::debug!(
            words,
            similarity = metrics.similarity,
            overall = metrics.overall,
            "scored retelling"
        );
        metrics
    }

    /// Score an unprompted narration lasting `duration_secs`.
    ///
    /// With no reference to compare against, similarity is the mean of
    /// fluency, coherence and vocabulary. Negative durations count as zero.
    /// A transcript without any words scores zero across the board, coherence
    /// floor included.
    pub fn score_practice(&self, transcript: &str, duration_secs: f64) -> StoryMetrics {
        let words = word_count(transcript);
        let (fluency, coherence, vocabulary) = if words == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (
                self.backend.fluency(transcript),
                self.backend.coherence(transcript),
                self.backend.vocabulary(transcript),
            )
        };
        let similarity = (fluency + coherence + vocabulary) / 3.0;

        let suggestions = table_for(PracticeMode::FreePractice).evaluate(&SuggestionInputs {
            similarity: None,
            fluency,
            coherence,
            vocabulary,
            candidate_chars: char_count(transcript),
            reference_chars: None,
            duration_secs: Some(duration_secs.max(0.0)),
            word_count: words,
        });

        let metrics =
            StoryMetrics::from_components(similarity, fluency, coherence, vocabulary, suggestions);
        tracing::debug!(
            words,
            duration_secs,
            overall = metrics.overall,
            "scored free practice"
        );
        metrics
    }
}
