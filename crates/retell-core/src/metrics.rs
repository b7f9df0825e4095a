//! Lexical text metrics.
//!
//! Four deliberately naive heuristics, each a pure function returning a score
//! in `[0, 1]`. Tokens are whitespace-separated and case-folded; nothing here
//! strips punctuation, so `"however,"` is not the connective `"however"`.

use std::collections::HashSet;

/// Discourse connectives counted by [`coherence`].
pub const TRANSITION_WORDS: [&str; 10] = [
    "however",
    "therefore",
    "meanwhile",
    "furthermore",
    "consequently",
    "additionally",
    "moreover",
    "nevertheless",
    "thus",
    "hence",
];

/// Minimum coherence score, regardless of connective count.
pub const COHERENCE_FLOOR: f64 = 0.3;

/// Connective count at which coherence saturates at 1.0.
const COHERENCE_SATURATION: f64 = 10.0;

/// Variance (in squared characters) at which fluency reaches 0.0.
const FLUENCY_VARIANCE_SCALE: f64 = 100.0;

/// Case-folded, non-empty whitespace tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length of a text in characters (not bytes).
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Jaccard index of the two texts' token sets.
///
/// Returns 0.0 when both texts are blank.
pub fn similarity(reference: &str, candidate: &str) -> f64 {
    let reference: HashSet<String> = tokens(reference).collect();
    let candidate: HashSet<String> = tokens(candidate).collect();

    let union = reference.union(&candidate).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = reference.intersection(&candidate).count();
    intersection as f64 / union as f64
}

/// Sentence-length regularity: `clamp(1 - variance / 100, 0, 1)`.
///
/// Sentences are split on `.`, `!` and `?`; lengths are character counts of
/// the trimmed sentence. Returns 0.0 when there is no sentence.
pub fn fluency(text: &str) -> f64 {
    let lengths: Vec<f64> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| char_count(s) as f64)
        .collect();

    if lengths.is_empty() {
        return 0.0;
    }

    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    let variance = lengths.iter().map(|len| (len - mean).powi(2)).sum::<f64>() / n;

    (1.0 - variance / FLUENCY_VARIANCE_SCALE).clamp(0.0, 1.0)
}

/// Transition-word density: `clamp(count / 10, 0.3, 1.0)`.
pub fn coherence(text: &str) -> f64 {
    let count = tokens(text)
        .filter(|t| TRANSITION_WORDS.contains(&t.as_str()))
        .count();
    (count as f64 / COHERENCE_SATURATION).clamp(COHERENCE_FLOOR, 1.0)
}

/// Type/token ratio. Returns 0.0 for text without tokens.
pub fn vocabulary(text: &str) -> f64 {
    let all: Vec<String> = tokens(text).collect();
    if all.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = all.iter().map(String::as_str).collect();
    distinct.len() as f64 / all.len() as f64
}

/// Pluggable scoring backend.
///
/// Every method keeps the `(text...) -> [0, 1]` shape so a model-backed
/// implementation can replace the lexical heuristics without touching callers.
pub trait MetricBackend: Send + Sync {
    fn similarity(&self, reference: &str, candidate: &str) -> f64;
    fn fluency(&self, text: &str) -> f64;
    fn coherence(&self, text: &str) -> f64;
    fn vocabulary(&self, text: &str) -> f64;
}

/// The offline, deterministic heuristics defined in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalMetrics;

impl MetricBackend for LexicalMetrics {
    fn similarity(&self, reference: &str, candidate: &str) -> f64 {
        similarity(reference, candidate)
    }

    fn fluency(&self, text: &str) -> f64 {
        fluency(text)
    }

    fn coherence(&self, text: &str) -> f64 {
        coherence(text)
    }

    fn vocabulary(&self, text: &str) -> f64 {
        vocabulary(text)
    }
}
