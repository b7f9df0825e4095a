//! Rule tables for improvement suggestions.
//!
//! Each mode has an ordered table of [`Rule`]s. Every rule is evaluated
//! independently against the same [`SuggestionInputs`]; each one that fires
//! appends its message. When nothing fires, the table's fallback is returned.

use crate::model::PracticeMode;

/// Score below which similarity, fluency and coherence rules fire.
pub const SCORE_THRESHOLD: f64 = 0.6;
/// Type/token ratio below which the vocabulary rule fires.
pub const VOCABULARY_THRESHOLD: f64 = 0.5;
/// Minimum retelling length as a fraction of the reference length.
pub const MIN_LENGTH_RATIO: f64 = 0.5;
/// Minimum free-practice duration in seconds.
pub const MIN_DURATION_SECS: f64 = 30.0;
/// Minimum free-practice word count.
pub const MIN_WORD_COUNT: usize = 50;

/// Everything a rule may look at.
///
/// Mode-specific fields are `None` when the mode does not supply them; rules
/// that depend on a missing field never fire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionInputs {
    pub similarity: Option<f64>,
    pub fluency: f64,
    pub coherence: f64,
    pub vocabulary: f64,
    /// Candidate length in characters.
    pub candidate_chars: usize,
    /// Reference length in characters (retelling only).
    pub reference_chars: Option<usize>,
    /// Session duration in seconds (free practice only).
    pub duration_secs: Option<f64>,
    pub word_count: usize,
}

/// A single `(predicate, message)` pair.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier, useful for tests and telemetry.
    pub id: &'static str,
    pub applies: fn(&SuggestionInputs) -> bool,
    pub message: &'static str,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("message", &self.message)
            .finish()
    }
}

/// An ordered rule list plus the message used when no rule fires.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    pub rules: &'static [Rule],
    pub fallback: &'static str,
}

impl RuleTable {
    /// Evaluate every rule in order. Never returns an empty list.
    pub fn evaluate(&self, inputs: &SuggestionInputs) -> Vec<String> {
        let mut out: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| (rule.applies)(inputs))
            .map(|rule| rule.message.to_string())
            .collect();

        if out.is_empty() {
            out.push(self.fallback.to_string());
        }
        out
    }

    /// Identifiers of the rules that fire, in table order.
    pub fn fired(&self, inputs: &SuggestionInputs) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|rule| (rule.applies)(inputs))
            .map(|rule| rule.id)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Shared predicates
// ---------------------------------------------------------------------------

fn low_similarity(i: &SuggestionInputs) -> bool {
    i.similarity.is_some_and(|s| s < SCORE_THRESHOLD)
}

fn low_fluency(i: &SuggestionInputs) -> bool {
    i.fluency < SCORE_THRESHOLD
}

fn low_coherence(i: &SuggestionInputs) -> bool {
    i.coherence < SCORE_THRESHOLD
}

fn low_vocabulary(i: &SuggestionInputs) -> bool {
    i.vocabulary < VOCABULARY_THRESHOLD
}

fn too_brief(i: &SuggestionInputs) -> bool {
    i.reference_chars
        .is_some_and(|r| (i.candidate_chars as f64) < r as f64 * MIN_LENGTH_RATIO)
}

fn too_short(i: &SuggestionInputs) -> bool {
    i.duration_secs.is_some_and(|d| d < MIN_DURATION_SECS)
}

fn too_few_words(i: &SuggestionInputs) -> bool {
    i.word_count < MIN_WORD_COUNT
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

pub const RETELLING: RuleTable = RuleTable {
    rules: &[
        Rule {
            id: "similarity",
            applies: low_similarity,
            message: "Try to include more key details and themes from the original story.",
        },
        Rule {
            id: "fluency",
            applies: low_fluency,
            message: "Work on varying your sentence length to create better flow.",
        },
        Rule {
            id: "coherence",
            applies: low_coherence,
            message: "Use transition words to better connect your ideas and create a smoother narrative.",
        },
        Rule {
            id: "vocabulary",
            applies: low_vocabulary,
            message: "Try using more diverse vocabulary to make your story more engaging.",
        },
        Rule {
            id: "length",
            applies: too_brief,
            message: "Your retelling is quite brief. Try to expand on the details and add more context.",
        },
    ],
    fallback: "Great job! Your retelling captures the essence of the story well. Keep practicing to refine your skills.",
};

pub const FREE_PRACTICE: RuleTable = RuleTable {
    rules: &[
        Rule {
            id: "duration",
            applies: too_short,
            message: "Try to speak for a bit longer to develop your story more fully.",
        },
        Rule {
            id: "fluency",
            applies: low_fluency,
            message: "Work on speaking more smoothly and reducing pauses.",
        },
        Rule {
            id: "coherence",
            applies: low_coherence,
            message: "Use connecting words and phrases to link your ideas together.",
        },
        Rule {
            id: "vocabulary",
            applies: low_vocabulary,
            message: "Experiment with different words to make your story more vivid and engaging.",
        },
        Rule {
            id: "word-count",
            applies: too_few_words,
            message: "Try to expand your story with more details and descriptions.",
        },
    ],
    fallback: "Excellent storytelling! You're doing great. Keep practicing to continue improving.",
};

/// The rule table for a mode.
pub fn table_for(mode: PracticeMode) -> &'static RuleTable {
    match mode {
        PracticeMode::Retelling => &RETELLING,
        PracticeMode::FreePractice => &FREE_PRACTICE,
    }
}
