//! retell-core: lexical scoring engine, suggestion rules, and story catalog.
//!
//! This crate turns transcript text into [`model::StoryMetrics`] reports. It
//! performs no I/O: transcripts come from a speech-to-text collaborator and
//! reference stories from a [`catalog::StoryCatalog`].

pub mod catalog;
pub mod engine;
pub mod metrics;
pub mod model;
pub mod suggestions;
