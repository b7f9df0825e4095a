//! Aggregator persistence integration tests.
//!
//! Scores sessions with the real engine, records them through a JSON file
//! store, and reopens the store the way a host application would at startup.

use std::sync::Arc;

use chrono::{Duration, Utc};
use retell_core::catalog::{generate_prompt, BuiltinCatalog, StoryCatalog};
use retell_core::engine::ScoringEngine;
use retell_core::model::PracticeMode;
use retell_progress::{
    JsonFileStore, OverallProgress, ProgressAggregator, ProgressError, ProgressRecord,
    ProgressStore, TimeWindow,
};

fn scored_sessions() -> Vec<ProgressRecord> {
    let engine = ScoringEngine::lexical();
    let catalog = BuiltinCatalog::new();
    let story = &catalog.stories()[0];
    let prompt = generate_prompt(None, 3);

    let retelling = engine.score_retelling(
        &story.content,
        "In 2030 Sarah built an AI named Aria. However Aria asked what makes you human.",
    );
    let practice = engine.score_practice(
        "I was walking home. Meanwhile the rain started. Therefore I ran.",
        18.0,
    );

    vec![
        ProgressRecord::new(retelling, 64.0, PracticeMode::Retelling)
            .with_story(story.id)
            .recorded_at(Utc::now() - Duration::days(3)),
        ProgressRecord::new(practice, 18.0, PracticeMode::FreePractice)
            .with_prompt(prompt.id)
            .recorded_at(Utc::now() - Duration::days(45)),
    ]
}

#[test]
fn history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn ProgressStore> = Arc::new(JsonFileStore::new(dir.path()));

    let sessions = scored_sessions();
    {
        let agg = ProgressAggregator::open(Arc::clone(&store)).unwrap();
        for s in &sessions {
            agg.append(s.clone()).unwrap();
        }
    }

    let reopened = ProgressAggregator::open(store).unwrap();
    assert_eq!(reopened.records(), sessions);
    assert_eq!(reopened.overall().total_sessions, 2);
    assert_eq!(reopened.overall().total_practice_secs, 82.0);
    assert_eq!(reopened.query(TimeWindow::Week).len(), 1);
    assert_eq!(reopened.query(TimeWindow::Month).len(), 1);
    assert_eq!(reopened.query(TimeWindow::Year).len(), 2);
}

#[test]
fn removal_and_clear_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn ProgressStore> = Arc::new(JsonFileStore::new(dir.path()));
    let sessions = scored_sessions();

    let agg = ProgressAggregator::open(Arc::clone(&store)).unwrap();
    for s in &sessions {
        agg.append(s.clone()).unwrap();
    }
    assert!(agg.remove(sessions[0].id).unwrap());

    let loaded = store.load().unwrap();
    assert_eq!(loaded.records, vec![sessions[1].clone()]);
    assert_eq!(loaded.overall, agg.overall());

    agg.clear().unwrap();
    let loaded = store.load().unwrap();
    assert!(loaded.records.is_empty());
    assert_eq!(loaded.overall, OverallProgress::default());
}

#[test]
fn corrupt_history_is_surfaced_not_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let json_store = JsonFileStore::new(dir.path());
    std::fs::write(json_store.records_path(), "[{ \"id\": \"not-a-record\" }]").unwrap();
    let store: Arc<dyn ProgressStore> = Arc::new(json_store.clone());

    let err = ProgressAggregator::open(Arc::clone(&store)).unwrap_err();
    assert!(matches!(err, ProgressError::CorruptHistory(_)), "got {err}");
    // The damaged file is left alone until the host decides to reset.
    let raw = std::fs::read_to_string(json_store.records_path()).unwrap();
    assert!(raw.contains("not-a-record"));

    let agg = ProgressAggregator::reset_with(store);
    agg.append(scored_sessions().remove(0)).unwrap();
    assert_eq!(json_store.load().unwrap().records.len(), 1);
}

#[test]
fn unavailable_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let json_store = JsonFileStore::new(dir.path());
    std::fs::create_dir_all(json_store.records_path()).unwrap();

    let agg = ProgressAggregator::open(Arc::new(json_store)).unwrap();
    assert!(agg.is_empty());
    assert_eq!(agg.overall(), OverallProgress::default());

    let err = agg.append(scored_sessions().remove(0)).unwrap_err();
    assert!(matches!(err, ProgressError::Persist(_)));
    assert_eq!(agg.len(), 1);
}

#[test]
fn non_finite_duration_does_not_poison_history() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn ProgressStore> = Arc::new(JsonFileStore::new(dir.path()));
    let metrics = ScoringEngine::lexical().score_practice("Once upon a time.", 5.0);

    {
        let agg = ProgressAggregator::open(Arc::clone(&store)).unwrap();
        agg.append(ProgressRecord::new(
            metrics.clone(),
            f64::INFINITY,
            PracticeMode::FreePractice,
        ))
        .unwrap();

        let mut forged = ProgressRecord::new(metrics, 12.0, PracticeMode::FreePractice);
        forged.duration_secs = f64::NAN;
        agg.append(forged).unwrap();
    }

    let reopened = ProgressAggregator::open(store).unwrap();
    assert_eq!(reopened.len(), 2);
    assert!(reopened.records().iter().all(|r| r.duration_secs == 0.0));
    assert_eq!(reopened.overall().total_practice_secs, 0.0);
}
