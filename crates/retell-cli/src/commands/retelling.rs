//! The `retell retelling` command.

use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use retell_core::catalog::{BuiltinCatalog, StoryCatalog};
use retell_core::engine::ScoringEngine;
use retell_core::model::PracticeMode;
use retell_progress::ProgressRecord;

use super::{read_text, Context};
use crate::config::OutputFormat;
use crate::output::print_score;

pub fn execute(
    ctx: &Context,
    story_id: Option<Uuid>,
    reference_path: Option<PathBuf>,
    transcript_path: PathBuf,
    duration: f64,
    no_save: bool,
    format: Option<OutputFormat>,
) -> Result<()> {
    anyhow::ensure!(
        duration.is_finite() && duration >= 0.0,
        "duration must be a finite, non-negative number of seconds"
    );

    let (reference, story_id) = match (story_id, reference_path) {
        (Some(id), _) => {
            let catalog = BuiltinCatalog::new();
            let story = catalog.story(id).ok_or_else(|| {
                anyhow::anyhow!("unknown story id: {id} (see `retell stories`)")
            })?;
            (story.content.clone(), Some(id))
        }
        (None, Some(path)) => (read_text(&path)?, None),
        (None, None) => anyhow::bail!("either --story or --reference is required"),
    };
    let transcript = read_text(&transcript_path)?;

    let metrics = ScoringEngine::lexical().score_retelling(&reference, &transcript);

    let record = if no_save {
        None
    } else {
        let progress = ctx.open_progress()?;
        let mut record = ProgressRecord::new(metrics.clone(), duration, PracticeMode::Retelling);
        if let Some(id) = story_id {
            record = record.with_story(id);
        }
        progress.append(record.clone())?;
        Some(record)
    };

    print_score(&metrics, record.as_ref(), ctx.format(format))
}
