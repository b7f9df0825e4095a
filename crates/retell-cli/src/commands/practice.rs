//! The `retell practice` command.

use std::path::PathBuf;

use anyhow::Result;
use uuid::Uuid;

use retell_core::engine::ScoringEngine;
use retell_core::model::PracticeMode;
use retell_progress::ProgressRecord;

use super::{read_text, Context};
use crate::config::OutputFormat;
use crate::output::print_score;

pub fn execute(
    ctx: &Context,
    transcript_path: PathBuf,
    duration: f64,
    prompt_id: Option<Uuid>,
    no_save: bool,
    format: Option<OutputFormat>,
) -> Result<()> {
    anyhow::ensure!(
        duration.is_finite() && duration >= 0.0,
        "duration must be a finite, non-negative number of seconds"
    );

    let transcript = read_text(&transcript_path)?;
    let metrics = ScoringEngine::lexical().score_practice(&transcript, duration);

    let record = if no_save {
        None
    } else {
        let progress = ctx.open_progress()?;
        let mut record = ProgressRecord::new(metrics.clone(), duration, PracticeMode::FreePractice);
        if let Some(id) = prompt_id {
            record = record.with_prompt(id);
        }
        progress.append(record.clone())?;
        Some(record)
    };

    print_score(&metrics, record.as_ref(), ctx.format(format))
}
