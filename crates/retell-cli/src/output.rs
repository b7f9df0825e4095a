//! Console rendering for score reports and progress summaries.

use anyhow::Result;
use comfy_table::{Cell, Table};

use retell_core::model::{percentage, StoryMetrics};
use retell_progress::{OverallProgress, ProgressRecord};

use crate::config::OutputFormat;

/// Print a freshly scored session. `record` is set when it was saved.
pub fn print_score(
    metrics: &StoryMetrics,
    record: Option<&ProgressRecord>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "metrics": metrics,
                "record_id": record.map(|r| r.id),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let mut table = Table::new();
            table.set_header(vec!["Metric", "Score"]);
            for (name, score) in [
                ("Overall", metrics.overall),
                ("Similarity", metrics.similarity),
                ("Fluency", metrics.fluency),
                ("Coherence", metrics.coherence),
                ("Vocabulary", metrics.vocabulary),
            ] {
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(format!("{}%", percentage(score))),
                ]);
            }
            println!("{table}");

            println!("\nSuggestions:");
            for s in &metrics.suggestions {
                println!("  - {s}");
            }

            if let Some(r) = record {
                println!("\nRecorded session {}", r.id);
            }
        }
    }
    Ok(())
}

/// Format seconds as `m:ss`.
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn print_summary(summary: &OverallProgress) {
    println!("Sessions:        {}", summary.total_sessions);
    println!(
        "Practice time:   {}",
        format_duration(summary.total_practice_secs)
    );
    match summary.last_practice_at {
        Some(at) => println!("Last practice:   {}", at.format("%Y-%m-%d %H:%M")),
        None => println!("Last practice:   never"),
    }
    println!(
        "Averages:        overall {}%, similarity {}%, fluency {}%, coherence {}%, vocabulary {}%",
        percentage(summary.average_overall),
        percentage(summary.average_similarity),
        percentage(summary.average_fluency),
        percentage(summary.average_coherence),
        percentage(summary.average_vocabulary),
    );
}

pub fn print_records(records: &[ProgressRecord]) {
    let mut table = Table::new();
    table.set_header(vec!["Date", "Mode", "Overall", "Duration", "Id"]);
    for r in records {
        table.add_row(vec![
            Cell::new(r.recorded_at.format("%Y-%m-%d %H:%M")),
            Cell::new(r.mode),
            Cell::new(format!("{}%", r.metrics.overall_percentage())),
            Cell::new(format_duration(r.duration_secs)),
            Cell::new(r.id),
        ]);
    }
    println!("{table}");
}
