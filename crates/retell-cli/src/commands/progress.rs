//! The `retell progress` command.

use anyhow::Result;
use chrono::Utc;

use retell_progress::{statistics::recompute, TimeWindow};

use super::Context;
use crate::config::OutputFormat;
use crate::output::{print_records, print_summary};

pub fn execute(
    ctx: &Context,
    window: Option<TimeWindow>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let window = window.unwrap_or(ctx.config.default_window);
    let progress = ctx.open_progress()?;

    let records = progress.query_at(window, Utc::now());
    let summary = recompute(&records);

    match ctx.format(format) {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "window": window,
                "summary": summary,
                "records": records,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("Progress ({window})\n");
            print_summary(&summary);
            if records.is_empty() {
                println!("\nNo sessions recorded in this window.");
            } else {
                println!();
                print_records(&records);
            }
        }
    }

    Ok(())
}
