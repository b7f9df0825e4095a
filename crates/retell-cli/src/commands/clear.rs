//! The `retell clear` command.

use anyhow::Result;

use retell_progress::{ProgressAggregator, ProgressError};

use super::Context;

pub fn execute(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("refusing to delete all sessions without --yes");
    }

    // Clearing is the recovery path for unreadable history, so skip it.
    let progress = match ProgressAggregator::open(ctx.store()) {
        Ok(progress) => progress,
        Err(ProgressError::CorruptHistory(e)) => {
            tracing::warn!("discarding unreadable progress history: {e}");
            ProgressAggregator::reset_with(ctx.store())
        }
        Err(e) => return Err(e.into()),
    };

    let count = progress.len();
    progress.clear()?;
    println!("Cleared {count} session(s).");
    Ok(())
}
