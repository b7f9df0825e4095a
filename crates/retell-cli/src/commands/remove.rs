//! The `retell remove` command.

use anyhow::Result;
use uuid::Uuid;

use super::Context;

pub fn execute(ctx: &Context, id: Uuid) -> Result<()> {
    let progress = ctx.open_progress()?;
    if progress.remove(id)? {
        println!("Removed session {id}");
    } else {
        println!("No session with id {id}");
    }
    Ok(())
}
