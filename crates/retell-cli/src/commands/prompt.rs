//! The `retell prompt` command.

use anyhow::Result;
use chrono::Utc;

use retell_core::catalog::{generate_prompt, StoryCategory};

pub fn execute(category: Option<StoryCategory>, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(|| Utc::now().timestamp_subsec_nanos() as u64);
    let prompt = generate_prompt(category, seed);

    println!("{}", prompt.text);
    println!("\nprompt id: {}", prompt.id);
    println!(
        "Record your story, then run: retell practice --transcript <file> --duration <secs> --prompt {}",
        prompt.id
    );
    Ok(())
}
