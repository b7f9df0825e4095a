//! The `retell init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("retell.toml").exists() {
        println!("retell.toml already exists, skipping.");
    } else {
        std::fs::write("retell.toml", SAMPLE_CONFIG)?;
        println!("Created retell.toml");
    }

    println!("\nNext steps:");
    println!("  1. Pick a story: retell stories");
    println!("  2. Score a retelling: retell retelling --story <id> --transcript retelling.txt");
    println!("  3. Check progress: retell progress --window week");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# retell configuration

# Where session history is stored (records.json, overall.json).
data_dir = "${HOME}/.local/share/retell"

# Window for `retell progress`: all, week, month, year
default_window = "all"

# Output format: text, json
default_format = "text"
"#;
