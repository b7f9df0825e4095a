//! Subcommand implementations and the state they share.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use retell_progress::{JsonFileStore, ProgressAggregator, ProgressError};

use crate::config::{load_config_from, OutputFormat, RetellConfig};

pub mod clear;
pub mod init;
pub mod practice;
pub mod progress;
pub mod prompt;
pub mod remove;
pub mod retelling;
pub mod stories;

/// Resolved configuration for one invocation.
pub struct Context {
    pub config: RetellConfig,
}

impl Context {
    pub fn load(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = load_config_from(config_path)?;
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        Ok(Self { config })
    }

    pub fn store(&self) -> Arc<JsonFileStore> {
        Arc::new(JsonFileStore::new(&self.config.data_dir))
    }

    /// Open the progress log, refusing to continue over unreadable history.
    pub fn open_progress(&self) -> Result<ProgressAggregator> {
        ProgressAggregator::open(self.store()).map_err(|e| match e {
            ProgressError::CorruptHistory(_) => anyhow::Error::new(e).context(format!(
                "progress data in {} could not be read; run `retell clear --yes` to start over",
                self.config.data_dir.display()
            )),
            other => anyhow::Error::new(other),
        })
    }

    pub fn format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.unwrap_or(self.config.default_format)
    }
}

/// Read a text file, or stdin when the path is `-`.
pub fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read transcript from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}
