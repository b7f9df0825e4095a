//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use retell_progress::TimeWindow;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Top-level retell configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetellConfig {
    /// Directory holding `records.json` and `overall.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Window used by `retell progress` when none is given.
    #[serde(default)]
    pub default_window: TimeWindow,
    /// Output format used when none is given.
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_data_dir() -> PathBuf {
    std::env::var("HOME")
        .map(|h| PathBuf::from(h).join(".local").join("share").join("retell"))
        .unwrap_or_else(|_| PathBuf::from(".retell"))
}

impl Default for RetellConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_window: TimeWindow::default(),
            default_format: OutputFormat::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `retell.toml` in the current directory
/// 2. `~/.config/retell/config.toml`
///
/// `RETELL_DATA_DIR` overrides `data_dir` from any file.
pub fn load_config_from(path: Option<&Path>) -> Result<RetellConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("retell.toml");
        if local.exists() {
            Some(local)
        } else {
            config_home()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<RetellConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => RetellConfig::default(),
    };

    if let Ok(dir) = std::env::var("RETELL_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    config.data_dir = PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy()));

    Ok(config)
}

fn config_home() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("retell"))
}
