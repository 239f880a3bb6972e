//! Data directory and the optional `settings.json` inside it

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

use filterman_core::Format;

pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "filterman.log";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Used when neither `--format` nor the file extension decides
    pub default_format: Format,
    /// Log level when no `-v` flag is given
    pub log_level: Option<String>,
}

impl Settings {
    /// Missing file means defaults; an unreadable or invalid one is an error
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn level(&self) -> Result<Level> {
        match &self.log_level {
            Some(level) => level
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown log level '{}' in settings", level)),
            None => Ok(Level::WARN),
        }
    }
}

/// `$FILTERMAN_HOME`, or `~/.filterman`; created if needed
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("FILTERMAN_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .context("Could not find home directory")?
            .join(".filterman"),
    };

    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    Ok(dir)
}
