use crate::gbo::{DEFAULT_DEMAND_UNIT, TimeUnit};
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Server settings, read from an optional TOML file
///
/// ```toml
/// display_unit = "seconds"
/// demand_unit = "kg"
/// export_dir = "reports"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial display unit for operation times
    pub display_unit: TimeUnit,
    /// Initial label of the daily demand quantity
    pub demand_unit: String,
    /// Directory for exports written without an explicit path
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_unit: TimeUnit::Minutes,
            demand_unit: DEFAULT_DEMAND_UNIT.to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load settings from `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config '{}'", path.display()))?;
        Ok(config)
    }
}
