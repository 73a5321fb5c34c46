// Configuration file support

use crate::filter::Filter;
use crate::store::Variant;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings read from `config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,
    /// Seed file to load instead of the built-in seed
    pub seed: Option<PathBuf>,
    pub color: bool,
    /// Filter applied when a session starts
    pub filter: Filter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            seed: None,
            color: true,
            filter: Filter::default(),
        }
    }
}

impl Config {
    /// `$CONFIG_DIR/tasklist/config.yaml`, if a config dir exists on this platform
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tasklist").join("config.yaml"))
    }

    /// Load from an explicit path, or from the default path when present
    ///
    /// A missing explicit path is an error; a missing default path yields
    /// the default config.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(eyre!("Config file not found: {}", path.display()));
                }
                Self::load_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        // Relative seed paths are resolved against the config file's directory
        config.seed = config.seed.map(|seed| match path.parent() {
            Some(dir) if seed.is_relative() => dir.join(seed),
            _ => seed,
        });

        info!(path = %path.display(), variant = %config.variant, "Loaded config");
        Ok(config)
    }
}
