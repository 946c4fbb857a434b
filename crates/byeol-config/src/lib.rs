//! Configuration loading for the byeol night-sky app.
//!
//! Reads an optional `config.toml` from the platform config directory.
//! Every field has a default and the file itself is optional: a missing
//! or malformed config never stops a decorative program, it just falls
//! back to the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use byeol_core::{AnimationSpeed, SceneKind};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Default frame interval in milliseconds (~30 fps).
const DEFAULT_FRAME_MS: u64 = 33;

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scene shown at startup.
    pub scene: SceneKind,
    /// Animation speed preset.
    pub speed: AnimationSpeed,
    /// Seed for a reproducible sky; unset means seed from the clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Frame interval in milliseconds.
    pub frame_ms: u64,
    /// Whether shooting stars spawn.
    pub meteors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            speed: AnimationSpeed::default(),
            seed: None,
            frame_ms: DEFAULT_FRAME_MS,
            meteors: true,
        }
    }
}

impl Config {
    /// Load the config file from the platform config directory, falling
    /// back to defaults if it is missing or unreadable.
    pub fn load() -> Self {
        config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load and parse a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Parse a TOML config document.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("parse config: {e}"))
    }
}

/// Path of the config file, if a home directory can be resolved.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "byeol").map(|dirs| dirs.config_dir().join("config.toml"))
}
