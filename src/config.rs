//! Settings: the recognized configuration options and their TOML round-trip.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// User settings loaded from the settings file.
///
/// The core consumes only the autosave interval; `tab_width` and `show_status_bar` are
/// pass-through values the shell reads back when it builds its widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Autosave poll period in milliseconds.
    pub autosave_interval_ms: u64,
    /// Spaces inserted per tab.
    pub tab_width: usize,
    /// Whether the shell shows its status bar.
    pub show_status_bar: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autosave_interval_ms: 1000,
            tab_width: 4,
            show_status_bar: true,
        }
    }
}

impl Settings {
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.autosave_interval_ms)
    }

    /// Load settings from `path`. A missing file is normal (first run) and yields the
    /// defaults; a file that exists but does not parse is a real error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file; using defaults");
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        toml::from_str(&s).with_context(|| format!("Parsing {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self).context("Serializing settings")?;
        fs::write(path, s).with_context(|| format!("Failed writing {}", path.display()))
    }
}
