//! CLI configuration.
//!
//! Settings live in a JSON file. Lookup order:
//! 1. `--config PATH` (must exist)
//! 2. `<config dir>/moodwave/config.json` if present
//!    (`~/.config/moodwave/config.json` on Linux)
//! 3. built-in defaults
//!
//! Missing keys take their defaults; unknown keys are rejected.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for the `moodwave` binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoodwaveConfig {
    /// Directory generated WAV files are written to.
    pub output_dir: PathBuf,
    /// Shortest accepted `generate` duration, inclusive.
    pub min_duration_seconds: i64,
    /// Longest accepted `generate` duration, inclusive.
    pub max_duration_seconds: i64,
    /// Generated files older than this are removed by cleanup.
    pub max_file_age_seconds: u64,
    /// Run cleanup before every `generate`.
    pub cleanup_on_generate: bool,
    /// Let unknown moods through to the synthesizer's fallback profile.
    pub allow_unknown_moods: bool,
}

impl Default for MoodwaveConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("audio_files"),
            min_duration_seconds: 5,
            max_duration_seconds: 60,
            max_file_age_seconds: 3600,
            cleanup_on_generate: true,
            allow_unknown_moods: false,
        }
    }
}

impl MoodwaveConfig {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("moodwave").join("config.json"))
    }

    /// Resolves and loads the configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads and validates a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Checks the duration bounds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.min_duration_seconds < 1 {
            bail!(
                "min_duration_seconds must be at least 1, got {}",
                self.min_duration_seconds
            );
        }
        if self.min_duration_seconds > self.max_duration_seconds {
            bail!(
                "min_duration_seconds ({}) exceeds max_duration_seconds ({})",
                self.min_duration_seconds,
                self.max_duration_seconds
            );
        }
        Ok(())
    }

    /// Retention age as a [`Duration`].
    pub fn max_file_age(&self) -> Duration {
        Duration::from_secs(self.max_file_age_seconds)
    }
}
