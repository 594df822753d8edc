//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; in that mode exactly one of these
//! documents is written to stdout and nothing else.

use serde::{Deserialize, Serialize};

/// Stable error codes for request failures.
pub mod error_codes {
    /// Mood is not in the table
    pub const INVALID_MOOD: &str = "CLI_001";
    /// Duration is outside the configured bounds
    pub const INVALID_DURATION: &str = "CLI_002";
    /// Synthesis failed
    pub const SYNTHESIS: &str = "CLI_003";
    /// Reading or writing a file failed
    pub const IO: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g. "CLI_001", "SYNTH_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<JsonError>,
}

impl GenerateOutput {
    pub fn success(result: GenerateResult) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            result: None,
            errors,
        }
    }
}

/// Details of a generated file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResult {
    /// Mood key as requested
    pub mood: String,
    /// Profile actually used
    pub profile: String,
    /// True when an unknown mood fell back to the default profile
    pub fell_back: bool,
    pub duration_seconds: i64,
    /// Seed for reproducing the run
    pub seed: u32,
    pub note_count: usize,
    pub num_samples: usize,
    pub sample_rate: u32,
    pub path: String,
    pub size_bytes: u64,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
    pub duration_ms: u64,
    /// Files removed by the pre-generate cleanup
    pub cleaned_files: usize,
}

/// One entry of `moods --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodInfo {
    pub mood: String,
    pub base_frequency_hz: f64,
    pub scale_frequencies_hz: Vec<f64>,
    pub note_tempo_seconds: f64,
    /// True for the profile unknown moods fall back to
    pub fallback: bool,
}

/// Output of `cleanup --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupOutput {
    pub dir: String,
    pub max_age_seconds: u64,
    pub dry_run: bool,
    pub removed: Vec<String>,
    pub kept: usize,
    pub bytes_freed: u64,
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    pub path: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Samples per channel
    pub num_samples: u32,
    pub duration_seconds: f64,
    /// Peak absolute amplitude in [0, 1]
    pub peak: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
}
