//! Error types for the synthesizer.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while rendering a mood piece.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Requested duration is zero or negative.
    #[error("invalid duration: {duration} seconds (must be greater than 0)")]
    InvalidDuration {
        /// The rejected duration.
        duration: i64,
    },

    /// Mood key is not in the profile table and the strict policy is active.
    #[error("unknown mood '{mood}' (expected one of: happy, sad, relaxed, energetic)")]
    UnknownMood {
        /// The rejected mood key.
        mood: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error while encoding.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::InvalidDuration { .. } => "SYNTH_001",
            SynthError::UnknownMood { .. } => "SYNTH_002",
            SynthError::InvalidParameter { .. } => "SYNTH_003",
            SynthError::Io(_) => "SYNTH_004",
        }
    }
}
