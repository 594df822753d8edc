//! Post-processing: feed-forward echo and peak normalization.

use crate::error::{SynthError, SynthResult};

/// Echo parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EchoParams {
    /// Delay of the echoed copy in seconds.
    pub delay_seconds: f64,
    /// Gain applied to the echoed copy.
    pub gain: f64,
}

impl Default for EchoParams {
    fn default() -> Self {
        Self {
            delay_seconds: 0.1,
            gain: 0.2,
        }
    }
}

impl EchoParams {
    /// Checks the parameters are usable.
    pub fn validate(&self) -> SynthResult<()> {
        if !(self.delay_seconds.is_finite() && self.delay_seconds >= 0.0) {
            return Err(SynthError::invalid_param(
                "echo.delay_seconds",
                format!("must be >= 0, got {}", self.delay_seconds),
            ));
        }
        if !(0.0..=1.0).contains(&self.gain) {
            return Err(SynthError::invalid_param(
                "echo.gain",
                format!("must be 0.0-1.0, got {}", self.gain),
            ));
        }
        Ok(())
    }

    /// Delay expressed in whole samples.
    pub fn delay_samples(&self, sample_rate: u32) -> usize {
        (self.delay_seconds * sample_rate as f64).round() as usize
    }
}

/// Adds a single delayed, scaled copy of the signal onto itself.
///
/// The copy is zero padded at the head and truncated at the tail, so the
/// output has the same length as the input. Only the dry signal is echoed;
/// there is no feedback.
pub fn apply_echo(samples: &mut [f64], delay_samples: usize, gain: f64) {
    if delay_samples >= samples.len() || gain == 0.0 {
        return;
    }
    // Walk backwards so samples[i - delay] is still the dry value when read.
    for i in (delay_samples..samples.len()).rev() {
        samples[i] += gain * samples[i - delay_samples];
    }
}

/// Largest absolute sample value, 0.0 for an empty buffer.
pub fn peak(samples: &[f64]) -> f64 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f64, |a, b| a.max(b))
}

/// Scales the signal so its peak magnitude equals `target_peak`.
///
/// Returns the peak before scaling. A silent buffer is left untouched.
pub fn normalize(samples: &mut [f64], target_peak: f64) -> f64 {
    let current_peak = peak(samples);
    if current_peak > 0.0 {
        for sample in samples.iter_mut() {
            *sample = *sample * target_peak / current_peak;
        }
    }
    current_peak
}
