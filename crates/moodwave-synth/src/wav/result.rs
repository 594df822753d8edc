//! Encoded rendering.

use crate::error::SynthResult;
use crate::synth::AudioBuffer;

use super::format::WavFormat;
use super::writer::{samples_to_pcm16, write_wav_to_vec};

/// An [`AudioBuffer`] encoded as a WAV file.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hex digest of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono samples.
    ///
    /// # Arguments
    /// * `samples` - Samples in [-1.0, 1.0]; out-of-range values are clipped
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Returns
    /// The encoded file and its PCM hash, or [`SynthError::Io`] if the
    /// payload does not fit a RIFF chunk
    ///
    /// [`SynthError::Io`]: crate::error::SynthError::Io
    pub fn from_mono(samples: &[f64], sample_rate: u32) -> SynthResult<Self> {
        let pcm = samples_to_pcm16(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(sample_rate), &pcm)?;

        Ok(Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        })
    }

    /// Encodes a rendered buffer.
    pub fn from_buffer(buffer: &AudioBuffer) -> SynthResult<Self> {
        Self::from_mono(&buffer.samples, buffer.sample_rate)
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
