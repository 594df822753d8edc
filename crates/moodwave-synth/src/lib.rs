//! moodwave synthesizer
//!
//! Converts a mood label and a duration into a normalized mono audio buffer.
//!
//! # Overview
//!
//! Each supported mood maps to a fixed profile (root pitch, scale, tempo).
//! A piece is a random walk over that scale:
//!
//! - **Sequencing** - pick a scale degree and a note length (weighted toward
//!   short notes) until the duration is filled
//! - **Rendering** - fundamental plus second and third harmonics, evaluated on
//!   the global timeline so phase is continuous
//! - **Envelope** - fractional ADSR per note
//! - **Echo** - one 100 ms feed-forward copy at 0.2 gain
//! - **Normalization** - scale to a peak of exactly 1.0
//!
//! # Determinism
//!
//! All randomness flows through [`RandomSource`]. Given the same seed (or the
//! same replayed picks), output is bit-identical across runs. Seeded runs use
//! PCG32 via [`create_rng`].
//!
//! # Example
//!
//! ```
//! use moodwave_synth::{create_rng, synthesize, WavResult};
//!
//! let mut rng = create_rng(42);
//! let buffer = synthesize("sad", 5, &mut rng)?;
//! assert_eq!(buffer.len(), 5 * 44100);
//!
//! let wav = WavResult::from_buffer(&buffer)?;
//! assert_eq!(&wav.wav_data[0..4], b"RIFF");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`synth`] - Main entry point ([`synthesize`], [`MoodWaveformSynthesizer`])
//! - [`profile`] - Mood table and unknown-mood policy
//! - [`sequence`] - Note sequencing
//! - [`tone`] - Harmonic tone rendering
//! - [`envelope`] - Fractional ADSR envelope
//! - [`effects`] - Echo and normalization
//! - [`rng`] - Injectable randomness
//! - [`wav`] - Deterministic WAV encoder

pub mod effects;
pub mod envelope;
pub mod error;
pub mod profile;
pub mod rng;
pub mod sequence;
pub mod synth;
pub mod tone;
pub mod wav;

// Re-export main types at crate root
pub use error::{SynthError, SynthResult};
pub use profile::{resolve_mood, Mood, MoodPolicy, MoodProfile};
pub use rng::{create_rng, RandomSource, ReplaySource};
pub use sequence::NoteEvent;
pub use synth::{
    synthesize, AudioBuffer, MoodWaveformSynthesizer, Rendering, SynthConfig, SAMPLE_RATE,
};
pub use wav::WavResult;
