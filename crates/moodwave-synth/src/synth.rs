//! The mood waveform synthesizer.
//!
//! Pipeline, in order: sequence notes from the mood profile, render each note
//! as a harmonic tone on the global timeline, shape it with the ADSR
//! envelope, concatenate, add a single echo, normalize to full scale.

use tracing::{debug, warn};

use crate::effects::{apply_echo, normalize, peak, EchoParams};
use crate::envelope::AdsrShape;
use crate::error::{SynthError, SynthResult};
use crate::profile::{resolve_mood, Mood, MoodPolicy};
use crate::rng::RandomSource;
use crate::sequence::{sequence_notes, NoteEvent};
use crate::tone::HarmonicTone;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Rendered mono signal.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Samples in [-1.0, 1.0].
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        peak(&self.samples)
    }
}

/// Everything produced by one synthesis call.
#[derive(Debug, Clone)]
pub struct Rendering {
    /// The normalized signal.
    pub buffer: AudioBuffer,
    /// Notes in playback order.
    pub notes: Vec<NoteEvent>,
    /// Mood whose profile was used.
    pub mood: Mood,
    /// True when the requested mood was unknown and the fallback was used.
    pub fell_back: bool,
}

/// Synthesizer settings. Defaults reproduce the reference sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Unknown mood handling.
    pub mood_policy: MoodPolicy,
    /// Envelope applied to every note.
    pub envelope: AdsrShape,
    /// Echo added after concatenation.
    pub echo: EchoParams,
    /// Peak magnitude after normalization.
    pub target_peak: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            mood_policy: MoodPolicy::Fallback,
            envelope: AdsrShape::default(),
            echo: EchoParams::default(),
            target_peak: 1.0,
        }
    }
}

/// Converts a `(mood, duration)` pair into a normalized mono buffer.
///
/// Holds no mutable state; one instance may be shared across threads as long
/// as each call gets its own random source.
#[derive(Debug, Clone, Default)]
pub struct MoodWaveformSynthesizer {
    config: SynthConfig,
}

impl MoodWaveformSynthesizer {
    /// Creates a synthesizer with the given settings.
    pub fn new(config: SynthConfig) -> SynthResult<Self> {
        config.echo.validate()?;
        if !(config.target_peak > 0.0 && config.target_peak <= 1.0) {
            return Err(SynthError::invalid_param(
                "target_peak",
                format!("must be in (0, 1], got {}", config.target_peak),
            ));
        }
        Ok(Self { config })
    }

    /// Creates a synthesizer that rejects unknown moods.
    pub fn strict() -> Self {
        Self {
            config: SynthConfig {
                mood_policy: MoodPolicy::Strict,
                ..SynthConfig::default()
            },
        }
    }

    /// Active settings.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Renders `duration_seconds` of music for `mood`.
    pub fn synthesize<R: RandomSource + ?Sized>(
        &self,
        mood: &str,
        duration_seconds: i64,
        rng: &mut R,
    ) -> SynthResult<AudioBuffer> {
        self.render(mood, duration_seconds, rng).map(|r| r.buffer)
    }

    /// Like [`synthesize`](Self::synthesize) but also returns the notes and
    /// the resolved mood.
    pub fn render<R: RandomSource + ?Sized>(
        &self,
        mood: &str,
        duration_seconds: i64,
        rng: &mut R,
    ) -> SynthResult<Rendering> {
        if duration_seconds <= 0 {
            return Err(SynthError::InvalidDuration {
                duration: duration_seconds,
            });
        }

        let resolved = resolve_mood(mood, self.config.mood_policy)?;
        if resolved.fell_back {
            warn!(
                requested = mood,
                fallback = resolved.mood.as_str(),
                "unknown mood, using fallback profile"
            );
        }

        let notes = sequence_notes(resolved.profile(), duration_seconds as f64, rng)?;
        debug!(
            mood = resolved.mood.as_str(),
            duration_seconds,
            notes = notes.len(),
            "sequenced notes"
        );

        let mut samples = self.render_notes(&notes);

        let delay = self.config.echo.delay_samples(SAMPLE_RATE);
        apply_echo(&mut samples, delay, self.config.echo.gain);

        let raw_peak = normalize(&mut samples, self.config.target_peak);
        debug!(samples = samples.len(), raw_peak, "rendered signal");

        Ok(Rendering {
            buffer: AudioBuffer {
                samples,
                sample_rate: SAMPLE_RATE,
            },
            notes,
            mood: resolved.mood,
            fell_back: resolved.fell_back,
        })
    }

    /// Renders and envelopes every note, then joins them in order.
    fn render_notes(&self, notes: &[NoteEvent]) -> Vec<f64> {
        let total = notes
            .last()
            .map(|n| n.sample_range(SAMPLE_RATE).end)
            .unwrap_or(0);
        let mut signal = Vec::with_capacity(total);

        for note in notes {
            let tone = HarmonicTone::new(note.frequency_hz);
            let mut buffer = tone.render(note.sample_range(SAMPLE_RATE), SAMPLE_RATE);
            self.config.envelope.apply(&mut buffer);
            signal.append(&mut buffer);
        }

        signal
    }
}

/// Renders with default settings: fallback mood policy, reference envelope,
/// 100 ms echo at 0.2, full-scale normalization.
///
/// # Arguments
/// * `mood` - Mood key; unknown keys use the `happy` profile
/// * `duration_seconds` - Length of the piece, at least 1
/// * `rng` - Source of every random pick
///
/// # Returns
/// `duration_seconds * 44100` samples peaking at 1.0, or
/// [`SynthError::InvalidDuration`] for a zero or negative duration
pub fn synthesize<R: RandomSource + ?Sized>(
    mood: &str,
    duration_seconds: i64,
    rng: &mut R,
) -> SynthResult<AudioBuffer> {
    MoodWaveformSynthesizer::default().synthesize(mood, duration_seconds, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{create_rng, ReplaySource};

    #[test]
    fn test_buffer_helpers() {
        let buffer = AudioBuffer {
            samples: vec![0.0, -0.5, 0.25, 0.0],
            sample_rate: 4,
        };
        assert_eq!(buffer.len(), 4);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.duration_seconds(), 1.0);
        assert_eq!(buffer.peak(), 0.5);
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let mut rng = create_rng(1);
        for duration in [0, -1, -60] {
            let err = synthesize("happy", duration, &mut rng).unwrap_err();
            assert!(matches!(err, SynthError::InvalidDuration { duration: d } if d == duration));
        }
    }

    #[test]
    fn test_one_second_is_valid() {
        let mut rng = create_rng(1);
        let buffer = synthesize("relaxed", 1, &mut rng).unwrap();
        assert_eq!(buffer.len(), 44100);
        assert_eq!(buffer.sample_rate, SAMPLE_RATE);
    }

    #[test]
    fn test_render_reports_notes_and_mood() {
        let mut rng = create_rng(8);
        let rendering = MoodWaveformSynthesizer::default()
            .render("energetic", 2, &mut rng)
            .unwrap();
        assert_eq!(rendering.mood, Mood::Energetic);
        assert!(!rendering.fell_back);
        assert!(!rendering.notes.is_empty());
        assert_eq!(rendering.buffer.len(), 88200);
    }

    #[test]
    fn test_fallback_flagged() {
        let mut rng = create_rng(8);
        let rendering = MoodWaveformSynthesizer::default()
            .render("nostalgic", 1, &mut rng)
            .unwrap();
        assert_eq!(rendering.mood, Mood::Happy);
        assert!(rendering.fell_back);
    }

    #[test]
    fn test_strict_rejects_unknown_mood() {
        let mut rng = create_rng(8);
        let err = MoodWaveformSynthesizer::strict()
            .synthesize("nostalgic", 5, &mut rng)
            .unwrap_err();
        assert!(matches!(err, SynthError::UnknownMood { .. }));
    }

    #[test]
    fn test_duration_checked_before_mood() {
        let mut rng = create_rng(8);
        let err = MoodWaveformSynthesizer::strict()
            .synthesize("nostalgic", 0, &mut rng)
            .unwrap_err();
        assert!(matches!(err, SynthError::InvalidDuration { .. }));
    }

    #[test]
    fn test_new_validates_config() {
        let bad_peak = SynthConfig {
            target_peak: 0.0,
            ..SynthConfig::default()
        };
        assert!(MoodWaveformSynthesizer::new(bad_peak).is_err());

        let bad_echo = SynthConfig {
            echo: EchoParams {
                delay_seconds: 0.1,
                gain: 2.0,
            },
            ..SynthConfig::default()
        };
        assert!(MoodWaveformSynthesizer::new(bad_echo).is_err());
    }

    #[test]
    fn test_custom_target_peak() {
        let synth = MoodWaveformSynthesizer::new(SynthConfig {
            target_peak: 0.5,
            ..SynthConfig::default()
        })
        .unwrap();
        let mut rng = create_rng(2);
        let buffer = synth.synthesize("sad", 1, &mut rng).unwrap();
        assert!((buffer.peak() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_echo_can_be_disabled() {
        let dry = MoodWaveformSynthesizer::new(SynthConfig {
            echo: EchoParams {
                delay_seconds: 0.1,
                gain: 0.0,
            },
            ..SynthConfig::default()
        })
        .unwrap();
        // One weight-3 note clipped to 1 s; its attack starts from silence.
        let mut replay = ReplaySource::new(vec![0, 5]);
        let buffer = dry.synthesize("sad", 1, &mut replay).unwrap();
        assert_eq!(buffer.samples[0], 0.0);
        assert_eq!(buffer.len(), 44100);
    }
}
