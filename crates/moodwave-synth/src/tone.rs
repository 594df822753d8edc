//! Additive tone rendering on the global timeline.

use std::f64::consts::PI;
use std::ops::Range;

/// Fundamental plus second and third harmonics at halving amplitudes.
pub const DEFAULT_PARTIALS: [Partial; 3] = [
    Partial {
        multiple: 1.0,
        amplitude: 0.5,
    },
    Partial {
        multiple: 2.0,
        amplitude: 0.25,
    },
    Partial {
        multiple: 3.0,
        amplitude: 0.125,
    },
];

/// A sine component at an integer multiple of the fundamental.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// Frequency multiple of the fundamental.
    pub multiple: f64,
    /// Peak amplitude of this component.
    pub amplitude: f64,
}

/// Composite tone built from harmonic partials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicTone<'a> {
    /// Fundamental frequency in Hz.
    pub fundamental_hz: f64,
    /// Components to sum.
    pub partials: &'a [Partial],
}

impl HarmonicTone<'static> {
    /// Creates a tone with [`DEFAULT_PARTIALS`].
    pub fn new(fundamental_hz: f64) -> Self {
        Self {
            fundamental_hz,
            partials: &DEFAULT_PARTIALS,
        }
    }
}

impl<'a> HarmonicTone<'a> {
    /// Creates a tone with custom partials.
    pub fn with_partials(fundamental_hz: f64, partials: &'a [Partial]) -> Self {
        Self {
            fundamental_hz,
            partials,
        }
    }

    /// Value of the tone at absolute time `t` seconds.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        self.partials
            .iter()
            .map(|p| p.amplitude * (2.0 * PI * self.fundamental_hz * p.multiple * t).sin())
            .sum()
    }

    /// Renders the absolute sample indices in `samples`.
    ///
    /// Time is measured from the start of the piece, not the note, so phase
    /// is continuous with the global timeline.
    pub fn render(&self, samples: Range<usize>, sample_rate: u32) -> Vec<f64> {
        let sr = sample_rate as f64;
        samples.map(|i| self.value_at(i as f64 / sr)).collect()
    }

    /// Sum of partial amplitudes; an upper bound on `|value_at|`.
    pub fn max_amplitude(&self) -> f64 {
        self.partials.iter().map(|p| p.amplitude.abs()).sum()
    }
}
