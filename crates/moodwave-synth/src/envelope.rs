//! ADSR envelope shaping for rendered notes.
//!
//! Stage lengths are fractions of the note rather than absolute times, so the
//! same shape fits a 0.15 s blip and a 1.5 s tone. There is no explicit
//! sustain segment: the samples between decay and release keep whatever
//! level the tone was rendered at.

/// Fractional ADSR shape applied in place to a note buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrShape {
    /// Fraction of the note spent ramping 0 -> 1.
    pub attack_fraction: f64,
    /// Fraction of the note spent ramping 1 -> sustain level.
    pub decay_fraction: f64,
    /// Level reached at the end of decay and the start of release.
    pub sustain_level: f64,
    /// Fraction of the note, at its tail, spent ramping sustain level -> 0.
    pub release_fraction: f64,
}

impl Default for AdsrShape {
    fn default() -> Self {
        Self {
            attack_fraction: 0.1,
            decay_fraction: 0.2,
            sustain_level: 0.7,
            release_fraction: 0.2,
        }
    }
}

/// Sample counts of each envelope stage for a given note length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageLengths {
    pub attack: usize,
    pub decay: usize,
    pub release: usize,
}

impl AdsrShape {
    /// Creates a shape, clamping fractions and level to [0, 1].
    pub fn new(attack: f64, decay: f64, sustain_level: f64, release: f64) -> Self {
        Self {
            attack_fraction: attack.clamp(0.0, 1.0),
            decay_fraction: decay.clamp(0.0, 1.0),
            sustain_level: sustain_level.clamp(0.0, 1.0),
            release_fraction: release.clamp(0.0, 1.0),
        }
    }

    /// Stage sample counts for a note of `num_samples` samples.
    ///
    /// Counts truncate toward zero; a stage that truncates to 0 is skipped.
    pub fn stage_lengths(&self, num_samples: usize) -> StageLengths {
        let n = num_samples as f64;
        StageLengths {
            attack: (self.attack_fraction * n) as usize,
            decay: (self.decay_fraction * n) as usize,
            release: (self.release_fraction * n) as usize,
        }
    }

    /// Multiplies `note` by the envelope in place.
    pub fn apply(&self, note: &mut [f64]) {
        let n = note.len();
        let stages = self.stage_lengths(n);

        let attack_end = stages.attack.min(n);
        scale_by_ramp(&mut note[..attack_end], 0.0, 1.0);

        let decay_end = (attack_end + stages.decay).min(n);
        scale_by_ramp(&mut note[attack_end..decay_end], 1.0, self.sustain_level);

        if stages.release > 0 && n > stages.release {
            scale_by_ramp(&mut note[n - stages.release..], self.sustain_level, 0.0);
        }
    }
}

/// Multiplies `samples` by a linear ramp from `start` to `end`, both inclusive.
fn scale_by_ramp(samples: &mut [f64], start: f64, end: f64) {
    let len = samples.len();
    if len == 0 {
        return;
    }
    if len == 1 {
        samples[0] *= start;
        return;
    }
    let last = len - 1;
    for (i, sample) in samples.iter_mut().enumerate() {
        let level = if i == last {
            end
        } else {
            start + (end - start) * (i as f64 / last as f64)
        };
        *sample *= level;
    }
}

/// Envelope curve for a note of `num_samples` samples (the shape applied to
/// a constant 1.0 signal).
pub fn envelope_curve(shape: &AdsrShape, num_samples: usize) -> Vec<f64> {
    let mut curve = vec![1.0; num_samples];
    shape.apply(&mut curve);
    curve
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() {
        let shape = AdsrShape::default();
        assert_eq!(shape.attack_fraction, 0.1);
        assert_eq!(shape.decay_fraction, 0.2);
        assert_eq!(shape.sustain_level, 0.7);
        assert_eq!(shape.release_fraction, 0.2);
    }

    #[test]
    fn test_new_clamps() {
        let shape = AdsrShape::new(-0.5, 2.0, 1.5, 0.2);
        assert_eq!(shape.attack_fraction, 0.0);
        assert_eq!(shape.decay_fraction, 1.0);
        assert_eq!(shape.sustain_level, 1.0);
    }

    #[test]
    fn test_stage_lengths_truncate() {
        let stages = AdsrShape::default().stage_lengths(11025);
        assert_eq!(stages.attack, 1102);
        assert_eq!(stages.decay, 2205);
        assert_eq!(stages.release, 2205);
    }

    #[test]
    fn test_curve_landmarks() {
        let curve = envelope_curve(&AdsrShape::default(), 1000);

        // Attack: 100 samples from 0 to 1
        assert_eq!(curve[0], 0.0);
        assert_eq!(curve[99], 1.0);
        // Decay: 200 samples from 1 to 0.7
        assert!((curve[100] - 1.0).abs() < 1e-12);
        assert!((curve[299] - 0.7).abs() < 1e-12);
        // Sustain is left alone (constant input stays 1.0)
        assert_eq!(curve[300], 1.0);
        assert_eq!(curve[799], 1.0);
        // Release: last 200 samples from 0.7 to 0
        assert!((curve[800] - 0.7).abs() < 1e-12);
        assert_eq!(curve[999], 0.0);
    }

    #[test]
    fn test_attack_is_monotonic() {
        let curve = envelope_curve(&AdsrShape::default(), 4410);
        for pair in curve[..441].windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_tiny_notes_skip_stages() {
        // Under 5 samples every stage truncates to zero.
        for n in 0..5 {
            let curve = envelope_curve(&AdsrShape::default(), n);
            assert!(curve.iter().all(|&v| v == 1.0), "n = {n}");
        }

        // Five samples: no attack, one decay sample at 1.0, one release sample at 0.7.
        let curve = envelope_curve(&AdsrShape::default(), 5);
        assert_eq!(curve, vec![1.0, 1.0, 1.0, 1.0, 0.7]);
    }

    #[test]
    fn test_apply_scales_signal() {
        let mut note = vec![0.5; 100];
        AdsrShape::default().apply(&mut note);
        assert_eq!(note[0], 0.0);
        assert!((note[50] - 0.5).abs() < 1e-12);
        assert_eq!(note[99], 0.0);
    }
}
