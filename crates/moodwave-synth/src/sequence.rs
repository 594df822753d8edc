//! Note sequencing: turns a mood profile and a duration into timed notes.

use std::ops::Range;

use crate::error::{SynthError, SynthResult};
use crate::profile::MoodProfile;
use crate::rng::RandomSource;

/// Note length multipliers. Repeats bias the draw toward short notes.
pub const NOTE_WEIGHTS: [u32; 6] = [1, 1, 1, 2, 2, 3];

/// Remaining time below this is treated as zero to absorb float drift.
const TIME_EPSILON: f64 = 1e-9;

/// One sounded pitch within the piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// Pitch in Hz.
    pub frequency_hz: f64,
    /// Length in seconds.
    pub duration_seconds: f64,
    /// Start time on the global timeline in seconds.
    pub start_offset_seconds: f64,
}

impl NoteEvent {
    /// End time on the global timeline in seconds.
    pub fn end_offset_seconds(&self) -> f64 {
        self.start_offset_seconds + self.duration_seconds
    }

    /// Absolute sample indices covered by this note.
    ///
    /// Boundaries are rounded from absolute offsets, so consecutive notes
    /// tile the timeline with no gaps or overlaps.
    pub fn sample_range(&self, sample_rate: u32) -> Range<usize> {
        let sr = sample_rate as f64;
        let start = (self.start_offset_seconds * sr).round() as usize;
        let end = (self.end_offset_seconds() * sr).round() as usize;
        start..end.max(start)
    }
}

/// Draws notes from `profile` until `total_seconds` is filled.
///
/// Each note consumes two picks from `rng`: a scale degree, then a weight
/// from [`NOTE_WEIGHTS`]. The final note is clipped to the remaining time.
///
/// # Arguments
/// * `profile` - Scale and tempo to draw from
/// * `total_seconds` - Length to fill; zero or less yields no notes
/// * `rng` - Source of the degree and weight picks
///
/// # Returns
/// Contiguous notes starting at offset 0, or
/// [`SynthError::InvalidParameter`] for an empty scale or a non-positive tempo
pub fn sequence_notes<R: RandomSource + ?Sized>(
    profile: &MoodProfile,
    total_seconds: f64,
    rng: &mut R,
) -> SynthResult<Vec<NoteEvent>> {
    if profile.scale_ratios.is_empty() {
        return Err(SynthError::invalid_param(
            "scale_ratios",
            "profile must have at least one scale degree",
        ));
    }
    if !(profile.note_tempo_seconds.is_finite() && profile.note_tempo_seconds > 0.0) {
        return Err(SynthError::invalid_param(
            "note_tempo_seconds",
            format!("must be positive, got {}", profile.note_tempo_seconds),
        ));
    }

    let mut notes = Vec::new();
    let mut offset = 0.0;

    while total_seconds - offset > TIME_EPSILON {
        let degree = rng.choose_index(profile.scale_len());
        let weight = rng.choose_weighted(&NOTE_WEIGHTS);

        let remaining = total_seconds - offset;
        let mut length = profile.note_tempo_seconds * weight as f64;
        if length >= remaining - TIME_EPSILON {
            length = remaining;
        }

        notes.push(NoteEvent {
            frequency_hz: profile.frequency_at(degree),
            duration_seconds: length,
            start_offset_seconds: offset,
        });
        offset += length;
    }

    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Mood;
    use crate::rng::{create_rng, ReplaySource};

    #[test]
    fn test_durations_sum_to_total() {
        for mood in Mood::ALL {
            for total in [1.0, 5.0, 7.0, 60.0] {
                let mut rng = create_rng(42);
                let notes = sequence_notes(mood.profile(), total, &mut rng).unwrap();
                let sum: f64 = notes.iter().map(|n| n.duration_seconds).sum();
                assert!((sum - total).abs() < 1e-6, "{mood}: {sum} != {total}");
            }
        }
    }

    #[test]
    fn test_notes_are_contiguous() {
        let mut rng = create_rng(3);
        let notes = sequence_notes(Mood::Relaxed.profile(), 10.0, &mut rng).unwrap();
        assert_eq!(notes[0].start_offset_seconds, 0.0);
        for pair in notes.windows(2) {
            assert_eq!(pair[0].end_offset_seconds(), pair[1].start_offset_seconds);
        }
    }

    #[test]
    fn test_last_note_is_clipped() {
        // Every pick is weight 3: 0.5 * 3 = 1.5 s notes into a 2 s piece.
        let mut replay = ReplaySource::new(vec![5]);
        let notes = sequence_notes(Mood::Sad.profile(), 2.0, &mut replay).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].duration_seconds, 1.5);
        assert!((notes[1].duration_seconds - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_replayed_picks_select_degree_and_weight() {
        // degree 2 weight-1, degree 7 weight-2 (index 3), degree 0 weight-3 (index 5)
        let mut replay = ReplaySource::new(vec![2, 0, 7, 3, 0, 5]);
        let notes = sequence_notes(Mood::Happy.profile(), 1.5, &mut replay).unwrap();

        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].frequency_hz, 440.0 * 5.0 / 4.0);
        assert_eq!(notes[0].duration_seconds, 0.25);
        assert_eq!(notes[1].frequency_hz, 880.0);
        assert_eq!(notes[1].duration_seconds, 0.5);
        assert_eq!(notes[2].frequency_hz, 440.0);
        assert_eq!(notes[2].duration_seconds, 0.75);
        assert_eq!(replay.consumed(), 6);
    }

    #[test]
    fn test_frequencies_come_from_scale() {
        let profile = Mood::Energetic.profile();
        let scale = profile.scale_frequencies();
        let mut rng = create_rng(11);
        let notes = sequence_notes(profile, 20.0, &mut rng).unwrap();
        assert!(notes.iter().all(|n| scale.contains(&n.frequency_hz)));
    }

    #[test]
    fn test_sample_ranges_tile_the_timeline() {
        let mut rng = create_rng(5);
        let notes = sequence_notes(Mood::Energetic.profile(), 3.0, &mut rng).unwrap();
        let ranges: Vec<_> = notes.iter().map(|n| n.sample_range(44100)).collect();
        assert_eq!(ranges[0].start, 0);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(ranges.last().unwrap().end, 132300);
    }

    #[test]
    fn test_zero_duration_yields_no_notes() {
        let mut rng = create_rng(1);
        let notes = sequence_notes(Mood::Happy.profile(), 0.0, &mut rng).unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_tempo() {
        let broken = MoodProfile {
            note_tempo_seconds: 0.0,
            ..*Mood::Happy.profile()
        };
        let mut rng = create_rng(1);
        assert!(sequence_notes(&broken, 1.0, &mut rng).is_err());
    }
}
