//! Mood profiles: the fixed musical parameters behind each mood label.

use std::fmt;
use std::str::FromStr;

use crate::error::{SynthError, SynthResult};

/// Just-intonation major scale.
const MAJOR_RATIOS: [f64; 8] = [
    1.0,
    9.0 / 8.0,
    5.0 / 4.0,
    4.0 / 3.0,
    3.0 / 2.0,
    5.0 / 3.0,
    15.0 / 8.0,
    2.0,
];

/// Natural minor scale.
const MINOR_RATIOS: [f64; 8] = [
    1.0,
    9.0 / 8.0,
    6.0 / 5.0,
    4.0 / 3.0,
    3.0 / 2.0,
    8.0 / 5.0,
    9.0 / 5.0,
    2.0,
];

/// Major pentatonic plus the octave.
const PENTATONIC_RATIOS: [f64; 6] = [1.0, 9.0 / 8.0, 5.0 / 4.0, 3.0 / 2.0, 5.0 / 3.0, 2.0];

static HAPPY: MoodProfile = MoodProfile {
    base_frequency_hz: 440.0,
    scale_ratios: &MAJOR_RATIOS,
    note_tempo_seconds: 0.25,
};

static SAD: MoodProfile = MoodProfile {
    base_frequency_hz: 392.0,
    scale_ratios: &MINOR_RATIOS,
    note_tempo_seconds: 0.5,
};

static RELAXED: MoodProfile = MoodProfile {
    base_frequency_hz: 329.63,
    scale_ratios: &PENTATONIC_RATIOS,
    note_tempo_seconds: 0.4,
};

static ENERGETIC: MoodProfile = MoodProfile {
    base_frequency_hz: 523.25,
    scale_ratios: &MAJOR_RATIOS,
    note_tempo_seconds: 0.15,
};

/// Supported mood categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Relaxed,
    Energetic,
}

impl Mood {
    /// All moods in table order.
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Relaxed, Mood::Energetic];

    /// Mood used when a key is not recognized.
    pub const FALLBACK: Mood = Mood::Happy;

    /// Lowercase key for this mood.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Relaxed => "relaxed",
            Mood::Energetic => "energetic",
        }
    }

    /// The musical parameters for this mood.
    pub fn profile(&self) -> &'static MoodProfile {
        match self {
            Mood::Happy => &HAPPY,
            Mood::Sad => &SAD,
            Mood::Relaxed => &RELAXED,
            Mood::Energetic => &ENERGETIC,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SynthError::UnknownMood {
                mood: s.to_string(),
            })
    }
}

/// Static musical parameters for a mood category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodProfile {
    /// Root pitch in Hz.
    pub base_frequency_hz: f64,
    /// Frequency multipliers relative to the root. Non-empty, starts at 1.0.
    pub scale_ratios: &'static [f64],
    /// Length of a weight-1 note in seconds.
    pub note_tempo_seconds: f64,
}

impl MoodProfile {
    /// Number of playable pitches.
    pub fn scale_len(&self) -> usize {
        self.scale_ratios.len()
    }

    /// Frequency of the scale degree at `index`.
    pub fn frequency_at(&self, index: usize) -> f64 {
        self.base_frequency_hz * self.scale_ratios[index]
    }

    /// All playable frequencies in scale order.
    pub fn scale_frequencies(&self) -> Vec<f64> {
        self.scale_ratios
            .iter()
            .map(|r| self.base_frequency_hz * r)
            .collect()
    }
}

/// What to do with a mood key that is not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoodPolicy {
    /// Substitute the fallback (happy) profile.
    #[default]
    Fallback,
    /// Fail with [`SynthError::UnknownMood`].
    Strict,
}

/// A mood key resolved against the profile table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMood {
    /// The mood whose profile will be used.
    pub mood: Mood,
    /// True when the requested key was unknown and the fallback was used.
    pub fell_back: bool,
}

impl ResolvedMood {
    /// Profile of the resolved mood.
    pub fn profile(&self) -> &'static MoodProfile {
        self.mood.profile()
    }
}

/// Resolves a mood key under the given policy.
pub fn resolve_mood(key: &str, policy: MoodPolicy) -> SynthResult<ResolvedMood> {
    match key.parse::<Mood>() {
        Ok(mood) => Ok(ResolvedMood {
            mood,
            fell_back: false,
        }),
        Err(err) => match policy {
            MoodPolicy::Strict => Err(err),
            MoodPolicy::Fallback => Ok(ResolvedMood {
                mood: Mood::FALLBACK,
                fell_back: true,
            }),
        },
    }
}
