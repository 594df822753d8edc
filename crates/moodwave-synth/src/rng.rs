//! Injectable randomness for note sequencing.
//!
//! The synthesizer never touches a global RNG. Every random decision goes
//! through [`RandomSource`], which is implemented for any `rand` generator
//! and for [`ReplaySource`], a scripted source that replays a fixed list of
//! picks. Seeded runs use PCG32 so output is reproducible across platforms.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Capability object supplying the two kinds of picks the sequencer needs.
pub trait RandomSource {
    /// Picks an index uniformly from `0..len`.
    ///
    /// `len` must be non-zero.
    fn choose_index(&mut self, len: usize) -> usize;

    /// Picks one entry of a small literal multiset, uniformly over entries.
    ///
    /// Repeated values weight the draw: `[1, 1, 2]` yields 1 two times in three.
    fn choose_weighted(&mut self, weights: &[u32]) -> u32 {
        weights[self.choose_index(weights.len())]
    }
}

impl<R: RngCore> RandomSource for R {
    fn choose_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
///
/// # Arguments
/// * `seed` - A 32-bit seed value
///
/// # Returns
/// A deterministically initialized PCG32 generator
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Random source that replays a scripted sequence of picks.
///
/// Each scripted value is reduced modulo the number of candidates, and the
/// script wraps around once exhausted.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    picks: Vec<usize>,
    cursor: usize,
}

impl ReplaySource {
    /// Creates a replay source. An empty script always picks the first item.
    pub fn new(picks: Vec<usize>) -> Self {
        let picks = if picks.is_empty() { vec![0] } else { picks };
        Self { picks, cursor: 0 }
    }

    /// Number of picks consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplaySource {
    fn choose_index(&mut self, len: usize) -> usize {
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick % len
    }
}
