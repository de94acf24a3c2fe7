//! Sources of the per-strike variance term
//!
//! The engine never touches a global generator. Callers pass a
//! [`VarianceSource`]: a seeded [`BattleRng`] in production, or a
//! [`ScriptedVariance`] when a test needs exact rolls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies one variance roll per strike
pub trait VarianceSource {
    /// Uniform integer in `[-spread, spread]`; a negative spread rolls as zero
    fn roll(&mut self, spread: i32) -> i32;
}

/// Seeded ChaCha8 generator for battle resolution
///
/// Same seed, same rolls. Each battle should own its generator so concurrent
/// resolutions cannot interleave draws.
#[derive(Clone, Debug)]
pub struct BattleRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl BattleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from OS entropy; the chosen seed stays readable for replays
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Independent generator for one trial of a multi-battle run
    pub fn for_trial(seed: u64, trial: u64) -> Self {
        Self::new(seed.wrapping_add(trial.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl VarianceSource for BattleRng {
    fn roll(&mut self, spread: i32) -> i32 {
        let spread = spread.max(0);
        self.inner.gen_range(-spread..=spread)
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted
///
/// Rolls are clamped to the requested spread.
#[derive(Clone, Debug)]
pub struct ScriptedVariance {
    rolls: Vec<i32>,
    next: usize,
    drawn: usize,
}

impl ScriptedVariance {
    pub fn new(rolls: Vec<i32>) -> Self {
        Self {
            rolls,
            next: 0,
            drawn: 0,
        }
    }

    /// Every roll is zero
    pub fn zero() -> Self {
        Self::new(vec![0])
    }

    /// How many rolls have been consumed
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl VarianceSource for ScriptedVariance {
    fn roll(&mut self, spread: i32) -> i32 {
        self.drawn += 1;
        if self.rolls.is_empty() {
            return 0;
        }
        let value = self.rolls[self.next];
        self.next = (self.next + 1) % self.rolls.len();
        let spread = spread.max(0);
        value.clamp(-spread, spread)
    }
}
