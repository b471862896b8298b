//! RNG oracle for deterministic random draws.
//!
//! Every probabilistic choice the machine makes (idle and chew durations,
//! the chance-to-eat roll, flee jitter) goes through [`Dice`], which derives
//! a fresh seed per draw from the world seed, the animal id, a draw counter
//! and the purpose of the draw. Given the same inputs a run replays exactly.

use crate::config::DurationRange;
use crate::types::AnimalId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    ///
    /// Uses the top 24 bits so the result is exactly representable in `f32`
    /// and never rounds up to `1.0`.
    fn unit(&self, seed: u64) -> f32 {
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state. Same seed always
/// produces the same output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle that returns the same value for every seed.
///
/// `ConstantRng(0)` makes every chance draw succeed and every duration sample
/// its minimum; `ConstantRng(u32::MAX)` makes chance draws below `1.0` fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantRng(pub u32);

impl RngOracle for ConstantRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Compute a deterministic seed for one draw.
///
/// # Arguments
///
/// * `world_seed` - Base seed chosen when the simulation starts
/// * `draw` - Per-animal draw counter (increments every draw)
/// * `animal` - Animal performing the draw
/// * `purpose` - Distinguishes independent draws with the same counter
pub fn compute_seed(world_seed: u64, draw: u64, animal: u32, purpose: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = world_seed;
    hash ^= draw.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (animal as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (purpose as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// What a draw is for. Mixed into the seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DrawPurpose {
    IdleDuration = 0,
    ForageChance = 1,
    ChewDuration = 2,
    FleeJitterX = 3,
    FleeJitterZ = 4,
}

/// Per-animal random source used by the states.
pub struct Dice {
    oracle: Box<dyn RngOracle>,
    world_seed: u64,
    animal: AnimalId,
    draws: u64,
}

impl Dice {
    pub fn new(oracle: Box<dyn RngOracle>, world_seed: u64, animal: AnimalId) -> Self {
        Self {
            oracle,
            world_seed,
            animal,
            draws: 0,
        }
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit(&mut self, purpose: DrawPurpose) -> f32 {
        let seed = compute_seed(self.world_seed, self.draws, self.animal.0, purpose as u32);
        self.draws += 1;
        self.oracle.unit(seed)
    }

    /// Succeeds with probability `chance`. `1.0` always succeeds, `0.0` never does.
    pub fn chance(&mut self, chance: f32, purpose: DrawPurpose) -> bool {
        self.unit(purpose) < chance
    }

    pub fn sample(&mut self, range: DurationRange, purpose: DrawPurpose) -> f32 {
        range.lerp(self.unit(purpose))
    }

    /// Uniform value in `[-amplitude, amplitude)`.
    pub fn jitter(&mut self, amplitude: f32, purpose: DrawPurpose) -> f32 {
        (self.unit(purpose) * 2.0 - 1.0) * amplitude
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl core::fmt::Debug for Dice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dice")
            .field("world_seed", &self.world_seed)
            .field("animal", &self.animal)
            .field("draws", &self.draws)
            .finish_non_exhaustive()
    }
}
