// src/rng.rs
//! Uniform Random Sources for Trajectory Simulation
//!
//! # Design Philosophy
//!
//! The simulator never owns or seeds a generator. Each trajectory draws from a
//! [`UniformSource`] handed in by the caller, which gives:
//! 1. **Reproducibility**: Same seed → same trajectory
//! 2. **Parallel safety**: Each concurrent trajectory gets its own stream
//! 3. **Deterministic replay**: A scripted sequence of draws can stand in for a generator
//!
//! Any `rand` generator is a `UniformSource` through the blanket implementation,
//! so `StdRng`, `ThreadRng` and friends work unchanged.
//!
//! # Counter-Based RNG
//!
//! [`CounterRng`] maps `(seed, counter)` to a value deterministically, so the
//! stream for trajectory `i` does not depend on how many threads a caller uses.

use crate::error::{DdmError, DdmResult};
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Source of successive uniform draws in `[0, 1)`
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        Standard.sample(self)
    }
}

/// Counter-based RNG for reproducible parallel simulations
///
/// # Algorithm
///
/// Uses splitmix64-like algorithm for fast, high-quality random numbers:
/// ```text
/// z = base_seed + counter
/// z = (z ⊕ (z >> 30)) * 0xbf58476d1ce4e5b9
/// z = (z ⊕ (z >> 27)) * 0x94d049bb133111eb
/// output = z ⊕ (z >> 31)
/// ```
///
/// # Thread Safety
///
/// Each trajectory gets its own CounterRng instance, so no generator state is
/// shared between threads.
#[derive(Debug, Clone)]
pub struct CounterRng {
    base_seed: u64,
    counter: u64,
}

impl CounterRng {
    pub fn new(base_seed: u64, counter: u64) -> Self {
        Self { base_seed, counter }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(1);
        splitmix64(self.base_seed.wrapping_add(self.counter))
    }

    /// Top 53 bits of the next output scaled into [0, 1)
    pub fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * UNIT_53
    }
}

const MIX_1: u64 = 0xbf58476d1ce4e5b9;
const MIX_2: u64 = 0x94d049bb133111eb;
const UNIT_53: f64 = 1.0 / (1u64 << 53) as f64;

fn splitmix64(z: u64) -> u64 {
    let z = (z ^ (z >> 30)).wrapping_mul(MIX_1);
    let z = (z ^ (z >> 27)).wrapping_mul(MIX_2);
    z ^ (z >> 31)
}

impl UniformSource for CounterRng {
    fn next_uniform(&mut self) -> f64 {
        self.uniform()
    }
}

/// RNG factory handing out one independent stream per trajectory
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create a counter RNG for a specific trajectory
    ///
    /// Streams are spaced 2^32 counters apart so neighbouring trajectories
    /// never share draws.
    pub fn create_counter_rng(&self, path_id: u64) -> CounterRng {
        CounterRng::new(self.base_seed, path_id.wrapping_shl(32))
    }

    /// Create a standard RNG for a specific trajectory
    pub fn create_std_rng(&self, path_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(path_id))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Replays a fixed sequence of draws, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    consumed: usize,
}

impl ScriptedDraws {
    pub fn new(draws: Vec<f64>) -> DdmResult<Self> {
        if draws.is_empty() {
            return Err(DdmError::RandomGenerationError {
                reason: "scripted draw sequence is empty".to_string(),
            });
        }
        if let Some(bad) = draws.iter().find(|r| !(0.0..1.0).contains(*r)) {
            return Err(DdmError::RandomGenerationError {
                reason: format!("scripted draw {} is outside [0, 1)", bad),
            });
        }
        Ok(Self { draws, consumed: 0 })
    }

    /// Total number of draws handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl UniformSource for ScriptedDraws {
    fn next_uniform(&mut self) -> f64 {
        let r = self.draws[self.consumed % self.draws.len()];
        self.consumed += 1;
        r
    }
}
