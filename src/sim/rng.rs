//! Seeded gameplay RNG
//!
//! Mulberry32: a 32-bit additive-mix generator. The bit-level algorithm is
//! part of the daily-challenge contract, since every participant must see
//! the same obstacle sequence for the same seed.

use serde::{Deserialize, Serialize};

/// Fixed odd increment added to the state on every draw
const INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32, the divisor mapping a raw draw into [0, 1)
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Gameplay RNG (the only randomness allowed to touch obstacle geometry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state (for snapshots)
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Next raw 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Integer in [min, max_exclusive)
    pub fn next_range(&mut self, min: i64, max_exclusive: i64) -> i64 {
        (self.next_f64() * (max_exclusive - min) as f64 + min as f64).floor() as i64
    }
}
