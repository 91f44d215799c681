//! Score and time-limit bookkeeping
//!
//! `raw` is the continuous accumulator; `displayed` is `floor(raw)` but only
//! ever moves up.

use serde::{Deserialize, Serialize};

use crate::consts::{PASS_BONUS, SCORE_PER_SPEED};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTracker {
    raw: f64,
    displayed: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> f64 {
        self.raw
    }

    pub fn displayed(&self) -> u64 {
        self.displayed
    }

    /// Distance score for one tick at the given horizontal speed
    pub fn advance(&mut self, speed: f64) {
        self.raw += speed * SCORE_PER_SPEED;
    }

    /// Pass-through bonus
    pub fn add_bonus(&mut self) {
        self.raw += PASS_BONUS;
    }

    /// Recompute the displayed score; returns it only if it went up
    pub fn refresh(&mut self) -> Option<u64> {
        let floored = self.raw.floor();
        if floored > self.displayed as f64 {
            self.displayed = floored as u64;
            Some(self.displayed)
        } else {
            None
        }
    }
}

/// TimeAttack countdown, kept in whole ticks so expiry lands on an exact tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ticks: u64,
    tick_rate: u32,
}

impl Countdown {
    pub fn new(total_ticks: u64, tick_rate: u32) -> Self {
        Self {
            remaining_ticks: total_ticks,
            tick_rate,
        }
    }

    /// Consume one tick; true once the limit is reached
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks == 0
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ticks == 0
    }

    pub fn remaining_ticks(&self) -> u64 {
        self.remaining_ticks
    }

    /// Remaining time in seconds
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ticks as f64 / f64::from(self.tick_rate)
    }

    /// Whole seconds for a HUD (rounded up)
    pub fn display_secs(&self) -> u32 {
        self.remaining_ticks.div_ceil(u64::from(self.tick_rate)) as u32
    }
}
