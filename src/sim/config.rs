//! Session configuration
//!
//! Immutable for the lifetime of a session. Hosts build one from the
//! selected mode and a seed, then hand it to `Session::reset`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Classic,
    /// Fixed time limit, ends with `TimeExpired` if the player survives
    TimeAttack,
    /// Calendar-seeded shared challenge
    Daily,
    /// Placeholder for ghost/versus play; simulates like Classic
    Pvp,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::TimeAttack => "TimeAttack",
            GameMode::Daily => "Daily",
            GameMode::Pvp => "Pvp",
        }
    }

    pub fn is_timed(&self) -> bool {
        matches!(self, GameMode::TimeAttack)
    }
}

/// Screen-space playfield size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Everything that determines a run besides the input sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Downward acceleration per tick
    pub gravity: f64,
    /// Upward acceleration per tick while input is held
    pub lift: f64,
    /// Velocity magnitude cap
    pub terminal_velocity: f64,
    /// Horizontal speed at tick 0
    pub base_speed: f64,
    /// Horizontal speed added every tick (uncapped)
    pub speed_increment: f64,
    pub obstacle_width: f64,
    /// Gap height before difficulty reduction
    pub gap_size: f64,
    /// Horizontal distance between consecutive spawns
    pub spawn_distance: f64,
    pub mode: GameMode,
    /// Seconds; present iff mode is TimeAttack
    pub time_limit: Option<f64>,
    pub seed: u32,
    pub viewport: Viewport,
    /// Ticks per logical second
    pub tick_rate: u32,
    /// Player's horizontal position as a fraction of viewport width
    pub anchor_fraction: f64,
    /// Player collision radius
    pub body_radius: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            lift: LIFT,
            terminal_velocity: TERMINAL_VELOCITY,
            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            obstacle_width: OBSTACLE_WIDTH,
            gap_size: OBSTACLE_GAP,
            spawn_distance: OBSTACLE_SPAWN_DISTANCE,
            mode: GameMode::Classic,
            time_limit: None,
            seed: 0,
            viewport: Viewport::default(),
            tick_rate: TICK_RATE,
            anchor_fraction: ANCHOR_FRACTION,
            body_radius: BODY_RADIUS,
        }
    }
}

impl SessionConfig {
    /// Default tuning with the mode's time policy applied
    pub fn for_mode(mode: GameMode, seed: u32) -> Self {
        Self {
            mode,
            seed,
            time_limit: mode.is_timed().then_some(TIME_ATTACK_LIMIT),
            ..Self::default()
        }
    }

    /// Replace the viewport (builder style)
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    /// Player's fixed horizontal position
    pub fn anchor_x(&self) -> f64 {
        self.viewport.width * self.anchor_fraction
    }

    /// Time limit converted to whole ticks
    pub fn time_limit_ticks(&self) -> Option<u64> {
        self.time_limit
            .map(|secs| (secs * f64::from(self.tick_rate)).round() as u64)
    }

    /// Shortest viewport that keeps the widest possible gap inside both margins
    pub fn min_viewport_height(&self) -> f64 {
        self.gap_size.max(MIN_GAP_HEIGHT) + 2.0 * GAP_MARGIN
    }

    /// Reject configurations that would produce undefined obstacle geometry
    pub fn validate(&self) -> Result<(), SimError> {
        if self.gap_size <= 0.0 || self.gap_size.is_nan() {
            return Err(SimError::NonPositiveGapSize(self.gap_size));
        }
        if self.spawn_distance <= 0.0 || self.spawn_distance.is_nan() {
            return Err(SimError::NonPositiveSpawnDistance(self.spawn_distance));
        }
        if self.speed_increment <= 0.0 || self.speed_increment.is_nan() {
            return Err(SimError::NonPositiveSpeedIncrement(self.speed_increment));
        }
        if self.terminal_velocity <= 0.0 || self.terminal_velocity.is_nan() {
            return Err(SimError::NonPositiveTerminalVelocity(
                self.terminal_velocity,
            ));
        }
        if self.obstacle_width <= 0.0 || self.obstacle_width.is_nan() {
            return Err(SimError::NonPositiveObstacleWidth(self.obstacle_width));
        }
        if !(self.gravity.is_finite() && self.lift.is_finite()) {
            return Err(SimError::NonFiniteAcceleration {
                gravity: self.gravity,
                lift: self.lift,
            });
        }
        let Viewport { width, height } = self.viewport;
        if !(width > 0.0 && height > 0.0) {
            return Err(SimError::InvalidViewport { width, height });
        }
        let required = self.min_viewport_height();
        if height < required {
            return Err(SimError::ViewportTooShort { height, required });
        }
        if self.tick_rate == 0 {
            return Err(SimError::InvalidTickRate);
        }
        match (self.mode.is_timed(), self.time_limit) {
            (true, Some(limit)) if !(limit > 0.0) => {
                Err(SimError::NonPositiveTimeLimit(limit))
            }
            (true, Some(_)) | (false, None) => Ok(()),
            _ => Err(SimError::TimeLimitMismatch),
        }
    }
}

/// Seed for the daily challenge
///
/// Concatenates the unpadded decimal year, month and day, so 2023-10-27
/// gives 20231027 and 2024-01-05 gives 202415. Every client must derive it
/// the same way.
pub fn daily_seed(year: i32, month: u32, day: u32) -> u32 {
    format!("{year}{month}{day}").parse().unwrap_or(0)
}

/// Seed from a wall-clock millisecond timestamp
///
/// The mixer only sees the value modulo 2^32, so truncation loses nothing.
pub fn clock_seed(millis: u64) -> u32 {
    millis as u32
}
