//! Neon Serpent - A seeded endless-runner simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (RNG, physics, obstacles, collisions, scoring)
//! - `fx`: Cosmetic particles and starfield (never affects gameplay)
//! - `highscores`: Leaderboard read/write contract
//! - `logging`: Logger setup for hosts

pub mod error;
pub mod fx;
pub mod highscores;
pub mod logging;
pub mod sim;

pub use error::{SimError, StorageError};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Logical simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Physics defaults
    pub const GRAVITY: f64 = 0.25;
    pub const LIFT: f64 = 0.35;
    pub const TERMINAL_VELOCITY: f64 = 6.0;
    pub const BASE_SPEED: f64 = 3.0;
    pub const SPEED_INCREMENT: f64 = 0.0015;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f64 = 50.0;
    pub const OBSTACLE_GAP: f64 = 200.0;
    pub const OBSTACLE_SPAWN_DISTANCE: f64 = 350.0;

    /// Gaps never shrink below this height
    pub const MIN_GAP_HEIGHT: f64 = 130.0;
    /// Largest reduction difficulty can apply to the gap
    pub const MAX_DIFFICULTY_MOD: u64 = 60;
    /// Score points per unit of difficulty
    pub const SCORE_PER_DIFFICULTY: u64 = 50;
    /// Gap must stay this far from the top and bottom edges
    pub const GAP_MARGIN: f64 = 50.0;
    /// Probability threshold above which an obstacle oscillates (30%)
    pub const OSCILLATE_THRESHOLD: f64 = 0.7;
    /// Gap offset shift per tick for oscillating obstacles
    pub const OSCILLATE_STEP: f64 = 2.0;
    /// New obstacles enter this far past the right edge
    pub const SPAWN_OFFSET: f64 = 50.0;
    /// Obstacles are dropped once their trailing edge is this far past the left edge
    pub const PRUNE_MARGIN: f64 = 100.0;

    /// Player defaults
    pub const ANCHOR_FRACTION: f64 = 0.3;
    pub const BODY_RADIUS: f64 = 4.0;

    /// Raw score gained per unit of horizontal speed each tick
    pub const SCORE_PER_SPEED: f64 = 0.05;
    /// Bonus for clearing an obstacle
    pub const PASS_BONUS: f64 = 50.0;

    /// TimeAttack default limit in seconds
    pub const TIME_ATTACK_LIMIT: f64 = 60.0;
    /// Remaining-time HUD updates are emitted every N ticks
    pub const TIME_UPDATE_CADENCE: u64 = 10;

    /// Trail defaults
    pub const TRAIL_SEED_POINTS: usize = 20;
    pub const TRAIL_SEED_SPACING: f64 = 5.0;
}
