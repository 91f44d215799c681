//! Error types for the simulation core and score storage.

use thiserror::Error;

use crate::sim::Outcome;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("gap size must be positive, got {0}")]
    NonPositiveGapSize(f64),

    #[error("spawn distance must be positive, got {0}")]
    NonPositiveSpawnDistance(f64),

    #[error("speed increment must be positive, got {0}")]
    NonPositiveSpeedIncrement(f64),

    #[error("terminal velocity must be positive, got {0}")]
    NonPositiveTerminalVelocity(f64),

    #[error("obstacle width must be positive, got {0}")]
    NonPositiveObstacleWidth(f64),

    #[error("gravity and lift must be finite, got {gravity} and {lift}")]
    NonFiniteAcceleration { gravity: f64, lift: f64 },

    #[error("viewport height {height} cannot fit a {required} tall gap with margins")]
    ViewportTooShort { height: f64, required: f64 },

    #[error("viewport must be positive, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("tick rate must be non-zero")]
    InvalidTickRate,

    #[error("time limit must be set for TimeAttack and only for TimeAttack")]
    TimeLimitMismatch,

    #[error("time limit must be positive, got {0}")]
    NonPositiveTimeLimit(f64),

    #[error("step called after termination ({outcome:?} at tick {tick})")]
    StepAfterTermination { outcome: Outcome, tick: u64 },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
