//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (the host owns the clock)
//! - Seeded RNG only (`SeededRng`; cosmetic randomness lives in `fx`)
//! - Stable obstacle order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod config;
pub mod obstacle;
pub mod physics;
pub mod replay;
pub mod rng;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{Collision, check, detect_passes};
pub use config::{GameMode, SessionConfig, Viewport, clock_seed, daily_seed};
pub use obstacle::{Direction, Obstacle, ObstacleKind, gap_height_for_score, spawn};
pub use physics::PlayerBody;
pub use replay::{Recorder, Replay, RunSummary, summarize};
pub use rng::SeededRng;
pub use score::{Countdown, ScoreTracker};
pub use state::{AudioCue, GameEvent, Outcome, Phase, SimulationState, StepResult};
pub use tick::{Session, step};
