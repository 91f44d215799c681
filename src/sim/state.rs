//! Simulation state and per-step results
//!
//! Everything needed to reproduce a run lives in `SimulationState`; renderers
//! only ever get a shared reference to it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::config::SessionConfig;
use super::obstacle::Obstacle;
use super::physics::PlayerBody;
use super::rng::SeededRng;
use super::score::{Countdown, ScoreTracker};
use crate::consts::{TRAIL_SEED_POINTS, TRAIL_SEED_SPACING};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Reset, waiting for the first step
    Idle,
    /// Ticking
    Running,
    /// Run over; state frozen until the next reset
    Terminated(Outcome),
}

/// Per-step outcome tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continuing,
    CrashedBoundary,
    CrashedObstacle,
    TimeExpired,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continuing)
    }

    pub fn is_crash(&self) -> bool {
        matches!(self, Outcome::CrashedBoundary | Outcome::CrashedObstacle)
    }
}

/// Sound cue an audio collaborator should play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Score,
    Crash,
    TimeUp,
}

/// Notifications for HUD, audio and persistence collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Displayed score went up
    ScoreChanged(u64),
    /// Remaining whole seconds (TimeAttack, throttled)
    TimeChanged(u32),
    /// Player cleared an obstacle; `ordinal` counts passes in this run from 1
    ObstaclePassed { ordinal: u32 },
    /// Run ended
    Terminated { outcome: Outcome, final_score: u64 },
}

impl GameEvent {
    pub fn cue(&self) -> Option<AudioCue> {
        match self {
            GameEvent::ObstaclePassed { .. } => Some(AudioCue::Score),
            GameEvent::Terminated { outcome, .. } if outcome.is_crash() => {
                Some(AudioCue::Crash)
            }
            GameEvent::Terminated { .. } => Some(AudioCue::TimeUp),
            _ => None,
        }
    }
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// New displayed score, only when it increased
    pub score: Option<u64>,
    /// Remaining whole seconds, TimeAttack only, at the HUD cadence
    pub remaining_time: Option<u32>,
    pub outcome: Outcome,
    pub events: Vec<GameEvent>,
}

impl StepResult {
    pub(crate) fn continuing() -> Self {
        Self {
            score: None,
            remaining_time: None,
            outcome: Outcome::Continuing,
            events: Vec::new(),
        }
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: Phase,
    pub player: PlayerBody,
    /// Spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    pub score: ScoreTracker,
    /// Ticks run since reset
    pub tick: u64,
    /// Present in TimeAttack only
    pub countdown: Option<Countdown>,
    /// Horizontal scroll speed (never decreases)
    pub speed: f64,
    /// Recent player positions for rendering (oldest first)
    pub trail: Vec<DVec2>,
    /// Obstacles generated since reset
    pub obstacles_spawned: u32,
    /// Obstacles passed since reset
    pub obstacles_passed: u32,
    /// Gameplay RNG, reseeded on reset
    pub rng: SeededRng,
}

impl SimulationState {
    /// Fresh state for a (validated) config
    pub fn new(config: &SessionConfig) -> Self {
        let player = PlayerBody::centered(config);
        let head_x = config.anchor_x();
        let trail = (0..TRAIL_SEED_POINTS)
            .map(|i| DVec2::new(head_x - i as f64 * TRAIL_SEED_SPACING, player.y))
            .collect();

        Self {
            phase: Phase::Idle,
            player,
            obstacles: Vec::new(),
            score: ScoreTracker::new(),
            tick: 0,
            countdown: config
                .time_limit_ticks()
                .map(|ticks| Countdown::new(ticks, config.tick_rate)),
            speed: config.base_speed,
            trail,
            obstacles_spawned: 0,
            obstacles_passed: 0,
            rng: SeededRng::new(config.seed),
        }
    }

    pub fn displayed_score(&self) -> u64 {
        self.score.displayed()
    }

    /// Remaining seconds (TimeAttack only)
    pub fn remaining_time(&self) -> Option<f64> {
        self.countdown.as_ref().map(Countdown::remaining_secs)
    }

    pub fn outcome(&self) -> Outcome {
        match self.phase {
            Phase::Terminated(outcome) => outcome,
            _ => Outcome::Continuing,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated(_))
    }
}
