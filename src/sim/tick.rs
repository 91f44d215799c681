//! Fixed-step simulation tick
//!
//! One authoritative transition per tick. The host owns the clock; nothing
//! here sleeps, reads time, or touches cosmetic randomness.

use super::collision::{self, Collision};
use super::config::SessionConfig;
use super::obstacle;
use super::state::{GameEvent, Outcome, Phase, SimulationState, StepResult};
use crate::consts::{PRUNE_MARGIN, TIME_UPDATE_CADENCE};
use crate::error::SimError;

/// Advance the state by exactly one tick
///
/// Order: timer, physics, trail and score, spawn, obstacle motion, prune,
/// collision. A terminated state is rejected rather than silently ignored.
pub fn step(
    state: &mut SimulationState,
    config: &SessionConfig,
    lift_held: bool,
) -> Result<StepResult, SimError> {
    if let Phase::Terminated(outcome) = state.phase {
        return Err(SimError::StepAfterTermination {
            outcome,
            tick: state.tick,
        });
    }
    state.phase = Phase::Running;
    state.tick += 1;
    state.speed += config.speed_increment;

    let mut result = StepResult::continuing();

    // Time limit is checked before anything moves
    if let Some(countdown) = state.countdown.as_mut() {
        if countdown.tick() {
            result.remaining_time = Some(0);
            return Ok(finish(state, result, Vec::new(), Outcome::TimeExpired));
        }
        if state.tick % TIME_UPDATE_CADENCE == 0 {
            result.remaining_time = Some(countdown.display_secs());
        }
    }

    state.player.integrate(lift_held, config);

    advance_trail(state, config.anchor_x());
    state.score.advance(state.speed);
    result.score = state.score.refresh();

    let needs_spawn = state
        .obstacles
        .last()
        .is_none_or(|last| config.viewport.width - last.x > config.spawn_distance);
    if needs_spawn {
        let obs = obstacle::spawn(&mut state.rng, state.score.displayed(), config);
        state.obstacles_spawned += 1;
        log::debug!(
            "Obstacle #{} at tick {}: gap {:.1}+{:.1} {:?}",
            state.obstacles_spawned,
            state.tick,
            obs.gap_top,
            obs.gap_height,
            obs.kind
        );
        state.obstacles.push(obs);
    }

    let height = config.viewport.height;
    for obs in &mut state.obstacles {
        obs.advance(state.speed, height);
    }
    state
        .obstacles
        .retain(|obs| obs.trailing_edge() > -PRUNE_MARGIN);

    let anchor_x = config.anchor_x();
    let collision = collision::check(
        anchor_x,
        state.player.y,
        config.body_radius,
        &state.obstacles,
        height,
    );
    if collision == Collision::Boundary {
        return Ok(finish(state, result, Vec::new(), Outcome::CrashedBoundary));
    }

    // Pass-through bonuses apply even on an obstacle-crash tick
    let mut passes = Vec::new();
    for _ in collision::detect_passes(anchor_x, &mut state.obstacles) {
        state.obstacles_passed += 1;
        state.score.add_bonus();
        log::debug!(
            "Passed obstacle {} at tick {}",
            state.obstacles_passed,
            state.tick
        );
        passes.push(GameEvent::ObstaclePassed {
            ordinal: state.obstacles_passed,
        });
    }
    if !passes.is_empty() {
        if let Some(score) = state.score.refresh() {
            result.score = Some(score);
        }
    }

    let outcome = match collision {
        Collision::Obstacle { .. } => Outcome::CrashedObstacle,
        _ => Outcome::Continuing,
    };
    Ok(finish(state, result, passes, outcome))
}

/// Shift the trail with the scroll and append the current head
fn advance_trail(state: &mut SimulationState, head_x: f64) {
    let speed = state.speed;
    for point in &mut state.trail {
        point.x -= speed;
    }
    state.trail.retain(|p| p.x > 0.0);
    state
        .trail
        .push(glam::DVec2::new(head_x, state.player.y));
}

/// Assemble events in a stable order and apply termination
fn finish(
    state: &mut SimulationState,
    mut result: StepResult,
    passes: Vec<GameEvent>,
    outcome: Outcome,
) -> StepResult {
    if let Some(secs) = result.remaining_time {
        result.events.push(GameEvent::TimeChanged(secs));
    }
    if let Some(score) = result.score {
        result.events.push(GameEvent::ScoreChanged(score));
    }
    result.events.extend(passes);

    if outcome.is_terminal() {
        state.phase = Phase::Terminated(outcome);
        let final_score = state.score.displayed();
        log::info!(
            "Run over at tick {}: {:?}, score {}",
            state.tick,
            outcome,
            final_score
        );
        result.events.push(GameEvent::Terminated {
            outcome,
            final_score,
        });
    }
    result.outcome = outcome;
    result
}

/// A simulation session: the only thing hosts talk to
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    state: SimulationState,
}

impl Session {
    /// Validate the config and start in `Idle`
    pub fn new(config: SessionConfig) -> Result<Self, SimError> {
        config.validate()?;
        let state = SimulationState::new(&config);
        log::info!(
            "Session created: mode={} seed={}",
            config.mode.as_str(),
            config.seed
        );
        Ok(Self { config, state })
    }

    /// Reinitialise everything and reseed the RNG
    ///
    /// An invalid config is rejected and the current session left untouched.
    pub fn reset(&mut self, config: SessionConfig) -> Result<(), SimError> {
        config.validate()?;
        self.state = SimulationState::new(&config);
        self.config = config;
        log::info!(
            "Session reset: mode={} seed={}",
            self.config.mode.as_str(),
            self.config.seed
        );
        Ok(())
    }

    /// Reset with the current config
    pub fn restart(&mut self) {
        self.state = SimulationState::new(&self.config);
    }

    /// Explicit `Idle -> Running`; a no-op while running
    pub fn start(&mut self) -> Result<(), SimError> {
        match self.state.phase {
            Phase::Terminated(outcome) => Err(SimError::StepAfterTermination {
                outcome,
                tick: self.state.tick,
            }),
            _ => {
                self.state.phase = Phase::Running;
                Ok(())
            }
        }
    }

    /// Advance one tick
    pub fn step(&mut self, lift_held: bool) -> Result<StepResult, SimError> {
        step(&mut self.state, &self.config, lift_held)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Read-only snapshot for renderers
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn player_y(&self) -> f64 {
        self.state.player.y
    }

    pub fn anchor_x(&self) -> f64 {
        self.config.anchor_x()
    }

    pub fn obstacles(&self) -> &[obstacle::Obstacle] {
        &self.state.obstacles
    }

    pub fn displayed_score(&self) -> u64 {
        self.state.displayed_score()
    }

    pub fn remaining_time(&self) -> Option<f64> {
        self.state.remaining_time()
    }

    pub fn trail(&self) -> &[glam::DVec2] {
        &self.state.trail
    }
}
