//! Input tapes
//!
//! A run is fully determined by its config and the per-tick lift input, so a
//! tape of booleans is enough to re-run it anywhere. Used to check claimed
//! daily-challenge results and as the data source for ghost playback.

use serde::{Deserialize, Serialize};

use super::config::SessionConfig;
use super::state::{Outcome, StepResult};
use super::tick::Session;
use crate::error::{SimError, StorageError};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub outcome: Outcome,
    pub final_score: u64,
    pub obstacles_spawned: u32,
}

/// Config plus one input bit per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub config: SessionConfig,
    pub inputs: Vec<bool>,
}

impl Replay {
    /// Re-run the tape from a fresh session
    ///
    /// Stops at termination or when the tape runs out.
    pub fn run(&self) -> Result<RunSummary, SimError> {
        let mut session = Session::new(self.config.clone())?;
        for &held in &self.inputs {
            if session.step(held)?.outcome.is_terminal() {
                break;
            }
        }
        Ok(summarize(&session))
    }

    /// Re-run and compare with a claimed result
    pub fn verify(&self, claimed: &RunSummary) -> Result<bool, SimError> {
        let actual = self.run()?;
        if actual != *claimed {
            log::warn!("Replay mismatch: claimed {claimed:?}, got {actual:?}");
        }
        Ok(actual == *claimed)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Summary of a session's current state
pub fn summarize(session: &Session) -> RunSummary {
    let state = session.state();
    RunSummary {
        ticks: state.tick,
        outcome: state.outcome(),
        final_score: state.displayed_score(),
        obstacles_spawned: state.obstacles_spawned,
    }
}

/// Wraps a session and records every input it steps with
#[derive(Debug)]
pub struct Recorder {
    session: Session,
    inputs: Vec<bool>,
}

impl Recorder {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            inputs: Vec::new(),
        }
    }

    pub fn step(&mut self, lift_held: bool) -> Result<StepResult, SimError> {
        let result = self.session.step(lift_held)?;
        self.inputs.push(lift_held);
        Ok(result)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Finish recording
    pub fn into_replay(self) -> Replay {
        Replay {
            config: self.session.config().clone(),
            inputs: self.inputs,
        }
    }
}
