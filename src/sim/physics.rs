//! Player body integration
//!
//! Explicit Euler at a fixed tick: no substeps, no interpolation. Hosts that
//! want smoother visuals interpolate on their side.

use serde::{Deserialize, Serialize};

use super::config::SessionConfig;

/// The player's body (vertical axis only; the horizontal anchor is config)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Screen-space vertical position (down is positive)
    pub y: f64,
    /// Always within `[-terminal_velocity, terminal_velocity]`
    pub velocity: f64,
}

impl PlayerBody {
    /// Body at rest in the vertical centre of the viewport
    pub fn centered(config: &SessionConfig) -> Self {
        Self {
            y: config.viewport.height / 2.0,
            velocity: 0.0,
        }
    }

    /// Advance one tick
    pub fn integrate(&mut self, lift_held: bool, config: &SessionConfig) {
        self.velocity += config.gravity;
        if lift_held {
            self.velocity -= config.lift;
        }
        self.velocity = self
            .velocity
            .clamp(-config.terminal_velocity, config.terminal_velocity);
        self.y += self.velocity;
    }
}
