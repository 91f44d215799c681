//! Obstacle generation and motion
//!
//! Gap geometry comes only from the seeded RNG and the displayed score, so a
//! seed reproduces the same obstacle sequence whatever the player does.

use serde::{Deserialize, Serialize};

use super::config::SessionConfig;
use super::rng::SeededRng;
use crate::consts::*;

/// Oscillation direction of a moving gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Gap offset decreasing (towards the top)
    Up,
    /// Gap offset increasing (towards the bottom)
    Down,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Obstacle behaviour; only moving gaps carry a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Static,
    Oscillating { direction: Direction },
}

/// A vertical wall with one passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leading (left) edge
    pub x: f64,
    pub width: f64,
    /// Top of the gap
    pub gap_top: f64,
    pub gap_height: f64,
    /// Set once the player clears the trailing edge; never cleared
    pub passed: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn trailing_edge(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f64 {
        self.gap_top + self.gap_height
    }

    /// Strictly inside the gap (touching either edge is not)
    #[inline]
    pub fn gap_contains(&self, y: f64) -> bool {
        self.gap_top < y && y < self.gap_bottom()
    }

    /// Open-interval overlap with `[left, right]`
    #[inline]
    pub fn overlaps_span(&self, left: f64, right: f64) -> bool {
        right > self.x && left < self.trailing_edge()
    }

    pub fn is_oscillating(&self) -> bool {
        matches!(self.kind, ObstacleKind::Oscillating { .. })
    }

    /// Scroll left and run the gap oscillator
    pub fn advance(&mut self, speed: f64, viewport_height: f64) {
        self.x -= speed;

        if let ObstacleKind::Oscillating { ref mut direction } = self.kind {
            self.gap_top += direction.sign() * OSCILLATE_STEP;
            let lowest = viewport_height - self.gap_height - GAP_MARGIN;
            if self.gap_top < GAP_MARGIN || self.gap_top > lowest {
                *direction = direction.flipped();
            }
        }
    }
}

/// Gap height for the current displayed score
pub fn gap_height_for_score(score: u64, gap_size: f64) -> f64 {
    let difficulty = (score / SCORE_PER_DIFFICULTY).min(MAX_DIFFICULTY_MOD);
    (gap_size - difficulty as f64).max(MIN_GAP_HEIGHT)
}

/// Generate the next obstacle just past the right edge
///
/// Draw order is fixed: gap offset, kind, direction. The direction draw is
/// consumed even for static obstacles.
pub fn spawn(rng: &mut SeededRng, score: u64, config: &SessionConfig) -> Obstacle {
    let height = config.viewport.height;
    let gap_height = gap_height_for_score(score, config.gap_size);

    let min_top = GAP_MARGIN;
    let max_top = height - gap_height - GAP_MARGIN;
    let gap_top = rng.next_f64() * (max_top - min_top) + min_top;

    let oscillating = rng.next_f64() > OSCILLATE_THRESHOLD;
    let direction = if rng.next_f64() > 0.5 {
        Direction::Down
    } else {
        Direction::Up
    };

    let kind = if oscillating {
        ObstacleKind::Oscillating { direction }
    } else {
        ObstacleKind::Static
    };

    Obstacle {
        x: config.viewport.width + SPAWN_OFFSET,
        width: config.obstacle_width,
        gap_top,
        gap_height,
        passed: false,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config() -> SessionConfig {
        SessionConfig {
            gap_size: 190.0,
            ..Default::default()
        }
        .with_viewport(1200.0, 800.0)
    }

    fn oscillating(gap_top: f64, direction: Direction) -> Obstacle {
        Obstacle {
            x: 500.0,
            width: 50.0,
            gap_top,
            gap_height: 190.0,
            passed: false,
            kind: ObstacleKind::Oscillating { direction },
        }
    }

    #[test]
    fn test_gap_shrinks_with_score() {
        assert_eq!(gap_height_for_score(0, 190.0), 190.0);
        assert_eq!(gap_height_for_score(49, 190.0), 190.0);
        assert_eq!(gap_height_for_score(500, 190.0), 180.0);
        // Difficulty caps at 60
        assert_eq!(gap_height_for_score(1_000_000, 250.0), 190.0);
        // Floor
        assert_eq!(gap_height_for_score(1_000, 150.0), 130.0);
    }

    #[test]
    fn test_seed_1_first_obstacle() {
        let mut rng = SeededRng::new(1);
        let obs = spawn(&mut rng, 0, &config());
        assert_eq!(obs.x, 1250.0);
        assert_eq!(obs.gap_height, 190.0);
        assert!((obs.gap_top - 369.8077096999623).abs() < 1e-9);
        assert_eq!(obs.kind, ObstacleKind::Static);
        assert!(!obs.passed);
        // Three draws consumed
        let mut reference = SeededRng::new(1);
        for _ in 0..3 {
            reference.next_u32();
        }
        assert_eq!(rng, reference);
    }

    #[test]
    fn test_oscillator_flips_at_margins() {
        let mut obs = oscillating(51.0, Direction::Up);
        obs.advance(0.0, 800.0);
        assert_eq!(obs.gap_top, 49.0);
        assert_eq!(
            obs.kind,
            ObstacleKind::Oscillating {
                direction: Direction::Down
            }
        );
        obs.advance(0.0, 800.0);
        assert_eq!(obs.gap_top, 51.0);

        // Lowest top = 800 - 190 - 50 = 560
        let mut obs = oscillating(559.0, Direction::Down);
        obs.advance(3.0, 800.0);
        assert_eq!(obs.gap_top, 561.0);
        assert_eq!(obs.x, 497.0);
        assert_eq!(
            obs.kind,
            ObstacleKind::Oscillating {
                direction: Direction::Up
            }
        );
    }

    #[test]
    fn test_static_gap_does_not_move() {
        let mut obs = oscillating(300.0, Direction::Up);
        obs.kind = ObstacleKind::Static;
        obs.advance(3.5, 800.0);
        assert_eq!(obs.gap_top, 300.0);
        assert_eq!(obs.x, 496.5);
    }

    #[test]
    fn test_gap_contains_is_strict() {
        let obs = oscillating(300.0, Direction::Up);
        assert!(!obs.gap_contains(300.0));
        assert!(!obs.gap_contains(490.0));
        assert!(obs.gap_contains(300.5));
    }

    proptest! {
        #[test]
        fn gap_never_below_floor(score in any::<u64>(), gap in 1.0..400.0f64) {
            prop_assert!(gap_height_for_score(score, gap) >= MIN_GAP_HEIGHT);
        }

        #[test]
        fn spawned_gap_stays_on_screen(
            seed in any::<u32>(),
            score in 0u64..10_000,
            gap in 1.0..400.0f64,
            slack in 0.0..1500.0f64,
        ) {
            let base = SessionConfig { gap_size: gap, ..config() };
            let height = base.min_viewport_height() + slack;
            let cfg = base.with_viewport(1200.0, height);
            prop_assert!(cfg.validate().is_ok());
            let mut rng = SeededRng::new(seed);
            let obs = spawn(&mut rng, score, &cfg);
            prop_assert!(obs.gap_height >= MIN_GAP_HEIGHT);
            prop_assert!(obs.gap_top >= GAP_MARGIN);
            prop_assert!(obs.gap_bottom() <= cfg.viewport.height - GAP_MARGIN + 1e-9);
        }
    }
}
