//! Collision detection
//!
//! Pure functions over the player position and the obstacle set. Boundary
//! crashes are checked first and win when both kinds happen in one tick.

use super::obstacle::Obstacle;

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Player is clear
    None,
    /// Player left the viewport vertically
    Boundary,
    /// Player overlaps an obstacle outside its gap
    Obstacle { index: usize },
}

impl Collision {
    pub fn is_crash(&self) -> bool {
        !matches!(self, Collision::None)
    }
}

/// Check the player against the viewport and every active obstacle
///
/// Does not assume at most one obstacle overlaps the player.
pub fn check(
    anchor_x: f64,
    y: f64,
    radius: f64,
    obstacles: &[Obstacle],
    viewport_height: f64,
) -> Collision {
    if y < 0.0 || y > viewport_height {
        return Collision::Boundary;
    }

    let left = anchor_x - radius;
    let right = anchor_x + radius;
    obstacles
        .iter()
        .position(|obs| obs.overlaps_span(left, right) && !obs.gap_contains(y))
        .map_or(Collision::None, |index| Collision::Obstacle { index })
}

/// Flag obstacles whose trailing edge the anchor has just cleared
///
/// Returns the indices newly flagged this call. The flag is sticky, so each
/// obstacle is reported at most once.
pub fn detect_passes(anchor_x: f64, obstacles: &mut [Obstacle]) -> Vec<usize> {
    let mut passed = Vec::new();
    for (i, obs) in obstacles.iter_mut().enumerate() {
        if !obs.passed && anchor_x > obs.trailing_edge() {
            obs.passed = true;
            passed.push(i);
        }
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;

    fn wall(x: f64, gap_top: f64) -> Obstacle {
        Obstacle {
            x,
            width: 50.0,
            gap_top,
            gap_height: 150.0,
            passed: false,
            kind: ObstacleKind::Static,
        }
    }

    #[test]
    fn test_boundary_crash() {
        assert_eq!(check(300.0, -0.1, 4.0, &[], 800.0), Collision::Boundary);
        assert_eq!(check(300.0, 800.1, 4.0, &[], 800.0), Collision::Boundary);
        // Exactly on the edge is still inside
        assert_eq!(check(300.0, 0.0, 4.0, &[], 800.0), Collision::None);
        assert_eq!(check(300.0, 800.0, 4.0, &[], 800.0), Collision::None);
    }

    #[test]
    fn test_boundary_takes_precedence() {
        let obstacles = [wall(280.0, 100.0)];
        assert_eq!(
            check(300.0, 900.0, 4.0, &obstacles, 800.0),
            Collision::Boundary
        );
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let obstacles = [wall(280.0, 100.0)];
        assert_eq!(check(300.0, 175.0, 4.0, &obstacles, 800.0), Collision::None);
    }

    #[test]
    fn test_gap_edge_is_crash() {
        let obstacles = [wall(280.0, 100.0)];
        assert_eq!(
            check(300.0, 100.0, 4.0, &obstacles, 800.0),
            Collision::Obstacle { index: 0 }
        );
        assert_eq!(
            check(300.0, 250.0, 4.0, &obstacles, 800.0),
            Collision::Obstacle { index: 0 }
        );
    }

    #[test]
    fn test_horizontal_overlap_is_open_interval() {
        // Player spans [296, 304]; wall starting exactly at 304 does not overlap
        let touching = [wall(304.0, 500.0)];
        assert_eq!(check(300.0, 100.0, 4.0, &touching, 800.0), Collision::None);
        // Wall ending exactly at 296 does not overlap either
        let behind = [wall(246.0, 500.0)];
        assert_eq!(check(300.0, 100.0, 4.0, &behind, 800.0), Collision::None);
        let overlapping = [wall(303.9, 500.0)];
        assert_eq!(
            check(300.0, 100.0, 4.0, &overlapping, 800.0),
            Collision::Obstacle { index: 0 }
        );
    }

    #[test]
    fn test_reports_any_overlapping_obstacle() {
        // Overlapping walls cannot spawn, but the check handles them
        let obstacles = [wall(280.0, 100.0), wall(290.0, 400.0)];
        assert_eq!(
            check(300.0, 175.0, 4.0, &obstacles, 800.0),
            Collision::Obstacle { index: 1 }
        );
    }

    #[test]
    fn test_pass_flag_set_once() {
        let mut obstacles = vec![wall(200.0, 100.0), wall(600.0, 100.0)];
        assert_eq!(detect_passes(300.0, &mut obstacles), vec![0]);
        assert!(obstacles[0].passed);
        assert!(!obstacles[1].passed);
        assert!(detect_passes(300.0, &mut obstacles).is_empty());
    }

    #[test]
    fn test_pass_requires_clearing_trailing_edge() {
        let mut obstacles = vec![wall(250.0, 100.0)];
        assert!(detect_passes(300.0, &mut obstacles).is_empty());
        assert!(!obstacles[0].passed);
    }
}
