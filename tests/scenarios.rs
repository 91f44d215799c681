//! End-to-end runs through the public session API

use neon_serpent::sim::{
    GameEvent, GameMode, Outcome, Phase, Replay, Session, SessionConfig, summarize,
};

fn scenario_config() -> SessionConfig {
    SessionConfig {
        gravity: 0.3,
        lift: 0.5,
        terminal_velocity: 8.0,
        base_speed: 3.5,
        speed_increment: 0.002,
        obstacle_width: 50.0,
        gap_size: 190.0,
        spawn_distance: 350.0,
        seed: 1,
        ..Default::default()
    }
    .with_viewport(1200.0, 800.0)
}

/// Steer towards the centre of the next gap
fn autopilot(session: &Session) -> bool {
    let state = session.state();
    let left = session.anchor_x() - session.config().body_radius;
    let target = state
        .obstacles
        .iter()
        .find(|obs| obs.trailing_edge() > left)
        .map_or(400.0, |obs| obs.gap_top + obs.gap_height / 2.0);
    state.player.y + state.player.velocity * 16.0 > target
}

fn scripted(tick: u64) -> bool {
    (tick / 5) % 3 == 0
}

#[test]
fn first_tick_matches_reference() {
    let mut session = Session::new(scenario_config()).unwrap();
    let y0 = session.player_y();
    let result = session.step(false).unwrap();

    assert_eq!(result.outcome, Outcome::Continuing);
    assert_eq!(result.score, None);
    assert!((session.state().player.velocity - 0.3).abs() < 1e-12);
    assert!((session.player_y() - (y0 + 0.3)).abs() < 1e-9);
    assert_eq!(session.displayed_score(), 0);
    assert_eq!(session.obstacles().len(), 1);
}

#[test]
fn no_input_crashes_into_floor_at_tick_63() {
    let mut session = Session::new(scenario_config()).unwrap();
    let mut ended = None;
    for _ in 0..500 {
        let result = session.step(false).unwrap();
        if result.outcome.is_terminal() {
            ended = Some((session.state().tick, result.outcome));
            break;
        }
    }
    assert_eq!(ended, Some((63, Outcome::CrashedBoundary)));
    assert!(session.player_y() > 800.0);
    assert_eq!(session.phase(), Phase::Terminated(Outcome::CrashedBoundary));
}

#[test]
fn same_seed_and_inputs_are_identical() {
    let mut a = Session::new(scenario_config()).unwrap();
    let mut b = Session::new(scenario_config()).unwrap();
    for tick in 0..3_000 {
        let ra = a.step(scripted(tick)).unwrap();
        let rb = b.step(scripted(tick)).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a.state(), b.state());
        if ra.outcome.is_terminal() {
            break;
        }
    }
    assert_eq!(summarize(&a), summarize(&b));
}

#[test]
fn input_never_touches_the_rng_stream() {
    let mut lifting = Session::new(scenario_config()).unwrap();
    let mut falling = Session::new(scenario_config()).unwrap();
    for _ in 0..60 {
        let r1 = lifting.step(true).unwrap();
        let r2 = falling.step(false).unwrap();
        assert_eq!(lifting.state().rng, falling.state().rng);
        assert_eq!(lifting.obstacles(), falling.obstacles());
        if r1.outcome.is_terminal() || r2.outcome.is_terminal() {
            break;
        }
    }
}

#[test]
fn reset_reproduces_the_run() {
    let mut session = Session::new(scenario_config()).unwrap();
    let mut first = Vec::new();
    for tick in 0..400 {
        first.push(session.step(scripted(tick)).unwrap());
        if first.last().is_some_and(|r| r.outcome.is_terminal()) {
            break;
        }
    }
    session.reset(scenario_config()).unwrap();
    assert_eq!(session.phase(), Phase::Idle);
    for (tick, expected) in first.iter().enumerate() {
        assert_eq!(&session.step(scripted(tick as u64)).unwrap(), expected);
    }
}

#[test]
fn time_attack_expires_at_tick_120() {
    let config = SessionConfig {
        gravity: 0.0,
        lift: 0.0,
        mode: GameMode::TimeAttack,
        time_limit: Some(2.0),
        tick_rate: 60,
        ..scenario_config()
    };
    let mut session = Session::new(config).unwrap();
    let mut time_updates = Vec::new();
    let mut ended = None;
    for _ in 0..200 {
        let result = session.step(false).unwrap();
        time_updates.extend(result.remaining_time);
        if result.outcome.is_terminal() {
            ended = Some((session.state().tick, result.outcome));
            break;
        }
    }
    assert_eq!(ended, Some((120, Outcome::TimeExpired)));
    assert_eq!(session.remaining_time(), Some(0.0));
    // Ceil of seconds left every 10 ticks, then 0 at expiry
    assert_eq!(time_updates.first(), Some(&2));
    assert_eq!(time_updates.last(), Some(&0));
    assert_eq!(time_updates.len(), 12);
    assert!(time_updates.windows(2).all(|w| w[0] >= w[1]));
    assert!(session.step(false).is_err());
}

#[test]
fn autopilot_scores_are_monotonic_and_pass_obstacles() {
    let mut session = Session::new(scenario_config()).unwrap();
    let mut emitted = Vec::new();
    let mut passes = 0;
    let mut terminated = 0;
    for _ in 0..5_000 {
        let lift = autopilot(&session);
        let result = session.step(lift).unwrap();
        for event in &result.events {
            match event {
                GameEvent::ScoreChanged(score) => emitted.push(*score),
                GameEvent::ObstaclePassed { .. } => passes += 1,
                GameEvent::Terminated { final_score, .. } => {
                    terminated += 1;
                    assert_eq!(*final_score, session.displayed_score());
                }
                GameEvent::TimeChanged(_) => panic!("classic mode has no timer"),
            }
        }
        if result.outcome.is_terminal() {
            break;
        }
    }
    assert!(passes >= 1, "autopilot should clear at least one obstacle");
    assert_eq!(session.state().obstacles_passed, passes);
    assert!(terminated <= 1);
    assert!(emitted.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(emitted.last().copied(), Some(session.displayed_score()));
    assert!(session.displayed_score() >= 50);
}

#[test]
fn pvp_stub_plays_like_classic() {
    let classic = scenario_config();
    let pvp = SessionConfig {
        mode: GameMode::Pvp,
        ..scenario_config()
    };
    let inputs: Vec<bool> = (0..2_000).map(scripted).collect();
    let a = Replay {
        config: classic,
        inputs: inputs.clone(),
    }
    .run()
    .unwrap();
    let b = Replay { config: pvp, inputs }.run().unwrap();
    assert_eq!(a, b);
}
