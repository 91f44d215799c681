//! Neon Serpent headless host
//!
//! Drives a session tick by tick with either no input or a simple autopilot,
//! optionally printing ASCII frames from the read-only snapshot. Also records
//! and verifies replay tapes and keeps a local leaderboard.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use neon_serpent::fx::{CosmeticRng, Effects};
use neon_serpent::highscores::{HighScores, format_age};
use neon_serpent::logging;
use neon_serpent::sim::{
    GameEvent, GameMode, Recorder, Replay, RunSummary, Session, SessionConfig, clock_seed,
    daily_seed, summarize,
};

/// Lookahead (ticks) the autopilot uses to predict its position
const AUTOPILOT_LOOKAHEAD: f64 = 16.0;
/// ASCII frame size
const FRAME_COLS: usize = 64;
const FRAME_ROWS: usize = 20;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Classic,
    TimeAttack,
    Daily,
    Pvp,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Classic => GameMode::Classic,
            ModeArg::TimeAttack => GameMode::TimeAttack,
            ModeArg::Daily => GameMode::Daily,
            ModeArg::Pvp => GameMode::Pvp,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "neon-serpent", about = "Run a seeded endless-runner session headlessly")]
struct Args {
    /// Game mode
    #[arg(long, value_enum, default_value = "classic")]
    mode: ModeArg,
    /// Seed (defaults to the clock, or today's date for daily)
    #[arg(long)]
    seed: Option<u32>,
    /// Stop after this many ticks if the run is still going
    #[arg(long, default_value_t = 36_000)]
    ticks: u64,
    /// Viewport width
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    /// Viewport height
    #[arg(long, default_value_t = 720.0)]
    height: f64,
    /// Steer towards the next gap instead of never lifting
    #[arg(long)]
    autopilot: bool,
    /// Print an ASCII frame every N ticks
    #[arg(long)]
    render_every: Option<u64>,
    /// Leaderboard file to update on game over
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Name for the leaderboard entry
    #[arg(long, default_value = "Player")]
    name: String,
    /// Write the input tape and result here
    #[arg(long)]
    record: Option<PathBuf>,
    /// Re-run a recorded tape and check its result instead of playing
    #[arg(long)]
    verify: Option<PathBuf>,
    /// Print the final state as JSON
    #[arg(long)]
    dump: bool,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// On-disk form of a recorded run
#[derive(Debug, Serialize, Deserialize)]
struct RecordedRun {
    replay: Replay,
    summary: RunSummary,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);
    log::info!("Neon Serpent (headless) starting...");

    if let Some(path) = &args.verify {
        return verify(path);
    }

    let mode = GameMode::from(args.mode);
    let seed = args.seed.unwrap_or_else(|| default_seed(mode));
    let config = SessionConfig::for_mode(mode, seed).with_viewport(args.width, args.height);
    let viewport = config.viewport;

    let mut recorder = Recorder::new(Session::new(config)?);
    let mut fx = Effects::new(CosmeticRng::from_entropy(), viewport);
    log::info!("Playing {} with seed {}", mode.as_str(), seed);

    for _ in 0..args.ticks {
        let lift = args.autopilot && autopilot(recorder.session());
        let result = recorder.step(lift)?;

        for event in &result.events {
            if let Some(cue) = event.cue() {
                log::debug!("cue {cue:?}");
            }
            match event {
                GameEvent::TimeChanged(secs) => log::info!("{secs}s left"),
                GameEvent::Terminated { outcome, final_score } => {
                    log::info!("Game over: {outcome:?} with {final_score}");
                    let session = recorder.session();
                    fx.explode(DVec2::new(session.anchor_x(), session.player_y()));
                }
                _ => {}
            }
        }
        fx.update(!result.outcome.is_terminal(), viewport);

        let tick = recorder.session().state().tick;
        if let Some(every) = args.render_every {
            if every > 0 && (tick % every == 0 || result.outcome.is_terminal()) {
                println!("{}", render_frame(recorder.session(), &fx));
            }
        }
        if recorder.session().state().is_terminated() {
            break;
        }
    }

    let summary = summarize(recorder.session());
    println!(
        "mode={} seed={} ticks={} outcome={:?} score={} obstacles={}",
        mode.as_str(),
        seed,
        summary.ticks,
        summary.outcome,
        summary.final_score,
        summary.obstacles_spawned
    );

    if args.dump {
        println!("{}", serde_json::to_string_pretty(recorder.session().state())?);
    }

    if let Some(path) = &args.scores {
        if summary.outcome.is_terminal() {
            let mut board = HighScores::load(path);
            let now = now_millis();
            match board.add_score(&args.name, summary.final_score, mode, now) {
                Some(rank) => log::info!("New high score! Rank #{rank}"),
                None => log::info!("Score did not make the board"),
            }
            board.save(path)?;
            for (i, entry) in board.entries.iter().take(10).enumerate() {
                println!(
                    "{:>2}. {:<12} {:>6} {:<10} {}",
                    i + 1,
                    entry.name,
                    entry.score,
                    entry.mode.as_str(),
                    format_age(entry.date, now)
                );
            }
        }
    }

    if let Some(path) = &args.record {
        let run = RecordedRun {
            replay: recorder.into_replay(),
            summary,
        };
        fs::write(path, serde_json::to_string(&run)?)?;
        log::info!("Recorded {} ticks to {}", summary.ticks, path.display());
    }

    Ok(())
}

/// Re-run a recorded tape and compare with its stored result
fn verify(path: &Path) -> anyhow::Result<()> {
    let run: RecordedRun = serde_json::from_str(&fs::read_to_string(path)?)?;
    let ok = run.replay.verify(&run.summary)?;
    println!(
        "{}: seed={} ticks={} score={} -> {}",
        path.display(),
        run.replay.config.seed,
        run.summary.ticks,
        run.summary.final_score,
        if ok { "VERIFIED" } else { "MISMATCH" }
    );
    if !ok {
        anyhow::bail!("replay result does not match the recorded summary");
    }
    Ok(())
}

/// Hold lift while the predicted position is below the next gap's centre
fn autopilot(session: &Session) -> bool {
    let state = session.state();
    let config = session.config();
    let left = session.anchor_x() - config.body_radius;
    let target = state
        .obstacles
        .iter()
        .find(|obs| obs.trailing_edge() > left)
        .map_or(config.viewport.height / 2.0, |obs| {
            obs.gap_top + obs.gap_height / 2.0
        });
    state.player.y + state.player.velocity * AUTOPILOT_LOOKAHEAD > target
}

/// Coarse ASCII view of the snapshot
fn render_frame(session: &Session, fx: &Effects) -> String {
    let state = session.state();
    let viewport = session.config().viewport;
    let sx = FRAME_COLS as f64 / viewport.width;
    let sy = FRAME_ROWS as f64 / viewport.height;
    let cell = |p: DVec2| -> Option<(usize, usize)> {
        let (c, r) = ((p.x * sx).floor(), (p.y * sy).floor());
        (c >= 0.0 && r >= 0.0 && (c as usize) < FRAME_COLS && (r as usize) < FRAME_ROWS)
            .then(|| (r as usize, c as usize))
    };

    let mut grid = vec![vec![' '; FRAME_COLS]; FRAME_ROWS];
    for star in &fx.stars {
        if let Some((r, c)) = cell(star.pos) {
            grid[r][c] = '.';
        }
    }
    for obs in &state.obstacles {
        let glyph = if obs.is_oscillating() { '%' } else { '#' };
        for r in 0..FRAME_ROWS {
            let y = (r as f64 + 0.5) / sy;
            if obs.gap_contains(y) {
                continue;
            }
            let mut x = obs.x.max(0.0);
            while x < obs.trailing_edge() {
                if let Some((_, c)) = cell(DVec2::new(x, y)) {
                    grid[r][c] = glyph;
                }
                x += 1.0 / sx;
            }
        }
    }
    for point in &state.trail {
        if let Some((r, c)) = cell(*point) {
            grid[r][c] = '~';
        }
    }
    for particle in &fx.particles {
        if let Some((r, c)) = cell(particle.pos) {
            grid[r][c] = '+';
        }
    }
    if let Some((r, c)) = cell(DVec2::new(session.anchor_x(), state.player.y)) {
        grid[r][c] = '@';
    }

    let mut out = format!(
        "tick {:>6}  score {:>6}{}\n",
        state.tick,
        state.displayed_score(),
        state
            .remaining_time()
            .map(|t| format!("  time {:.1}s", t))
            .unwrap_or_default()
    );
    out.push('+');
    out.push_str(&"-".repeat(FRAME_COLS));
    out.push_str("+\n");
    for row in grid {
        out.push('|');
        out.extend(row);
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(FRAME_COLS));
    out.push('+');
    out
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Clock seed for free play, calendar seed (UTC) for the daily challenge
fn default_seed(mode: GameMode) -> u32 {
    let millis = now_millis();
    match mode {
        GameMode::Daily => {
            let (y, m, d) = civil_from_days((millis / 86_400_000) as i64);
            daily_seed(y, m, d)
        }
        _ => clock_seed(millis),
    }
}

/// Days since 1970-01-01 to (year, month, day)
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y as i32, m as u32, d as u32)
}
