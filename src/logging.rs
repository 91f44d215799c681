//! Logger setup for hosts

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger for a headless run
///
/// A `RUST_LOG` filter takes priority. Without one, `verbose` switches from
/// info (session and run-over lines) to debug (per-obstacle spawns, passes
/// and audio cues).
pub fn init(verbose: bool) {
    let fallback = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = Env::default().default_filter_or(fallback.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Tests call this once per case in a single process.
    if builder.try_init().is_err() {
        log::debug!("Logger already installed");
    }
}
