/// Example: measure floating-point drift over many turns, headless
///
/// Usage: cargo run --example drift_report -- [turns]

use cube_core::{CubeConfig, CubeState, Move};
use std::env;
use std::io;

fn main() -> io::Result<()> {
    env_logger::builder()
        .filter_module("cube_core", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let turns: usize = match env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        None => 100_000,
    };

    for snap_interval in [None, Some(16)] {
        let config = CubeConfig::default().with_snap_interval(snap_interval);
        let mut state = CubeState::new(config);

        for i in 0..turns {
            // walk the moves with a stride so neighbouring turns differ
            let command = Move::ALL[(i * 5) % Move::ALL.len()].turn_command();
            state
                .turn(&command)
                .map_err(io::Error::other)?;
        }

        println!(
            "snap every {:>6}: {} turns, {} cubelets, max drift {:e}",
            snap_interval.map_or("never".to_string(), |n| n.to_string()),
            state.turns_applied(),
            state.cubelet_count(),
            state.max_drift()
        );
    }

    Ok(())
}
