/// Cube Terminal - interactive 3x3x3 puzzle
///
/// Usage: cube-terminal ["<scramble>"]
///
/// Controls:
///   - U/D/L/R/F/B/M/E/S: Turn a layer (Shift reverses)
///   - Arrow Keys: Orbit the view
///   - Backspace: Reset the cube
///   - Q/ESC: Quit

use cube_core::{parse_moves, CubeState};
use cube_terminal::TerminalApp;
use std::env;
use std::io;

fn main() -> io::Result<()> {
    // Logs share the terminal with the cube; use RUST_LOG=debug 2>cube.log to see more
    env_logger::builder()
        .filter_module("cube_core", log::LevelFilter::Warn)
        .filter_module("cube_terminal", log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let mut state = CubeState::default();

    if let Some(scramble) = env::args().nth(1) {
        let moves = parse_moves(&scramble)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        state
            .apply_all(&moves)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        println!("Applied {} scramble moves", moves.len());
    }

    println!("Starting cube (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(state)?;
    app.run()?;

    println!("Solved or not, thanks for playing!");
    Ok(())
}
