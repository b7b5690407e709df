/// Terminal front end: draws the cube and turns layers from the keyboard
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use cube_core::{
    decode_turn, Camera, CubeState, Mesh, OrbitState, TurnCommand, TERMINAL_CELL_ASPECT,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Radians per arrow key press
const ORBIT_STEP: f32 = 0.15;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Turn(TurnCommand),
    Orbit { dyaw: f32, dpitch: f32 },
    Reset,
    Quit,
}

/// Map a key to an action; turn letters go through `decode_turn`
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(c) => decode_turn(c).map(Action::Turn),
        KeyCode::Up => Some(Action::Orbit {
            dyaw: 0.0,
            dpitch: ORBIT_STEP,
        }),
        KeyCode::Down => Some(Action::Orbit {
            dyaw: 0.0,
            dpitch: -ORBIT_STEP,
        }),
        KeyCode::Left => Some(Action::Orbit {
            dyaw: -ORBIT_STEP,
            dpitch: 0.0,
        }),
        KeyCode::Right => Some(Action::Orbit {
            dyaw: ORBIT_STEP,
            dpitch: 0.0,
        }),
        KeyCode::Backspace => Some(Action::Reset),
        _ => None,
    }
}

/// Main application struct for the terminal cube
pub struct TerminalApp {
    state: CubeState,
    mesh: Mesh,
    orbit: OrbitState,
    camera: Camera,
    renderer: AsciiRenderer,
    status: String,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(state: CubeState) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(state, width, height))
    }

    /// Build without querying the terminal
    pub fn with_size(state: CubeState, width: u16, height: u16) -> Self {
        let mesh = Mesh::cubelet(state.config().cubelet_size as f32);
        Self {
            state,
            mesh,
            orbit: OrbitState::default(),
            camera: Camera::with_cell_aspect(width as u32, height as u32, TERMINAL_CELL_ASPECT),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            status: String::from("ready"),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle every queued event before drawing; turns never overlap
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if let Some(action) = action_for_key(code) {
                    self.apply(action);
                }
            }
            Event::Resize(width, height) => {
                self.resize(width, height);
                execute!(stdout(), terminal::Clear(ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply one action to completion
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Orbit { dyaw, dpitch } => self.orbit.rotate(dyaw, dpitch),
            Action::Reset => {
                self.state.initialize();
                self.status = String::from("reset");
            }
            Action::Turn(command) => match self.state.turn(&command) {
                Ok(_) => {
                    self.status = format!(
                        "turned layer {} along {} ({} turns)",
                        command.layer,
                        command.axis,
                        self.state.turns_applied()
                    );
                }
                Err(err) => {
                    log::warn!("dropping turn: {}", err);
                    self.status = format!("turn refused: {}", err);
                }
            },
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.camera = Camera::with_cell_aspect(width as u32, height as u32, TERMINAL_CELL_ASPECT);
        self.renderer = AsciiRenderer::new(width as usize, height as usize);
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.renderer.clear();

        self.renderer
            .render_cube(&self.state, &self.mesh, &self.orbit, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Cube | FPS: {:.1} | U/D/L/R/F/B/M/E/S=Turn (Shift=reverse) Arrows=Orbit Backspace=Reset Q=Quit | {}",
                self.fps, self.status
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
