//! CLI harness for playing pickleball_core against the CPU in a raw terminal.

use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, Clear, ClearType,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use pickleball_core::{Action, CellGrid, Config, Frame, Game, Input};
use std::io::{stdout, Error, ErrorKind, Result, Write};
use std::time::{Duration, Instant};

const FIELD_WIDTH: usize = 80;
const FIELD_HEIGHT: usize = 24;

/// Ticks a tapped key stays held when the terminal reports no releases.
/// Long enough to bridge the gap before keyboard auto-repeat starts.
const LATCH_TICKS: u8 = 12;

#[derive(Parser, Debug)]
#[command(
    name = "cli_harness",
    version,
    about = "Play Pickleball against the CPU in a raw terminal"
)]
struct Cli {
    /// Seed for serves and CPU noise (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    fps: u16,
}

/// Keyboard capability detection
#[derive(Debug, Clone, Copy)]
enum KeyboardMode {
    Enhanced, // Supports KeyEventKind::Release
    Latch,    // Presses only; holds are simulated
}

fn detect_keyboard_capabilities() -> KeyboardMode {
    match supports_keyboard_enhancement() {
        Ok(true) => KeyboardMode::Enhanced,
        Ok(false) | Err(_) => KeyboardMode::Latch,
    }
}

/// Logical keys of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameKey {
    Up,
    Down,
    Press(Action),
    Close,
}

fn map_key(event: &KeyEvent) -> Option<GameKey> {
    match event.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(GameKey::Close)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameKey::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameKey::Down),
        KeyCode::Enter => Some(GameKey::Press(Action::Confirm)),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(GameKey::Press(Action::SelectEasy)),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(GameKey::Press(Action::SelectHard)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameKey::Press(Action::Restart)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            Some(GameKey::Press(Action::Quit))
        }
        _ => None,
    }
}

/// Unified input system that adapts to terminal capabilities
enum InputSystem {
    Enhanced { up: bool, down: bool, pressed: Input },
    Latch { up: u8, down: u8, pressed: Input },
}

impl InputSystem {
    fn new(mode: KeyboardMode) -> Self {
        match mode {
            KeyboardMode::Enhanced => InputSystem::Enhanced {
                up: false,
                down: false,
                pressed: Input::zero(),
            },
            KeyboardMode::Latch => InputSystem::Latch {
                up: 0,
                down: 0,
                pressed: Input::zero(),
            },
        }
    }

    fn get_mode_description(&self) -> &'static str {
        match self {
            InputSystem::Enhanced { .. } => "Enhanced (Hold keys)",
            InputSystem::Latch { .. } => "Latch (Tap or hold keys)",
        }
    }

    fn handle_key_event(&mut self, event: KeyEvent) {
        let Some(key) = map_key(&event) else {
            return;
        };

        match self {
            InputSystem::Enhanced { up, down, pressed } => {
                let held = event.kind != KeyEventKind::Release;
                match key {
                    GameKey::Up => *up = held,
                    GameKey::Down => *down = held,
                    GameKey::Press(action) => {
                        if event.kind == KeyEventKind::Press {
                            pressed.press(action);
                        }
                    }
                    GameKey::Close => pressed.close_requested = true,
                }
            }
            InputSystem::Latch { up, down, pressed } => match key {
                GameKey::Up => *up = LATCH_TICKS,
                GameKey::Down => *down = LATCH_TICKS,
                GameKey::Press(action) => pressed.press(action),
                GameKey::Close => pressed.close_requested = true,
            },
        }
    }

    /// Input for the next tick; clears one-shot presses
    fn take_input(&mut self) -> Input {
        match self {
            InputSystem::Enhanced { up, down, pressed } => {
                let actions = std::mem::take(pressed);
                Input {
                    up: *up,
                    down: *down,
                    ..actions
                }
            }
            InputSystem::Latch { up, down, pressed } => {
                let actions = std::mem::take(pressed);
                let input = Input {
                    up: *up > 0,
                    down: *down > 0,
                    ..actions
                };
                *up = up.saturating_sub(1);
                *down = down.saturating_sub(1);
                input
            }
        }
    }
}

fn term_color(color: pickleball_core::Color) -> Color {
    match color {
        pickleball_core::Color::Black => Color::Black,
        pickleball_core::Color::White => Color::White,
        pickleball_core::Color::Yellow => Color::Yellow,
        pickleball_core::Color::Red => Color::Red,
        pickleball_core::Color::Blue => Color::Blue,
        pickleball_core::Color::DarkBlue => Color::DarkBlue,
    }
}

/// CLI application state
struct CliApp {
    game: Game,
    tick_interval: Duration,
    last_tick: Instant,
    input_system: InputSystem,
    grid: CellGrid,
}

impl CliApp {
    fn new(config: Config) -> Self {
        let input_system = InputSystem::new(detect_keyboard_capabilities());

        // Display which input mode was detected
        eprintln!("Input mode: {}", input_system.get_mode_description());

        Self {
            game: Game::new(config),
            tick_interval: Duration::from_secs_f64(1.0 / f64::from(config.tick_hz)),
            last_tick: Instant::now(),
            input_system,
            grid: CellGrid::new(FIELD_WIDTH, FIELD_HEIGHT, &config),
        }
    }

    fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;

        let mut stdout = stdout();
        let enhanced = matches!(self.input_system, InputSystem::Enhanced { .. });

        if enhanced {
            queue!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                )
            )?;
        }

        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        let result = self.game_loop();

        if enhanced {
            queue!(stdout, PopKeyboardEnhancementFlags)?;
        }
        execute!(stdout, LeaveAlternateScreen, Show)?;
        disable_raw_mode()?;
        result
    }

    fn game_loop(&mut self) -> Result<()> {
        while self.game.is_running() {
            self.handle_input()?;

            if self.last_tick.elapsed() >= self.tick_interval {
                let input = self.input_system.take_input();
                let frame = self.game.step(&input);
                self.play_audio(&frame);
                if !frame.exit {
                    self.render(&frame)?;
                }
                self.last_tick = Instant::now();
            }

            std::thread::sleep(self.tick_interval.saturating_sub(self.last_tick.elapsed()));
        }
        Ok(())
    }

    fn handle_input(&mut self) -> Result<()> {
        // Process all available key events
        while poll(Duration::from_millis(0))? {
            if let Event::Key(event) = read()? {
                self.input_system.handle_key_event(event);
            }
        }
        Ok(())
    }

    /// No audio device here; commands are only traced
    fn play_audio(&self, frame: &Frame) {
        for command in &frame.audio {
            log::debug!("audio: {:?}", command);
        }
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        let mut stdout = stdout();
        self.grid.render(&frame.draw);

        for y in 0..self.grid.height() {
            queue!(stdout, MoveTo(0, y as u16))?;
            for cell in self.grid.row(y) {
                queue!(
                    stdout,
                    SetForegroundColor(term_color(cell.fg)),
                    SetBackgroundColor(term_color(cell.bg)),
                    Print(cell.glyph)
                )?;
            }
            queue!(stdout, ResetColor)?;
        }

        let score = self.game.score();
        queue!(
            stdout,
            MoveTo(0, FIELD_HEIGHT as u16),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(format!(
                "Screen: {:?} | Score: {} - {} | Input: {}",
                self.game.screen,
                score.player,
                score.cpu,
                self.input_system.get_mode_description()
            )),
            MoveTo(0, FIELD_HEIGHT as u16 + 1),
            Print("↑/W ↓/S move | ENTER confirm | E/H mode | R restart | Q/ESC quit"),
            ResetColor
        )?;

        stdout.flush()
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config {
        seed: cli.seed,
        tick_hz: cli.fps,
        ..Config::default()
    };
    config
        .validate()
        .map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;

    let mut app = CliApp::new(config);

    // Restore the terminal if the process is interrupted from outside
    ctrlc::set_handler(move || {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, Show);
        std::process::exit(0);
    })
    .expect("Error setting Ctrl-C handler");

    app.run()
}
