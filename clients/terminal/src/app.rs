use crate::audio::AudioSink;
use crate::event::{AppEvent, Event, EventHandler};
use color_eyre::eyre::WrapErr;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pickleball_core::{Action, Config, DrawCommand, Game, Input};
use ratatui::{layout::Rect, DefaultTerminal};
use std::io::{stdout, Stdout};

/// Ticks a tapped key stays held when the terminal reports no releases
const LATCH_TICKS: u8 = 12;

/// Game key mapping for cleaner input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameKey {
    Up,
    Down,
    Press(Action),
    Close,
}

fn map_key_event(event: &KeyEvent) -> Option<GameKey> {
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

/// Held-direction tracking for the player paddle
trait PlayerInput {
    fn handle_up(&mut self, pressed: bool);
    fn handle_down(&mut self, pressed: bool);
    /// (up, down) for the coming tick
    fn held(&self) -> (bool, bool);
    fn update(&mut self) {} // Default no-op, overridden by the latch
}

/// Enhanced input implementation
#[derive(Default)]
struct EnhancedPlayerInput {
    up_held: bool,
    down_held: bool,
}

impl PlayerInput for EnhancedPlayerInput {
    fn handle_up(&mut self, pressed: bool) {
        self.up_held = pressed;
    }

    fn handle_down(&mut self, pressed: bool) {
        self.down_held = pressed;
    }

    fn held(&self) -> (bool, bool) {
        (self.up_held, self.down_held)
    }
}

/// Latch input implementation: every press holds the key for a few ticks,
/// keyboard auto-repeat keeps refreshing it
#[derive(Default)]
struct LatchPlayerInput {
    up_ticks: u8,
    down_ticks: u8,
}

impl PlayerInput for LatchPlayerInput {
    fn handle_up(&mut self, pressed: bool) {
        if pressed {
            self.up_ticks = LATCH_TICKS;
        }
    }

    fn handle_down(&mut self, pressed: bool) {
        if pressed {
            self.down_ticks = LATCH_TICKS;
        }
    }

    fn held(&self) -> (bool, bool) {
        (self.up_ticks > 0, self.down_ticks > 0)
    }

    fn update(&mut self) {
        self.up_ticks = self.up_ticks.saturating_sub(1);
        self.down_ticks = self.down_ticks.saturating_sub(1);
    }
}

/// Simplified input system with adaptive capabilities
pub struct InputSystem {
    player: Box<dyn PlayerInput>,
    /// Actions and close requests gathered since the last tick
    pending: Input,
    is_enhanced: bool,
}

impl InputSystem {
    fn new(is_enhanced: bool) -> Self {
        let player: Box<dyn PlayerInput> = if is_enhanced {
            Box::new(EnhancedPlayerInput::default())
        } else {
            Box::new(LatchPlayerInput::default())
        };

        Self {
            player,
            pending: Input::zero(),
            is_enhanced,
        }
    }

    pub fn get_mode_description(&self) -> &'static str {
        if self.is_enhanced {
            "Enhanced (Hold keys)"
        } else {
            "Latch (Tap or hold keys)"
        }
    }

    fn handle_key_event(&mut self, event: KeyEvent) {
        let Some(game_key) = map_key_event(&event) else {
            return;
        };
        let pressed = event.kind != KeyEventKind::Release;

        match game_key {
            GameKey::Up => self.player.handle_up(pressed),
            GameKey::Down => self.player.handle_down(pressed),
            // Auto-repeat must not fire actions twice
            GameKey::Press(action) => {
                if event.kind == KeyEventKind::Press {
                    self.pending.press(action);
                }
            }
            GameKey::Close => self.pending.close_requested = true,
        }
    }

    /// Input for one tick; one-shot actions are consumed
    fn take_input(&mut self) -> Input {
        let (up, down) = self.player.held();
        let input = Input {
            up,
            down,
            ..std::mem::take(&mut self.pending)
        };
        self.player.update();
        input
    }
}

/// Game board size constants
pub const MIN_GAME_WIDTH: u16 = 60;
pub const MIN_GAME_HEIGHT: u16 = 20;
const FIXED_GAME_WIDTH: u16 = 80;
const FIXED_GAME_HEIGHT: u16 = 24;

/// Main application
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Game instance
    pub game: Game,
    /// Input system (cli_harness style)
    pub input_system: InputSystem,
    /// Draw commands of the latest step
    pub last_draw: Vec<DrawCommand>,
    /// Bell and stream tracking
    pub audio: AudioSink<Stdout>,
    /// Event handler
    pub events: EventHandler,
    /// Current terminal size
    pub terminal_size: (u16, u16),
    /// Whether UI is paused due to small terminal
    pub ui_paused: bool,
}

impl App {
    /// Constructs a new instance of App
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let events = EventHandler::new(config.tick_hz)?;
        let input_system = InputSystem::new(events.keyboard_enhanced());

        log::info!("input mode: {}", input_system.get_mode_description());

        Ok(Self {
            running: true,
            game: Game::new(config),
            input_system,
            last_draw: Vec::new(),
            audio: AudioSink::new(stdout()),
            events,
            terminal_size: (FIXED_GAME_WIDTH, FIXED_GAME_HEIGHT),
            ui_paused: false,
        })
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size().wrap_err("failed to query terminal size")?;
        self.handle_resize(size.width, size.height);

        while self.running {
            terminal
                .draw(|frame| frame.render_widget(&self, frame.area()))
                .wrap_err("failed to draw frame")?;
            self.handle_events()?;
        }
        Ok(())
    }

    pub fn handle_events(&mut self) -> color_eyre::Result<()> {
        match self.events.next()? {
            Event::Tick => self.tick()?,
            Event::Crossterm(CrosstermEvent::Key(key_event)) => {
                self.input_system.handle_key_event(key_event)
            }
            Event::Crossterm(_) => {}
            Event::App(AppEvent::TerminalResize(width, height)) => {
                self.handle_resize(width, height)
            }
        }
        Ok(())
    }

    /// One game step per tick event
    fn tick(&mut self) -> color_eyre::Result<()> {
        let input = self.input_system.take_input();

        // The game is frozen while the field can't be shown
        if self.ui_paused && !input.wants_exit() {
            return Ok(());
        }

        let frame = self.game.step(&input);
        self.audio
            .apply(&frame.audio)
            .wrap_err("failed to ring terminal bell")?;

        if frame.exit {
            self.quit();
        } else {
            self.last_draw = frame.draw;
        }
        Ok(())
    }

    fn quit(&mut self) {
        log::info!("shutting down");
        self.running = false;
    }

    // Terminal size management
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);

        // Check if terminal is large enough for game
        self.ui_paused = width < MIN_GAME_WIDTH || height < MIN_GAME_HEIGHT;
    }

    pub fn calculate_centered_game_area(&self, area: Rect) -> Option<Rect> {
        if self.ui_paused {
            return None; // Too small
        }
        Some(centered_game_area(area))
    }
}

/// Field area of at most 80x24 cells centred in `area`
fn centered_game_area(area: Rect) -> Rect {
    let game_width = FIXED_GAME_WIDTH.min(area.width);
    let game_height = FIXED_GAME_HEIGHT.min(area.height);

    let x_offset = area.width.saturating_sub(game_width) / 2;
    let y_offset = area.height.saturating_sub(game_height) / 2;

    Rect {
        x: area.x + x_offset,
        y: area.y + y_offset,
        width: game_width,
        height: game_height,
    }
}
