use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        self, Event as CrosstermEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    queue,
    terminal::supports_keyboard_enhancement,
};
use std::{
    io::stdout,
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// An event that is emitted on a regular schedule.
    /// Drives one game step.
    Tick,
    /// Crossterm key events
    Crossterm(CrosstermEvent),
    /// Application events
    App(AppEvent),
}

/// Application events outside the game itself
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// Terminal resize event
    TerminalResize(u16, u16), // width, height
}

/// Terminal event handler with enhanced keyboard support
pub struct EventHandler {
    /// Event receiver channel
    receiver: mpsc::Receiver<Event>,
    /// Whether keyboard enhancements are supported
    keyboard_enhanced: bool,
}

impl EventHandler {
    /// Starts the event thread ticking at `tick_hz`.
    ///
    /// Raw mode is already on (`ratatui::init`); only the keyboard
    /// enhancement flags are pushed here.
    pub fn new(tick_hz: u16) -> color_eyre::Result<Self> {
        let (sender, receiver) = mpsc::channel();

        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));

        if keyboard_enhanced {
            queue!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .wrap_err("failed to enable keyboard enhancements")?;
        }

        let actor = EventThread::new(sender, tick_hz);
        thread::spawn(move || {
            if let Err(e) = actor.run() {
                log::error!("event thread error: {e}");
            }
        });

        Ok(Self {
            receiver,
            keyboard_enhanced,
        })
    }

    /// Whether the terminal reports key releases
    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Receives an event from the sender (blocking)
    pub fn next(&self) -> color_eyre::Result<Event> {
        Ok(self.receiver.recv()?)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = queue!(stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

/// A thread that handles reading crossterm events and emitting tick events
struct EventThread {
    sender: mpsc::Sender<Event>,
    tick_interval: Duration,
}

impl EventThread {
    fn new(sender: mpsc::Sender<Event>, tick_hz: u16) -> Self {
        Self {
            sender,
            tick_interval: Duration::from_secs_f64(1.0 / f64::from(tick_hz.max(1))),
        }
    }

    fn run(self) -> color_eyre::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            let timeout = self.tick_interval.saturating_sub(last_tick.elapsed());
            if timeout == Duration::ZERO {
                last_tick = Instant::now();
                if !self.send(Event::Tick) {
                    return Ok(());
                }
                continue;
            }

            if event::poll(timeout).wrap_err("failed to poll for crossterm events")? {
                let event = event::read().wrap_err("failed to read crossterm event")?;

                let sent = match event {
                    CrosstermEvent::Resize(width, height) => {
                        self.send(Event::App(AppEvent::TerminalResize(width, height)))
                    }
                    CrosstermEvent::Key(_) => self.send(Event::Crossterm(event)),
                    _ => true,
                };
                if !sent {
                    return Ok(());
                }
            }
        }
    }

    /// False once the receiving side is gone
    fn send(&self, event: Event) -> bool {
        self.sender.send(event).is_ok()
    }
}
