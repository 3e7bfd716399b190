//! Screen flow: menu, mode selection, the match itself and the end screen.
//!
//! The host calls [`Game::step`] once per tick with that tick's input and
//! gets back a [`Frame`] of draw and audio commands. Nothing here blocks or
//! owns a clock.

use crate::frame::{AudioCommand, Color, Frame, Sound, Stream};
use crate::game::Match;
use crate::rng::{GameRng, RandomSource};
use crate::types::*;

const TITLE: &str = "PICKLEBALL";
const FIELD_CIRCLE_RADIUS: f32 = 150.0;
const PADDLE_ROUNDNESS: f32 = 0.8;
const SCORE_FONT_SIZE: f32 = 80.0;

/// Active screen
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    ModeSelect,
    Playing,
    End { player_won: bool },
}

/// Top-level game: screen state, the current match and the random source
pub struct Game<R = GameRng> {
    pub config: Config,
    pub screen: Screen,
    /// Current or just-finished match; dropped on restart
    pub session: Option<Match>,
    rng: R,
    music_playing: bool,
    running: bool,
}

impl Game<GameRng> {
    /// Create a game seeded from `config.seed`
    pub fn new(config: Config) -> Self {
        Game::with_rng(config, GameRng::from_seed(config.seed))
    }
}

impl<R: RandomSource> Game<R> {
    /// Create a game drawing serves and CPU noise from `rng`
    pub fn with_rng(config: Config, rng: R) -> Self {
        Game {
            config,
            screen: Screen::Menu,
            session: None,
            rng,
            music_playing: false,
            running: true,
        }
    }

    /// Advance the game by one tick
    pub fn step(&mut self, input: &Input) -> Frame {
        if !self.running {
            return Frame::exit();
        }

        let mut frame = Frame::new();
        if input.wants_exit() {
            self.shutdown(&mut frame);
            return frame;
        }

        match self.screen {
            Screen::Menu => {
                if input.is_pressed(Action::Confirm) {
                    self.set_screen(Screen::ModeSelect);
                }
            }
            Screen::ModeSelect => {
                if input.is_pressed(Action::SelectEasy) {
                    self.start_match(Difficulty::Easy);
                } else if input.is_pressed(Action::SelectHard) {
                    self.start_match(Difficulty::Hard);
                }
            }
            Screen::Playing => self.play_tick(input, &mut frame),
            Screen::End { .. } => {
                if input.is_pressed(Action::Confirm) {
                    self.shutdown(&mut frame);
                    return frame;
                }
                if input.is_pressed(Action::Restart) {
                    self.session = None;
                    self.set_screen(Screen::ModeSelect);
                }
            }
        }

        self.update_music(&mut frame);
        self.draw(&mut frame);
        frame
    }

    /// Whether the host should keep pumping ticks
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Score of the current match, zero when there is none
    pub fn score(&self) -> Score {
        self.session
            .as_ref()
            .map(|session| session.score)
            .unwrap_or_default()
    }

    /// Whether the menu music stream is playing
    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    fn set_screen(&mut self, next: Screen) {
        log::info!("screen {:?} -> {:?}", self.screen, next);
        self.screen = next;
    }

    fn start_match(&mut self, difficulty: Difficulty) {
        log::info!("starting {} match", difficulty.label());
        self.session = Some(Match::new(self.config, difficulty, &mut self.rng));
        self.set_screen(Screen::Playing);
    }

    fn play_tick(&mut self, input: &Input, frame: &mut Frame) {
        let Some(session) = self.session.as_mut() else {
            log::warn!("playing without a match, back to mode select");
            self.set_screen(Screen::ModeSelect);
            return;
        };

        for event in session.step(input, &mut self.rng) {
            if let Event::Scored { scorer, .. } = event {
                let sound = match scorer {
                    Side::Left => Sound::PlayerScored,
                    Side::Right => Sound::CpuScored,
                };
                frame.play(AudioCommand::PlaySound(sound));
            }
        }

        if let Some(winner) = session.winner() {
            let player_won = winner == Side::Left;
            log::info!(
                "match over after {} ticks: {} - {}",
                session.tick,
                session.score.player,
                session.score.cpu
            );
            self.set_screen(Screen::End { player_won });
        }
    }

    fn update_music(&mut self, frame: &mut Frame) {
        let wanted = self.screen == Screen::Menu;
        match (wanted, self.music_playing) {
            (true, false) => frame.play(AudioCommand::PlayStream(Stream::MenuMusic)),
            (true, true) => frame.play(AudioCommand::UpdateStream(Stream::MenuMusic)),
            (false, true) => frame.play(AudioCommand::StopStream(Stream::MenuMusic)),
            (false, false) => {}
        }
        self.music_playing = wanted;
    }

    fn shutdown(&mut self, frame: &mut Frame) {
        log::info!("closing from {:?}", self.screen);
        if self.music_playing {
            frame.play(AudioCommand::StopStream(Stream::MenuMusic));
            self.music_playing = false;
        }
        self.running = false;
        frame.exit = true;
    }

    fn draw(&self, frame: &mut Frame) {
        match self.screen {
            Screen::Menu => self.draw_menu(frame),
            Screen::ModeSelect => self.draw_mode_select(frame),
            Screen::Playing => {
                if let Some(session) = &self.session {
                    draw_field(session, frame);
                }
            }
            Screen::End { player_won } => self.draw_end(player_won, frame),
        }
    }

    fn draw_menu(&self, frame: &mut Frame) {
        let (cx, cy) = (self.config.field_width / 2.0, self.config.field_height / 2.0);

        frame.clear(Color::Black);
        frame.centered_text(TITLE, cx, cy - 60.0, 50.0, Color::Yellow);
        frame.centered_text("Press ENTER to Start", cx, cy + 20.0, 20.0, Color::White);
    }

    fn draw_mode_select(&self, frame: &mut Frame) {
        let (cx, cy) = (self.config.field_width / 2.0, self.config.field_height / 2.0);

        frame.clear(Color::Black);
        frame.centered_text("CHOOSE MODE", cx, cy - 100.0, 40.0, Color::Yellow);
        frame.centered_text("Press E for EASY", cx, cy, 20.0, Color::White);
        frame.centered_text("Press H for HARD", cx, cy + 40.0, 20.0, Color::White);
    }

    fn draw_end(&self, player_won: bool, frame: &mut Frame) {
        let (cx, cy) = (self.config.field_width / 2.0, self.config.field_height / 2.0);
        let result = if player_won { "YOU WIN!" } else { "CPU WINS!" };
        let score = self.score();

        frame.clear(Color::Black);
        frame.centered_text(result, cx, cy - 60.0, 50.0, Color::Yellow);
        frame.centered_text(
            format!("{} - {}", score.player, score.cpu),
            cx,
            cy - 10.0,
            20.0,
            Color::White,
        );
        frame.centered_text("Press ENTER to Exit", cx, cy + 20.0, 20.0, Color::White);
        frame.centered_text("Press R to Restart", cx, cy + 50.0, 20.0, Color::White);
    }
}

/// Court, ball, paddles and scores
fn draw_field(session: &Match, frame: &mut Frame) {
    let config = &session.config;
    let center = config.center();

    frame.clear(Color::DarkBlue);
    frame.circle(center, FIELD_CIRCLE_RADIUS, Color::Blue);
    frame.line(
        Vec2::new(center.x, 0.0),
        Vec2::new(center.x, config.field_height),
        Color::White,
    );

    frame.circle(session.ball.pos, session.ball.radius, Color::Yellow);
    for side in [Side::Left, Side::Right] {
        frame.rounded_rect(session.paddle(side).bounds(), PADDLE_ROUNDNESS, Color::Red);
    }

    frame.centered_text(
        session.score.player.to_string(),
        config.field_width / 4.0,
        20.0,
        SCORE_FONT_SIZE,
        Color::White,
    );
    frame.centered_text(
        session.score.cpu.to_string(),
        3.0 * config.field_width / 4.0,
        20.0,
        SCORE_FONT_SIZE,
        Color::White,
    );
}
