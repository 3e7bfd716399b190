//! Core types and constants for the Pickleball game engine.

use thiserror::Error;

/// Tick counter type
pub type Tick = u32;

/// Court side. The player defends the left goal, the CPU the right one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// CPU difficulty preset
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Hard,
}

/// Tracking parameters of the scripted paddle
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tracking {
    /// Multiplier applied to the vertical error
    pub gain: f32,
    /// Largest move allowed in one tick
    pub max_step: f32,
    /// Amplitude of the uniform integer noise; 0 disables it
    pub noise: i32,
}

impl Difficulty {
    pub fn tracking(self) -> Tracking {
        match self {
            Difficulty::Easy => Tracking {
                gain: 0.8,
                max_step: 8.0,
                noise: 8,
            },
            Difficulty::Hard => Tracking {
                gain: 1.1,
                max_step: 10.0,
                noise: 0,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Hard => "HARD",
        }
    }
}

/// Game configuration
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    /// Playfield width in pixels
    pub field_width: f32,
    /// Playfield height in pixels
    pub field_height: f32,
    pub ball_radius: f32,
    /// Horizontal speed of a fresh serve
    pub serve_speed: f32,
    /// Per-component velocity cap applied on every advance
    pub max_ball_speed: f32,
    /// Minimum vertical speed after a bounce
    pub min_bounce_speed: f32,
    /// Horizontal speed multiplier on paddle hit
    pub hit_speed_up: f32,
    /// Divisor turning off-centre hits into vertical deflection
    pub deflection_divisor: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a paddle and its goal line
    pub paddle_margin: f32,
    /// Player paddle movement per tick
    pub paddle_speed: f32,
    /// Score to win
    pub max_score: u8,
    /// Random seed; `None` draws one from the OS
    pub seed: Option<u64>,
    /// Tick frequency (Hz)
    pub tick_hz: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            field_width: 1280.0,
            field_height: 720.0,
            ball_radius: 15.0,
            serve_speed: 8.0,
            max_ball_speed: 12.0,
            min_bounce_speed: 2.0,
            hit_speed_up: 1.1,
            deflection_divisor: 10.0,
            paddle_width: 20.0,
            paddle_height: 120.0,
            paddle_margin: 10.0,
            paddle_speed: 10.0,
            max_score: 5,
            seed: None,
            tick_hz: 60,
        }
    }
}

/// Rejected configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tick rate must be at least 1 Hz")]
    ZeroTickRate,
    #[error("max score must be at least 1")]
    ZeroMaxScore,
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("paddle height {paddle} does not fit a field of height {field}")]
    PaddleTooTall { paddle: f32, field: f32 },
    #[error("bounce floor {floor} exceeds the speed cap {max}")]
    BounceFloorAboveCap { floor: f32, max: f32 },
}

impl Config {
    /// Check that the values describe a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.max_score == 0 {
            return Err(ConfigError::ZeroMaxScore);
        }

        let positive = [
            ("field width", self.field_width),
            ("field height", self.field_height),
            ("ball radius", self.ball_radius),
            ("serve speed", self.serve_speed),
            ("max ball speed", self.max_ball_speed),
            ("paddle width", self.paddle_width),
            ("paddle height", self.paddle_height),
            ("paddle speed", self.paddle_speed),
            ("deflection divisor", self.deflection_divisor),
        ];
        for (name, value) in positive {
            if value <= 0.0 || value.is_nan() {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if self.paddle_height > self.field_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                field: self.field_height,
            });
        }
        if self.min_bounce_speed > self.max_ball_speed {
            return Err(ConfigError::BounceFloorAboveCap {
                floor: self.min_bounce_speed,
                max: self.max_ball_speed,
            });
        }
        Ok(())
    }

    /// Centre of the playfield
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    /// Lowest y a paddle's top edge may take
    pub fn paddle_max_y(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    /// Left edge of the paddle defending `side`
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => self.field_width - self.paddle_width - self.paddle_margin,
        }
    }
}

/// 2D vector in playfield pixels
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn zero() -> Self {
        Vec2 { x: 0.0, y: 0.0 }
    }
}

/// Axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// Paddle state. `pos` is the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Movement per tick for manual control
    pub speed: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2, speed: f32) -> Self {
        Paddle { pos, size, speed }
    }

    /// Paddle for `side`, vertically centred
    pub fn at_start(side: Side, config: &Config) -> Self {
        Paddle::new(
            Vec2::new(
                config.paddle_x(side),
                config.field_height / 2.0 - config.paddle_height / 2.0,
            ),
            Vec2::new(config.paddle_width, config.paddle_height),
            config.paddle_speed,
        )
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

/// Ball state
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Ball { pos, vel, radius }
    }
}

/// Discrete actions that fire once per key press
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Confirm,
    SelectEasy,
    SelectHard,
    Restart,
    Quit,
}

impl Action {
    fn bit(self) -> u8 {
        match self {
            Action::Confirm => 1,
            Action::SelectEasy => 1 << 1,
            Action::SelectHard => 1 << 2,
            Action::Restart => 1 << 3,
            Action::Quit => 1 << 4,
        }
    }
}

/// Player input for one tick
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Input {
    /// "Up" is currently held
    pub up: bool,
    /// "Down" is currently held
    pub down: bool,
    /// Bitfield of actions pressed this tick
    pub actions: u8,
    /// The host asked the game to close
    pub close_requested: bool,
}

impl Input {
    pub fn new(up: bool, down: bool) -> Self {
        Input {
            up,
            down,
            ..Input::default()
        }
    }

    pub fn zero() -> Self {
        Input::default()
    }

    /// Same input with `action` also pressed
    pub fn with(mut self, action: Action) -> Self {
        self.actions |= action.bit();
        self
    }

    pub fn with_close(mut self) -> Self {
        self.close_requested = true;
        self
    }

    pub fn press(&mut self, action: Action) {
        self.actions |= action.bit();
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        (self.actions & action.bit()) != 0
    }

    /// Close signal or the quit action
    pub fn wants_exit(&self) -> bool {
        self.close_requested || self.is_pressed(Action::Quit)
    }
}

/// Match score
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Score {
    pub player: u8,
    pub cpu: u8,
}

impl Score {
    pub fn new(player: u8, cpu: u8) -> Self {
        Score { player, cpu }
    }

    /// Credit a goal to `scorer`
    pub fn award(&mut self, scorer: Side) {
        match scorer {
            Side::Left => self.player += 1,
            Side::Right => self.cpu += 1,
        }
    }

    pub fn winner(&self, max_score: u8) -> Option<Side> {
        if self.player >= max_score {
            Some(Side::Left)
        } else if self.cpu >= max_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Things that happened during a match tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Scored {
        scorer: Side,
        score: Score, // Score after this goal
    },
    WallBounce,
    PaddleHit(Side),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let config = Config {
            tick_hz: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickRate));

        let config = Config {
            paddle_height: 800.0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleTooTall { .. })
        ));

        let config = Config {
            serve_speed: -1.0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                name: "serve speed",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_paddle_start_positions() {
        let config = Config::default();
        let player = Paddle::at_start(Side::Left, &config);
        let cpu = Paddle::at_start(Side::Right, &config);

        assert_eq!(player.pos, Vec2::new(10.0, 300.0));
        assert_eq!(cpu.pos, Vec2::new(1250.0, 300.0));
        assert_eq!(player.center_y(), 360.0);
    }

    #[test]
    fn test_input_actions() {
        let input = Input::zero().with(Action::Confirm);

        assert!(input.is_pressed(Action::Confirm));
        assert!(!input.is_pressed(Action::Restart));
        assert!(!input.wants_exit());
        assert!(Input::zero().with(Action::Quit).wants_exit());
        assert!(Input::zero().with_close().wants_exit());
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::new(4, 3);
        assert_eq!(score.winner(5), None);

        score.award(Side::Left);
        assert_eq!(score, Score::new(5, 3));
        assert_eq!(score.winner(5), Some(Side::Left));
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::Easy.tracking().noise, 8);
        assert_eq!(Difficulty::Hard.tracking().noise, 0);
        assert!(Difficulty::Hard.tracking().gain > Difficulty::Easy.tracking().gain);
    }
}
