//! Output of one game step: what to draw, what to play, whether to exit.

use crate::types::{Rect, Vec2};

/// Palette used by the screens
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Yellow,
    Red,
    Blue,
    DarkBlue,
}

/// Horizontal anchor of a text command
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    /// `pos.x` is the left edge
    Left,
    /// `pos.x` is the middle; the renderer measures the text width
    Center,
}

/// A single draw submission, in playfield pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    RoundedRect {
        rect: Rect,
        /// 0.0 square corners, 1.0 fully rounded
        roundness: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Text {
        text: String,
        /// Top of the text; x interpreted through `align`
        pos: Vec2,
        size: f32,
        align: Align,
        color: Color,
    },
}

/// One-shot sounds
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sound {
    PlayerScored,
    CpuScored,
}

/// Looping streams
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stream {
    MenuMusic,
}

/// Fire-and-forget audio request
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AudioCommand {
    PlaySound(Sound),
    PlayStream(Stream),
    /// Keep a playing stream fed; sent once per tick while it plays
    UpdateStream(Stream),
    StopStream(Stream),
}

/// Everything produced by one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub draw: Vec<DrawCommand>,
    pub audio: Vec<AudioCommand>,
    /// The game is over and the host should shut down
    pub exit: bool,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    pub fn exit() -> Self {
        Frame {
            exit: true,
            ..Frame::default()
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.draw.push(DrawCommand::Clear(color));
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn rounded_rect(&mut self, rect: Rect, roundness: f32, color: Color) {
        self.draw.push(DrawCommand::RoundedRect {
            rect,
            roundness,
            color,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.draw.push(DrawCommand::Line { from, to, color });
    }

    /// Text whose middle sits on `center_x`
    pub fn centered_text(
        &mut self,
        text: impl Into<String>,
        center_x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) {
        self.draw.push(DrawCommand::Text {
            text: text.into(),
            pos: Vec2::new(center_x, y),
            size,
            align: Align::Center,
            color,
        });
    }

    pub fn play(&mut self, command: AudioCommand) {
        self.audio.push(command);
    }

    /// All text drawn this frame, in submission order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.draw.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
