//! Character-grid rasterizer for terminal front ends.
//!
//! Maps playfield pixels onto a fixed grid of cells and executes
//! [`DrawCommand`]s into it. Shapes are sampled at cell centres, so a paddle
//! keeps the same height in cells wherever it sits.

use crate::frame::{Align, Color, DrawCommand};
use crate::types::{Config, Rect, Vec2};

/// One terminal cell
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            glyph: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

/// Fixed-size grid of cells covering the whole playfield
#[derive(Debug, Clone)]
pub struct CellGrid {
    width: usize,
    height: usize,
    /// Pixels per column
    scale_x: f32,
    /// Pixels per row
    scale_y: f32,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(width: usize, height: usize, config: &Config) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        CellGrid {
            width,
            height,
            scale_x: config.field_width / width as f32,
            scale_y: config.field_height / height as f32,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y.min(self.height) * self.width;
        let end = (start + self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Glyphs of row `y` as a string
    #[cfg(test)]
    fn row_text(&self, y: usize) -> String {
        self.row(y).iter().map(|cell| cell.glyph).collect()
    }

    /// Cell containing a playfield point
    pub fn cell_at(&self, point: Vec2) -> Option<(usize, usize)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let x = (point.x / self.scale_x) as usize;
        let y = (point.y / self.scale_y) as usize;
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Playfield position of a cell's centre
    fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.scale_x,
            (y as f32 + 0.5) * self.scale_y,
        )
    }

    /// Execute draw commands in order
    pub fn render(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match command {
                DrawCommand::Clear(color) => self.clear(*color),
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                } => self.fill_circle(*center, *radius, *color),
                DrawCommand::RoundedRect { rect, color, .. } => self.fill_rect(*rect, *color),
                DrawCommand::Line { from, to, color } => self.line(*from, *to, *color),
                DrawCommand::Text {
                    text,
                    pos,
                    align,
                    color,
                    ..
                } => self.text(text, *pos, *align, *color),
            }
        }
    }

    fn clear(&mut self, color: Color) {
        for cell in &mut self.cells {
            *cell = Cell {
                glyph: ' ',
                fg: Color::White,
                bg: color,
            };
        }
    }

    fn put(&mut self, x: usize, y: usize, glyph: char, fg: Color) {
        if x < self.width && y < self.height {
            let cell = &mut self.cells[y * self.width + x];
            cell.glyph = glyph;
            cell.fg = fg;
        }
    }

    /// Large circles become a background patch, ones about a cell wide a dot
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius >= self.scale_x.max(self.scale_y) {
            let mut painted = false;
            for y in 0..self.height {
                for x in 0..self.width {
                    let c = self.cell_center(x, y);
                    let (dx, dy) = (c.x - center.x, c.y - center.y);
                    if dx * dx + dy * dy <= radius * radius {
                        self.cells[y * self.width + x].bg = color;
                        painted = true;
                    }
                }
            }
            if painted {
                return;
            }
        }

        if let Some((x, y)) = self.cell_at(center) {
            self.put(x, y, '●', color);
        }
    }

    /// Corners are not rounded at this resolution
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let mut painted = false;
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.cell_center(x, y);
                if c.x >= rect.x
                    && c.x < rect.x + rect.width
                    && c.y >= rect.y
                    && c.y < rect.y + rect.height
                {
                    self.put(x, y, '█', color);
                    painted = true;
                }
            }
        }

        if !painted {
            let middle = Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
            if let Some((x, y)) = self.cell_at(middle) {
                self.put(x, y, '█', color);
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let cols = ((to.x - from.x) / self.scale_x).abs();
        let rows = ((to.y - from.y) / self.scale_y).abs();
        let glyph = if cols < 0.5 {
            '│'
        } else if rows < 0.5 {
            '─'
        } else {
            '·'
        };

        // Sample once per crossed cell, at the middle of each step
        let steps = cols.max(rows).ceil().max(1.0) as usize;
        for i in 0..steps {
            let t = (i as f32 + 0.5) / steps as f32;
            let point = Vec2::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t);
            if let Some((x, y)) = self.cell_at(point) {
                self.put(x, y, glyph, color);
            }
        }
    }

    /// Width is measured in cells, one per character
    fn text(&mut self, text: &str, pos: Vec2, align: Align, color: Color) {
        let Some((anchor_x, y)) = self.cell_at(pos) else {
            return;
        };

        let len = text.chars().count();
        let start = match align {
            Align::Left => anchor_x as isize,
            Align::Center => anchor_x as isize - (len / 2) as isize,
        };

        for (i, ch) in text.chars().enumerate() {
            let x = start + i as isize;
            if x >= 0 {
                self.put(x as usize, y, ch, color);
            }
        }
    }
}
