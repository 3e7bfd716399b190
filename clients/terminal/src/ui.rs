use crate::app::{App, MIN_GAME_HEIGHT, MIN_GAME_WIDTH};
use pickleball_core::{CellGrid, Screen, Stream};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Check if terminal is too small
        if self.ui_paused {
            self.render_resize_notice(area, buf);
            return;
        }

        let Some(game_area) = self.calculate_centered_game_area(area) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),    // Field
                Constraint::Length(1), // Status
                Constraint::Length(1), // Controls
            ])
            .split(game_area);

        self.render_field(chunks[0], buf);
        self.render_status(chunks[1], buf);

        let controls =
            "↑/W ↓/S: Move  ENTER: Confirm  E/H: Easy/Hard  R: Restart  Q/ESC: Quit";
        Paragraph::new(controls)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

impl App {
    fn render_resize_notice(&self, area: Rect, buf: &mut Buffer) {
        let message = format!(
            "Terminal too small!\n\nMinimum required: {}×{}\nCurrent size: {}×{}\n\nPlease resize your terminal to continue playing.",
            MIN_GAME_WIDTH, MIN_GAME_HEIGHT, self.terminal_size.0, self.terminal_size.1
        );

        Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("⚠ Resize Required ⚠")
                    .title_alignment(Alignment::Center),
            )
            .render(area, buf);
    }

    /// Rasterize the latest draw commands into the bordered field
    fn render_field(&self, area: Rect, buf: &mut Buffer) {
        let title = match &self.game.session {
            Some(session) if self.game.screen == Screen::Playing => {
                format!("Pickleball vs CPU ({})", session.difficulty.label())
            }
            _ => "Pickleball".to_string(),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title)
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        if inner.width == 0 || inner.height == 0 {
            return; // Too small to render
        }

        let mut grid = CellGrid::new(
            inner.width as usize,
            inner.height as usize,
            &self.game.config,
        );
        grid.render(&self.last_draw);

        let lines: Vec<Line> = (0..grid.height()).map(|y| grid_line(&grid, y)).collect();
        Paragraph::new(lines).block(block).render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let score = self.game.score();
        let screen = match self.game.screen {
            Screen::Menu => "Menu",
            Screen::ModeSelect => "Mode select",
            Screen::Playing => "Playing",
            Screen::End { player_won: true } => "You won",
            Screen::End { player_won: false } => "CPU won",
        };

        let status = format!(
            "{}    Score: {} - {}    Music: {}    Input: {}",
            screen,
            score.player,
            score.cpu,
            self.audio.state(Stream::MenuMusic).label(),
            self.input_system.get_mode_description()
        );
        Paragraph::new(status)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// One grid row as spans, merging runs of equal colors
fn grid_line(grid: &CellGrid, y: usize) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut style = None;

    for cell in grid.row(y) {
        let cell_style = Style::default().fg(tui_color(cell.fg)).bg(tui_color(cell.bg));
        if style != Some(cell_style) {
            if let Some(previous) = style {
                spans.push(Span::styled(std::mem::take(&mut run), previous));
            }
            style = Some(cell_style);
        }
        run.push(cell.glyph);
    }
    if let Some(last) = style {
        spans.push(Span::styled(run, last));
    }

    Line::from(spans)
}

fn tui_color(color: pickleball_core::Color) -> Color {
    match color {
        pickleball_core::Color::Black => Color::Black,
        pickleball_core::Color::White => Color::White,
        pickleball_core::Color::Yellow => Color::Yellow,
        pickleball_core::Color::Red => Color::Red,
        pickleball_core::Color::Blue => Color::LightBlue,
        pickleball_core::Color::DarkBlue => Color::Blue,
    }
}
