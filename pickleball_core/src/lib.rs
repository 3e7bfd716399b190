//! Pickleball game engine - single player versus a scripted CPU paddle

pub mod controller;
pub mod frame;
pub mod game;
pub mod physics;
pub mod render;
pub mod rng;
pub mod screen;
pub mod types;

pub use controller::Controller;
pub use frame::{Align, AudioCommand, Color, DrawCommand, Frame, Sound, Stream};
pub use game::Match;
pub use render::{Cell, CellGrid};
pub use rng::{GameRng, RandomSource, ScriptedRng};
pub use screen::{Game, Screen};
pub use types::*;

#[cfg(test)]
mod field_render_tests {
    use super::*;

    fn started_game() -> Game<ScriptedRng> {
        let mut game = Game::with_rng(Config::default(), ScriptedRng::new([1, 0, 3]));
        game.step(&Input::zero().with(Action::Confirm));
        game.step(&Input::zero().with(Action::SelectHard));
        game
    }

    #[test]
    fn test_field_renders_onto_grid() {
        let mut game = started_game();
        let frame = game.step(&Input::zero());

        let mut grid = CellGrid::new(80, 24, &game.config);
        grid.render(&frame.draw);

        // Centre line on every row except where the ball or scores cover it
        let line_rows = (0..grid.height())
            .filter(|&y| grid.get(40, y).map(|c| c.glyph) == Some('│'))
            .count();
        assert!(line_rows >= 20, "centre line rows: {}", line_rows);

        // Both paddles visible, in red
        for column in [1, 78] {
            let red = (0..grid.height())
                .filter(|&y| grid.get(column, y).map(|c| c.fg) == Some(Color::Red))
                .count();
            assert_eq!(red, 4, "column {}", column);
        }

        // Scores at a quarter and three quarters of the width
        assert_eq!(grid.get(20, 0).map(|c| c.glyph), Some('0'));
        assert_eq!(grid.get(60, 0).map(|c| c.glyph), Some('0'));
    }

    #[test]
    fn test_ball_visible_in_open_court() {
        let mut game = started_game();

        // Serve heads right and up; clear of paddles and scores for 60 ticks
        for _ in 0..60 {
            let frame = game.step(&Input::zero());
            let ball = game.session.as_ref().unwrap().ball;

            let mut grid = CellGrid::new(80, 24, &game.config);
            grid.render(&frame.draw);

            let (x, y) = grid.cell_at(ball.pos).unwrap();
            assert_eq!(grid.get(x, y).map(|c| c.glyph), Some('●'));

            let balls = (0..grid.height())
                .flat_map(|row| grid.row(row).iter())
                .filter(|c| c.glyph == '●')
                .count();
            assert_eq!(balls, 1);
        }
    }
}
