//! Ball and paddle physics for Pickleball.
//!
//! Integration uses a fixed timestep: one call per tick, velocities are in
//! pixels per tick.

use crate::rng::RandomSource;
use crate::types::*;

/// Physics calculations for game simulation
pub struct Physics;

impl Physics {
    /// Clamp a velocity component into `[-max, max]`
    pub fn clamp_speed(value: f32, max: f32) -> f32 {
        value.clamp(-max, max)
    }

    /// Raise a vertical speed to at least `floor`, keeping its sign.
    /// A zero speed becomes `+floor`.
    pub fn apply_bounce_floor(speed_y: f32, floor: f32) -> f32 {
        if speed_y.abs() < floor {
            floor.copysign(speed_y)
        } else {
            speed_y
        }
    }

    /// Move the ball one tick, then cap both velocity components
    pub fn advance_ball(ball: &mut Ball, config: &Config) {
        ball.pos.x += ball.vel.x;
        ball.pos.y += ball.vel.y;

        ball.vel.x = Self::clamp_speed(ball.vel.x, config.max_ball_speed);
        ball.vel.y = Self::clamp_speed(ball.vel.y, config.max_ball_speed);
    }

    /// Bounce off the top and bottom walls. Returns true on a bounce.
    pub fn resolve_walls(ball: &mut Ball, config: &Config) -> bool {
        let top = ball.pos.y - ball.radius;
        let bottom = ball.pos.y + ball.radius;

        if top <= 0.0 || bottom >= config.field_height {
            ball.vel.y = Self::apply_bounce_floor(-ball.vel.y, config.min_bounce_speed);
            return true;
        }
        false
    }

    /// Check if the ball reached a goal line. Returns the scoring side.
    pub fn check_scoring(ball: &Ball, config: &Config) -> Option<Side> {
        if ball.pos.x - ball.radius <= 0.0 {
            Some(Side::Right) // CPU scored
        } else if ball.pos.x + ball.radius >= config.field_width {
            Some(Side::Left) // Player scored
        } else {
            None
        }
    }

    /// Recentre the ball and give it a random serve velocity
    pub fn serve_ball(ball: &mut Ball, config: &Config, rng: &mut impl RandomSource) {
        ball.pos = config.center();

        let dir_x = rng.sign();
        let dir_y = rng.sign();

        // Integer magnitude between the bounce floor and the serve speed
        let low = config.min_bounce_speed.ceil() as i32;
        let high = (config.serve_speed.floor() as i32).max(low);
        let magnitude = rng.range_inclusive(low, high) as f32;

        ball.vel = Vec2::new(config.serve_speed * dir_x, magnitude * dir_y);
    }

    /// Apply held up/down keys to a paddle
    pub fn move_paddle(paddle: &mut Paddle, input: &Input, config: &Config) {
        if input.up {
            paddle.pos.y -= paddle.speed;
        }
        if input.down {
            paddle.pos.y += paddle.speed;
        }
        Self::limit_movement(paddle, config);
    }

    /// Constrain paddle to field bounds
    pub fn limit_movement(paddle: &mut Paddle, config: &Config) {
        let max_y = config.field_height - paddle.size.y;
        paddle.pos.y = paddle.pos.y.clamp(0.0, max_y);
    }

    /// Circle vs. axis-aligned rectangle overlap, edges inclusive
    pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: Rect) -> bool {
        let closest_x = center.x.clamp(rect.x, rect.x + rect.width);
        let closest_y = center.y.clamp(rect.y, rect.y + rect.height);

        let dx = center.x - closest_x;
        let dy = center.y - closest_y;

        dx * dx + dy * dy <= radius * radius
    }

    /// Check for paddle-ball collision and handle it
    pub fn check_paddle_collision(ball: &mut Ball, paddle: &Paddle, config: &Config) -> bool {
        if !Self::circle_overlaps_rect(ball.pos, ball.radius, paddle.bounds()) {
            return false;
        }

        ball.vel.x *= -config.hit_speed_up;

        // Off-centre hits steer the ball
        let offset = ball.pos.y - paddle.center_y();
        ball.vel.y += offset / config.deflection_divisor;
        ball.vel.y = Self::apply_bounce_floor(ball.vel.y, config.min_bounce_speed);

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::new(vx, vy), 15.0)
    }

    #[test]
    fn test_advance_moves_then_clamps() {
        let config = Config::default();
        let mut ball = ball_at(100.0, 100.0, 20.0, -15.0);

        Physics::advance_ball(&mut ball, &config);

        // Position uses the unclamped velocity of this tick
        assert_eq!(ball.pos, Vec2::new(120.0, 85.0));
        assert_eq!(ball.vel, Vec2::new(12.0, -12.0));
    }

    #[test]
    fn test_bounce_floor() {
        assert_eq!(Physics::apply_bounce_floor(0.5, 2.0), 2.0);
        assert_eq!(Physics::apply_bounce_floor(-1.0, 2.0), -2.0);
        assert_eq!(Physics::apply_bounce_floor(0.0, 2.0), 2.0);
        assert_eq!(Physics::apply_bounce_floor(-7.0, 2.0), -7.0);
    }

    #[test]
    fn test_ball_wall_collision() {
        let config = Config::default();

        // Top edge touching the ceiling, moving up slowly
        let mut ball = ball_at(640.0, 15.0, 8.0, -1.0);
        assert!(Physics::resolve_walls(&mut ball, &config));
        assert_eq!(ball.vel.y, 2.0);

        // Bottom wall, fast enough to keep its magnitude
        let mut ball = ball_at(640.0, 710.0, 8.0, 6.0);
        assert!(Physics::resolve_walls(&mut ball, &config));
        assert_eq!(ball.vel.y, -6.0);

        // Mid-field: no bounce
        let mut ball = ball_at(640.0, 360.0, 8.0, 0.5);
        assert!(!Physics::resolve_walls(&mut ball, &config));
        assert_eq!(ball.vel.y, 0.5);
    }

    #[test]
    fn test_scoring_detection() {
        let config = Config::default();

        let ball_left = ball_at(10.0, 360.0, -5.0, 0.0);
        assert_eq!(Physics::check_scoring(&ball_left, &config), Some(Side::Right));

        let ball_right = ball_at(1270.0, 360.0, 5.0, 0.0);
        assert_eq!(Physics::check_scoring(&ball_right, &config), Some(Side::Left));

        let ball_center = ball_at(640.0, 360.0, 5.0, 0.0);
        assert_eq!(Physics::check_scoring(&ball_center, &config), None);
    }

    #[test]
    fn test_serve_ball() {
        let config = Config::default();
        let mut ball = ball_at(0.0, 0.0, 0.0, 0.0);

        // dir_x = -1, dir_y = +1, magnitude 5
        let mut rng = ScriptedRng::new([0, 1, 5]);
        Physics::serve_ball(&mut ball, &config, &mut rng);

        assert_eq!(ball.pos, Vec2::new(640.0, 360.0));
        assert_eq!(ball.vel, Vec2::new(-8.0, 5.0));

        // Values below the floor are impossible
        let mut rng = ScriptedRng::new([1, 0, 0]);
        Physics::serve_ball(&mut ball, &config, &mut rng);
        assert_eq!(ball.vel, Vec2::new(8.0, -2.0));
    }

    #[test]
    fn test_paddle_movement() {
        let config = Config::default();
        let mut paddle = Paddle::at_start(Side::Left, &config);

        Physics::move_paddle(&mut paddle, &Input::new(true, false), &config);
        assert_eq!(paddle.pos.y, 290.0);

        Physics::move_paddle(&mut paddle, &Input::new(false, true), &config);
        assert_eq!(paddle.pos.y, 300.0);

        // Both held cancel out
        Physics::move_paddle(&mut paddle, &Input::new(true, true), &config);
        assert_eq!(paddle.pos.y, 300.0);
    }

    #[test]
    fn test_paddle_bounds() {
        let config = Config::default();
        let mut paddle = Paddle::at_start(Side::Left, &config);

        paddle.pos.y = 5.0;
        Physics::move_paddle(&mut paddle, &Input::new(true, false), &config);
        assert_eq!(paddle.pos.y, 0.0);

        paddle.pos.y = 595.0;
        Physics::move_paddle(&mut paddle, &Input::new(false, true), &config);
        assert_eq!(paddle.pos.y, 600.0);
    }

    #[test]
    fn test_limit_movement_is_idempotent() {
        let config = Config::default();

        for y in [-50.0, 0.0, 250.0, 600.0, 900.0] {
            let mut once = Paddle::at_start(Side::Right, &config);
            once.pos.y = y;
            Physics::limit_movement(&mut once, &config);

            let mut twice = once;
            Physics::limit_movement(&mut twice, &config);

            assert_eq!(once.pos.y, twice.pos.y);
        }
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(10.0, 300.0, 20.0, 120.0);

        // Touching the right face
        assert!(Physics::circle_overlaps_rect(Vec2::new(45.0, 360.0), 15.0, rect));
        // Just clear of it
        assert!(!Physics::circle_overlaps_rect(Vec2::new(45.5, 360.0), 15.0, rect));
        // Near a corner but outside the rounded reach
        assert!(!Physics::circle_overlaps_rect(Vec2::new(42.0, 288.0), 15.0, rect));
        // Inside the corner radius
        assert!(Physics::circle_overlaps_rect(Vec2::new(38.0, 292.0), 15.0, rect));
    }

    #[test]
    fn test_paddle_collision() {
        let config = Config::default();
        let paddle = Paddle::at_start(Side::Left, &config);

        // Centre hit: no deflection beyond the floor
        let mut ball = ball_at(40.0, 360.0, -10.0, 3.0);
        assert!(Physics::check_paddle_collision(&mut ball, &paddle, &config));
        assert_eq!(ball.vel.x, -10.0 * -1.1);
        assert_eq!(ball.vel.y, 3.0);

        // Hit 50px below centre adds 5 to speed_y
        let mut ball = ball_at(40.0, 410.0, -10.0, 3.0);
        assert!(Physics::check_paddle_collision(&mut ball, &paddle, &config));
        assert_eq!(ball.vel.y, 8.0);

        // Deflection that cancels the vertical speed hits the floor
        let mut ball = ball_at(40.0, 350.0, -10.0, 1.0);
        assert!(Physics::check_paddle_collision(&mut ball, &paddle, &config));
        assert_eq!(ball.vel.y, 2.0);
    }

    #[test]
    fn test_paddle_collision_miss() {
        let config = Config::default();
        let paddle = Paddle::at_start(Side::Right, &config);
        let mut ball = ball_at(640.0, 360.0, 10.0, 3.0);

        assert!(!Physics::check_paddle_collision(&mut ball, &paddle, &config));
        assert_eq!(ball.vel, Vec2::new(10.0, 3.0));
    }
}
