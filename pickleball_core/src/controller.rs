//! Paddle movement strategies: keyboard control and the scripted CPU.

use crate::physics::Physics;
use crate::rng::RandomSource;
use crate::types::*;

/// How a paddle decides where to go each tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Controller {
    /// Follows the held up/down keys
    Manual,
    /// Chases the ball with difficulty-dependent error
    Scripted(Difficulty),
}

impl Controller {
    /// Move `paddle` for one tick
    pub fn drive(
        &self,
        paddle: &mut Paddle,
        input: &Input,
        ball: &Ball,
        config: &Config,
        rng: &mut impl RandomSource,
    ) {
        match *self {
            Controller::Manual => Physics::move_paddle(paddle, input, config),
            Controller::Scripted(difficulty) => {
                Self::auto_move(paddle, ball.pos.y, difficulty, config, rng);
            }
        }
    }

    /// Step a CPU paddle toward `ball_y`. Returns the applied move before
    /// the field clamp.
    pub fn auto_move(
        paddle: &mut Paddle,
        ball_y: f32,
        difficulty: Difficulty,
        config: &Config,
        rng: &mut impl RandomSource,
    ) -> f32 {
        let tracking = difficulty.tracking();

        let error = ball_y - paddle.center_y();
        let noise = if tracking.noise > 0 {
            rng.range_inclusive(-tracking.noise, tracking.noise) as f32
        } else {
            0.0
        };

        let step = (error * tracking.gain + noise).clamp(-tracking.max_step, tracking.max_step);

        paddle.pos.y += step;
        Physics::limit_movement(paddle, config);
        step
    }
}
