//! Match logic: one session from serve to the winning point.

use crate::controller::Controller;
use crate::physics::Physics;
use crate::rng::RandomSource;
use crate::types::*;

/// State of a single match against the CPU
#[derive(Debug, Clone)]
pub struct Match {
    pub config: Config,
    pub difficulty: Difficulty,
    pub tick: Tick,
    pub ball: Ball,
    pub player: Paddle,
    pub cpu: Paddle,
    pub player_controller: Controller,
    pub cpu_controller: Controller,
    pub score: Score,
}

impl Match {
    /// Place everything at the start positions and serve
    pub fn new(config: Config, difficulty: Difficulty, rng: &mut impl RandomSource) -> Self {
        let mut ball = Ball::new(config.center(), Vec2::zero(), config.ball_radius);
        Physics::serve_ball(&mut ball, &config, rng);

        Match {
            config,
            difficulty,
            tick: 0,
            ball,
            player: Paddle::at_start(Side::Left, &config),
            cpu: Paddle::at_start(Side::Right, &config),
            player_controller: Controller::Manual,
            cpu_controller: Controller::Scripted(difficulty),
            score: Score::default(),
        }
    }

    /// Step the match forward by one tick.
    ///
    /// Order: ball motion, walls, scoring, player paddle, CPU paddle,
    /// paddle collisions. A finished match no longer changes.
    pub fn step(&mut self, input: &Input, rng: &mut impl RandomSource) -> Vec<Event> {
        let mut events = Vec::new();
        if self.winner().is_some() {
            return events;
        }

        Physics::advance_ball(&mut self.ball, &self.config);

        if Physics::resolve_walls(&mut self.ball, &self.config) {
            log::trace!("wall bounce at tick {}", self.tick);
            events.push(Event::WallBounce);
        }

        if let Some(scorer) = Physics::check_scoring(&self.ball, &self.config) {
            self.handle_score(scorer, rng);
            events.push(Event::Scored {
                scorer,
                score: self.score,
            });
        }

        self.player_controller
            .drive(&mut self.player, input, &self.ball, &self.config, rng);
        self.cpu_controller
            .drive(&mut self.cpu, input, &self.ball, &self.config, rng);

        // Both paddles are always tested
        if Physics::check_paddle_collision(&mut self.ball, &self.player, &self.config) {
            log::trace!("player hit at tick {}", self.tick);
            events.push(Event::PaddleHit(Side::Left));
        }
        if Physics::check_paddle_collision(&mut self.ball, &self.cpu, &self.config) {
            log::trace!("cpu hit at tick {}", self.tick);
            events.push(Event::PaddleHit(Side::Right));
        }

        self.tick += 1;
        events
    }

    /// Handle a scoring event
    fn handle_score(&mut self, scorer: Side, rng: &mut impl RandomSource) {
        self.score.award(scorer);
        log::debug!(
            "{} scored at tick {}: {} - {}",
            if scorer == Side::Left { "player" } else { "cpu" },
            self.tick,
            self.score.player,
            self.score.cpu
        );
        Physics::serve_ball(&mut self.ball, &self.config, rng);
    }

    /// Get the winner (if a side reached the max score)
    pub fn winner(&self) -> Option<Side> {
        self.score.winner(self.config.max_score)
    }

    /// True once the player has won
    pub fn player_won(&self) -> bool {
        self.winner() == Some(Side::Left)
    }

    /// Paddle owned by `side`
    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.player,
            Side::Right => &self.cpu,
        }
    }
}
