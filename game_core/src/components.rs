use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Config, RandomSource};

/// Which half of the table an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Player name shown to humans
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Player 1",
            Side::Right => "Player 2",
        }
    }
}

/// Paddle component - top-left anchored rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    /// Paddle at its starting position for `side`
    pub fn new(side: Side, config: &Config) -> Self {
        Self {
            side,
            x: config.paddle_x(side),
            y: config.paddle_start_y(),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Keep the paddle inside the vertical play field
    pub fn clamp_to(&mut self, surface_height: f32) {
        self.y = self.y.clamp(0.0, (surface_height - self.height).max(0.0));
    }
}

/// Who drives a paddle each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleControl {
    /// Held up/down keys from the input tracker
    #[default]
    Keyboard,
    /// Follows the ball on its own, ignoring keys
    Ai,
}

/// Ball component - square ball anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self { pos, vel, size }
    }

    /// Opening serve: centred, heading down and to the right
    pub fn serve(config: &Config) -> Self {
        Self::new(
            config.center(),
            Vec2::splat(config.ball_speed),
            config.ball_size,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Recentre with a random diagonal at serve speed
    pub fn reset(&mut self, config: &Config, rng: &mut dyn RandomSource) {
        self.pos = config.center();
        let dx = if rng.coin_flip() { 1.0 } else { -1.0 };
        let dy = if rng.coin_flip() { 1.0 } else { -1.0 };
        self.vel = Vec2::new(dx, dy) * config.ball_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedRng;

    #[test]
    fn test_paddle_starts_centred() {
        let config = Config::new();
        let left = Paddle::new(Side::Left, &config);
        let right = Paddle::new(Side::Right, &config);
        assert_eq!(left.x, 10.0);
        assert_eq!(right.x, 780.0);
        assert_eq!(left.y, 160.0);
        assert_eq!(left.center_y(), 200.0);
    }

    #[test]
    fn test_paddle_clamp() {
        let config = Config::new();
        let mut paddle = Paddle::new(Side::Left, &config);
        paddle.y = -3.0;
        paddle.clamp_to(config.surface_height);
        assert_eq!(paddle.y, 0.0);
        paddle.y = 1000.0;
        paddle.clamp_to(config.surface_height);
        assert_eq!(paddle.y, config.surface_height - config.paddle_height);
    }

    #[test]
    fn test_ball_reset_keeps_serve_speed() {
        let config = Config::new();
        let mut ball = Ball::new(Vec2::new(-50.0, 3.0), Vec2::new(-9.0, 0.5), 15.0);
        let mut rng = ScriptedRng::new(vec![0.9, 0.1]);
        ball.reset(&config, &mut rng);

        assert_eq!(ball.pos, config.center());
        assert_eq!(ball.vel, Vec2::new(4.0, -4.0));
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.opponent(), Side::Left);
        assert_eq!(Side::Right.label(), "Player 2");
    }
}
