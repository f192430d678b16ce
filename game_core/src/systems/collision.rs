use crate::{Ball, BounceMode, Config, Events, Paddle, RandomSource, Side};
use hecs::World;

/// Check ball collisions with walls and paddles
pub fn check_collisions(
    world: &mut World,
    config: &Config,
    events: &mut Events,
    rng: &mut dyn RandomSource,
) {
    // Collect paddle data first so the ball can be borrowed mutably
    let paddles: Vec<Paddle> = world.query::<&Paddle>().iter().map(|(_e, p)| *p).collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if bounce_off_walls(ball, config) {
            log::trace!("wall bounce at y={:.1}", ball.pos.y);
            events.ball_hit_wall = true;
        }

        for paddle in &paddles {
            if bounce_off_paddle(ball, paddle, config, rng) {
                log::trace!("{:?} paddle hit, vel={:?}", paddle.side, ball.vel);
                events.ball_hit_paddle = true;
            }
        }
    }
}

/// Reflect off the top or bottom wall
///
/// Only the velocity changes; the ball may sit past the wall for up to one tick of
/// travel. A ball already heading back into the field is left alone.
pub fn bounce_off_walls(ball: &mut Ball, config: &Config) -> bool {
    let at_top = ball.pos.y <= 0.0 && ball.vel.y < 0.0;
    let at_bottom = ball.pos.y >= config.surface_height - ball.size && ball.vel.y > 0.0;
    if at_top || at_bottom {
        ball.vel.y = -ball.vel.y;
        return true;
    }
    false
}

/// True when the ball's leading edge has reached the paddle's face, its centre is
/// level with the paddle, and it is travelling toward the paddle
pub fn paddle_contact(ball: &Ball, paddle: &Paddle) -> bool {
    let center_y = ball.center().y;
    let level = center_y >= paddle.y && center_y <= paddle.y + paddle.height;
    if !level {
        return false;
    }

    match paddle.side {
        Side::Left => ball.pos.x <= paddle.x + paddle.width && ball.vel.x < 0.0,
        Side::Right => ball.pos.x + ball.size >= paddle.x && ball.vel.x > 0.0,
    }
}

/// Send the ball back across the table, perturbing its vertical velocity
pub fn bounce_off_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    config: &Config,
    rng: &mut dyn RandomSource,
) -> bool {
    if !paddle_contact(ball, paddle) {
        return false;
    }

    ball.vel.x = -ball.vel.x;
    match config.bounce {
        BounceMode::Jitter { amount } => {
            ball.vel.y += rng.next_in_range(-amount, amount);
        }
        BounceMode::Angle { max_dy } => {
            // Relative position from -1 (top) to 1 (bottom)
            let half = paddle.height / 2.0;
            let hit = ((ball.center().y - paddle.center_y()) / half).clamp(-1.0, 1.0);
            ball.vel.y = hit * max_dy;
        }
    }
    true
}
