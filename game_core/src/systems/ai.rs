use crate::{Ball, Config, Paddle, PaddleControl};
use hecs::World;

/// Steer AI paddles toward the ball
///
/// Strategy: compare paddle centre with ball centre every tick and close the gap at a
/// reduced speed, standing still inside the dead zone so the paddle doesn't jitter.
pub fn track_ball(world: &mut World, config: &Config) {
    let ball_y = world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| ball.center().y);

    let Some(ball_y) = ball_y else {
        return;
    };

    for (_entity, (paddle, control)) in world.query_mut::<(&mut Paddle, &PaddleControl)>() {
        if *control != PaddleControl::Ai {
            continue;
        }

        let step = paddle.speed * config.ai.speed_factor;
        let diff = ball_y - paddle.center_y();
        if diff > config.ai.dead_zone {
            paddle.y += step;
        } else if diff < -config.ai.dead_zone {
            paddle.y -= step;
        }

        paddle.clamp_to(config.surface_height);
    }
}
