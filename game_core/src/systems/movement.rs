use crate::{Ball, Config, Control, InputState, Paddle, PaddleControl};
use hecs::World;

/// Apply held up/down keys to keyboard-driven paddles
///
/// A step is only taken while the paddle is still inside the field on that side; the
/// step itself may overshoot and is clamped back afterwards.
pub fn move_paddles(world: &mut World, input: &InputState, config: &Config) {
    for (_entity, (paddle, control)) in world.query_mut::<(&mut Paddle, &PaddleControl)>() {
        if *control != PaddleControl::Keyboard {
            continue;
        }

        if input.is_held(Control::up(paddle.side)) && paddle.y > 0.0 {
            paddle.y -= paddle.speed;
        }
        let floor = config.surface_height - paddle.height;
        if input.is_held(Control::down(paddle.side)) && paddle.y < floor {
            paddle.y += paddle.speed;
        }

        paddle.clamp_to(config.surface_height);
    }
}

/// Move ball by one tick of velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel;
    }
}
