pub mod components;
pub mod config;
pub mod driver;
pub mod input;
pub mod lifecycle;
pub mod params;
pub mod resources;
pub mod session;
pub mod systems;

pub use components::*;
pub use config::*;
pub use driver::*;
pub use input::*;
pub use lifecycle::*;
pub use params::*;
pub use resources::*;
pub use session::*;

use hecs::World;
use systems::*;

/// Advance the Pong simulation by one tick
///
/// Returns the winning side if this tick ended the match.
pub fn step(
    world: &mut World,
    config: &Config,
    input: &InputState,
    score: &mut Score,
    events: &mut Events,
    rng: &mut dyn RandomSource,
) -> Option<Side> {
    // Clear events at start of tick
    events.clear();

    // 1. Move paddles (held keys, then AI)
    move_paddles(world, input, config);
    track_ball(world, config);

    // 2. Move ball
    move_ball(world);

    // 3. Check collisions (walls, then paddles)
    check_collisions(world, config, events, rng);

    // 4. Check scoring (ball exited the table)
    check_scoring(world, config, score, events, rng);

    // 5. Win check
    check_winner(score, config, events)
}

/// Helper to create a paddle entity at its starting position
pub fn create_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(side, config), PaddleControl::Keyboard))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2, size: f32) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, size),))
}

/// Spawn both paddles and the ball on its opening serve
pub fn spawn_table(world: &mut World, config: &Config) {
    for side in Side::BOTH {
        create_paddle(world, side, config);
    }
    let ball = Ball::serve(config);
    create_ball(world, ball.pos, ball.vel, ball.size);
}

/// Paddles back to centre, ball served in a random direction
pub fn reset_positions(world: &mut World, config: &Config, rng: &mut dyn RandomSource) {
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.y = config.paddle_start_y();
    }
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.reset(config, rng);
    }
}
