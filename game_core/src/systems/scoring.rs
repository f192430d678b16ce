use crate::{Ball, Config, Events, RandomSource, Score, Side};
use hecs::World;

/// Check if ball left the table (scoring)
///
/// The side the ball did not leave past gets the point, and the ball is served again
/// from the centre.
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut dyn RandomSource,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let Some(scorer) = exited_past(ball, config).map(Side::opponent) else {
            continue;
        };

        score.increment(scorer);
        match scorer {
            Side::Left => events.left_scored = true,
            Side::Right => events.right_scored = true,
        }
        log::debug!(
            "{} scores ({} - {})",
            scorer.label(),
            score.left,
            score.right
        );

        ball.reset(config, rng);
    }
}

/// Which edge the ball has fully crossed, if any
pub fn exited_past(ball: &Ball, config: &Config) -> Option<Side> {
    if ball.pos.x + ball.size < 0.0 {
        Some(Side::Left)
    } else if ball.pos.x > config.surface_width {
        Some(Side::Right)
    } else {
        None
    }
}

/// Win check, run after a point was scored this tick
pub fn check_winner(score: &Score, config: &Config, events: &mut Events) -> Option<Side> {
    if !events.scored() {
        return None;
    }
    events.winner = score.has_winner(config.win_score);
    events.winner
}
