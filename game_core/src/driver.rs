//! Frame driver
//!
//! Converts wall-clock frames into simulation ticks and renders once per frame.

use crate::{Game, Params, Presenter, Timestep};

pub struct FrameDriver {
    timestep: Timestep,
    accumulator: f32,
}

impl FrameDriver {
    pub fn new(timestep: Timestep) -> Self {
        Self {
            timestep,
            accumulator: 0.0,
        }
    }

    /// Driver using the game's configured timestep
    pub fn for_game(game: &Game) -> Self {
        Self::new(game.config().timestep)
    }

    /// Run the ticks owed for `elapsed` seconds of wall time, then render.
    /// Returns the number of ticks run.
    pub fn frame(&mut self, elapsed: f32, game: &mut Game, presenter: &mut dyn Presenter) -> u32 {
        let ticks = self.ticks_due(elapsed);
        for _ in 0..ticks {
            game.tick(presenter);
        }
        presenter.render(&game.view());
        ticks
    }

    /// Drop any partial tick, e.g. after the page was hidden
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    fn ticks_due(&mut self, elapsed: f32) -> u32 {
        match self.timestep {
            Timestep::PerFrame => 1,
            Timestep::Fixed {
                tick_rate_hz,
                max_substeps,
            } => {
                let dt = 1.0 / tick_rate_hz;
                // Clamp dt to prevent large jumps
                self.accumulator += elapsed.clamp(0.0, Params::MAX_FRAME_DT);

                let mut substeps = 0;
                while self.accumulator >= dt && substeps < max_substeps {
                    self.accumulator -= dt;
                    substeps += 1;
                }
                if substeps == max_substeps {
                    // Spiral of death guard: forget time we could not catch up on
                    self.accumulator = self.accumulator.min(dt);
                }
                substeps
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, FrameView, InputEvent, Lifecycle, ScriptedRng};

    #[derive(Default)]
    struct Frames(Vec<FrameView>);

    impl Presenter for Frames {
        fn render(&mut self, view: &FrameView) {
            self.0.push(view.clone());
        }
    }

    fn running_game(timestep: Timestep) -> Game {
        let config = Config {
            timestep,
            ..Config::new()
        };
        let mut game = Game::with_rng(config, Box::new(ScriptedRng::new(vec![0.9])));
        game.push_input(InputEvent::Toggle);
        game
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let timestep = Timestep::Fixed {
            tick_rate_hz: 100.0,
            max_substeps: 8,
        };
        let mut game = running_game(timestep);
        let mut driver = FrameDriver::for_game(&game);
        let mut frames = Frames::default();

        assert_eq!(driver.frame(0.004, &mut game, &mut frames), 0);
        assert_eq!(driver.frame(0.0065, &mut game, &mut frames), 1);
        assert_eq!(driver.frame(0.025, &mut game, &mut frames), 2);
        assert_eq!(frames.0.len(), 3, "Every frame renders");
        assert_eq!(game.ticks(), 3);
    }

    #[test]
    fn test_fixed_timestep_caps_substeps() {
        let timestep = Timestep::Fixed {
            tick_rate_hz: 1000.0,
            max_substeps: 4,
        };
        let mut game = running_game(timestep);
        let mut driver = FrameDriver::for_game(&game);
        let mut frames = Frames::default();

        assert_eq!(driver.frame(5.0, &mut game, &mut frames), 4);
        assert!(driver.accumulator <= 0.001 + f32::EPSILON);
    }

    #[test]
    fn test_reset_drops_partial_tick() {
        let timestep = Timestep::Fixed {
            tick_rate_hz: 100.0,
            max_substeps: 8,
        };
        let mut game = running_game(timestep);
        let mut driver = FrameDriver::for_game(&game);
        let mut frames = Frames::default();

        assert_eq!(driver.frame(0.009, &mut game, &mut frames), 0);
        driver.reset();
        // Without the reset the carried 9ms would make this a tick
        assert_eq!(driver.frame(0.002, &mut game, &mut frames), 0);
        assert_eq!(game.ticks(), 0);
    }

    #[test]
    fn test_per_frame_runs_one_tick() {
        let mut game = running_game(Timestep::PerFrame);
        let mut driver = FrameDriver::for_game(&game);
        let mut frames = Frames::default();

        assert_eq!(driver.frame(0.5, &mut game, &mut frames), 1);
        assert_eq!(driver.frame(0.0, &mut game, &mut frames), 1);
        assert_eq!(game.ticks(), 2);
        assert_eq!(frames.0[1].ball.x, 408.0);
    }

    #[test]
    fn test_idle_game_still_renders() {
        let config = Config {
            timestep: Timestep::PerFrame,
            ..Config::new()
        };
        let mut game = Game::with_rng(config, Box::new(ScriptedRng::new(vec![0.9])));
        let mut driver = FrameDriver::for_game(&game);
        let mut frames = Frames::default();

        driver.frame(0.016, &mut game, &mut frames);

        assert_eq!(frames.0.len(), 1);
        assert_eq!(frames.0[0].lifecycle, Lifecycle::Idle);
        assert_eq!(game.ticks(), 0);
    }
}
