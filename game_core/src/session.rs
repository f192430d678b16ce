//! Simulation context
//!
//! [`Game`] owns everything one match needs: the entity world, score, lifecycle,
//! input tracker and random source. The host pushes input into it and calls
//! [`Game::tick`]; the result is reported through a [`Presenter`].

use hecs::World;
use serde::{Deserialize, Serialize};

use crate::{
    reset_positions, spawn_table, step, Ball, Config, Events, GameFsm, GameRng, InputEvent,
    InputQueue, InputState, Lifecycle, LifecycleAction, Paddle, PaddleControl, RandomSource,
    Score, Side, TouchTracker,
};

/// Everything outside the simulation that shows the game to players
pub trait Presenter {
    /// Draw one frame. Called every frame, including while idle, paused or over.
    fn render(&mut self, view: &FrameView);

    fn score_changed(&mut self, _score: Score) {}

    fn status_changed(&mut self, _status: &str) {}

    fn winner_announced(&mut self, _winner: Side) {}

    fn winner_dismissed(&mut self) {}
}

/// Read-only paddle snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            x: paddle.x,
            y: paddle.y,
            width: paddle.width,
            height: paddle.height,
        }
    }
}

/// Read-only ball snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub dx: f32,
    pub dy: f32,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            size: ball.size,
            dx: ball.vel.x,
            dy: ball.vel.y,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub surface_width: f32,
    pub surface_height: f32,
    pub left: PaddleView,
    pub right: PaddleView,
    pub ball: BallView,
    pub score: Score,
    pub lifecycle: Lifecycle,
    pub winner: Option<Side>,
    pub touch: Option<Side>,
    pub tick: u64,
}

impl FrameView {
    pub fn paddle(&self, side: Side) -> &PaddleView {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// One game session
pub struct Game {
    world: World,
    config: Config,
    score: Score,
    fsm: GameFsm,
    input: InputState,
    queue: InputQueue,
    touch: TouchTracker,
    events: Events,
    rng: Box<dyn RandomSource>,
    winner: Option<Side>,
    tick: u64,
}

impl Game {
    /// New idle game with an entropy-seeded random source
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, Box::new(GameRng::from_entropy()))
    }

    pub fn with_rng(config: Config, rng: Box<dyn RandomSource>) -> Self {
        let mut world = World::new();
        spawn_table(&mut world, &config);

        Self {
            world,
            config,
            score: Score::new(),
            fsm: GameFsm::new(),
            input: InputState::new(),
            queue: InputQueue::new(),
            touch: TouchTracker::new(),
            events: Events::new(),
            rng,
            winner: None,
            tick: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.fsm.state()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Events from the most recent simulated tick
    pub fn events(&self) -> &Events {
        &self.events
    }

    /// Ticks simulated while running, across the whole session
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for hosts and tests that need to stage a position
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Queue input for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    /// Hand a paddle to the keyboard or the AI
    pub fn set_control(&mut self, side: Side, control: PaddleControl) {
        let paddles = self.world.query_mut::<(&Paddle, &mut PaddleControl)>();
        for (_entity, (paddle, current)) in paddles {
            if paddle.side == side {
                *current = control;
            }
        }
    }

    /// Push the current score and status to a freshly attached presenter
    pub fn announce(&self, presenter: &mut dyn Presenter) {
        presenter.score_changed(self.score);
        presenter.status_changed(self.lifecycle().status_text());
        if let Some(winner) = self.winner {
            presenter.winner_announced(winner);
        }
    }

    /// Drain queued input, then advance the simulation one tick if running
    pub fn tick(&mut self, presenter: &mut dyn Presenter) {
        self.process_inputs(presenter);

        if !self.fsm.is_running() {
            return;
        }

        let winner = step(
            &mut self.world,
            &self.config,
            &self.input,
            &mut self.score,
            &mut self.events,
            self.rng.as_mut(),
        );
        self.tick += 1;

        if self.events.scored() {
            presenter.score_changed(self.score);
        }
        if let Some(winner) = winner {
            self.finish(winner, presenter);
        }
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> FrameView {
        let mut left = None;
        let mut right = None;
        for (_entity, paddle) in self.world.query::<&Paddle>().iter() {
            match paddle.side {
                Side::Left => left = Some(PaddleView::from(paddle)),
                Side::Right => right = Some(PaddleView::from(paddle)),
            }
        }
        let ball = self
            .world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_entity, ball)| BallView::from(ball));

        let fallback = |side: Side| PaddleView::from(&Paddle::new(side, &self.config));
        FrameView {
            surface_width: self.config.surface_width,
            surface_height: self.config.surface_height,
            left: left.unwrap_or_else(|| fallback(Side::Left)),
            right: right.unwrap_or_else(|| fallback(Side::Right)),
            ball: ball.unwrap_or_else(|| BallView::from(&Ball::serve(&self.config))),
            score: self.score,
            lifecycle: self.lifecycle(),
            winner: self.winner,
            touch: self.touch.active(),
            tick: self.tick,
        }
    }

    fn process_inputs(&mut self, presenter: &mut dyn Presenter) {
        let events: Vec<InputEvent> = self.queue.drain().collect();
        for event in events {
            match event {
                InputEvent::Press(control) => self.input.set_held(control, true),
                InputEvent::Release(control) => self.input.set_held(control, false),
                InputEvent::Toggle => self.apply(LifecycleAction::Toggle, presenter),
                InputEvent::Restart => self.apply(LifecycleAction::Restart, presenter),
                InputEvent::PointerStart { x, y } => {
                    if self.touch.begin(x, y, &self.config).is_none() {
                        log::trace!("touch at ({x:.0}, {y:.0}) outside the surface");
                    }
                }
                InputEvent::PointerMove { x, y } => self.drag(x, y),
                InputEvent::PointerEnd => self.touch.end(),
            }
        }
    }

    fn apply(&mut self, action: LifecycleAction, presenter: &mut dyn Presenter) {
        let result = self.fsm.transition(action);
        if !result.success() {
            log::debug!("{:?} ignored while {:?}", action, result.from_state());
            return;
        }
        log::info!(
            "lifecycle {:?} -> {:?} ({:?})",
            result.from_state(),
            result.to_state(),
            action
        );

        if result.to_state() == Lifecycle::Idle {
            self.reset_match();
            presenter.winner_dismissed();
            presenter.score_changed(self.score);
        }
        presenter.status_changed(result.to_state().status_text());
    }

    fn finish(&mut self, winner: Side, presenter: &mut dyn Presenter) {
        self.apply(LifecycleAction::GameOver, presenter);
        self.winner = Some(winner);
        log::info!(
            "{} wins {} - {} after {} ticks",
            winner.label(),
            self.score.left,
            self.score.right,
            self.tick
        );
        presenter.winner_announced(winner);
    }

    fn reset_match(&mut self) {
        self.score.reset();
        self.winner = None;
        self.touch.end();
        self.events.clear();
        reset_positions(&mut self.world, &self.config, self.rng.as_mut());
    }

    fn drag(&mut self, _x: f32, y: f32) {
        let Some(side) = self.touch.active() else {
            return;
        };
        if !self.fsm.is_running() {
            return;
        }

        let target = TouchTracker::target_y(y, &self.config);
        for (_entity, paddle) in self.world.query_mut::<&mut Paddle>() {
            if paddle.side == side {
                paddle.y = target;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Control, ScriptedRng};
    use glam::Vec2;

    /// Records every notification for assertions
    #[derive(Default)]
    struct Recorder {
        frames: usize,
        scores: Vec<Score>,
        statuses: Vec<String>,
        winners: Vec<Side>,
        dismissed: usize,
    }

    impl Presenter for Recorder {
        fn render(&mut self, _view: &FrameView) {
            self.frames += 1;
        }

        fn score_changed(&mut self, score: Score) {
            self.scores.push(score);
        }

        fn status_changed(&mut self, status: &str) {
            self.statuses.push(status.to_string());
        }

        fn winner_announced(&mut self, winner: Side) {
            self.winners.push(winner);
        }

        fn winner_dismissed(&mut self) {
            self.dismissed += 1;
        }
    }

    fn game() -> Game {
        Game::with_rng(Config::new(), Box::new(ScriptedRng::new(vec![0.9, 0.9])))
    }

    fn start(game: &mut Game, presenter: &mut Recorder) {
        game.push_input(InputEvent::Toggle);
        game.tick(presenter);
    }

    fn place_ball(game: &mut Game, pos: Vec2, vel: Vec2) {
        for (_e, ball) in game.world_mut().query_mut::<&mut Ball>() {
            ball.pos = pos;
            ball.vel = vel;
        }
    }

    #[test]
    fn test_new_game_is_idle_and_centred() {
        let game = game();
        let view = game.view();
        assert_eq!(game.lifecycle(), Lifecycle::Idle);
        assert_eq!(view.ball.x, 400.0);
        assert_eq!(view.ball.y, 200.0);
        assert_eq!((view.ball.dx, view.ball.dy), (4.0, 4.0));
        assert_eq!(view.left.y, 160.0);
        assert_eq!(view.right.x, 780.0);
    }

    #[test]
    fn test_idle_tick_does_not_move_ball() {
        let mut game = game();
        let mut presenter = Recorder::default();
        game.tick(&mut presenter);
        assert_eq!(game.view().ball.x, 400.0);
        assert_eq!(game.ticks(), 0);
    }

    #[test]
    fn test_start_advances_ball() {
        let mut game = game();
        let mut presenter = Recorder::default();
        start(&mut game, &mut presenter);

        let view = game.view();
        assert_eq!(game.lifecycle(), Lifecycle::Running);
        assert_eq!((view.ball.x, view.ball.y), (404.0, 204.0));
        assert_eq!(presenter.statuses, vec!["Game in progress...".to_string()]);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = game();
        let mut presenter = Recorder::default();
        start(&mut game, &mut presenter);
        game.push_input(InputEvent::Toggle);
        game.tick(&mut presenter);
        let frozen = game.view();

        game.tick(&mut presenter);
        game.tick(&mut presenter);

        assert_eq!(game.lifecycle(), Lifecycle::Paused);
        assert_eq!(game.view().ball, frozen.ball);
        assert_eq!(
            presenter.statuses.last().map(String::as_str),
            Some("Game paused. Press SPACE to continue.")
        );
    }

    #[test]
    fn test_held_key_moves_paddle() {
        let mut game = game();
        let mut presenter = Recorder::default();
        game.push_input(InputEvent::Press(Control::LeftDown));
        start(&mut game, &mut presenter);
        assert_eq!(game.view().left.y, 165.0);

        game.push_input(InputEvent::Release(Control::LeftDown));
        game.tick(&mut presenter);
        assert_eq!(game.view().left.y, 165.0);
    }

    #[test]
    fn test_match_point_ends_game() {
        let mut game = game();
        let mut presenter = Recorder::default();
        start(&mut game, &mut presenter);
        game.score = Score { left: 0, right: 4 };
        place_ball(&mut game, Vec2::new(-12.0, 300.0), Vec2::new(-4.0, 0.0));

        game.tick(&mut presenter);

        assert_eq!(game.score(), Score { left: 0, right: 5 });
        assert_eq!(game.lifecycle(), Lifecycle::Over);
        assert_eq!(game.winner(), Some(Side::Right));
        assert_eq!(presenter.winners, vec![Side::Right]);
        assert_eq!(presenter.statuses.last().map(String::as_str), Some("Game Over!"));

        // Frozen until reset
        let ticks = game.ticks();
        let frozen = game.view().ball;
        game.tick(&mut presenter);
        assert_eq!(game.ticks(), ticks);
        assert_eq!(game.view().ball, frozen);
    }

    #[test]
    fn test_toggle_after_game_over_resets() {
        let mut game = game();
        let mut presenter = Recorder::default();
        start(&mut game, &mut presenter);
        game.score = Score { left: 4, right: 2 };
        place_ball(&mut game, Vec2::new(805.0, 300.0), Vec2::new(4.0, 0.0));
        game.tick(&mut presenter);
        assert_eq!(game.winner(), Some(Side::Left));

        game.push_input(InputEvent::Toggle);
        game.tick(&mut presenter);

        assert_eq!(game.lifecycle(), Lifecycle::Idle);
        assert_eq!(game.score(), Score::new());
        assert_eq!(game.winner(), None);
        assert_eq!(presenter.dismissed, 1);
        assert_eq!(presenter.scores.last(), Some(&Score::new()));
        assert_eq!(game.view().left.y, 160.0);
        assert_eq!((game.view().ball.x, game.view().ball.y), (400.0, 200.0));
    }

    #[test]
    fn test_restart_from_running() {
        let mut game = game();
        let mut presenter = Recorder::default();
        start(&mut game, &mut presenter);
        game.push_input(InputEvent::Restart);
        game.tick(&mut presenter);
        assert_eq!(game.lifecycle(), Lifecycle::Idle);
    }

    #[test]
    fn test_restart_while_idle_ignored() {
        let mut game = game();
        let mut presenter = Recorder::default();
        game.push_input(InputEvent::Restart);
        game.tick(&mut presenter);
        assert_eq!(game.lifecycle(), Lifecycle::Idle);
        assert!(presenter.statuses.is_empty());
    }

    #[test]
    fn test_touch_drag_sets_paddle() {
        let mut game = game();
        let mut presenter = Recorder::default();
        start(&mut game, &mut presenter);

        game.push_input(InputEvent::PointerStart { x: 700.0, y: 100.0 });
        game.push_input(InputEvent::PointerMove { x: 700.0, y: 100.0 });
        game.tick(&mut presenter);

        assert_eq!(game.view().touch, Some(Side::Right));
        assert_eq!(game.view().right.y, 60.0);

        game.push_input(InputEvent::PointerEnd);
        game.push_input(InputEvent::PointerMove { x: 700.0, y: 300.0 });
        game.tick(&mut presenter);
        assert_eq!(game.view().right.y, 60.0);
        assert_eq!(game.view().touch, None);
    }

    #[test]
    fn test_touch_drag_ignored_while_paused() {
        let mut game = game();
        let mut presenter = Recorder::default();
        start(&mut game, &mut presenter);
        game.push_input(InputEvent::Toggle);
        game.push_input(InputEvent::PointerStart { x: 50.0, y: 100.0 });
        game.push_input(InputEvent::PointerMove { x: 50.0, y: 10.0 });
        game.tick(&mut presenter);

        assert_eq!(game.view().left.y, 160.0);
    }

    #[test]
    fn test_ai_control() {
        let mut game = game();
        let mut presenter = Recorder::default();
        game.set_control(Side::Right, PaddleControl::Ai);
        place_ball(&mut game, Vec2::new(400.0, 20.0), Vec2::new(4.0, 0.0));
        game.push_input(InputEvent::Press(Control::RightDown));
        start(&mut game, &mut presenter);

        // AI climbs toward the ball despite the held down key
        assert_eq!(game.view().right.y, 156.0);
    }

    #[test]
    fn test_announce_reports_current_state() {
        let game = game();
        let mut presenter = Recorder::default();
        game.announce(&mut presenter);
        assert_eq!(presenter.scores, vec![Score::new()]);
        assert_eq!(presenter.statuses, vec!["Press SPACE to start the game!".to_string()]);
    }
}
