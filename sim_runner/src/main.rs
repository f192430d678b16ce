//! Headless Pong match
//!
//! Plays AI against AI through the same frame driver the browser uses and prints the
//! final frame as JSON.
//!
//! Usage: `sim_runner [CONFIG.json] [--seed N] [--frames N]`

use std::error::Error;

use game_core::{
    Config, FrameDriver, FrameView, Game, GameRng, InputEvent, Lifecycle, PaddleControl,
    Presenter, Score, Side,
};

const DEFAULT_FRAMES: u64 = 60 * 60 * 10;
const FRAME_SECONDS: f32 = 1.0 / 60.0;

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<String>,
    seed: Option<u64>,
    frames: Option<u64>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                parsed.seed = Some(value.parse().map_err(|_| format!("bad seed `{value}`"))?);
            }
            "--frames" => {
                let value = args.next().ok_or("--frames needs a value")?;
                let frames = value.parse().map_err(|_| format!("bad frame count `{value}`"))?;
                parsed.frames = Some(frames);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
            path => {
                if parsed.config.replace(path.to_string()).is_some() {
                    return Err("only one config file may be given".into());
                }
            }
        }
    }
    Ok(parsed)
}

/// Writes every notification to the log
#[derive(Default)]
struct LogPresenter {
    frames: u64,
    last_score: Score,
}

impl Presenter for LogPresenter {
    fn render(&mut self, view: &FrameView) {
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!(
                "frame {} tick {}: ball ({:.0}, {:.0}) paddles {:.0} / {:.0}",
                self.frames,
                view.tick,
                view.ball.x,
                view.ball.y,
                view.left.y,
                view.right.y
            );
        }
    }

    fn score_changed(&mut self, score: Score) {
        if score != self.last_score {
            log::info!("score {} - {}", score.left, score.right);
        }
        self.last_score = score;
    }

    fn status_changed(&mut self, status: &str) {
        log::info!("status: {status}");
    }

    fn winner_announced(&mut self, winner: Side) {
        log::info!("{} Wins!", winner.label());
    }

    fn winner_dismissed(&mut self) {
        log::info!("winner dismissed");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };
    log::info!(
        "surface {}x{}, first to {}",
        config.surface_width,
        config.surface_height,
        config.win_score
    );

    let mut game = match args.seed {
        Some(seed) => {
            log::info!("seed {seed}");
            Game::with_rng(config, Box::new(GameRng::new(seed)))
        }
        None => Game::new(config),
    };
    game.set_control(Side::Left, PaddleControl::Ai);
    game.set_control(Side::Right, PaddleControl::Ai);

    let mut presenter = LogPresenter::default();
    let mut driver = FrameDriver::for_game(&game);
    game.announce(&mut presenter);
    game.push_input(InputEvent::Toggle);

    let max_frames = args.frames.unwrap_or(DEFAULT_FRAMES);
    for _ in 0..max_frames {
        driver.frame(FRAME_SECONDS, &mut game, &mut presenter);
        if game.lifecycle() == Lifecycle::Over {
            break;
        }
    }

    if game.lifecycle() != Lifecycle::Over {
        log::warn!("no winner after {} frames", presenter.frames);
    }
    println!("{}", serde_json::to_string_pretty(&game.view())?);
    Ok(())
}
