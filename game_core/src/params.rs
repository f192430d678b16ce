/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Surface
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 400.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_MARGIN: f32 = 10.0; // gap between surface edge and paddle
    pub const PADDLE_SPEED: f32 = 5.0; // units per tick

    // Ball
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_SPEED: f32 = 4.0; // units per tick, per axis at serve
    pub const BOUNCE_JITTER: f32 = 1.0; // dy += uniform(-1, 1) on paddle hit
    pub const BOUNCE_MAX_DY: f32 = 4.0; // dy at the very edge of a paddle (angle mode)

    // AI opponent
    pub const AI_SPEED_FACTOR: f32 = 0.8;
    pub const AI_DEAD_ZONE: f32 = 10.0;

    // Touch
    pub const TOUCH_EXPAND_ZONE: f32 = 50.0;
    pub const TOUCH_OVERLAP_ZONE: f32 = 100.0;

    // Score
    pub const WIN_SCORE: u8 = 5; // First to 5 wins

    // Timing
    pub const TICK_RATE_HZ: f32 = 60.0;
    pub const MAX_SUBSTEPS: u32 = 8;
    pub const MAX_FRAME_DT: f32 = 0.1; // Clamp to prevent large jumps
}
