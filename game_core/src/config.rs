use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{KeyBindings, Params, Side};

/// How a paddle hit perturbs the ball's vertical velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BounceMode {
    /// `dy += uniform(-amount, amount)`
    Jitter { amount: f32 },
    /// `dy = hit * max_dy`, where `hit` is where the ball struck the paddle in `[-1, 1]`
    Angle { max_dy: f32 },
}

impl Default for BounceMode {
    fn default() -> Self {
        BounceMode::Jitter {
            amount: Params::BOUNCE_JITTER,
        }
    }
}

/// Simulation rate versus render rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Timestep {
    /// Accumulate frame time and run whole ticks of `1 / tick_rate_hz`
    Fixed { tick_rate_hz: f32, max_substeps: u32 },
    /// One tick per rendered frame; game speed follows the display refresh rate
    PerFrame,
}

impl Default for Timestep {
    fn default() -> Self {
        Timestep::Fixed {
            tick_rate_hz: Params::TICK_RATE_HZ,
            max_substeps: Params::MAX_SUBSTEPS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Fraction of paddle speed the AI moves at
    pub speed_factor: f32,
    /// Distance between paddle centre and ball centre the AI tolerates
    pub dead_zone: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            speed_factor: Params::AI_SPEED_FACTOR,
            dead_zone: Params::AI_DEAD_ZONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    /// Touches this far outside the surface still count
    pub expand_zone: f32,
    /// Half-width of the central band where the nearest paddle is picked
    pub overlap_zone: f32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            expand_zone: Params::TOUCH_EXPAND_ZONE,
            overlap_zone: Params::TOUCH_OVERLAP_ZONE,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub surface_width: f32,
    pub surface_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub ball_speed: f32,
    pub win_score: u8,
    pub bounce: BounceMode,
    pub ai: AiConfig,
    pub touch: TouchConfig,
    pub keys: KeyBindings,
    pub timestep: Timestep,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surface_width: Params::SURFACE_WIDTH,
            surface_height: Params::SURFACE_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_speed: Params::PADDLE_SPEED,
            ball_size: Params::BALL_SIZE,
            ball_speed: Params::BALL_SPEED,
            win_score: Params::WIN_SCORE,
            bounce: BounceMode::default(),
            ai: AiConfig::default(),
            touch: TouchConfig::default(),
            keys: KeyBindings::default(),
            timestep: Timestep::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Same defaults on a surface of a different size
    pub fn with_surface(mut self, width: f32, height: f32) -> Self {
        self.surface_width = width;
        self.surface_height = height;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }
        if self.paddle_margin < 0.0 {
            return Err(ConfigError::invalid("paddle_margin", "must not be negative"));
        }
        if self.paddle_height > self.surface_height {
            return Err(ConfigError::invalid(
                "paddle_height",
                "paddle is taller than the surface",
            ));
        }
        if self.ball_size >= self.surface_height {
            return Err(ConfigError::invalid(
                "ball_size",
                "ball must be smaller than the surface",
            ));
        }
        if self.paddle_x(Side::Left) + self.paddle_width >= self.paddle_x(Side::Right) {
            return Err(ConfigError::invalid(
                "surface_width",
                "paddles overlap horizontally",
            ));
        }
        if self.win_score == 0 {
            return Err(ConfigError::invalid("win_score", "must be at least 1"));
        }
        if !(self.ai.speed_factor > 0.0 && self.ai.speed_factor <= 1.0) {
            return Err(ConfigError::invalid("ai.speed_factor", "must be in (0, 1]"));
        }
        if let Timestep::Fixed {
            tick_rate_hz,
            max_substeps,
        } = self.timestep
        {
            if !(tick_rate_hz > 0.0 && tick_rate_hz.is_finite()) {
                return Err(ConfigError::invalid("timestep.tick_rate_hz", "must be positive"));
            }
            if max_substeps == 0 {
                return Err(ConfigError::invalid("timestep.max_substeps", "must be at least 1"));
            }
        }
        Ok(())
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => self.surface_width - self.paddle_width - self.paddle_margin,
        }
    }

    /// Paddle Y that centres it vertically
    pub fn paddle_start_y(&self) -> f32 {
        self.surface_height / 2.0 - self.paddle_height / 2.0
    }

    /// Largest Y a paddle may take
    pub fn paddle_floor(&self) -> f32 {
        self.surface_height - self.paddle_height
    }

    /// Clamp paddle Y to surface bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.paddle_floor())
    }

    /// Serve point for the ball
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.surface_width / 2.0, self.surface_height / 2.0)
    }
}

/// Failure to load a [`Config`]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config: {err}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid config field `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Left), 10.0, "Left paddle X position");
        assert_eq!(config.paddle_x(Side::Right), 780.0, "Right paddle X position");
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        assert_eq!(config.clamp_paddle_y(-10.0), 0.0);
        assert_eq!(config.clamp_paddle_y(1000.0), config.paddle_floor());
        assert_eq!(config.clamp_paddle_y(120.0), 120.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let json = r#"{ "win_score": 3, "bounce": { "mode": "angle", "max_dy": 6.0 } }"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.win_score, 3);
        assert_eq!(config.bounce, BounceMode::Angle { max_dy: 6.0 });
        assert_eq!(config.surface_width, Params::SURFACE_WIDTH);
        assert_eq!(config.timestep, Timestep::default());
    }

    #[test]
    fn test_from_json_per_frame_timestep() {
        let config = Config::from_json(r#"{ "timestep": { "mode": "per_frame" } }"#).unwrap();
        assert_eq!(config.timestep, Timestep::PerFrame);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_tall_paddle() {
        let config = Config {
            paddle_height: 500.0,
            ..Config::new()
        };
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "paddle_height"),
            other => panic!("expected invalid paddle_height, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_win_score() {
        let err = Config::from_json(r#"{ "win_score": 0 }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config field `win_score`: must be at least 1"
        );
    }

    #[test]
    fn test_validate_rejects_narrow_surface() {
        let config = Config::new().with_surface(30.0, 400.0);
        assert!(config.validate().is_err());
    }
}
