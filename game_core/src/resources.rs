use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::Side;

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u8,
    pub right: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn has_winner(&self, win_score: u8) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Source of randomness for serves and bounces
pub trait RandomSource {
    /// Uniform sample in `[low, high)`
    fn next_in_range(&mut self, low: f32, high: f32) -> f32;

    fn coin_flip(&mut self) -> bool {
        self.next_in_range(0.0, 1.0) > 0.5
    }
}

/// Random number generator
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Seeded from the OS; runs are not reproducible
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl RandomSource for GameRng {
    fn next_in_range(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.0.gen_range(low..high)
    }
}

/// Replays a fixed cycle of unit samples (`[0, 1)`), scaled into the requested range
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    samples: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn next_in_range(&mut self, low: f32, high: f32) -> f32 {
        let unit = match self.samples.get(self.cursor % self.samples.len().max(1)) {
            Some(sample) => *sample,
            None => 0.5,
        };
        self.cursor += 1;
        low + unit * (high - low)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub left_scored: bool,
    pub right_scored: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
    pub winner: Option<Side>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn scored(&self) -> bool {
        self.left_scored || self.right_scored
    }
}
