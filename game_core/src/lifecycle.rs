//! Game State Machine
//!
//! Gates whether ticks advance the simulation. Only `Running` moves anything.

use serde::{Deserialize, Serialize};

/// Game states
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Idle,
    Running,
    Paused,
    Over,
}

impl Lifecycle {
    /// Status line for the score/status display
    pub fn status_text(self) -> &'static str {
        match self {
            Lifecycle::Idle => "Press SPACE to start the game!",
            Lifecycle::Running => "Game in progress...",
            Lifecycle::Paused => "Game paused. Press SPACE to continue.",
            Lifecycle::Over => "Game Over!",
        }
    }
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Start, pause, resume, or leave the game-over screen
    Toggle,
    /// Back to idle from anywhere in a match
    Restart,
    /// A side reached the winning score
    GameOver,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    success: bool,
    from_state: Lifecycle,
    to_state: Lifecycle,
    action: LifecycleAction,
}

impl TransitionResult {
    pub fn success(&self) -> bool {
        self.success
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from_state(&self) -> Lifecycle {
        self.from_state
    }

    pub fn to_state(&self) -> Lifecycle {
        self.to_state
    }

    pub fn action(&self) -> LifecycleAction {
        self.action
    }
}

/// Game Finite State Machine
#[derive(Debug, Clone, Default)]
pub struct GameFsm {
    state: Lifecycle,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            state: Lifecycle::Idle,
        }
    }

    /// Get current state
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: LifecycleAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: LifecycleAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: LifecycleAction) -> Option<Lifecycle> {
        use Lifecycle::*;
        use LifecycleAction::*;

        match (self.state, action) {
            (Idle, Toggle) => Some(Running),
            (Running, Toggle) => Some(Paused),
            (Paused, Toggle) => Some(Running),
            (Over, Toggle) => Some(Idle),

            (Running, LifecycleAction::GameOver) => Some(Over),

            (Running | Paused | Over, Restart) => Some(Idle),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == Lifecycle::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.state == Lifecycle::Over
    }
}
