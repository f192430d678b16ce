//! Input tracking
//!
//! Input arrives as discrete [`InputEvent`]s pushed onto an [`InputQueue`] whenever the
//! host delivers them. The simulation drains the queue once per tick, so the tick only
//! ever reads a settled [`InputState`].

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Config, Side};

/// Logical held-direction controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::LeftUp,
        Control::LeftDown,
        Control::RightUp,
        Control::RightDown,
    ];

    pub fn up(side: Side) -> Self {
        match side {
            Side::Left => Control::LeftUp,
            Side::Right => Control::RightUp,
        }
    }

    pub fn down(side: Side) -> Self {
        match side {
            Side::Left => Control::LeftDown,
            Side::Right => Control::RightDown,
        }
    }

    fn index(self) -> usize {
        match self {
            Control::LeftUp => 0,
            Control::LeftDown => 1,
            Control::RightUp => 2,
            Control::RightDown => 3,
        }
    }
}

/// Discrete input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Press(Control),
    Release(Control),
    /// Start, pause, resume, or leave the game-over screen
    Toggle,
    /// Return to idle with a fresh match
    Restart,
    /// Surface-relative coordinates
    PointerStart { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerEnd,
}

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Hold(Control),
    Toggle,
}

/// Keyboard layout, matched against lower-cased key identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left_up: String,
    pub left_down: String,
    pub right_up: String,
    pub right_down: String,
    pub toggle: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: "w".into(),
            left_down: "s".into(),
            right_up: "arrowup".into(),
            right_down: "arrowdown".into(),
            toggle: " ".into(),
        }
    }
}

impl KeyBindings {
    pub fn resolve(&self, key: &str) -> Option<KeyAction> {
        let key = key.to_lowercase();
        if key == self.toggle {
            return Some(KeyAction::Toggle);
        }
        Control::ALL
            .into_iter()
            .find(|control| self.key_for(*control) == key)
            .map(KeyAction::Hold)
    }

    /// Translate a key transition; unbound keys give `None`
    pub fn event(&self, key: &str, pressed: bool) -> Option<InputEvent> {
        match (self.resolve(key)?, pressed) {
            (KeyAction::Hold(control), true) => Some(InputEvent::Press(control)),
            (KeyAction::Hold(control), false) => Some(InputEvent::Release(control)),
            (KeyAction::Toggle, true) => Some(InputEvent::Toggle),
            (KeyAction::Toggle, false) => None,
        }
    }

    fn key_for(&self, control: Control) -> &str {
        match control {
            Control::LeftUp => &self.left_up,
            Control::LeftDown => &self.left_down,
            Control::RightUp => &self.right_up,
            Control::RightDown => &self.right_down,
        }
    }
}

/// Which controls are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 4],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_held(&mut self, control: Control, held: bool) {
        self.held[control.index()] = held;
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    pub fn clear(&mut self) {
        self.held = [false; 4];
    }
}

/// Events waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Pointer-drag paddle control
///
/// A touch picks a paddle when it starts; each move then places that paddle directly
/// under the finger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchTracker {
    active: Option<Side>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Side> {
        self.active
    }

    /// Map a raw surface point into the play field. Points further than the expand
    /// zone outside the surface are rejected.
    pub fn to_surface(x: f32, y: f32, config: &Config) -> Option<Vec2> {
        let slack = config.touch.expand_zone;
        let inside_x = x >= -slack && x <= config.surface_width + slack;
        let inside_y = y >= -slack && y <= config.surface_height + slack;
        if !(inside_x && inside_y) {
            return None;
        }
        Some(Vec2::new(
            x.clamp(0.0, config.surface_width),
            y.clamp(0.0, config.surface_height),
        ))
    }

    /// Pick the paddle a touch at `point` controls
    ///
    /// The left paddle's zone reaches `overlap_zone` past the centre line, so the
    /// whole central band belongs to the left paddle.
    pub fn pick_side(point: Vec2, config: &Config) -> Side {
        if point.x < config.surface_width / 2.0 + config.touch.overlap_zone {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn begin(&mut self, x: f32, y: f32, config: &Config) -> Option<Side> {
        let point = Self::to_surface(x, y, config)?;
        let side = Self::pick_side(point, config);
        self.active = Some(side);
        Some(side)
    }

    /// Paddle Y for a touch at surface height `y`
    pub fn target_y(y: f32, config: &Config) -> f32 {
        let y = y.clamp(0.0, config.surface_height);
        config.clamp_paddle_y(y - config.paddle_height / 2.0)
    }

    pub fn end(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.resolve("w"), Some(KeyAction::Hold(Control::LeftUp)));
        assert_eq!(keys.resolve("S"), Some(KeyAction::Hold(Control::LeftDown)));
        assert_eq!(keys.resolve("ArrowUp"), Some(KeyAction::Hold(Control::RightUp)));
        assert_eq!(keys.resolve("ArrowDown"), Some(KeyAction::Hold(Control::RightDown)));
        assert_eq!(keys.resolve(" "), Some(KeyAction::Toggle));
        assert_eq!(keys.resolve("q"), None);
    }

    #[test]
    fn test_key_events() {
        let keys = KeyBindings::default();
        assert_eq!(keys.event("w", true), Some(InputEvent::Press(Control::LeftUp)));
        assert_eq!(keys.event("w", false), Some(InputEvent::Release(Control::LeftUp)));
        assert_eq!(keys.event(" ", true), Some(InputEvent::Toggle));
        assert_eq!(keys.event(" ", false), None);
        assert_eq!(keys.event("Escape", true), None);
    }

    #[test]
    fn test_control_names() {
        assert_eq!(Control::up(Side::Right), Control::RightUp);
        assert_eq!(Control::down(Side::Left), Control::LeftDown);
    }

    #[test]
    fn test_input_state_held() {
        let mut input = InputState::new();
        assert!(!input.is_held(Control::LeftUp));
        input.set_held(Control::LeftUp, true);
        input.set_held(Control::RightDown, true);
        assert!(input.is_held(Control::LeftUp));
        assert!(!input.is_held(Control::LeftDown));
        input.set_held(Control::LeftUp, false);
        assert!(!input.is_held(Control::LeftUp));
        input.clear();
        assert!(!input.is_held(Control::RightDown));
    }

    #[test]
    fn test_input_queue_drains_in_order() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Press(Control::LeftUp));
        queue.push(InputEvent::Toggle);
        assert_eq!(queue.len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![InputEvent::Press(Control::LeftUp), InputEvent::Toggle]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_touch_picks_paddle_by_half() {
        let config = Config::new();
        let mut touch = TouchTracker::new();
        assert_eq!(touch.begin(100.0, 50.0, &config), Some(Side::Left));
        assert_eq!(touch.begin(700.0, 50.0, &config), Some(Side::Right));
        assert_eq!(touch.active(), Some(Side::Right));
        touch.end();
        assert_eq!(touch.active(), None);
    }

    #[test]
    fn test_touch_in_overlap_goes_to_left_paddle() {
        let config = Config::new();
        let mut touch = TouchTracker::new();
        // Left half, level with the right paddle: still the left paddle
        assert_eq!(TouchTracker::pick_side(Vec2::new(350.0, 320.0), &config), Side::Left);
        // Right of centre but inside the band
        assert_eq!(touch.begin(499.0, 330.0, &config), Some(Side::Left));
        // Band edge and beyond belong to the right paddle
        assert_eq!(touch.begin(500.0, 330.0, &config), Some(Side::Right));
        assert_eq!(touch.begin(620.0, 10.0, &config), Some(Side::Right));
    }

    #[test]
    fn test_touch_outside_expand_zone_ignored() {
        let config = Config::new();
        let mut touch = TouchTracker::new();
        assert_eq!(touch.begin(-80.0, 100.0, &config), None);
        assert_eq!(touch.active(), None);
        assert_eq!(
            TouchTracker::to_surface(-30.0, 430.0, &config),
            Some(Vec2::new(0.0, 400.0))
        );
    }

    #[test]
    fn test_touch_target_y_clamped() {
        let config = Config::new();
        assert_eq!(TouchTracker::target_y(200.0, &config), 160.0);
        assert_eq!(TouchTracker::target_y(5.0, &config), 0.0);
        assert_eq!(TouchTracker::target_y(399.0, &config), config.paddle_floor());
    }
}
