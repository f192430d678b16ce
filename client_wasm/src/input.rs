//! Keyboard and touch input handling

use game_core::{Config, InputEvent, KeyBindings, Lifecycle, Side};
use web_sys::KeyboardEvent;

/// Keys whose browser default (page scroll) must be suppressed
pub fn blocks_default(key: &str) -> bool {
    matches!(key, " " | "ArrowUp" | "ArrowDown")
}

/// Handle key down event
pub fn handle_key_down(keys: &KeyBindings, key: &str) -> Option<InputEvent> {
    keys.event(key, true)
}

/// Handle key up event
pub fn handle_key_up(keys: &KeyBindings, key: &str) -> Option<InputEvent> {
    keys.event(key, false)
}

/// Extract key from keyboard event
pub fn get_key_from_event(event: &KeyboardEvent) -> String {
    event.key()
}

/// Where the canvas sits in the page, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    /// Client coordinates to play-surface coordinates
    pub fn to_surface(&self, client_x: f32, client_y: f32, config: &Config) -> (f32, f32) {
        let scale_x = config.surface_width / self.width.max(1.0);
        let scale_y = config.surface_height / self.height.max(1.0);
        (
            (client_x - self.left) * scale_x,
            (client_y - self.top) * scale_y,
        )
    }

    /// Whether a surface point lies within the expanded touch area
    pub fn near(x: f32, y: f32, config: &Config) -> bool {
        let slack = config.touch.expand_zone;
        x >= -slack
            && x <= config.surface_width + slack
            && y >= -slack
            && y <= config.surface_height + slack
    }
}

/// A touch beginning at surface point (`x`, `y`)
///
/// During play a touch within the expanded area grabs a paddle; otherwise a tap on
/// the surface itself works the toggle. `None` means the page keeps the touch.
pub fn handle_touch_start(
    lifecycle: Lifecycle,
    x: f32,
    y: f32,
    config: &Config,
) -> Option<InputEvent> {
    if !CanvasRect::near(x, y, config) {
        return None;
    }
    if lifecycle == Lifecycle::Running {
        return Some(InputEvent::PointerStart { x, y });
    }
    let on_surface = (0.0..=config.surface_width).contains(&x)
        && (0.0..=config.surface_height).contains(&y);
    on_surface.then_some(InputEvent::Toggle)
}

/// Horizontal extent (`x`, `width`) of the area whose touches move `side`'s paddle
pub fn touch_zone(side: Side, config: &Config) -> (f32, f32) {
    let split = config.surface_width / 2.0 + config.touch.overlap_zone;
    match side {
        Side::Left => (0.0, split),
        Side::Right => (split, config.surface_width - split),
    }
}
