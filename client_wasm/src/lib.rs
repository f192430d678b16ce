//! Browser client for Pong
//!
//! Canvas 2D rendering with keyboard and touch controls. The simulation lives in
//! `game_core`; this crate only wires it to the page.
//!
//! Note: the DOM wiring is only compiled for the wasm32 target

pub mod input;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPresenter;
