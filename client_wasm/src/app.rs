//! Browser entry point: DOM wiring and the animation-frame loop

use std::cell::RefCell;
use std::rc::Rc;

use game_core::{Config, FrameDriver, Game, InputEvent, Lifecycle};
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, EventTarget, HtmlCanvasElement, KeyboardEvent, TouchEvent,
};

use crate::canvas::CanvasPresenter;
use crate::input::{self, CanvasRect};

const FALLBACK_DT: f32 = 1.0 / 60.0;

struct App {
    game: Game,
    driver: FrameDriver,
    presenter: CanvasPresenter,
    canvas: HtmlCanvasElement,
    last_time: Option<f64>,
}

impl App {
    fn canvas_rect(&self) -> CanvasRect {
        let rect = self.canvas.get_bounding_client_rect();
        CanvasRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }

    /// First touch of the event in surface coordinates
    fn touch_point(&self, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        Some(self.canvas_rect().to_surface(
            touch.client_x() as f32,
            touch.client_y() as f32,
            self.game.config(),
        ))
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id("gameCanvas")
        .ok_or_else(|| JsValue::from_str("missing #gameCanvas"))?
        .dyn_into::<HtmlCanvasElement>()?;

    let config = Config::new().with_surface(canvas.width() as f32, canvas.height() as f32);
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let presenter = CanvasPresenter::new(&document, &canvas, &config)?;
    let game = Game::new(config);
    let app = Rc::new(RefCell::new(App {
        driver: FrameDriver::for_game(&game),
        game,
        presenter,
        canvas,
        last_time: None,
    }));

    {
        let mut guard = app.borrow_mut();
        let App {
            game, presenter, ..
        } = &mut *guard;
        game.announce(presenter);
    }

    setup_keyboard(&document, app.clone());
    setup_touch(&document, app.clone())?;
    setup_play_again(&document, app.clone());
    setup_visibility(&document, app.clone());

    request_animation_frame(app);
    log::info!("Pong running");
    Ok(())
}

fn setup_keyboard(document: &Document, app: Rc<RefCell<App>>) {
    for (kind, pressed) in [("keydown", true), ("keyup", false)] {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = input::get_key_from_event(&event);
            if input::blocks_default(&key) {
                event.prevent_default();
            }
            // Held keys repeat; only the first press counts for the toggle
            if pressed && event.repeat() {
                return;
            }
            let mut app = app.borrow_mut();
            let keys = &app.game.config().keys;
            let mapped = if pressed {
                input::handle_key_down(keys, &key)
            } else {
                input::handle_key_up(keys, &key)
            };
            if let Some(event) = mapped {
                app.game.push_input(event);
            }
        });
        let _ = document.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_touch(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let target: &EventTarget = document.as_ref();

    // Touch start
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let mut app = app.borrow_mut();
            let Some((x, y)) = app.touch_point(&event) else {
                return;
            };
            let lifecycle = app.game.lifecycle();
            // Touches that map to nothing keep their default so nearby buttons still click
            let Some(mapped) = input::handle_touch_start(lifecycle, x, y, app.game.config())
            else {
                return;
            };
            event.prevent_default();
            app.game.push_input(mapped);
        });
        target.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
    }

    // Touch move
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let mut app = app.borrow_mut();
            let Some((x, y)) = app.touch_point(&event) else {
                return;
            };
            if CanvasRect::near(x, y, app.game.config()) {
                event.prevent_default();
            }
            // Moves without a grabbed paddle are dropped by the game
            app.game.push_input(InputEvent::PointerMove { x, y });
        });
        target.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
    }

    // Touch end
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
            app.borrow_mut().game.push_input(InputEvent::PointerEnd);
        });
        target.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn setup_play_again(document: &Document, app: Rc<RefCell<App>>) {
    let Some(button) = document.get_element_by_id("playAgainBtn") else {
        log::warn!("no #playAgainBtn, restart only via keyboard");
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
        let mut app = app.borrow_mut();
        if app.game.lifecycle() != Lifecycle::Idle {
            app.game.push_input(InputEvent::Restart);
        }
    });
    let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn setup_visibility(document: &Document, app: Rc<RefCell<App>>) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        // Frames stop while hidden; don't replay the gap as a burst of ticks
        let mut app = app.borrow_mut();
        app.driver.reset();
        app.last_time = None;
    });
    let _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn request_animation_frame(app: Rc<RefCell<App>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(app, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(app: Rc<RefCell<App>>, time: f64) {
    {
        let mut guard = app.borrow_mut();
        let dt = match guard.last_time {
            Some(last) => ((time - last) / 1000.0) as f32,
            None => FALLBACK_DT,
        };
        guard.last_time = Some(time);

        let App {
            game,
            driver,
            presenter,
            ..
        } = &mut *guard;
        driver.frame(dt, game, presenter);
    }

    request_animation_frame(app);
}
