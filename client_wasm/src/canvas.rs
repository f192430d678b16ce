//! Canvas 2D presenter
//!
//! Draws the table each frame and keeps the score, status line and winner modal in
//! the page up to date.

use game_core::{Config, FrameView, Lifecycle, Score, Side};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement};

use crate::input::touch_zone;

const BACKGROUND: &str = "#000";
const FOREGROUND: &str = "#fff";
const ZONE_LEFT: (&str, &str) = ("rgba(0, 150, 255, 0.1)", "rgba(0, 150, 255, 0.2)");
const ZONE_RIGHT: (&str, &str) = ("rgba(255, 100, 100, 0.1)", "rgba(255, 100, 100, 0.2)");

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

pub struct CanvasPresenter {
    ctx: CanvasRenderingContext2d,
    left_score: Element,
    right_score: Element,
    status: Element,
    modal: HtmlElement,
    winner_text: Element,
    config: Config,
}

impl CanvasPresenter {
    pub fn new(
        document: &Document,
        canvas: &HtmlCanvasElement,
        config: &Config,
    ) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let modal = element(document, "winnerModal")?.dyn_into::<HtmlElement>()?;

        Ok(Self {
            ctx,
            left_score: element(document, "player1Score")?,
            right_score: element(document, "player2Score")?,
            status: element(document, "gameStatus")?,
            modal,
            winner_text: element(document, "winnerText")?,
            config: config.clone(),
        })
    }

    fn draw_touch_zones(&self, view: &FrameView) {
        let h = view.surface_height as f64;

        for side in Side::BOTH {
            let (x, width) = touch_zone(side, &self.config);
            let (idle, active) = match side {
                Side::Left => ZONE_LEFT,
                Side::Right => ZONE_RIGHT,
            };
            let colour = if view.touch == Some(side) { active } else { idle };
            self.ctx.set_fill_style_str(colour);
            self.ctx.fill_rect(x as f64, 0.0, width as f64, h);
        }
    }

    fn draw_center_line(&self, view: &FrameView) {
        let x = view.surface_width as f64 / 2.0;
        let dash = js_sys::Array::of2(&JsValue::from(5.0), &JsValue::from(15.0));
        let _ = self.ctx.set_line_dash(&dash);
        self.ctx.set_stroke_style_str(FOREGROUND);
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        self.ctx.move_to(x, 0.0);
        self.ctx.line_to(x, view.surface_height as f64);
        self.ctx.stroke();
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
    }
}

impl game_core::Presenter for CanvasPresenter {
    fn render(&mut self, view: &FrameView) {
        let w = view.surface_width as f64;
        let h = view.surface_height as f64;

        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        if view.touch.is_some() || view.lifecycle != Lifecycle::Running {
            self.draw_touch_zones(view);
        }
        self.draw_center_line(view);

        self.ctx.set_fill_style_str(FOREGROUND);
        for side in Side::BOTH {
            let p = view.paddle(side);
            self.ctx
                .fill_rect(p.x as f64, p.y as f64, p.width as f64, p.height as f64);
        }
        let b = view.ball;
        self.ctx
            .fill_rect(b.x as f64, b.y as f64, b.size as f64, b.size as f64);
    }

    fn score_changed(&mut self, score: Score) {
        self.left_score
            .set_text_content(Some(&score.left.to_string()));
        self.right_score
            .set_text_content(Some(&score.right.to_string()));
    }

    fn status_changed(&mut self, status: &str) {
        self.status.set_text_content(Some(status));
    }

    fn winner_announced(&mut self, winner: Side) {
        log::info!("{} wins", winner.label());
        self.winner_text
            .set_text_content(Some(&format!("{} Wins!", winner.label())));
        let _ = self.modal.style().set_property("display", "block");
    }

    fn winner_dismissed(&mut self) {
        let _ = self.modal.style().set_property("display", "none");
    }
}
