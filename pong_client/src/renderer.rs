//! 2D canvas drawing of the playing field

use glam::Vec2;
use pong_core::{FrameView, MatchState, Renderer, Side};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

const FOREGROUND: &str = "white";
const BACKGROUND: &str = "black";
const CENTRE_CIRCLE_RADIUS: f64 = 50.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    fn draw(&self, view: &FrameView) -> Result<(), JsValue> {
        let width = view.arena.width as f64;
        let height = view.arena.height as f64;

        self.ctx.clear_rect(0.0, 0.0, width, height);
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, width, height);

        self.draw_field(width, height)?;
        for side in [Side::Left, Side::Right] {
            self.draw_paddle(view.paddle(side), view.paddle_size);
        }
        self.draw_ball(view.ball, view.ball_size)?;
        self.draw_score(view, width)?;

        if view.state == MatchState::Paused {
            self.ctx.set_font("32px monospace");
            self.ctx.set_text_align("center");
            self.ctx.fill_text("PAUSED", width / 2.0, height / 2.0 + 90.0)?;
            self.ctx.set_text_align("start");
        }
        Ok(())
    }

    fn draw_field(&self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(FOREGROUND);
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        self.ctx
            .arc(width / 2.0, height / 2.0, CENTRE_CIRCLE_RADIUS, 0.0, TAU)?;
        self.ctx.stroke();
        self.ctx.close_path();

        self.ctx.set_fill_style_str(FOREGROUND);
        self.ctx.fill_rect(width / 2.0 - 1.0, 0.0, 2.0, height);
        Ok(())
    }

    fn draw_paddle(&self, pos: Vec2, size: Vec2) {
        self.ctx.set_fill_style_str(FOREGROUND);
        self.ctx
            .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
    }

    fn draw_ball(&self, pos: Vec2, size: f32) -> Result<(), JsValue> {
        let radius = size as f64 / 2.0;
        self.ctx.set_fill_style_str(FOREGROUND);
        self.ctx.begin_path();
        self.ctx
            .arc(pos.x as f64 + radius, pos.y as f64 + radius, radius, 0.0, TAU)?;
        self.ctx.fill();
        self.ctx.close_path();
        Ok(())
    }

    fn draw_score(&self, view: &FrameView, width: f64) -> Result<(), JsValue> {
        self.ctx.set_font("48px monospace");
        self.ctx.set_fill_style_str(FOREGROUND);
        self.ctx
            .fill_text(&view.score.left.to_string(), width / 4.0, 50.0)?;
        self.ctx
            .fill_text(&view.score.right.to_string(), 3.0 * width / 4.0, 50.0)?;
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, view: &FrameView) {
        if let Err(err) = self.draw(view) {
            console::error_1(&err);
        }
    }
}
