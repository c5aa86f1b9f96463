//! Canvas 2D painter
//!
//! Replays a [`DrawCmd`] list onto a `CanvasRenderingContext2d`. All commands
//! are in field units; the context transform maps them to device pixels.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::DrawCmd;
use crate::consts::{BASE_HEIGHT, BASE_WIDTH};

/// Upper bound on the backing store scale
const MAX_PIXEL_RATIO: f64 = 2.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub pixel_ratio: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let mut renderer = Self {
            canvas,
            ctx,
            pixel_ratio: 1.0,
        };
        let ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        renderer.resize(ratio)?;
        Ok(renderer)
    }

    /// Size the backing store for `device_ratio` and rescale the field to it
    pub fn resize(&mut self, device_ratio: f64) -> Result<(), JsValue> {
        let ratio = device_ratio.clamp(1.0, MAX_PIXEL_RATIO);
        self.pixel_ratio = ratio;
        self.canvas
            .set_width((BASE_WIDTH as f64 * ratio).round() as u32);
        self.canvas
            .set_height((BASE_HEIGHT as f64 * ratio).round() as u32);
        self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0)
    }

    pub fn draw(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (BASE_WIDTH as f64, BASE_HEIGHT as f64);

        for cmd in cmds {
            match *cmd {
                DrawCmd::Clear => ctx.clear_rect(0.0, 0.0, w, h),
                DrawCmd::VerticalGradient { top, bottom } => {
                    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
                    gradient.add_color_stop(0.0, top)?;
                    gradient.add_color_stop(1.0, bottom)?;
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill_rect(0.0, 0.0, w, h);
                }
                DrawCmd::Rect { x, y, w, h, color } => {
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
                }
                DrawCmd::Circle {
                    x,
                    y,
                    r,
                    fill,
                    outline,
                } => {
                    ctx.begin_path();
                    ctx.arc(x as f64, y as f64, r as f64, 0.0, TAU)?;
                    ctx.set_fill_style_str(fill);
                    ctx.fill();
                    if let Some((stroke, width)) = outline {
                        ctx.set_stroke_style_str(stroke);
                        ctx.set_line_width(width as f64);
                        ctx.stroke();
                    }
                }
                DrawCmd::Ellipse {
                    x,
                    y,
                    rx,
                    ry,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.ellipse(x as f64, y as f64, rx as f64, ry as f64, 0.0, 0.0, TAU)?;
                    ctx.set_fill_style_str(color);
                    ctx.fill();
                }
                DrawCmd::PushTransform { x, y, angle } => {
                    ctx.save();
                    ctx.translate(x as f64, y as f64)?;
                    ctx.rotate(angle as f64)?;
                }
                DrawCmd::PopTransform => ctx.restore(),
            }
        }
        Ok(())
    }
}
