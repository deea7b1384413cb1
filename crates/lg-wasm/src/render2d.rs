//! Canvas2D backend.
//!
//! Implements the drawing boundary on an HTML `<canvas>` through
//! `CanvasRenderingContext2d`.

use kurbo::{Affine, Circle, Rect};
use lg_core::SurfaceLayout;
use lg_render::{Canvas2d, CompositeOp, RadialGradient, RenderResult};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Turn a thrown JS value into a log-friendly message.
pub(crate) fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

/// A `<canvas>` element and its 2D context.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Canvas2d for WebCanvas {
    fn configure(&mut self, layout: &SurfaceLayout) -> RenderResult {
        // Assigning width/height reallocates the backing store and resets
        // the context state.
        self.canvas.set_width(layout.backing_width);
        self.canvas.set_height(layout.backing_height);

        let style = self.canvas.style();
        style.set_property("width", &layout.css_width()).map_err(js_err)?;
        style.set_property("height", &layout.css_height()).map_err(js_err)?;

        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).map_err(js_err)?;
        self.ctx.scale(layout.dpr, layout.dpr).map_err(js_err)
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn transform(&mut self, affine: Affine) -> RenderResult {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        self.ctx.transform(a, b, c, d, e, f).map_err(js_err)
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn set_fill_gradient(&mut self, gradient: &RadialGradient) -> RenderResult {
        let (start, end) = (gradient.start, gradient.end);
        let grad = self
            .ctx
            .create_radial_gradient(
                start.center.x,
                start.center.y,
                start.radius,
                end.center.x,
                end.center.y,
                end.radius,
            )
            .map_err(js_err)?;
        for stop in &gradient.stops {
            grad.add_color_stop(stop.offset, &stop.color.to_css()).map_err(js_err)?;
        }
        self.ctx.set_fill_style_canvas_gradient(&grad);
        Ok(())
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn arc(&mut self, circle: Circle) -> RenderResult {
        self.ctx
            .arc(
                circle.center.x,
                circle.center.y,
                circle.radius,
                0.0,
                std::f64::consts::TAU,
            )
            .map_err(js_err)
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn set_composite(&mut self, op: CompositeOp) -> RenderResult {
        self.ctx.set_global_composite_operation(op.as_css()).map_err(js_err)
    }

    fn set_filter(&mut self, filter: &str) {
        self.ctx.set_filter(filter);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn draw_surface(&mut self, source: &Self, dest: Rect) -> RenderResult {
        self.ctx
            .draw_image_with_html_canvas_element_and_dw_and_dh(
                &source.canvas,
                dest.x0,
                dest.y0,
                dest.width(),
                dest.height(),
            )
            .map_err(js_err)
    }
}
