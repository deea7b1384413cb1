//! Canvas elements for the two drawing surfaces.

use crate::render2d::{WebCanvas, js_err};
use lg_core::SurfaceLayout;
use lg_render::{RenderResult, SurfaceBackend, SurfaceRole};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Class carried by the visible canvas so pages can target it from CSS.
pub const CANVAS_CLASS: &str = "luxury-grid";

/// Fixed, full-viewport, click-through, behind everything.
const VISIBLE_STYLE: [(&str, &str); 5] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
];

/// Creates surfaces in `document`. The visible canvas is inserted once and
/// reconfigured on every re-creation; the offscreen canvas is replaced.
pub struct DomBackend {
    document: Document,
    visible: Option<HtmlCanvasElement>,
}

impl DomBackend {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            visible: None,
        }
    }

    fn create_canvas(&self) -> RenderResult<HtmlCanvasElement> {
        self.document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "created element is not a canvas".to_string())
    }

    fn visible_canvas(&mut self) -> RenderResult<HtmlCanvasElement> {
        if let Some(canvas) = &self.visible {
            return Ok(canvas.clone());
        }

        let canvas = self.create_canvas()?;
        canvas.class_list().add_1(CANVAS_CLASS).map_err(js_err)?;
        let style = canvas.style();
        for (property, value) in VISIBLE_STYLE {
            style.set_property(property, value).map_err(js_err)?;
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| "document has no <body>".to_string())?;
        body.prepend_with_node_1(&canvas).map_err(js_err)?;
        log::debug!("background canvas inserted");

        self.visible = Some(canvas.clone());
        Ok(canvas)
    }
}

impl SurfaceBackend for DomBackend {
    type Surface = WebCanvas;

    fn create_surface(&mut self, role: SurfaceRole, _layout: &SurfaceLayout) -> RenderResult<WebCanvas> {
        let canvas = match role {
            SurfaceRole::Visible => self.visible_canvas()?,
            SurfaceRole::Offscreen => self.create_canvas()?,
        };
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| format!("2d context unavailable for {role:?} surface"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "context is not a CanvasRenderingContext2d".to_string())?;
        Ok(WebCanvas::new(canvas, ctx))
    }
}
