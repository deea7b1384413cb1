//! The 2D drawing boundary.
//!
//! Mirrors the slice of `CanvasRenderingContext2d` the painters need.
//! Coordinates are logical pixels; [`Canvas2d::configure`] installs the
//! device-pixel-ratio scale.

use kurbo::{Affine, Circle, Rect};
use lg_core::{Color, SurfaceLayout};
use smallvec::SmallVec;

/// Drawing failures surface as messages from the host API.
pub type RenderResult<T = ()> = Result<T, String>;

/// Compositing modes used by the painters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOp {
    #[default]
    SourceOver,
    /// Additive blending.
    Lighter,
}

impl CompositeOp {
    /// Value for `globalCompositeOperation`.
    pub fn as_css(self) -> &'static str {
        match self {
            CompositeOp::SourceOver => "source-over",
            CompositeOp::Lighter => "lighter",
        }
    }
}

/// A gradient stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

/// Two-circle radial gradient, as `createRadialGradient` takes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub start: Circle,
    pub end: Circle,
    pub stops: SmallVec<[ColorStop; 4]>,
}

impl RadialGradient {
    pub fn new(start: Circle, end: Circle) -> Self {
        Self {
            start,
            end,
            stops: SmallVec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push(ColorStop { offset, color });
        self
    }
}

/// One drawable raster target with its 2D context.
pub trait Canvas2d {
    /// Size the backing store and display box from `layout`, then reset the
    /// transform to a uniform `layout.dpr` scale. Drops all prior content.
    ///
    /// # Errors
    /// Fails if the host rejects the new transform or styles.
    fn configure(&mut self, layout: &SurfaceLayout) -> RenderResult;

    fn save(&mut self);
    fn restore(&mut self);

    /// Multiply `affine` into the current transform.
    ///
    /// # Errors
    /// Host transform failure.
    fn transform(&mut self, affine: Affine) -> RenderResult;

    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect);

    /// Use `gradient` as the fill style.
    ///
    /// # Errors
    /// Fails on degenerate gradients or unparsable stop colors.
    fn set_fill_gradient(&mut self, gradient: &RadialGradient) -> RenderResult;

    fn begin_path(&mut self);

    /// Add a full circle to the current path.
    ///
    /// # Errors
    /// Fails on a negative radius.
    fn arc(&mut self, circle: Circle) -> RenderResult;

    /// Fill the current path with the current fill style.
    fn fill(&mut self);

    /// # Errors
    /// Host rejected the composite mode.
    fn set_composite(&mut self, op: CompositeOp) -> RenderResult;

    /// CSS filter string, e.g. `blur(41px)`.
    fn set_filter(&mut self, filter: &str);

    fn set_line_width(&mut self, width: f64);

    /// Draw `source` scaled into `dest`.
    ///
    /// # Errors
    /// Host failure, e.g. a zero-sized source.
    fn draw_surface(&mut self, source: &Self, dest: Rect) -> RenderResult;
}
