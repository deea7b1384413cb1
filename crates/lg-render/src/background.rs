//! Visible-surface compositor: pink radial wash, pulse layer on top.

use crate::canvas::{Canvas2d, RadialGradient, RenderResult};
use kurbo::{Circle, Point, Rect};
use lg_core::{Color, Viewport};

pub const BACKGROUND_CENTER: Color = Color::rgba8(255, 240, 245, 0.98);
pub const BACKGROUND_EDGE: Color = Color::rgba8(255, 230, 240, 0.95);
/// Wash radius as a fraction of the viewport's longer side.
pub const BACKGROUND_RADIUS_FACTOR: f64 = 0.7;

/// Paint one frame onto `visible`, compositing `pulse_layer` at the origin.
///
/// # Errors
/// Propagates gradient or draw failures from the host canvas.
pub fn paint_frame<C: Canvas2d>(
    visible: &mut C,
    pulse_layer: &C,
    viewport: Viewport,
) -> RenderResult {
    let (cx, cy) = viewport.center();
    let center = Point::new(cx, cy);
    let wash = RadialGradient::new(
        Circle::new(center, 0.0),
        Circle::new(center, viewport.max_side() * BACKGROUND_RADIUS_FACTOR),
    )
    .with_stop(0.0, BACKGROUND_CENTER)
    .with_stop(1.0, BACKGROUND_EDGE);

    let full = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    visible.set_fill_gradient(&wash)?;
    visible.fill_rect(full);
    // Both surfaces share a backing size, so a logical-size blit is 1:1.
    visible.draw_surface(pulse_layer, full)
}
