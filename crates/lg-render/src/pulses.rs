//! Pulse layer painter.
//!
//! Repaints the offscreen surface from a cleared state every call: one
//! blurred, additively blended radial gradient per pulse.

use crate::canvas::{Canvas2d, CompositeOp, RadialGradient, RenderResult};
use kurbo::{Affine, Circle, Point, Rect};
use lg_core::pulse::{MID_STOP_COLOR, MID_STOP_OFFSET, Pulse};
use lg_core::{Color, GridConfig, RenderState, pulse_layout};

/// Paint all pulses for `state.time` onto `ctx`. Returns the number of
/// gradient fills issued.
///
/// # Errors
/// Propagates the first drawing failure; the surface is then only partially
/// painted and the caller should skip compositing this frame.
pub fn render_pulses<C: Canvas2d>(
    ctx: &mut C,
    config: &GridConfig,
    state: &RenderState,
) -> RenderResult<usize> {
    let viewport = state.viewport();
    ctx.clear_rect(Rect::new(0.0, 0.0, viewport.width, viewport.height));

    let filter = config.blur_filter(state.dpr());
    let pulses = pulse_layout(config, state.time, viewport);
    for pulse in &pulses {
        paint_pulse(ctx, pulse, &filter)?;
    }
    Ok(pulses.len())
}

fn paint_pulse<C: Canvas2d>(ctx: &mut C, pulse: &Pulse, filter: &str) -> RenderResult {
    log::trace!(
        "pulse {} at ({:.1}, {:.1}) size {:.1} scale {:.3}",
        pulse.index,
        pulse.x,
        pulse.y,
        pulse.size,
        pulse.scale
    );

    let center = Point::new(pulse.x, pulse.y);
    let gradient = pulse_gradient(pulse, center);

    // Restore even on failure so the next pulse starts from a clean state.
    ctx.save();
    let result = fill_squashed(ctx, pulse, center, &gradient, filter);
    ctx.restore();
    result
}

fn fill_squashed<C: Canvas2d>(
    ctx: &mut C,
    pulse: &Pulse,
    center: Point,
    gradient: &RadialGradient,
    filter: &str,
) -> RenderResult {
    ctx.transform(squash_about(center, pulse.scale))?;
    ctx.begin_path();
    ctx.arc(Circle::new(center, pulse.fill_radius()))?;
    ctx.set_fill_gradient(gradient)?;
    ctx.set_composite(CompositeOp::Lighter)?;
    ctx.set_filter(filter);
    ctx.fill();
    Ok(())
}

fn pulse_gradient(pulse: &Pulse, center: Point) -> RadialGradient {
    RadialGradient::new(
        Circle::new(center, pulse.inner_radius()),
        Circle::new(center, pulse.size),
    )
    .with_stop(0.0, pulse.color)
    .with_stop(MID_STOP_OFFSET, MID_STOP_COLOR)
    .with_stop(1.0, Color::TRANSPARENT)
}

/// Uniform scale by `scale` that keeps `center` fixed.
fn squash_about(center: Point, scale: f64) -> Affine {
    let offset = center.to_vec2();
    Affine::translate(offset) * Affine::scale(scale) * Affine::translate(-offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn squash_keeps_center_fixed() {
        let center = Point::new(300.0, 200.0);
        let affine = squash_about(center, 0.5);
        let mapped = affine * center;
        assert!((mapped - center).hypot() < 1e-9);

        let edge = affine * (center + Vec2::new(100.0, 0.0));
        assert!((edge.x - 350.0).abs() < 1e-9);
    }

    #[test]
    fn gradient_stops_follow_pulse() {
        let pulse = lg_core::pulse_layout(
            &GridConfig::default(),
            0,
            lg_core::Viewport::new(1000.0, 800.0),
        )[0];
        let gradient = pulse_gradient(&pulse, Point::new(pulse.x, pulse.y));
        assert_eq!(gradient.start.radius, pulse.size * 0.2);
        assert_eq!(gradient.end.radius, pulse.size);
        let offsets: Vec<f32> = gradient.stops.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.7, 1.0]);
        assert_eq!(gradient.stops[0].color, pulse.color);
        assert_eq!(gradient.stops[2].color, Color::TRANSPARENT);
    }
}
