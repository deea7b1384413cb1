//! Passive scroll and pointer sampling.
//!
//! Samples land in [`RenderState`]; nothing reads them while drawing yet.

use crate::state::RenderState;

/// Damping applied to the horizontal cursor offset.
pub const MOUSE_DAMPING_X: f64 = 0.05;
/// Damping applied to the vertical cursor offset.
pub const MOUSE_DAMPING_Y: f64 = 0.02;

/// Writes host input events into the render state.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputSampler;

impl InputSampler {
    pub fn new() -> Self {
        Self
    }

    /// Record the page's vertical scroll offset.
    pub fn on_scroll(&self, state: &mut RenderState, scroll_y: f64) {
        state.scroll_y = scroll_y;
    }

    /// Record the cursor's damped offset from the viewport center.
    pub fn on_mouse_move(&self, state: &mut RenderState, client_x: f64, client_y: f64) {
        let (cx, cy) = state.viewport().center();
        state.offset_x = (client_x - cx) * MOUSE_DAMPING_X;
        state.offset_y = (client_y - cy) * MOUSE_DAMPING_Y;
        log::trace!("pointer offset ({:.2}, {:.2})", state.offset_x, state.offset_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{SurfaceLayout, Viewport};

    fn state() -> RenderState {
        RenderState::new(SurfaceLayout::new(Viewport::new(1000.0, 800.0), Some(1.0), true))
    }

    #[test]
    fn mouse_offset_is_damped_from_center() {
        let mut s = state();
        InputSampler::new().on_mouse_move(&mut s, 600.0, 300.0);
        assert!((s.offset_x - 5.0).abs() < 1e-9);
        assert!((s.offset_y + 2.0).abs() < 1e-9);
    }

    #[test]
    fn center_is_zero_offset() {
        let mut s = state();
        InputSampler::new().on_mouse_move(&mut s, 500.0, 400.0);
        assert_eq!((s.offset_x, s.offset_y), (0.0, 0.0));
    }

    #[test]
    fn scroll_is_stored_verbatim() {
        let mut s = state();
        InputSampler::new().on_scroll(&mut s, 1234.5);
        assert_eq!(s.scroll_y, 1234.5);
        assert_eq!(s.time, 0);
    }
}
