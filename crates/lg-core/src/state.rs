//! Mutable per-page render state.
//!
//! Owned by the loop driver. Painters only ever see `&RenderState`.

use crate::surface::{SurfaceLayout, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Logical time: accepted-frame counter driving all motion.
    pub time: u64,
    /// Last sampled vertical scroll offset.
    pub scroll_y: f64,
    /// Last sampled, damped cursor offset from the viewport center.
    pub offset_x: f64,
    pub offset_y: f64,
    pub layout: SurfaceLayout,
}

impl RenderState {
    pub fn new(layout: SurfaceLayout) -> Self {
        Self {
            time: 0,
            scroll_y: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            layout,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.layout.logical
    }

    pub fn dpr(&self) -> f64 {
        self.layout.dpr
    }

    /// Bump logical time by one frame and return the new value.
    pub fn advance(&mut self) -> u64 {
        self.time += 1;
        self.time
    }

    /// Re-derive dimensions after a resize. Time and input samples survive.
    pub fn set_layout(&mut self, layout: SurfaceLayout) {
        self.layout = layout;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_frames() {
        let layout = SurfaceLayout::new(Viewport::new(100.0, 100.0), Some(1.0), true);
        let mut state = RenderState::new(layout);
        assert_eq!(state.advance(), 1);
        assert_eq!(state.advance(), 2);
        assert_eq!(state.time, 2);
    }

    #[test]
    fn resize_keeps_time() {
        let layout = SurfaceLayout::new(Viewport::new(1000.0, 800.0), Some(1.0), true);
        let mut state = RenderState::new(layout);
        state.advance();
        state.set_layout(SurfaceLayout::new(Viewport::new(1920.0, 800.0), Some(2.0), true));
        assert_eq!(state.time, 1);
        assert_eq!(state.viewport().width, 1920.0);
        assert_eq!(state.dpr(), 2.0);
    }
}
