//! Viewport and surface sizing.
//!
//! Both drawing surfaces are sized from the same [`SurfaceLayout`], so the
//! visible and offscreen canvases always agree on their logical size.

/// The window's logical (CSS pixel) dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Backing-store and display dimensions for one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Size drawing commands are issued in.
    pub logical: Viewport,
    /// Scale between logical and physical pixels.
    pub dpr: f64,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl SurfaceLayout {
    /// Derive the layout for `viewport`. A missing, non-finite or
    /// non-positive ratio reads as 1, as does any ratio when `high_dpi` is off.
    pub fn new(viewport: Viewport, device_pixel_ratio: Option<f64>, high_dpi: bool) -> Self {
        let dpr = match device_pixel_ratio {
            Some(r) if high_dpi && r.is_finite() && r > 0.0 => r,
            _ => 1.0,
        };
        let width = viewport.width.max(0.0);
        let height = viewport.height.max(0.0);
        Self {
            logical: Viewport::new(width, height),
            dpr,
            // Canvas width/height are `unsigned long`: fractional sizes truncate.
            backing_width: (width * dpr) as u32,
            backing_height: (height * dpr) as u32,
        }
    }

    /// `true` when either backing dimension truncated to zero pixels.
    pub fn is_empty(&self) -> bool {
        self.backing_width == 0 || self.backing_height == 0
    }

    /// CSS `width` value for the canvas element.
    pub fn css_width(&self) -> String {
        format!("{}px", self.logical.width)
    }

    /// CSS `height` value for the canvas element.
    pub fn css_height(&self) -> String {
        format!("{}px", self.logical.height)
    }
}
