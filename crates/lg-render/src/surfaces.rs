//! Surface creation and re-creation.

use crate::canvas::{Canvas2d, RenderResult};
use lg_core::{GridConfig, SurfaceLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    /// Attached to the page behind its content.
    Visible,
    /// Pulse layer, never shown directly.
    Offscreen,
}

/// Host factory for drawing surfaces.
pub trait SurfaceBackend {
    type Surface: Canvas2d;

    /// Produce a fresh surface for `role`. The returned surface is
    /// configured by the caller.
    ///
    /// # Errors
    /// Fails when the host cannot provide a 2D context.
    fn create_surface(&mut self, role: SurfaceRole, layout: &SurfaceLayout)
    -> RenderResult<Self::Surface>;
}

/// The visible and offscreen surfaces, always sized from one layout.
pub struct Surfaces<S> {
    pub visible: S,
    pub offscreen: S,
    layout: SurfaceLayout,
}

impl<S: Canvas2d> Surfaces<S> {
    /// Create and configure both surfaces for `layout`.
    ///
    /// # Errors
    /// Propagates backend or configuration failures; no partial pair is
    /// returned.
    pub fn create<B>(backend: &mut B, layout: SurfaceLayout, config: &GridConfig) -> RenderResult<Self>
    where
        B: SurfaceBackend<Surface = S>,
    {
        let mut visible = backend.create_surface(SurfaceRole::Visible, &layout)?;
        visible.configure(&layout)?;
        visible.set_line_width(config.line_thickness);

        let mut offscreen = backend.create_surface(SurfaceRole::Offscreen, &layout)?;
        offscreen.configure(&layout)?;

        log::debug!(
            "surfaces {}x{} (backing {}x{}, dpr {})",
            layout.logical.width,
            layout.logical.height,
            layout.backing_width,
            layout.backing_height,
            layout.dpr
        );
        Ok(Self {
            visible,
            offscreen,
            layout,
        })
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }
}
