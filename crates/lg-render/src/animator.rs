//! The loop driver.
//!
//! `GridAnimator` is the single owner of the render state, the frame clock
//! and both surfaces. Hosts forward their events into it and call
//! [`GridAnimator::on_frame`] from each refresh callback until it reports
//! [`FrameDecision::Stopped`].

use crate::background::paint_frame;
use crate::canvas::RenderResult;
use crate::pulses::render_pulses;
use crate::surfaces::{SurfaceBackend, Surfaces};
use lg_core::{
    FrameClock, FrameDecision, GridConfig, InputSampler, RenderState, SurfaceLayout, Viewport,
};

pub struct GridAnimator<B: SurfaceBackend> {
    backend: B,
    config: GridConfig,
    state: RenderState,
    clock: FrameClock,
    sampler: InputSampler,
    /// `None` when surface creation failed; frames then draw nothing.
    surfaces: Option<Surfaces<B::Surface>>,
}

impl<B: SurfaceBackend> GridAnimator<B> {
    /// Build the animator and its surfaces for the current window.
    ///
    /// Surface failures are logged and leave the animator headless rather
    /// than failing construction.
    pub fn new(backend: B, config: GridConfig, viewport: Viewport, device_pixel_ratio: Option<f64>) -> Self {
        let layout = SurfaceLayout::new(viewport, device_pixel_ratio, config.high_dpi);
        let mut animator = Self {
            backend,
            clock: FrameClock::from_config(&config),
            state: RenderState::new(layout),
            sampler: InputSampler::new(),
            surfaces: None,
            config,
        };
        animator.initialize();
        animator
    }

    /// (Re)create both surfaces from the current layout.
    fn initialize(&mut self) {
        // Drop the old pair first so a failed re-creation leaves no stale layer.
        self.surfaces = None;
        match Surfaces::create(&mut self.backend, self.state.layout, &self.config) {
            Ok(surfaces) => self.surfaces = Some(surfaces),
            Err(e) => log::warn!("background disabled: surface setup failed: {e}"),
        }
    }

    /// Window resized: re-derive the layout and recreate the surfaces.
    pub fn resize(&mut self, viewport: Viewport, device_pixel_ratio: Option<f64>) {
        let layout = SurfaceLayout::new(viewport, device_pixel_ratio, self.config.high_dpi);
        log::debug!("resize to {}x{}", layout.logical.width, layout.logical.height);
        self.state.set_layout(layout);
        self.initialize();
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.sampler.on_scroll(&mut self.state, scroll_y);
    }

    pub fn on_mouse_move(&mut self, client_x: f64, client_y: f64) {
        self.sampler.on_mouse_move(&mut self.state, client_x, client_y);
    }

    /// Handle one host refresh callback.
    ///
    /// On an accepted frame logical time advances by one and the frame is
    /// painted. Drawing errors skip the frame; the loop keeps running.
    pub fn on_frame(&mut self, timestamp: f64) -> FrameDecision {
        let decision = self.clock.tick(timestamp);
        if decision == FrameDecision::Accept {
            let time = self.state.advance();
            if let Err(e) = self.render() {
                log::warn!("frame {time} skipped: {e}");
            }
        }
        decision
    }

    /// Paint the current logical time: pulses offscreen, then composite.
    ///
    /// # Errors
    /// The first drawing failure; the visible surface is left untouched if
    /// the pulse pass fails.
    pub fn render(&mut self) -> RenderResult {
        let Some(surfaces) = self.surfaces.as_mut() else {
            return Ok(());
        };
        if self.state.layout.is_empty() {
            log::trace!("frame {} not painted: zero-sized surface", self.state.time);
            return Ok(());
        }
        let fills = render_pulses(&mut surfaces.offscreen, &self.config, &self.state)?;
        paint_frame(&mut surfaces.visible, &surfaces.offscreen, self.state.viewport())?;
        log::trace!("frame {} painted ({fills} pulses)", self.state.time);
        Ok(())
    }

    /// Cancel the loop; later callbacks report [`FrameDecision::Stopped`].
    pub fn stop(&mut self) {
        if !self.clock.is_stopped() {
            log::info!("background loop stopped at frame {}", self.state.time);
        }
        self.clock.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.clock.is_stopped()
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn surfaces(&self) -> Option<&Surfaces<B::Surface>> {
        self.surfaces.as_ref()
    }

    pub fn surfaces_mut(&mut self) -> Option<&mut Surfaces<B::Surface>> {
        self.surfaces.as_mut()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
