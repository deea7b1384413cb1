//! Browser event loop.
//!
//! Wires window events into the [`GridAnimator`] and keeps a
//! `requestAnimationFrame` chain alive until the animator is stopped.

use crate::dom::DomBackend;
use crate::render2d::js_err;
use lg_core::{FrameDecision, Viewport};
use lg_render::GridAnimator;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, MouseEvent, Window};

type Animator = GridAnimator<DomBackend>;
type FrameCallback = Closure<dyn FnMut(f64)>;

/// Current window size in CSS pixels.
pub(crate) fn read_viewport(window: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

pub(crate) fn read_pixel_ratio(window: &Window) -> Option<f64> {
    Some(window.device_pixel_ratio())
}

/// Owns the frame callback and the event listeners for one background.
pub struct Driver {
    window: Window,
    animator: Rc<RefCell<Animator>>,
    frame: Rc<RefCell<Option<FrameCallback>>>,
    pending_frame: Rc<Cell<Option<i32>>>,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl Driver {
    /// Attach listeners and request the first frame.
    ///
    /// # Errors
    /// Fails if the browser refuses a listener or the first frame request.
    pub fn start(window: Window, animator: Animator) -> Result<Self, String> {
        let mut driver = Self {
            window,
            animator: Rc::new(RefCell::new(animator)),
            frame: Rc::new(RefCell::new(None)),
            pending_frame: Rc::new(Cell::new(None)),
            listeners: Vec::new(),
        };
        driver.listen_resize()?;
        driver.listen_scroll()?;
        driver.listen_mouse_move()?;
        driver.install_frame_loop()?;
        log::info!("background loop started");
        Ok(driver)
    }

    pub fn logical_time(&self) -> u64 {
        self.animator.borrow().state().time
    }

    pub fn is_running(&self) -> bool {
        !self.animator.borrow().is_stopped()
    }

    /// Stop the loop, cancel the pending frame and detach all listeners.
    pub fn stop(&mut self) {
        self.animator.borrow_mut().stop();
        if let Some(id) = self.pending_frame.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {}", js_err(e));
            }
        }
        self.frame.borrow_mut().take();

        for (event, listener) in self.listeners.drain(..) {
            let callback: &js_sys::Function = listener.as_ref().unchecked_ref();
            if let Err(e) = self.window.remove_event_listener_with_callback(event, callback) {
                log::warn!("failed to detach {event} listener: {}", js_err(e));
            }
        }
    }

    fn add_listener(&mut self, event: &'static str, listener: Closure<dyn FnMut(Event)>) -> Result<(), String> {
        self.window
            .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.listeners.push((event, listener));
        Ok(())
    }

    fn listen_resize(&mut self) -> Result<(), String> {
        let animator = self.animator.clone();
        let window = self.window.clone();
        let listener = Closure::wrap(Box::new(move |_: Event| {
            animator
                .borrow_mut()
                .resize(read_viewport(&window), read_pixel_ratio(&window));
        }) as Box<dyn FnMut(Event)>);
        self.add_listener("resize", listener)
    }

    fn listen_scroll(&mut self) -> Result<(), String> {
        let animator = self.animator.clone();
        let window = self.window.clone();
        let listener = Closure::wrap(Box::new(move |_: Event| match window.scroll_y() {
            Ok(y) => animator.borrow_mut().on_scroll(y),
            Err(e) => log::debug!("scrollY unavailable: {}", js_err(e)),
        }) as Box<dyn FnMut(Event)>);
        self.add_listener("scroll", listener)
    }

    fn listen_mouse_move(&mut self) -> Result<(), String> {
        let animator = self.animator.clone();
        let listener = Closure::wrap(Box::new(move |event: Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                animator
                    .borrow_mut()
                    .on_mouse_move(mouse.client_x() as f64, mouse.client_y() as f64);
            }
        }) as Box<dyn FnMut(Event)>);
        self.add_listener("mousemove", listener)
    }

    fn install_frame_loop(&mut self) -> Result<(), String> {
        let animator = self.animator.clone();
        let frame = self.frame.clone();
        let pending = self.pending_frame.clone();
        let window = self.window.clone();

        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            pending.set(None);
            if animator.borrow_mut().on_frame(timestamp) == FrameDecision::Stopped {
                return;
            }
            if let Some(cb) = frame.borrow().as_ref() {
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => pending.set(Some(id)),
                    Err(e) => log::warn!("requestAnimationFrame failed, loop halted: {}", js_err(e)),
                }
            }
        }) as Box<dyn FnMut(f64)>);
        *self.frame.borrow_mut() = Some(callback);

        let first = self
            .frame
            .borrow()
            .as_ref()
            .map(|cb| self.window.request_animation_frame(cb.as_ref().unchecked_ref()))
            .transpose()
            .map_err(js_err)?;
        self.pending_frame.set(first);
        Ok(())
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.stop();
    }
}
