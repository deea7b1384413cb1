//! WASM bridge — mounts the animated luxury grid behind a page's content.
//!
//! Compiled via `wasm-pack build --target web`; the page calls [`start`] or
//! [`start_with_config`] once the module is loaded.

mod dom;
mod driver;
mod render2d;

use dom::DomBackend;
use driver::{Driver, read_pixel_ratio, read_viewport};
use lg_core::GridConfig;
use lg_render::GridAnimator;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

enum Slot {
    /// Waiting for `DOMContentLoaded`.
    Pending(GridConfig),
    Running(Driver),
    /// Setup failed; nothing is drawn.
    Failed,
    /// Stopped after this many accepted frames.
    Stopped(u64),
}

impl Slot {
    fn logical_time(&self) -> u64 {
        match self {
            Slot::Running(driver) => driver.logical_time(),
            Slot::Stopped(time) => *time,
            Slot::Pending(_) | Slot::Failed => 0,
        }
    }
}

/// Handle to a mounted background.
#[wasm_bindgen]
pub struct GridHandle {
    slot: Rc<RefCell<Slot>>,
}

#[wasm_bindgen]
impl GridHandle {
    /// Stop the animation loop and detach all listeners. Idempotent.
    pub fn stop(&self) {
        let time = self.slot.borrow().logical_time();
        let previous = std::mem::replace(&mut *self.slot.borrow_mut(), Slot::Stopped(time));
        if let Slot::Running(mut driver) = previous {
            driver.stop();
        }
    }

    /// Accepted frames rendered so far; kept after [`GridHandle::stop`].
    pub fn logical_time(&self) -> f64 {
        self.slot.borrow().logical_time() as f64
    }

    pub fn is_running(&self) -> bool {
        matches!(&*self.slot.borrow(), Slot::Running(driver) if driver.is_running())
    }
}

/// Mount the background with default settings.
#[wasm_bindgen]
pub fn start() -> GridHandle {
    launch_when_ready(GridConfig::default())
}

/// Mount the background with a JSON object of config overrides and an
/// optional console log level (`error`, `warn`, `info`, `debug`, `trace`).
#[wasm_bindgen]
pub fn start_with_config(config_json: &str, log_level: Option<String>) -> Result<GridHandle, JsError> {
    init_logging(log_level.as_deref());
    let config = GridConfig::from_json(config_json).map_err(|e| JsError::new(&e))?;
    Ok(launch_when_ready(config))
}

fn launch_when_ready(config: GridConfig) -> GridHandle {
    console_error_panic_hook_setup();
    init_logging(None);

    let slot = Rc::new(RefCell::new(Slot::Pending(config)));
    let handle = GridHandle { slot: slot.clone() };

    let Some(window) = web_sys::window() else {
        log::warn!("background disabled: no window");
        *slot.borrow_mut() = Slot::Failed;
        return handle;
    };
    let Some(document) = window.document() else {
        log::warn!("background disabled: no document");
        *slot.borrow_mut() = Slot::Failed;
        return handle;
    };

    if document.body().is_some() {
        mount(&slot, window);
        return handle;
    }

    let ready_slot = slot.clone();
    let ready_window = window.clone();
    let on_ready = Closure::once(move |_: web_sys::Event| mount(&ready_slot, ready_window));
    match document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref()) {
        Ok(()) => on_ready.forget(),
        Err(e) => {
            log::warn!("background disabled: {}", render2d::js_err(e));
            *slot.borrow_mut() = Slot::Failed;
        }
    }
    handle
}

/// Build the animator and start the loop, unless the handle was stopped
/// before the document became ready.
fn mount(slot: &Rc<RefCell<Slot>>, window: Window) {
    let previous = std::mem::replace(&mut *slot.borrow_mut(), Slot::Failed);
    let config = match previous {
        Slot::Pending(config) => config,
        other => {
            *slot.borrow_mut() = other;
            return;
        }
    };
    let Some(document) = window.document() else {
        log::warn!("background disabled: no document");
        return;
    };

    let animator = GridAnimator::new(
        DomBackend::new(document),
        config,
        read_viewport(&window),
        read_pixel_ratio(&window),
    );
    match Driver::start(window, animator) {
        Ok(driver) => *slot.borrow_mut() = Slot::Running(driver),
        Err(e) => log::warn!("background disabled: {e}"),
    }
}

/// Route `log` records to the browser console. Only the first call wins.
fn init_logging(level: Option<&str>) {
    let _ = console_log::init_with_level(parse_log_level(level));
}

fn parse_log_level(level: Option<&str>) -> log::Level {
    level.and_then(|l| l.parse().ok()).unwrap_or(log::Level::Info)
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("luxury grid panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn handle(slot: Slot) -> GridHandle {
        GridHandle {
            slot: Rc::new(RefCell::new(slot)),
        }
    }

    #[test]
    fn stopped_handle_keeps_frame_count() {
        let h = handle(Slot::Stopped(42));
        h.stop();
        assert_eq!(h.logical_time(), 42.0);
        assert!(!h.is_running());
    }

    #[test]
    fn stop_before_mount_reports_zero_frames() {
        let h = handle(Slot::Pending(GridConfig::default()));
        h.stop();
        assert!(matches!(&*h.slot.borrow(), Slot::Stopped(0)));
        assert_eq!(h.logical_time(), 0.0);
    }

    #[test]
    fn log_level_defaults_to_info() {
        assert_eq!(parse_log_level(None), log::Level::Info);
        assert_eq!(parse_log_level(Some("loud")), log::Level::Info);
    }

    #[test]
    fn log_level_parses_names() {
        assert_eq!(parse_log_level(Some("debug")), log::Level::Debug);
        assert_eq!(parse_log_level(Some("WARN")), log::Level::Warn);
    }
}
