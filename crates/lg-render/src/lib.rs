//! Drawing half of the luxury grid background.
//!
//! Painters are written against the [`Canvas2d`] trait so the same frame
//! code runs on a browser `<canvas>` and on the in-memory
//! [`RecordingCanvas`](recording::RecordingCanvas).

pub mod animator;
pub mod background;
pub mod canvas;
pub mod pulses;
pub mod recording;
pub mod surfaces;

pub use animator::GridAnimator;
pub use background::paint_frame;
pub use canvas::{Canvas2d, ColorStop, CompositeOp, RadialGradient, RenderResult};
pub use pulses::render_pulses;
pub use surfaces::{SurfaceBackend, SurfaceRole, Surfaces};
