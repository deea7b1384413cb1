pub mod clock;
pub mod color;
pub mod config;
pub mod input;
pub mod pulse;
pub mod state;
pub mod surface;

pub use clock::{ClockState, FrameClock, FrameDecision};
pub use color::Color;
pub use config::GridConfig;
pub use input::InputSampler;
pub use pulse::{Pulse, PulseSet, pulse_color_index, pulse_layout};
pub use state::RenderState;
pub use surface::{SurfaceLayout, Viewport};
