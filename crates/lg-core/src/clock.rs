//! Timestamp-gated frame clock.
//!
//! Fed the host's per-refresh timestamps, decides which callbacks become
//! rendered frames. At most one frame is accepted per callback, however
//! long the host stalled; the leftover time is carried into the next
//! baseline so the cadence does not drift.

use crate::config::GridConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockState {
    /// No callback seen yet.
    Idle,
    /// Steady loop; `baseline` is the timestamp of the last accepted frame
    /// (minus the carried remainder).
    Running { baseline: f64 },
    /// Cancelled. Terminal.
    Stopped,
}

/// Outcome of one host callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecision {
    /// Render a frame and request another callback.
    Accept,
    /// Too early; request another callback without rendering.
    Skip,
    /// The loop was cancelled; do not request another callback.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval_ms: f64,
    state: ClockState,
}

impl FrameClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            state: ClockState::Idle,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.frame_interval_ms())
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == ClockState::Stopped
    }

    /// Cancel the loop. Every later [`FrameClock::tick`] returns
    /// [`FrameDecision::Stopped`].
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Feed one host timestamp (milliseconds, monotonically increasing).
    pub fn tick(&mut self, timestamp: f64) -> FrameDecision {
        let baseline = match self.state {
            ClockState::Stopped => return FrameDecision::Stopped,
            ClockState::Idle => {
                self.state = ClockState::Running {
                    baseline: timestamp,
                };
                timestamp
            }
            ClockState::Running { baseline } => baseline,
        };

        let delta = timestamp - baseline;
        if delta > self.interval_ms {
            self.state = ClockState::Running {
                baseline: timestamp - delta % self.interval_ms,
            };
            FrameDecision::Accept
        } else {
            FrameDecision::Skip
        }
    }
}
