//! Pulse geometry.
//!
//! Pure functions of `(config, logical time, viewport)`: the same inputs
//! always produce the same pulses, so a frame can be recomputed from
//! scratch at any time.

use crate::color::Color;
use crate::config::GridConfig;
use crate::surface::Viewport;
use smallvec::SmallVec;
use std::f64::consts::TAU;

/// Hue rotation advance per logical frame.
pub const HUE_ROTATION_RATE: f64 = 0.0015;
/// Phase offset of each successive pulse within the hue rotation.
pub const HUE_PHASE_PER_PULSE: f64 = 0.2;
/// Peak amplitude of the fixed size wobble added on top of the configured
/// variation.
pub const SIZE_WOBBLE: f64 = 50.0;
/// Orbit radius as a fraction of the viewport's shorter side.
pub const ORBIT_RADIUS_FACTOR: f64 = 0.35;
/// Vertical compression of the orbit.
pub const ORBIT_Y_SQUASH: f64 = 0.9;
/// Vertical phase multiplier; bends the circle into a lissajous-like loop.
pub const ORBIT_Y_PHASE: f64 = 0.8;
/// Inner gradient circle as a fraction of the pulse size.
pub const INNER_RADIUS_FACTOR: f64 = 0.2;
/// Offset of the translucent pink stop.
pub const MID_STOP_OFFSET: f32 = 0.7;
pub const MID_STOP_COLOR: Color = Color::rgba8(230, 143, 172, 0.15);

/// `hsla()` components of the inner-stop hue table: pink through purple.
const PALETTE_HSLA: [(f32, f32, f32, f32); 4] = [
    (330.0, 70.0, 70.0, 0.3),
    (310.0, 80.0, 65.0, 0.28),
    (290.0, 70.0, 60.0, 0.25),
    (270.0, 60.0, 50.0, 0.22),
];

pub const PALETTE_LEN: usize = PALETTE_HSLA.len();

/// The inner-stop hue table.
pub fn palette() -> [Color; PALETTE_LEN] {
    PALETTE_HSLA.map(|(h, s, l, a)| Color::from_hsla(h, s, l, a))
}

/// One pulse's placement for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub index: u32,
    /// Orbit angle in radians before jitter.
    pub angle: f64,
    pub x: f64,
    pub y: f64,
    /// Outer gradient radius.
    pub size: f64,
    /// Uniform squash applied about the pulse center, in [0.5, 0.7].
    pub scale: f64,
    pub color_index: usize,
    pub color: Color,
}

impl Pulse {
    pub fn inner_radius(&self) -> f64 {
        self.size * INNER_RADIUS_FACTOR
    }

    /// Arc radius to fill under the squash so the drawn disc spans `size`.
    pub fn fill_radius(&self) -> f64 {
        self.size / self.scale
    }
}

pub type PulseSet = SmallVec<[Pulse; 8]>;

/// Index into the hue table for pulse `index` at logical time `time`.
pub fn pulse_color_index(time: u64, index: u32) -> usize {
    let progress = (time as f64 * HUE_ROTATION_RATE + index as f64 * HUE_PHASE_PER_PULSE) % 1.0;
    (progress * PALETTE_LEN as f64).floor() as usize % PALETTE_LEN
}

/// Frames for one pulse to run through the whole hue table.
pub fn color_cycle_frames() -> u64 {
    (1.0 / HUE_ROTATION_RATE).floor() as u64
}

/// Lay out every pulse for logical time `time` within `viewport`.
pub fn pulse_layout(config: &GridConfig, time: u64, viewport: Viewport) -> PulseSet {
    let t = time as f64;
    let count = config.pulse_count;
    let (cx, cy) = viewport.center();
    let dist = viewport.min_side() * ORBIT_RADIUS_FACTOR;
    let time_factor = t * config.pulse_speed * 1.5;
    let jitter_x = (t * 0.003).sin() * 50.0;
    let jitter_y = (t * 0.002).cos() * 40.0;
    let colors = palette();

    (0..count)
        .map(|i| {
            let fi = i as f64;
            let angle = time_factor + fi * TAU / count as f64;
            let x = cx + angle.cos() * dist + jitter_x;
            let y = cy + (angle * ORBIT_Y_PHASE).sin() * dist * ORBIT_Y_SQUASH + jitter_y;
            let size = config.pulse_size_base
                + (t * 0.007 + fi).sin() * config.pulse_size_variation
                + (t * 0.005 + fi * 2.0).cos() * SIZE_WOBBLE;
            let scale = 0.6 + (t * 0.004 + fi).sin() * 0.1;
            let color_index = pulse_color_index(time, i);
            Pulse {
                index: i,
                angle,
                x,
                y,
                size,
                scale,
                color_index,
                color: colors[color_index],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    const VIEWPORT: Viewport = Viewport::new(1000.0, 800.0);

    #[test]
    fn first_pulse_starts_at_angle_zero() {
        let pulses = pulse_layout(&GridConfig::default(), 0, VIEWPORT);
        let p = pulses[0];
        assert_eq!(p.angle, 0.0);
        // cos(0) * 280 + sin(0) * 50 ; sin(0) * 252 + cos(0) * 40
        assert!((p.x - (500.0 + 280.0)).abs() < 1e-9);
        assert!((p.y - (400.0 + 40.0)).abs() < 1e-9);
        assert!((p.size - 500.0).abs() < 1e-9);
        assert!((p.scale - 0.6).abs() < 1e-12);
    }

    #[test]
    fn pulses_are_evenly_spaced_on_the_orbit() {
        let pulses = pulse_layout(&GridConfig::default(), 0, VIEWPORT);
        assert_eq!(pulses.len(), 4);
        for (i, p) in pulses.iter().enumerate() {
            assert!((p.angle - i as f64 * TAU / 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let config = GridConfig::default();
        assert_eq!(
            pulse_layout(&config, 1234, VIEWPORT),
            pulse_layout(&config, 1234, VIEWPORT)
        );
    }

    #[test]
    fn scale_stays_in_band_and_fill_radius_compensates() {
        let config = GridConfig::default();
        for time in (0..5000).step_by(37) {
            for p in pulse_layout(&config, time, VIEWPORT) {
                assert!((0.5..=0.7).contains(&p.scale), "scale {}", p.scale);
                assert!((p.fill_radius() * p.scale - p.size).abs() < 1e-9);
                assert!((p.inner_radius() - p.size * 0.2).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn validated_sizes_stay_positive() {
        let config = GridConfig {
            pulse_size_base: 301.0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_ok());
        for time in 0..2000 {
            for p in pulse_layout(&config, time, VIEWPORT) {
                assert!(p.size > 0.0, "size {} at frame {time}", p.size);
            }
        }
    }

    #[test]
    fn color_index_cycles_through_four_values() {
        let seen: BTreeSet<usize> = (0..color_cycle_frames())
            .map(|t| pulse_color_index(t, 0))
            .collect();
        assert_eq!(seen, BTreeSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn color_cycle_period() {
        assert_eq!(color_cycle_frames(), 666);
        // Quarter of the rotation per hue: index 0 until progress reaches 0.25.
        assert_eq!(pulse_color_index(0, 0), 0);
        assert_eq!(pulse_color_index(166, 0), 0);
        assert_eq!(pulse_color_index(167, 0), 1);
        assert_eq!(pulse_color_index(667, 0), 0);
    }

    #[test]
    fn pulses_are_phase_shifted_in_hue() {
        // index * 0.2 → floor(0.8 * 4) = 3 for the fifth pulse
        assert_eq!(pulse_color_index(0, 1), 0);
        assert_eq!(pulse_color_index(0, 2), 1);
        assert_eq!(pulse_color_index(0, 4), 3);
    }

    #[test]
    fn resize_moves_orbit_center() {
        let config = GridConfig::default();
        let small = pulse_layout(&config, 10, VIEWPORT);
        let wide = pulse_layout(&config, 10, Viewport::new(1920.0, 800.0));
        let dx = wide[0].x - small[0].x;
        // Center shifts by 460; orbit radius (min side) is unchanged.
        assert!((dx - 460.0).abs() < 1e-9);
        assert_eq!(wide[0].y, small[0].y);
    }
}
