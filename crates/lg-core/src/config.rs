//! Grid configuration.
//!
//! Built once at startup (defaults, optionally overridden from a JSON
//! object) and never mutated afterwards. Several fields describe a
//! perspective grid and parallax effect that no painter reads yet; they are
//! accepted and validated so page-level configs stay forward compatible.

use crate::color::Color;
use crate::pulse::SIZE_WOBBLE;
use serde::{Deserialize, Serialize};

/// Upper bound on `pulseCount`; every pulse is a blurred full-size fill.
pub const MAX_PULSE_COUNT: u32 = 64;

/// All tunables of the background effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GridConfig {
    /// Grid cell size in logical pixels. Reserved.
    pub grid_size: f64,
    /// Line width applied to the visible surface on initialization.
    pub line_thickness: f64,
    /// Grid line color. Reserved.
    pub base_color: String,
    /// Highlighted grid line color. Reserved.
    pub highlight_color: String,
    /// Reserved.
    pub perspective: f64,
    /// Grid tilt in degrees. Reserved.
    pub tilt_angle: f64,
    /// Reserved.
    pub scroll_factor: f64,
    /// Reserved.
    pub parallax_factor: f64,
    /// Reserved.
    pub animation_speed: f64,
    /// Reserved.
    pub glow_intensity: f64,
    /// Reserved.
    pub fade_radius: f64,
    /// Reserved.
    pub dynamic_opacity: bool,
    /// Honor `window.devicePixelRatio`; when `false` the ratio is pinned to 1.
    #[serde(rename = "highDPI")]
    pub high_dpi: bool,
    pub pulse_count: u32,
    pub pulse_size_base: f64,
    pub pulse_size_variation: f64,
    /// Angular speed of the pulse orbit, per logical frame.
    pub pulse_speed: f64,
    /// Reserved; the hue rotation runs at a fixed rate.
    pub pulse_color_change_speed: f64,
    /// Gaussian blur radius in pixels applied to every pulse fill.
    pub pulse_blur_amount: f64,
    /// Frame-rate cap for the scheduler.
    pub target_fps: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 120.0,
            line_thickness: 1.0,
            base_color: "rgba(230,143,172,0.1)".to_string(),
            highlight_color: "rgba(230,143,172,0.15)".to_string(),
            perspective: 0.4,
            tilt_angle: 30.0,
            scroll_factor: 0.2,
            parallax_factor: 0.5,
            animation_speed: 0.03,
            glow_intensity: 0.3,
            fade_radius: 0.7,
            dynamic_opacity: true,
            high_dpi: true,
            pulse_count: 4,
            pulse_size_base: 450.0,
            pulse_size_variation: 250.0,
            pulse_speed: 0.01,
            pulse_color_change_speed: 0.004,
            pulse_blur_amount: 41.0,
            target_fps: 60.0,
        }
    }
}

impl GridConfig {
    /// Build a config from a JSON object of overrides. Missing keys keep
    /// their defaults; unknown keys are rejected.
    ///
    /// # Errors
    /// Returns a message if the JSON is malformed or a value fails
    /// [`GridConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid grid config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and color syntax.
    ///
    /// # Errors
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if self.pulse_count == 0 {
            return Err("pulseCount must be at least 1".to_string());
        }
        if self.pulse_count > MAX_PULSE_COUNT {
            return Err(format!(
                "pulseCount must be at most {MAX_PULSE_COUNT}, got {}",
                self.pulse_count
            ));
        }
        if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
            return Err(format!("targetFps must be positive, got {}", self.target_fps));
        }

        let positive = [
            ("gridSize", self.grid_size),
            ("pulseSizeBase", self.pulse_size_base),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }

        let non_negative = [
            ("lineThickness", self.line_thickness),
            ("pulseSizeVariation", self.pulse_size_variation),
            ("pulseSpeed", self.pulse_speed),
            ("pulseColorChangeSpeed", self.pulse_color_change_speed),
            ("pulseBlurAmount", self.pulse_blur_amount),
            ("animationSpeed", self.animation_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }

        // Pulse radius swings by the variation plus the wobble around the base.
        let min_size = self.pulse_size_base - self.pulse_size_variation - SIZE_WOBBLE;
        if min_size <= 0.0 {
            return Err(format!(
                "pulseSizeBase must exceed pulseSizeVariation + {SIZE_WOBBLE}, got {} <= {}",
                self.pulse_size_base,
                self.pulse_size_variation + SIZE_WOBBLE
            ));
        }

        for (name, css) in [
            ("baseColor", &self.base_color),
            ("highlightColor", &self.highlight_color),
        ] {
            if Color::parse_css(css).is_none() {
                return Err(format!("{name} is not a valid CSS color: {css:?}"));
            }
        }
        Ok(())
    }

    /// Minimum wall-clock spacing between accepted frames, in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }

    /// CSS filter string applied to pulse fills on a surface with pixel
    /// ratio `dpr`. Filter lengths ignore the context transform, so the
    /// radius is given in backing pixels.
    pub fn blur_filter(&self, dpr: f64) -> String {
        format!("blur({}px)", self.pulse_blur_amount * dpr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pulse_count, 4);
        assert_eq!(config.blur_filter(1.0), "blur(41px)");
        assert!((config.frame_interval_ms() - 16.666_666).abs() < 1e-3);
    }

    #[test]
    fn json_overrides_keep_other_defaults() {
        let config = GridConfig::from_json(r#"{"pulseCount": 6, "highDPI": false}"#).unwrap();
        assert_eq!(config.pulse_count, 6);
        assert!(!config.high_dpi);
        assert_eq!(config.pulse_size_base, 450.0);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(GridConfig::from_json("{}").unwrap(), GridConfig::default());
    }

    #[test]
    fn unknown_key_rejected() {
        let err = GridConfig::from_json(r#"{"pulseCnt": 6}"#).unwrap_err();
        assert!(err.contains("pulseCnt"), "{err}");
    }

    #[test]
    fn zero_pulses_rejected() {
        let err = GridConfig::from_json(r#"{"pulseCount": 0}"#).unwrap_err();
        assert!(err.contains("pulseCount"), "{err}");
    }

    #[test]
    fn bad_color_rejected() {
        let err = GridConfig::from_json(r#"{"baseColor": "pinkish"}"#).unwrap_err();
        assert!(err.contains("baseColor"), "{err}");
    }

    #[test]
    fn negative_blur_rejected() {
        let config = GridConfig {
            pulse_blur_amount: -1.0,
            ..GridConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("pulseBlurAmount"));
    }

    #[test]
    fn blur_scales_with_pixel_ratio() {
        let config = GridConfig::default();
        assert_eq!(config.blur_filter(2.0), "blur(82px)");
        assert_eq!(config.blur_filter(1.5), "blur(61.5px)");
    }

    #[test]
    fn pulse_count_is_capped() {
        assert!(GridConfig::from_json(r#"{"pulseCount": 64}"#).is_ok());
        let err = GridConfig::from_json(r#"{"pulseCount": 4000000000}"#).unwrap_err();
        assert!(err.contains("pulseCount"), "{err}");
    }

    #[test]
    fn size_variation_must_leave_positive_radius() {
        let config = GridConfig {
            pulse_size_base: 100.0,
            pulse_size_variation: 250.0,
            ..GridConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("pulseSizeBase"), "{err}");

        let err = GridConfig::from_json(r#"{"pulseSizeVariation": 400}"#).unwrap_err();
        assert!(err.contains("pulseSizeVariation"), "{err}");
    }
}
