//! RGBA colors and the CSS color strings the canvas understands.
//!
//! Configuration carries colors as CSS strings (`rgba(...)`, `hsla(...)`,
//! hex). They are parsed once at startup so a typo surfaces as a config
//! error instead of a silently ignored `fillStyle`.

use serde::{Deserialize, Serialize};

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 8-bit channels with a fractional alpha, as written in CSS `rgba()`.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Convert CSS `hsla()` components (hue in degrees, saturation and
    /// lightness in percent) to RGBA.
    pub fn from_hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let s = (s / 100.0).clamp(0.0, 1.0);
        let l = (l / 100.0).clamp(0.0, 1.0);
        let h = h.rem_euclid(360.0) / 60.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::rgba(r + m, g + m, b + m, a.clamp(0.0, 1.0))
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Parse the subset of CSS color syntax used by the configuration:
    /// `transparent`, hex, `rgb()`/`rgba()` and `hsl()`/`hsla()`.
    pub fn parse_css(input: &str) -> Option<Self> {
        let s = input.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        if s.starts_with('#') {
            return Self::from_hex(s);
        }

        let open = s.find('(')?;
        let body = s.strip_suffix(')')?.get(open + 1..)?;
        let func = s[..open].trim().to_ascii_lowercase();
        let args: Vec<&str> = body.split(',').map(str::trim).collect();

        let alpha = match args.len() {
            3 => 1.0,
            4 => args[3].parse::<f32>().ok()?,
            _ => return None,
        };

        match func.as_str() {
            "rgb" | "rgba" => {
                let channel = |v: &str| v.parse::<u8>().ok();
                Some(Self::rgba8(
                    channel(args[0])?,
                    channel(args[1])?,
                    channel(args[2])?,
                    alpha.clamp(0.0, 1.0),
                ))
            }
            "hsl" | "hsla" => {
                let percent = |v: &str| v.strip_suffix('%')?.trim().parse::<f32>().ok();
                Some(Self::from_hsla(
                    args[0].parse().ok()?,
                    percent(args[1])?,
                    percent(args[2])?,
                    alpha,
                ))
            }
            _ => None,
        }
    }

    /// Emit as a CSS `rgba()` string suitable for `fillStyle` and gradient stops.
    pub fn to_css(&self) -> String {
        let r = (self.r * 255.0).round() as u8;
        let g = (self.g * 255.0).round() as u8;
        let b = (self.b * 255.0).round() as u8;
        let a = (self.a * 1000.0).round() / 1000.0;
        format!("rgba({r}, {g}, {b}, {a})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 0.01
            && (a.g - b.g).abs() < 0.01
            && (a.b - b.b).abs() < 0.01
            && (a.a - b.a).abs() < 0.001
    }

    #[test]
    fn parse_rgba_matches_rgba8() {
        let c = Color::parse_css("rgba(230,143,172,0.15)").unwrap();
        assert!(close(c, Color::rgba8(230, 143, 172, 0.15)));
        assert_eq!(c.to_css(), "rgba(230, 143, 172, 0.15)");
    }

    #[test]
    fn parse_hsla_soft_pink() {
        // hsl(330, 70%, 70%) ≈ rgb(232, 125, 179)
        let c = Color::parse_css("hsla(330, 70%, 70%, 0.3)").unwrap();
        assert!(close(c, Color::rgba8(232, 125, 179, 0.3)), "got {c:?}");
    }

    #[test]
    fn parse_hex_and_transparent() {
        let c = Color::parse_css("#FF000080").unwrap();
        assert!((c.a - 128.0 / 255.0).abs() < 0.01);
        assert_eq!(Color::parse_css("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(Color::parse_css("#abc").map(|c| c.a), Some(1.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Color::parse_css("pinkish").is_none());
        assert!(Color::parse_css("rgba(300, 0, 0, 1)").is_none());
        assert!(Color::parse_css("hsla(10, 20, 30, 1)").is_none());
        assert!(Color::parse_css("rgba(1, 2)").is_none());
    }

    #[test]
    fn hsla_primary_hues() {
        assert!(close(
            Color::from_hsla(0.0, 100.0, 50.0, 1.0),
            Color::rgba(1.0, 0.0, 0.0, 1.0)
        ));
        assert!(close(
            Color::from_hsla(240.0, 100.0, 50.0, 1.0),
            Color::rgba(0.0, 0.0, 1.0, 1.0)
        ));
        assert!(close(
            Color::from_hsla(360.0, 100.0, 50.0, 1.0),
            Color::rgba(1.0, 0.0, 0.0, 1.0)
        ));
    }
}
