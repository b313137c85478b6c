//! Color model: hex normalization and RGB/HSL conversion.
//!
//! Every function here is total. Malformed input never produces an error;
//! it resolves to a caller-supplied fallback instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL triple with integer components.
///
/// Hue is in degrees, saturation and lightness in percent. Values produced by
/// [`Color::to_hsl`] are always in range; values passed to [`Color::from_hsl`]
/// may be out of range and are wrapped or clamped there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub h: i32,
    pub s: i32,
    pub l: i32,
}

impl Hsl {
    pub const fn new(h: i32, s: i32, l: i32) -> Self {
        Self { h, s, l }
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    /// Create a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color after applying the normalization steps.
    ///
    /// Accepts surrounding whitespace, a missing `#` and 3-digit shorthand.
    /// Returns `None` when the expanded value is not `#` followed by exactly
    /// six hex digits.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.is_ascii() {
            return None;
        }

        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };

        if expanded.len() != 6 || !expanded.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Normalize arbitrary input to a canonical color, using `fallback` when
    /// the input is malformed.
    ///
    /// Idempotent: normalizing the hex string of a normalized color yields
    /// the same color.
    pub fn normalize(input: &str, fallback: Color) -> Color {
        Self::parse(input).unwrap_or(fallback)
    }

    /// Exact channel decode.
    pub const fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL using max/min channel decomposition.
    ///
    /// Ties on the max channel resolve red first, then green, then blue.
    /// Achromatic colors report hue 0 and saturation 0.
    pub fn to_hsl(&self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let mut h = 0.0;
        let mut s = 0.0;

        if max != min {
            let d = max - min;
            s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            h /= 6.0;
        }

        Hsl {
            h: ((h * 360.0).round() as i32).rem_euclid(360),
            s: (s * 100.0).round() as i32,
            l: (l * 100.0).round() as i32,
        }
    }

    /// Convert from HSL.
    ///
    /// Hue wraps modulo 360 (negative values included). Saturation and
    /// lightness are clamped to `[0, 100]`.
    pub fn from_hsl(hsl: Hsl) -> Color {
        let h = hsl.h.rem_euclid(360) as f64 / 360.0;
        let s = hsl.s.clamp(0, 100) as f64 / 100.0;
        let l = hsl.l.clamp(0, 100) as f64 / 100.0;

        if s == 0.0 {
            let gray = to_channel(l);
            return Color::rgb(gray, gray, gray);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Color::rgb(
            to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            to_channel(hue_to_rgb(p, q, h)),
            to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }

    /// Shift HSL lightness by `delta` percentage points.
    ///
    /// The delta itself is not clamped; the resulting lightness is clamped by
    /// [`Color::from_hsl`].
    pub fn adjust_lightness(&self, delta: i32) -> Color {
        let hsl = self.to_hsl();
        Color::from_hsl(Hsl {
            l: hsl.l.saturating_add(delta),
            ..hsl
        })
    }

    /// Format as `rgba(r, g, b, a)`.
    ///
    /// Alpha is clamped to `[0, 1]`, NaN is treated as 0 and the value is
    /// rounded to two decimals.
    pub fn to_rgba_string(&self, alpha: f64) -> String {
        let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
        let alpha = (alpha * 100.0).round() / 100.0;
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned by the strict [`FromStr`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).ok_or_else(|| serde::de::Error::custom(ParseColorError(raw)))
    }
}
