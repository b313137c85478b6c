//! Floating-point RGBA pixels and layer blend modes.

use buttonsmith_spec::{Color, NoiseBlend};

/// RGBA color with components in `[0.0, 1.0]`, straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create an opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a hex color value.
    pub fn from_color(color: Color) -> Self {
        let (r, g, b) = color.to_rgb();
        Self::from_rgba8([r, g, b, 255])
    }

    /// Create from 8-bit RGBA.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0] as f64 / 255.0,
            g: rgba[1] as f64 / 255.0,
            b: rgba[2] as f64 / 255.0,
            a: rgba[3] as f64 / 255.0,
        }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Rgba {
        Rgba {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(&self, a: f64) -> Rgba {
        Rgba { a, ..*self }
    }

    pub fn premultiplied(&self) -> Rgba {
        Rgba {
            r: self.r * self.a,
            g: self.g * self.a,
            b: self.b * self.a,
            a: self.a,
        }
    }

    pub fn unpremultiplied(&self) -> Rgba {
        if self.a <= f64::EPSILON {
            return Rgba::TRANSPARENT;
        }
        Rgba {
            r: self.r / self.a,
            g: self.g / self.a,
            b: self.b / self.a,
            a: self.a,
        }
    }

    /// Porter-Duff source-over with `src` on top of `self`.
    pub fn source_over(&self, src: &Rgba) -> Rgba {
        let out_a = src.a + self.a * (1.0 - src.a);
        if out_a <= f64::EPSILON {
            return Rgba::TRANSPARENT;
        }
        let mix = |s: f64, d: f64| (s * src.a + d * self.a * (1.0 - src.a)) / out_a;
        Rgba {
            r: mix(src.r, self.r),
            g: mix(src.g, self.g),
            b: mix(src.b, self.b),
            a: out_a,
        }
    }

    /// Multiply two colors component-wise.
    pub fn multiply(&self, other: &Rgba) -> Rgba {
        Rgba {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
            a: self.a,
        }
    }

    /// Screen blend mode.
    pub fn screen(&self, other: &Rgba) -> Rgba {
        Rgba {
            r: 1.0 - (1.0 - self.r) * (1.0 - other.r),
            g: 1.0 - (1.0 - self.g) * (1.0 - other.g),
            b: 1.0 - (1.0 - self.b) * (1.0 - other.b),
            a: self.a,
        }
    }

    /// Overlay blend mode, `self` is the backdrop.
    pub fn overlay(&self, other: &Rgba) -> Rgba {
        fn overlay_channel(base: f64, blend: f64) -> f64 {
            if base <= 0.5 {
                2.0 * base * blend
            } else {
                1.0 - 2.0 * (1.0 - base) * (1.0 - blend)
            }
        }

        Rgba {
            r: overlay_channel(self.r, other.r),
            g: overlay_channel(self.g, other.g),
            b: overlay_channel(self.b, other.b),
            a: self.a,
        }
    }

    /// Soft light blend mode, `self` is the backdrop.
    pub fn soft_light(&self, other: &Rgba) -> Rgba {
        fn soft_light_channel(base: f64, blend: f64) -> f64 {
            if blend <= 0.5 {
                base - (1.0 - 2.0 * blend) * base * (1.0 - base)
            } else {
                let d = if base <= 0.25 {
                    ((16.0 * base - 12.0) * base + 4.0) * base
                } else {
                    base.sqrt()
                };
                base + (2.0 * blend - 1.0) * (d - base)
            }
        }

        Rgba {
            r: soft_light_channel(self.r, other.r),
            g: soft_light_channel(self.g, other.g),
            b: soft_light_channel(self.b, other.b),
            a: self.a,
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::TRANSPARENT
    }
}

/// Blend `src` onto an opaque-ish backdrop with `mode`.
///
/// The backdrop keeps its alpha; the blended color is mixed in by
/// `opacity * src.a`, matching how a CSS layer with `mix-blend-mode` and
/// `opacity` composites over its parent.
pub fn blend(mode: NoiseBlend, dst: &Rgba, src: &Rgba, opacity: f64) -> Rgba {
    let blended = match mode {
        NoiseBlend::Normal => src.with_alpha(dst.a),
        NoiseBlend::Multiply => dst.multiply(src),
        NoiseBlend::Screen => dst.screen(src),
        NoiseBlend::Overlay => dst.overlay(src),
        NoiseBlend::SoftLight => dst.soft_light(src),
    };

    dst.lerp(&blended, opacity * src.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_from_color() {
        let c = Rgba::from_color(Color::rgb(255, 0, 51));
        assert!(close(c.r, 1.0));
        assert!(close(c.b, 0.2));
        assert!(close(c.a, 1.0));
    }

    #[test]
    fn test_source_over_opaque_src_replaces() {
        let dst = Rgba::rgb(0.2, 0.4, 0.6);
        let out = dst.source_over(&Rgba::rgb(1.0, 0.0, 0.0));
        assert_eq!(out.to_rgba8(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_source_over_onto_transparent_keeps_src() {
        let out = Rgba::TRANSPARENT.source_over(&Rgba::rgba(0.0, 1.0, 0.0, 0.25));
        assert!(close(out.g, 1.0));
        assert!(close(out.a, 0.25));
    }

    #[test]
    fn test_overlay_on_mid_gray_backdrop() {
        let dst = Rgba::rgb(0.5, 0.5, 0.5);
        let out = dst.overlay(&Rgba::rgb(1.0, 1.0, 1.0));
        assert!(close(out.r, 1.0));
        let out = dst.overlay(&Rgba::rgb(0.0, 0.0, 0.0));
        assert!(close(out.r, 0.0));
    }

    #[test]
    fn test_soft_light_neutral_source() {
        let dst = Rgba::rgb(0.3, 0.6, 0.9);
        let out = dst.soft_light(&Rgba::rgb(0.5, 0.5, 0.5));
        assert!(close(out.r, 0.3));
        assert!(close(out.g, 0.6));
        assert!(close(out.b, 0.9));
    }

    #[test]
    fn test_blend_zero_opacity_is_identity() {
        let dst = Rgba::rgb(0.1, 0.2, 0.3);
        for mode in [
            NoiseBlend::Normal,
            NoiseBlend::Multiply,
            NoiseBlend::Screen,
            NoiseBlend::Overlay,
            NoiseBlend::SoftLight,
        ] {
            let out = blend(mode, &dst, &Rgba::rgb(1.0, 1.0, 1.0), 0.0);
            assert_eq!(out, dst, "{:?}", mode);
        }
    }

    #[test]
    fn test_blend_keeps_backdrop_alpha() {
        let dst = Rgba::rgba(0.1, 0.2, 0.3, 0.5);
        let out = blend(NoiseBlend::Normal, &dst, &Rgba::rgb(1.0, 1.0, 1.0), 1.0);
        assert!(close(out.a, 0.5));
        assert!(close(out.r, 1.0));
    }
}
