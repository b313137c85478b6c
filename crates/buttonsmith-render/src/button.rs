//! Raster preview of the gradient button.
//!
//! Paint order: vertical gradient, inner border stroke, noise overlay, label.
//! Everything is clipped by an anti-aliased rounded rectangle.

use buttonsmith_spec::{ButtonConfig, InteractionState, PaddingInsets};
use tracing::debug;

use crate::bitmap::Bitmap;
use crate::blend::{blend, Rgba};
use crate::noise::NoiseLayer;
use crate::palette::{derive_border, derive_ramp};
use crate::text::{draw_text, FontFace, TextAnchor};

/// Largest button edge the rasterizer will allocate.
pub const MAX_BUTTON_DIMENSION: u32 = 4096;

/// Text inset from the button edges.
pub const BUTTON_TEXT_PADDING: PaddingInsets = PaddingInsets::new(6.0, 16.0, 6.0, 16.0);

/// Pixel size of the button canvas.
pub fn canvas_size(config: &ButtonConfig) -> (u32, u32) {
    let side = |v: f64| -> u32 {
        if v.is_finite() {
            v.round().clamp(1.0, MAX_BUTTON_DIMENSION as f64) as u32
        } else {
            1
        }
    };
    (side(config.width), side(config.height))
}

/// Signed distance from `(px, py)` to a rounded rectangle centred at
/// `(cx, cy)` with half extents `(hw, hh)` and corner radius `r`.
fn rounded_rect_distance(px: f64, py: f64, cx: f64, cy: f64, hw: f64, hh: f64, r: f64) -> f64 {
    let qx = (px - cx).abs() - (hw - r);
    let qy = (py - cy).abs() - (hh - r);
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - r
}

#[inline]
fn coverage(distance: f64) -> f64 {
    (0.5 - distance).clamp(0.0, 1.0)
}

/// Render the button for `state`.
pub fn render_button(
    config: &ButtonConfig,
    state: InteractionState,
    noise: &NoiseLayer,
    face: &FontFace,
) -> Bitmap {
    let (width, height) = canvas_size(config);
    let mut bitmap = Bitmap::new(width, height);

    let ramp = derive_ramp(*config.colors.get(state));
    let top = Rgba::from_color(ramp.top);
    let bottom = Rgba::from_color(ramp.bottom);

    let border = derive_border(&config.border);
    let border_color = border.color.map(Rgba::from_color);
    let bw = border.width as f64;

    let (w, h) = (width as f64, height as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (hw, hh) = (w / 2.0, h / 2.0);
    let radius = (config.radius as f64).min(hw).min(hh);
    let (inner_hw, inner_hh) = (hw - bw, hh - bw);
    let inner_radius = (radius - bw).max(0.0).min(inner_hw.max(0.0)).min(inner_hh.max(0.0));

    let tile = noise.tile();
    let opacity = noise.opacity();

    for y in 0..height {
        let py = y as f64 + 0.5;
        let fill = top.lerp(&bottom, py / h);
        for x in 0..width {
            let px = x as f64 + 0.5;
            let outer = coverage(rounded_rect_distance(px, py, cx, cy, hw, hh, radius));
            if outer <= 0.0 {
                continue;
            }

            let mut color = fill;
            if let Some(border_color) = border_color {
                let inner = if inner_hw > 0.0 && inner_hh > 0.0 {
                    coverage(rounded_rect_distance(
                        px,
                        py,
                        cx,
                        cy,
                        inner_hw,
                        inner_hh,
                        inner_radius,
                    ))
                } else {
                    0.0
                };
                color = border_color.lerp(&fill, inner);
            }

            if let Some(tile) = tile {
                let grain = Rgba::from_rgba8(tile.get_wrapped(x as i64, y as i64));
                color = blend(noise.blend(), &color, &grain, opacity);
            }

            bitmap.set(x, y, color.with_alpha(outer).to_rgba8());
        }
    }

    let label = &config.label;
    let anchor = TextAnchor::place(
        label.horizontal_anchor,
        label.vertical_anchor,
        w,
        h,
        &BUTTON_TEXT_PADDING,
    );
    draw_text(
        &mut bitmap,
        face,
        label.display_text(),
        label.font_size as f64,
        label.text_color,
        &anchor,
    );

    debug!(%state, width, height, noise = tile.is_some(), "button rasterized");
    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::NoiseRng;
    use buttonsmith_spec::{BorderSpec, Color, NoiseSettings};

    fn plain(config: &ButtonConfig, state: InteractionState) -> Bitmap {
        render_button(config, state, &NoiseLayer::new(), &FontFace::Builtin)
    }

    fn no_text() -> ButtonConfig {
        let mut config = ButtonConfig::default();
        config.label.text_color = Color::BLACK;
        config.label.text = ".".to_string();
        config.label.horizontal_anchor = buttonsmith_spec::Anchor::End;
        config.label.vertical_anchor = buttonsmith_spec::Anchor::End;
        config
    }

    #[test]
    fn test_canvas_size_rounds_and_clamps() {
        let mut config = ButtonConfig::default();
        config.width = 120.4;
        config.height = -3.0;
        assert_eq!(canvas_size(&config), (120, 1));
        config.width = 1.0e9;
        assert_eq!(canvas_size(&config).0, MAX_BUTTON_DIMENSION);
    }

    #[test]
    fn test_gradient_runs_top_to_bottom() {
        let bitmap = plain(&no_text(), InteractionState::Normal);
        let ramp = derive_ramp(Color::rgb(0x33, 0x66, 0xff));
        let (tr, tg, tb) = ramp.top.to_rgb();
        let (br, bg, bb) = ramp.bottom.to_rgb();

        let first = bitmap.get(88, 0);
        let last = bitmap.get(88, 47);
        assert!((first[0] as i32 - tr as i32).abs() <= 4);
        assert!((first[2] as i32 - tb as i32).abs() <= 4);
        assert!((last[0] as i32 - br as i32).abs() <= 4);
        assert!((last[1] as i32 - bg as i32).abs() <= 4);
        assert!((first[1] as i32 - tg as i32).abs() <= 4);
        assert!((last[2] as i32 - bb as i32).abs() <= 4);
    }

    #[test]
    fn test_rounded_corners_are_transparent() {
        let mut config = no_text();
        config.radius = 20;
        let bitmap = plain(&config, InteractionState::Normal);
        assert_eq!(bitmap.get(0, 0)[3], 0);
        assert_eq!(bitmap.get(88, 24)[3], 255);
    }

    #[test]
    fn test_square_corners_are_opaque() {
        let mut config = no_text();
        config.radius = 0;
        let bitmap = plain(&config, InteractionState::Active);
        assert_eq!(bitmap.get(0, 0)[3], 255);
    }

    #[test]
    fn test_border_painted_on_edges() {
        let mut config = no_text();
        config.radius = 0;
        config.border = BorderSpec::new(3, Color::rgb(255, 0, 0));
        let bitmap = plain(&config, InteractionState::Normal);
        assert_eq!(bitmap.get(1, 24), [255, 0, 0, 255]);
        assert_ne!(bitmap.get(88, 24), [255, 0, 0, 255]);
    }

    #[test]
    fn test_states_use_their_own_colors() {
        let config = no_text();
        let normal = plain(&config, InteractionState::Normal);
        let hover = plain(&config, InteractionState::Hover);
        assert_ne!(normal.get(88, 24), hover.get(88, 24));
    }

    #[test]
    fn test_noise_changes_pixels() {
        let config = no_text();
        let mut layer = NoiseLayer::new();
        layer.update(
            &NoiseSettings {
                amount: 100,
                ..NoiseSettings::default()
            },
            false,
            &mut NoiseRng::seeded(11),
        );

        let clean = plain(&config, InteractionState::Normal);
        let grainy = render_button(&config, InteractionState::Normal, &layer, &FontFace::Builtin);
        assert_ne!(clean, grainy);
        assert_eq!(grainy.get(88, 24)[3], 255);
    }
}
