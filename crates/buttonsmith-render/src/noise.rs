//! Tileable grain noise and its cached overlay layer.

use buttonsmith_spec::{NoiseBlend, NoiseSettings, NoiseSpec};
use rand::Rng;
use tracing::{debug, warn};

use crate::bitmap::Bitmap;
use crate::source::to_data_url;
use crate::tokens::{StyleTokens, NONE};

/// Edge length of the square noise tile.
pub const NOISE_TILE_SIZE: u32 = 128;

/// Full width of the per-pixel brightness variation (`-40..40`).
pub const NOISE_VARIATION: f64 = 80.0;

/// Generate a noise tile.
///
/// Each pixel draws one variation shared by R, G and B, then an independent
/// alpha of `floor(rand * intensity * 255)`.
pub fn generate<R: Rng + ?Sized>(spec: &NoiseSpec, rng: &mut R) -> Bitmap {
    let (r, g, b) = spec.color.to_rgb();
    let mut tile = Bitmap::new(NOISE_TILE_SIZE, NOISE_TILE_SIZE);

    for px in tile.data.chunks_exact_mut(4) {
        let variation = (rng.gen::<f64>() - 0.5) * NOISE_VARIATION;
        px[0] = shift(r, variation);
        px[1] = shift(g, variation);
        px[2] = shift(b, variation);

        let alpha = rng.gen::<f64>() * spec.intensity;
        px[3] = (alpha * 255.0).floor().clamp(0.0, 255.0) as u8;
    }

    tile
}

#[inline]
fn shift(channel: u8, variation: f64) -> u8 {
    (channel as f64 + variation).round().clamp(0.0, 255.0) as u8
}

/// Result of a [`NoiseLayer::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseUpdate {
    /// Intensity is zero or out of range; the layer has no image.
    Cleared,
    /// The cached tile was kept.
    Reused,
    /// A new tile was generated.
    Regenerated,
}

/// Cached noise overlay.
///
/// The tile is only regenerated on request or when nothing is cached, so
/// blend-mode changes never reshuffle the grain.
#[derive(Debug, Clone, Default)]
pub struct NoiseLayer {
    tile: Option<Bitmap>,
    data_url: Option<String>,
    opacity: f64,
    blend: NoiseBlend,
}

impl NoiseLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the layer in line with `settings`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        settings: &NoiseSettings,
        force: bool,
        rng: &mut R,
    ) -> NoiseUpdate {
        self.blend = settings.blend;
        let spec = settings.spec();

        if !spec.is_active() {
            debug!(intensity = spec.intensity, "noise disabled");
            self.tile = None;
            self.data_url = None;
            self.opacity = 0.0;
            return NoiseUpdate::Cleared;
        }

        self.opacity = spec.intensity.clamp(0.0, 1.0);
        if !force && self.tile.is_some() {
            return NoiseUpdate::Reused;
        }

        debug!(color = %spec.color, intensity = spec.intensity, force, "regenerating noise tile");
        let tile = generate(&spec, rng);
        self.data_url = match to_data_url(&tile) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "could not encode noise tile");
                None
            }
        };
        self.tile = Some(tile);
        NoiseUpdate::Regenerated
    }

    pub fn tile(&self) -> Option<&Bitmap> {
        self.tile.as_ref()
    }

    /// Layer opacity; zero when the layer is cleared.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn blend(&self) -> NoiseBlend {
        self.blend
    }

    /// Style tokens of the overlay element.
    pub fn tokens(&self) -> StyleTokens {
        let mut tokens = StyleTokens::new();
        match (&self.tile, &self.data_url) {
            (Some(_), Some(url)) => {
                tokens.set("background-image", format!("url({url})"));
                tokens.set("opacity", format!("{:.2}", self.opacity));
            }
            _ => {
                tokens.set("background-image", NONE);
                tokens.set("opacity", "0");
            }
        }
        tokens.set("mix-blend-mode", self.blend.css_keyword());
        tokens.set(
            "background-size",
            format!("{NOISE_TILE_SIZE}px {NOISE_TILE_SIZE}px"),
        );
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::NoiseRng;
    use buttonsmith_spec::Color;

    fn settings(amount: u32) -> NoiseSettings {
        NoiseSettings {
            amount,
            ..NoiseSettings::default()
        }
    }

    #[test]
    fn test_tile_size() {
        let tile = generate(&NoiseSpec::new(Color::WHITE, 0.5), &mut NoiseRng::seeded(1));
        assert_eq!(tile.size(), (NOISE_TILE_SIZE, NOISE_TILE_SIZE));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let spec = NoiseSpec::new(Color::rgb(0x80, 0x40, 0x20), 0.3);
        let a = generate(&spec, &mut NoiseRng::seeded(9));
        let b = generate(&spec, &mut NoiseRng::seeded(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_update_reuses_cached_tile() {
        let mut layer = NoiseLayer::new();
        let mut rng = NoiseRng::seeded(3);

        assert_eq!(layer.update(&settings(12), false, &mut rng), NoiseUpdate::Regenerated);
        let first = layer.tile().cloned();

        let mut restyled = settings(12);
        restyled.blend = NoiseBlend::Multiply;
        assert_eq!(layer.update(&restyled, false, &mut rng), NoiseUpdate::Reused);
        assert_eq!(layer.tile().cloned(), first);
        assert_eq!(layer.blend(), NoiseBlend::Multiply);

        assert_eq!(layer.update(&restyled, true, &mut rng), NoiseUpdate::Regenerated);
        assert_ne!(layer.tile().cloned(), first);
    }

    #[test]
    fn test_zero_amount_clears_without_drawing() {
        let mut layer = NoiseLayer::new();
        let mut rng = NoiseRng::seeded(5);
        let mut reference = NoiseRng::seeded(5);

        assert_eq!(layer.update(&settings(0), true, &mut rng), NoiseUpdate::Cleared);
        assert!(layer.tile().is_none());
        assert_eq!(layer.opacity(), 0.0);
        // No random draw was consumed.
        assert_eq!(rng.gen::<u64>(), reference.gen::<u64>());
    }

    #[test]
    fn test_tokens_for_active_layer() {
        let mut layer = NoiseLayer::new();
        layer.update(&settings(12), false, &mut NoiseRng::seeded(2));
        let tokens = layer.tokens();

        let image = tokens.get("background-image").unwrap();
        assert!(image.starts_with("url(data:image/png;base64,"));
        assert!(image.ends_with(')'));
        assert_eq!(tokens.get("opacity"), Some("0.12"));
        assert_eq!(tokens.get("mix-blend-mode"), Some("overlay"));
        assert_eq!(tokens.get("background-size"), Some("128px 128px"));
    }

    #[test]
    fn test_clearing_drops_tokens_image() {
        let mut layer = NoiseLayer::new();
        let mut rng = NoiseRng::seeded(2);
        layer.update(&settings(50), false, &mut rng);
        layer.update(&settings(0), false, &mut rng);
        assert_eq!(layer.tokens().get("background-image"), Some("none"));
        assert_eq!(layer.tokens().get("opacity"), Some("0"));
    }
}
