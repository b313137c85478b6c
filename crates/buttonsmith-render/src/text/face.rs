//! Font faces used for measuring and drawing labels.

use std::fmt;

use fontdue::{Font, FontSettings};

use super::builtin;
use super::FontError;
use crate::bitmap::Bitmap;
use crate::blend::Rgba;

/// Family name reported by the built-in face.
pub const BUILTIN_FAMILY: &str = "builtin-5x7";

/// Descent of faces without line metrics, as a fraction of the size.
const FALLBACK_DESCENT: f64 = 0.25;

/// Vertical metrics of a face at one size, both measured from the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f64,
    /// Positive distance below the baseline.
    pub descent: f64,
}

impl LineMetrics {
    /// Approximate metrics: `ascent + descent == size * 1.25`.
    pub fn heuristic(size: f64) -> Self {
        Self {
            ascent: size,
            descent: size * FALLBACK_DESCENT,
        }
    }

    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// A resolved face: a parsed outline font or the built-in pixel font.
pub enum FontFace {
    Outline { family: String, font: Font },
    Builtin,
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFace::Outline { family, .. } => {
                f.debug_struct("Outline").field("family", family).finish()
            }
            FontFace::Builtin => f.write_str("Builtin"),
        }
    }
}

impl FontFace {
    /// Parse TrueType/OpenType bytes.
    pub fn from_bytes(family: &str, bytes: &[u8]) -> Result<Self, FontError> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            FontError::Parse {
                family: family.to_string(),
                reason: reason.to_string(),
            }
        })?;
        Ok(FontFace::Outline {
            family: family.to_string(),
            font,
        })
    }

    pub fn family(&self) -> &str {
        match self {
            FontFace::Outline { family, .. } => family,
            FontFace::Builtin => BUILTIN_FAMILY,
        }
    }

    pub fn is_outline(&self) -> bool {
        matches!(self, FontFace::Outline { .. })
    }

    pub fn line_metrics(&self, size: f64) -> LineMetrics {
        match self {
            FontFace::Outline { font, .. } => font
                .horizontal_line_metrics(size as f32)
                .map(|m| LineMetrics {
                    ascent: m.ascent as f64,
                    descent: -(m.descent as f64),
                })
                .unwrap_or_else(|| LineMetrics::heuristic(size)),
            FontFace::Builtin => LineMetrics::heuristic(size),
        }
    }

    /// Horizontal advance of one character.
    pub fn advance(&self, ch: char, size: f64) -> f64 {
        match self {
            FontFace::Outline { font, .. } => font.metrics(ch, size as f32).advance_width as f64,
            FontFace::Builtin => builtin::advance(size as f32) as f64,
        }
    }

    /// Draw a run of text whose left edge is at `x` and baseline at `baseline`.
    pub fn draw_run(
        &self,
        target: &mut Bitmap,
        text: &str,
        size: f64,
        x: f64,
        baseline: f64,
        color: Rgba,
    ) {
        let mut pen = x;
        match self {
            FontFace::Outline { font, .. } => {
                for ch in text.chars() {
                    let (metrics, coverage) = font.rasterize(ch, size as f32);
                    let left = (pen + metrics.xmin as f64).round() as i64;
                    let top =
                        (baseline - metrics.ymin as f64 - metrics.height as f64).round() as i64;
                    for gy in 0..metrics.height {
                        for gx in 0..metrics.width {
                            let alpha = coverage[gy * metrics.width + gx];
                            if alpha > 0 {
                                target.blend_over(
                                    left + gx as i64,
                                    top + gy as i64,
                                    color,
                                    alpha as f64 / 255.0,
                                );
                            }
                        }
                    }
                    pen += metrics.advance_width as f64;
                }
            }
            FontFace::Builtin => {
                let size = size as f32;
                let top = baseline as f32 - builtin::CELL_HEIGHT as f32 * builtin::unit(size);
                for ch in text.chars() {
                    builtin::draw_glyph(target, ch, pen as f32, top, size, color);
                    pen += builtin::advance(size) as f64;
                }
            }
        }
    }
}
