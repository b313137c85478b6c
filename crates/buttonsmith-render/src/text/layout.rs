//! Measuring, auto-fitting and anchoring a single line of text.

use buttonsmith_spec::{Anchor, Color, PaddingInsets};

use super::face::FontFace;
use crate::bitmap::Bitmap;
use crate::blend::Rgba;

/// Natural size of a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
    pub descent: f64,
}

/// Measure `text` at `size` px.
pub fn measure(face: &FontFace, text: &str, size: f64) -> TextExtent {
    let metrics = face.line_metrics(size);
    let width = text.chars().map(|ch| face.advance(ch, size)).sum();
    TextExtent {
        width,
        height: metrics.height(),
        ascent: metrics.ascent,
        descent: metrics.descent,
    }
}

/// Canvas size that fits both `minimum` and the padded text.
///
/// Each axis is the larger of the minimum and `ceil(text + padding)`, and
/// never zero.
pub fn fit_canvas(minimum: (u32, u32), extent: &TextExtent, padding: &PaddingInsets) -> (u32, u32) {
    let padding = padding.sanitized();
    let fit = |min: u32, text: f64, pad: f64| -> u32 {
        let needed = (text + pad).ceil();
        let needed = if needed.is_finite() && needed > 0.0 {
            needed.min(u32::MAX as f64) as u32
        } else {
            0
        };
        min.max(needed).max(1)
    };
    (
        fit(minimum.0, extent.width, padding.horizontal()),
        fit(minimum.1, extent.height, padding.vertical()),
    )
}

/// Horizontal alignment of the run relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Vertical alignment of the run relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

/// Anchor point and alignment inside the padded box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    pub x: f64,
    pub y: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextAnchor {
    /// Place the anchor for a `width` x `height` canvas.
    pub fn place(
        horizontal: Anchor,
        vertical: Anchor,
        width: f64,
        height: f64,
        padding: &PaddingInsets,
    ) -> Self {
        let padding = padding.sanitized();
        let content_width = width - padding.left - padding.right;
        let content_height = height - padding.top - padding.bottom;

        let (x, align) = match horizontal {
            Anchor::Start => (padding.left, TextAlign::Left),
            Anchor::Center => (padding.left + content_width / 2.0, TextAlign::Center),
            Anchor::End => (width - padding.right, TextAlign::Right),
        };
        let (y, baseline) = match vertical {
            Anchor::Start => (padding.top, TextBaseline::Top),
            Anchor::Center => (padding.top + content_height / 2.0, TextBaseline::Middle),
            Anchor::End => (height - padding.bottom, TextBaseline::Bottom),
        };

        Self {
            x,
            y,
            align,
            baseline,
        }
    }

    /// Left edge and baseline of a run with `extent`.
    pub fn run_origin(&self, extent: &TextExtent) -> (f64, f64) {
        let left = match self.align {
            TextAlign::Left => self.x,
            TextAlign::Center => self.x - extent.width / 2.0,
            TextAlign::Right => self.x - extent.width,
        };
        let baseline = match self.baseline {
            TextBaseline::Top => self.y + extent.ascent,
            TextBaseline::Middle => self.y + (extent.ascent - extent.descent) / 2.0,
            TextBaseline::Bottom => self.y - extent.descent,
        };
        (left, baseline)
    }
}

/// Draw `text` at `anchor`.
pub fn draw_text(
    target: &mut Bitmap,
    face: &FontFace,
    text: &str,
    size: f64,
    color: Color,
    anchor: &TextAnchor,
) {
    let extent = measure(face, text, size);
    let (left, baseline) = anchor.run_origin(&extent);
    face.draw_run(target, text, size, left, baseline, Rgba::from_color(color));
}
