//! Nine-patch rendering for one interaction state.
//!
//! A render walks `Idle -> Measuring -> Compositing -> Drawn`. Measuring
//! waits for the font, compositing needs the source bitmap. Neither failure
//! stops the render: it always reaches `Drawn` with whatever could be drawn.

use buttonsmith_spec::coerce::sanitize_file_name;
use buttonsmith_spec::{InteractionState, LabelConfig, NinePatchStateConfig};
use tracing::{debug, warn};

use crate::bitmap::Bitmap;
use crate::nine_slice;
use crate::png::{encode_rgba, PngConfig, PngError};
use crate::text::{draw_text, fit_canvas, measure, DegradedReason, FontFace, FontLoader, TextAnchor};

/// Largest canvas edge a nine-patch render will allocate.
pub const MAX_CANVAS_DIMENSION: u32 = 8192;

/// Phases of one nine-patch render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    Measuring,
    Compositing,
    Drawn,
}

/// What happened during a render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutcome {
    /// Phases visited, in order.
    pub phases: Vec<RenderPhase>,
    /// Set when the requested font was not used.
    pub font: Option<DegradedReason>,
    pub source_missing: bool,
    /// Nine-slice regions actually drawn.
    pub regions_drawn: usize,
    /// Set when the fitted canvas had to be capped.
    pub clamped: bool,
}

impl RenderOutcome {
    fn new() -> Self {
        Self {
            phases: vec![RenderPhase::Idle],
            font: None,
            source_missing: false,
            regions_drawn: 0,
            clamped: false,
        }
    }

    fn enter(&mut self, state: InteractionState, phase: RenderPhase) {
        debug!(%state, ?phase, "nine-patch render phase");
        self.phases.push(phase);
    }

    pub fn phase(&self) -> RenderPhase {
        self.phases.last().copied().unwrap_or(RenderPhase::Idle)
    }

    /// True when any degraded path was taken.
    pub fn is_degraded(&self) -> bool {
        self.font.is_some() || self.source_missing || self.clamped
    }
}

/// Finished raster of one state.
#[derive(Debug, Clone)]
pub struct NinePatchRaster {
    pub state: InteractionState,
    pub bitmap: Bitmap,
    pub outcome: RenderOutcome,
    /// Configuration revision the render started from.
    pub revision: u64,
}

impl NinePatchRaster {
    /// Encode as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, PngError> {
        encode_rgba(&self.bitmap, &PngConfig::default())
    }

    /// Download file name for this raster.
    pub fn file_name(&self, label: &LabelConfig) -> String {
        sanitize_file_name(label.display_text(), self.state.as_str())
    }
}

/// Smallest canvas the slice geometry needs.
///
/// With a source this is its natural size (which always covers the
/// normalised insets); without one the configured insets are used as-is.
pub fn slice_minimum(patch: &NinePatchStateConfig, source: Option<&Bitmap>) -> (u32, u32) {
    match source {
        Some(source) => {
            let (w, h) = patch.slices.normalized(source.width, source.height).min_size();
            (source.width.max(w), source.height.max(h))
        }
        None => patch.slices.min_size(),
    }
}

/// Synchronous part of a render: measure, size, composite, draw text.
pub fn paint(
    face: &FontFace,
    label: &LabelConfig,
    patch: &NinePatchStateConfig,
    state: InteractionState,
    source: Option<&Bitmap>,
    outcome: &mut RenderOutcome,
) -> Bitmap {
    let text = label.display_text();
    let size = label.font_size as f64;
    let extent = measure(face, text, size);
    let (mut width, mut height) = fit_canvas(slice_minimum(patch, source), &extent, &patch.padding);

    if width > MAX_CANVAS_DIMENSION || height > MAX_CANVAS_DIMENSION {
        warn!(%state, width, height, max = MAX_CANVAS_DIMENSION, "nine-patch canvas capped");
        width = width.min(MAX_CANVAS_DIMENSION);
        height = height.min(MAX_CANVAS_DIMENSION);
        outcome.clamped = true;
    }

    outcome.enter(state, RenderPhase::Compositing);
    let mut bitmap = Bitmap::new(width, height);
    match source {
        Some(source) => {
            outcome.regions_drawn = nine_slice::draw(&mut bitmap, source, &patch.slices);
        }
        None => {
            warn!(%state, "source image missing, drawing text only");
            outcome.source_missing = true;
        }
    }

    let anchor = TextAnchor::place(
        label.horizontal_anchor,
        label.vertical_anchor,
        width as f64,
        height as f64,
        &patch.padding,
    );
    draw_text(&mut bitmap, face, text, size, label.text_color, &anchor);
    bitmap
}

/// Render one state, waiting for the label font first.
pub async fn render_nine_patch(
    fonts: &mut FontLoader,
    label: &LabelConfig,
    patch: &NinePatchStateConfig,
    state: InteractionState,
    source: Option<&Bitmap>,
    revision: u64,
) -> NinePatchRaster {
    let mut outcome = RenderOutcome::new();

    outcome.enter(state, RenderPhase::Measuring);
    let readiness = fonts.ready(&label.font_family).await;
    outcome.font = readiness.degraded_reason().cloned();

    // Let the current frame finish before rasterising.
    tokio::task::yield_now().await;

    let bitmap = paint(readiness.face(), label, patch, state, source, &mut outcome);
    outcome.enter(state, RenderPhase::Drawn);

    NinePatchRaster {
        state,
        bitmap,
        outcome,
        revision,
    }
}
