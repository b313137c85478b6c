//! Text layout: font faces, font readiness, measurement and anchoring.

pub mod builtin;
pub mod face;
pub mod layout;
pub mod resolve;

use std::path::PathBuf;

use thiserror::Error;

pub use face::{FontFace, LineMetrics, BUILTIN_FAMILY};
pub use layout::{draw_text, fit_canvas, measure, TextAlign, TextAnchor, TextBaseline, TextExtent};
pub use resolve::{
    await_font_ready, DegradedReason, DirectoryFontResolver, FontFuture, FontLoader,
    FontReadiness, FontResolver, MemoryFontResolver,
};

/// Errors raised while resolving a font family.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font family '{0}' not found")]
    NotFound(String),

    #[error("failed to read font file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font '{family}': {reason}")]
    Parse { family: String, reason: String },
}
