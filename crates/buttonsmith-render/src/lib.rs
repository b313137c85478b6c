//! Buttonsmith rendering engine
//!
//! This crate turns the configuration values of `buttonsmith-spec` into
//! concrete outputs: style tokens for a presentation layer, a tileable grain
//! texture, nine-slice composited rasters with anchored labels, and a raster
//! preview of the gradient button.
//!
//! # Features
//!
//! - **State palettes**: gradient ramps and border tones derived in HSL space
//! - **Grain noise**: 128x128 monochromatic noise tile with a cached overlay layer
//! - **Nine-slice**: corners copied, edges and center stretched, on an auto-fit canvas
//! - **Text layout**: outline fonts via `fontdue`, a built-in pixel fallback,
//!   and a bounded wait for font readiness
//! - **Deterministic PNG**: fixed encoder settings and BLAKE3 content hashes
//!
//! # Example
//!
//! ```no_run
//! use buttonsmith_render::{Controller, FontLoader, NoiseRng};
//! use buttonsmith_spec::{ButtonConfig, InteractionState, NinePatchConfig};
//!
//! # async fn demo() {
//! let mut controller = Controller::new(
//!     ButtonConfig::default(),
//!     NinePatchConfig::default(),
//!     FontLoader::builtin_only(),
//!     NoiseRng::seeded(42),
//! );
//! controller.render_all().await;
//! let png = controller.export_png(InteractionState::Hover).unwrap();
//! assert!(!png.is_empty());
//! # }
//! ```
//!
//! # Determinism
//!
//! Rendering is a pure function of the configuration, the source bitmaps, the
//! resolved font and the RNG state. Seed [`NoiseRng`] to get byte-identical
//! noise tiles across runs.

pub mod bitmap;
pub mod blend;
pub mod button;
pub mod controller;
pub mod nine_slice;
pub mod noise;
pub mod palette;
pub mod patch;
pub mod png;
pub mod rng;
pub mod source;
pub mod text;
pub mod tokens;

// Re-export main types for convenience
pub use bitmap::{Bitmap, Rect};
pub use blend::Rgba;
pub use button::render_button;
pub use controller::{Controller, ExportError};
pub use noise::{NoiseLayer, NoiseUpdate, NOISE_TILE_SIZE};
pub use palette::{derive_border, derive_ramp, BorderTokens, StateRamp};
pub use patch::{render_nine_patch, NinePatchRaster, RenderOutcome, RenderPhase};
pub use png::{PngConfig, PngError};
pub use rng::NoiseRng;
pub use source::{load_source, ImageLoadError};
pub use text::{
    DegradedReason, DirectoryFontResolver, FontError, FontFace, FontLoader, FontReadiness,
    FontResolver, MemoryFontResolver,
};
pub use tokens::{button_tokens, StyleTokens};
