//! Buttonsmith configuration library.
//!
//! This crate provides the data model of the Buttonsmith asset renderer:
//! colors, interaction states, slice and padding insets, the button and
//! nine-patch configuration values, raw-input coercion, and lenient snapshot
//! persistence.
//!
//! # Example
//!
//! ```
//! use buttonsmith_spec::{Color, NinePatchConfig, NinePatchEdit, InteractionState, Edge};
//!
//! let base = Color::normalize("36f", Color::WHITE);
//! assert_eq!(base.to_hex(), "#3366ff");
//!
//! let config = NinePatchConfig::default();
//! let (config, dirty) = config.with_edit(&NinePatchEdit::Slice(
//!     InteractionState::Hover,
//!     Edge::Left,
//!     "20".to_string(),
//! ));
//! assert_eq!(config.states.hover.slices.left, 20);
//! assert!(dirty.hover && !dirty.normal);
//! ```
//!
//! # Modules
//!
//! - [`color`]: hex normalization and RGB/HSL conversion
//! - [`state`]: interaction states and the per-state container
//! - [`insets`]: slice and padding insets
//! - [`config`]: button and nine-patch configuration values
//! - [`coerce`]: string input coercion
//! - [`edit`]: field-level edits and recompute sets
//! - [`snapshot`]: persisted snapshots with per-field fallback

pub mod coerce;
pub mod color;
pub mod config;
pub mod edit;
pub mod error;
pub mod insets;
pub mod snapshot;
pub mod state;

// Re-export commonly used types at the crate root
pub use color::{Color, Hsl, ParseColorError};
pub use config::{
    Anchor, BorderSpec, ButtonConfig, LabelConfig, NinePatchConfig, NinePatchStateConfig,
    NoiseBlend, NoiseSettings, NoiseSpec, DEFAULT_TEXT,
};
pub use edit::{ButtonChanges, ButtonEdit, LabelEdit, NinePatchEdit, NoiseRefresh};
pub use error::StoreError;
pub use insets::{Edge, PaddingInsets, SliceInsets};
pub use snapshot::{
    persist, restore_button, restore_nine_patch, FileStore, MemoryStore, RestoreReport,
    SnapshotStore, BUTTON_KEY, NINE_PATCH_KEY,
};
pub use state::{InteractionState, PerState};
