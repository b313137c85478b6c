//! Per-state color ramps and border derivation.

use buttonsmith_spec::{BorderSpec, Color};
use serde::Serialize;

/// Lightness added for the top gradient stop.
pub const TOP_LIGHTNESS_DELTA: i32 = 12;
/// Lightness added for the bottom gradient stop.
pub const BOTTOM_LIGHTNESS_DELTA: i32 = -18;

pub const BORDER_HIGHLIGHT_DELTA: i32 = 40;
pub const BORDER_SHADOW_DELTA: i32 = -35;
pub const BORDER_GLOW_ALPHA: f64 = 0.45;

/// Gradient stops and solid fill for one interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateRamp {
    pub top: Color,
    pub bottom: Color,
    pub solid: Color,
}

/// Derive the ramp of one state from its base color.
pub fn derive_ramp(base: Color) -> StateRamp {
    StateRamp {
        top: base.adjust_lightness(TOP_LIGHTNESS_DELTA),
        bottom: base.adjust_lightness(BOTTOM_LIGHTNESS_DELTA),
        solid: base,
    }
}

/// Derived border paint. `None` colors mean the border is not drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderTokens {
    pub width: u32,
    pub color: Option<Color>,
    pub highlight: Option<Color>,
    pub shadow: Option<Color>,
    /// CSS `rgba(...)` string of the glow.
    pub glow: Option<String>,
    pub overlay_opacity: u8,
}

impl BorderTokens {
    pub fn is_visible(&self) -> bool {
        self.width > 0
    }
}

/// Derive border tokens from a border spec.
pub fn derive_border(spec: &BorderSpec) -> BorderTokens {
    let width = spec.width.min(buttonsmith_spec::config::BORDER_WIDTH_MAX);
    if width == 0 {
        return BorderTokens {
            width: 0,
            color: None,
            highlight: None,
            shadow: None,
            glow: None,
            overlay_opacity: 0,
        };
    }

    BorderTokens {
        width,
        color: Some(spec.color),
        highlight: Some(spec.color.adjust_lightness(BORDER_HIGHLIGHT_DELTA)),
        shadow: Some(spec.color.adjust_lightness(BORDER_SHADOW_DELTA)),
        glow: Some(spec.color.to_rgba_string(BORDER_GLOW_ALPHA)),
        overlay_opacity: 1,
    }
}
