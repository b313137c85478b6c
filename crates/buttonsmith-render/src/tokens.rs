//! Named style tokens consumed by a presentation layer.
//!
//! Tokens are plain strings keyed by CSS-like property names. Keys are kept
//! sorted so serialised output is stable.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use buttonsmith_spec::{ButtonConfig, Color, InteractionState, LabelConfig, PerState};
use serde::{Deserialize, Serialize};

use crate::noise::NoiseLayer;
use crate::palette::{derive_border, derive_ramp, BorderTokens};

/// Value used for colors of an invisible border.
pub const NONE: &str = "none";

/// Ordered map of style property names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTokens(BTreeMap<String, String>);

impl StyleTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into this map, prefixing each key.
    pub fn extend_prefixed(&mut self, prefix: &str, other: StyleTokens) {
        for (key, value) in other.0 {
            self.0.insert(format!("{prefix}{key}"), value);
        }
    }

    /// Render as a CSS rule body for `selector`.
    pub fn to_css(&self, selector: &str) -> String {
        let mut out = format!("{selector} {{\n");
        for (key, value) in &self.0 {
            let _ = writeln!(out, "  {key}: {value};");
        }
        out.push('}');
        out
    }
}

impl FromIterator<(String, String)> for StyleTokens {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Pixel length the way a browser style property prints it.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Gradient ramp tokens for every state: `--<state>-top|bottom|solid`.
pub fn palette_tokens(colors: &PerState<Color>) -> StyleTokens {
    let mut tokens = StyleTokens::new();
    for (state, base) in colors.iter() {
        let ramp = derive_ramp(*base);
        tokens.set(format!("--{state}-top"), ramp.top.to_hex());
        tokens.set(format!("--{state}-bottom"), ramp.bottom.to_hex());
        tokens.set(format!("--{state}-solid"), ramp.solid.to_hex());
    }
    tokens
}

/// Border tokens. Invisible borders report `none` for every color.
pub fn border_tokens(border: &BorderTokens) -> StyleTokens {
    let color = |c: Option<Color>| c.map_or_else(|| NONE.to_string(), |c| c.to_hex());

    let mut tokens = StyleTokens::new();
    tokens.set("--border-width", px(border.width as f64));
    tokens.set("--border-color", color(border.color));
    tokens.set("--border-highlight", color(border.highlight));
    tokens.set("--border-shadow", color(border.shadow));
    tokens.set(
        "--border-glow",
        border.glow.clone().unwrap_or_else(|| NONE.to_string()),
    );
    tokens.set(
        "--border-overlay-opacity",
        border.overlay_opacity.to_string(),
    );
    tokens
}

/// Typography and alignment tokens of a label.
pub fn label_tokens(label: &LabelConfig) -> StyleTokens {
    let mut tokens = StyleTokens::new();
    tokens.set("--btn-text-color", label.text_color.to_hex());
    tokens.set("font-family", label.css_font_family());
    tokens.set("font-size", px(label.font_size as f64));
    tokens.set("justify-content", label.horizontal_anchor.flex_keyword());
    tokens.set("align-items", label.vertical_anchor.flex_keyword());
    tokens.set("text-align", label.horizontal_anchor.text_align());
    tokens
}

/// Every token of a gradient button. Noise layer tokens are prefixed with
/// `noise.`.
pub fn button_tokens(config: &ButtonConfig, noise: &NoiseLayer) -> StyleTokens {
    let mut tokens = palette_tokens(&config.colors);
    for (key, value) in border_tokens(&derive_border(&config.border)).0 {
        tokens.set(key, value);
    }
    for (key, value) in label_tokens(&config.label).0 {
        tokens.set(key, value);
    }
    tokens.set("width", px(config.width));
    tokens.set("height", px(config.height));
    tokens.set("border-radius", px(config.radius as f64));
    tokens.extend_prefixed("noise.", noise.tokens());
    tokens
}

/// Tokens restricted to one state's ramp plus the shared entries.
pub fn state_tokens(all: &StyleTokens, state: InteractionState) -> StyleTokens {
    let other_states: Vec<String> = InteractionState::ALL
        .iter()
        .filter(|s| **s != state)
        .map(|s| format!("--{s}-"))
        .collect();

    all.iter()
        .filter(|(key, _)| !other_states.iter().any(|p| key.starts_with(p.as_str())))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
