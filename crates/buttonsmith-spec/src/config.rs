//! Configuration values for button and nine-patch assets.
//!
//! Configurations are plain immutable values. Edits produce a new value (see
//! [`crate::edit`]); the engine only ever reads them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::insets::{PaddingInsets, SliceInsets};
use crate::state::PerState;

/// Label shown when the configured text is blank.
pub const DEFAULT_TEXT: &str = "Кнопка";

/// Font family used until the user picks another one.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Font size bounds in pixels.
pub const FONT_SIZE_MIN: u32 = 8;
pub const FONT_SIZE_MAX: u32 = 120;
pub const DEFAULT_FONT_SIZE: u32 = 16;

/// Border width upper bound in pixels.
pub const BORDER_WIDTH_MAX: u32 = 16;

/// Corner radius bounds in pixels.
pub const RADIUS_MAX: u32 = 120;
pub const DEFAULT_RADIUS: u32 = 6;

pub const DEFAULT_BUTTON_WIDTH: f64 = 176.0;
pub const DEFAULT_BUTTON_HEIGHT: f64 = 48.0;

/// Noise amount is edited in percent.
pub const NOISE_AMOUNT_MAX: u32 = 100;
pub const DEFAULT_NOISE_AMOUNT: u32 = 12;

/// Placement of text along one axis of the padded box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    #[default]
    Center,
    End,
}

impl Anchor {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Center => "center",
            Anchor::End => "end",
        }
    }

    /// Flexbox keyword for this anchor.
    pub const fn flex_keyword(&self) -> &'static str {
        match self {
            Anchor::Start => "flex-start",
            Anchor::Center => "center",
            Anchor::End => "flex-end",
        }
    }

    /// Text-align keyword when used as a horizontal anchor.
    pub const fn text_align(&self) -> &'static str {
        match self {
            Anchor::Start => "left",
            Anchor::Center => "center",
            Anchor::End => "right",
        }
    }

    /// Parse any of the accepted spellings.
    pub fn parse(input: &str) -> Option<Anchor> {
        match input.trim().to_ascii_lowercase().as_str() {
            "start" | "left" | "top" | "flex-start" => Some(Anchor::Start),
            "center" | "middle" => Some(Anchor::Center),
            "end" | "right" | "bottom" | "flex-end" => Some(Anchor::End),
            _ => None,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blend mode of the noise overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseBlend {
    Normal,
    Multiply,
    Screen,
    #[default]
    Overlay,
    SoftLight,
}

impl NoiseBlend {
    /// CSS `mix-blend-mode` keyword.
    pub const fn css_keyword(&self) -> &'static str {
        match self {
            NoiseBlend::Normal => "normal",
            NoiseBlend::Multiply => "multiply",
            NoiseBlend::Screen => "screen",
            NoiseBlend::Overlay => "overlay",
            NoiseBlend::SoftLight => "soft-light",
        }
    }
}

impl FromStr for NoiseBlend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(NoiseBlend::Normal),
            "multiply" => Ok(NoiseBlend::Multiply),
            "screen" => Ok(NoiseBlend::Screen),
            "overlay" => Ok(NoiseBlend::Overlay),
            "soft-light" | "soft_light" | "softlight" => Ok(NoiseBlend::SoftLight),
            _ => Err(()),
        }
    }
}

/// Border width and base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderSpec {
    pub width: u32,
    pub color: Color,
}

impl BorderSpec {
    /// Create a border, clamping the width to `0..=16`.
    pub fn new(width: u32, color: Color) -> Self {
        Self {
            width: width.min(BORDER_WIDTH_MAX),
            color,
        }
    }
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self::new(0, Color::rgb(0x1f, 0x3d, 0x99))
    }
}

/// Input of the noise synthesizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseSpec {
    pub color: Color,
    /// Expected in `(0, 1]`; anything else disables the layer.
    pub intensity: f64,
}

impl NoiseSpec {
    pub fn new(color: Color, intensity: f64) -> Self {
        Self { color, intensity }
    }

    /// Whether this spec produces a noise bitmap at all.
    pub fn is_active(&self) -> bool {
        self.intensity > 0.0 && self.intensity <= 1.0
    }
}

/// Noise overlay settings as edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseSettings {
    pub color: Color,
    /// Percent, `0..=100`.
    pub amount: u32,
    pub blend: NoiseBlend,
}

impl NoiseSettings {
    pub fn spec(&self) -> NoiseSpec {
        NoiseSpec::new(self.color, self.amount as f64 / 100.0)
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            amount: DEFAULT_NOISE_AMOUNT,
            blend: NoiseBlend::default(),
        }
    }
}

/// Text and font settings shared by all states of an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelConfig {
    pub text: String,
    pub font_family: String,
    pub font_size: u32,
    pub horizontal_anchor: Anchor,
    pub vertical_anchor: Anchor,
    pub text_color: Color,
}

impl LabelConfig {
    /// Text to draw: trimmed, or the default label when blank.
    pub fn display_text(&self) -> &str {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            DEFAULT_TEXT
        } else {
            trimmed
        }
    }

    /// CSS font-family value with a generic fallback.
    pub fn css_font_family(&self) -> String {
        format!("'{}', sans-serif", self.font_family)
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            horizontal_anchor: Anchor::Center,
            vertical_anchor: Anchor::Center,
            text_color: Color::WHITE,
        }
    }
}

/// Gradient button asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonConfig {
    pub label: LabelConfig,
    pub width: f64,
    pub height: f64,
    pub radius: u32,
    pub colors: PerState<Color>,
    pub border: BorderSpec,
    pub noise: NoiseSettings,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            label: LabelConfig::default(),
            width: DEFAULT_BUTTON_WIDTH,
            height: DEFAULT_BUTTON_HEIGHT,
            radius: DEFAULT_RADIUS,
            colors: PerState::new(
                Color::rgb(0x33, 0x66, 0xff),
                Color::rgb(0x4d, 0x7a, 0xff),
                Color::rgb(0x29, 0x52, 0xcc),
            ),
            border: BorderSpec::default(),
            noise: NoiseSettings::default(),
        }
    }
}

/// Per-state nine-patch inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NinePatchStateConfig {
    /// File path or `data:image/png;base64,` URL of the source bitmap.
    pub source_image: Option<String>,
    pub slices: SliceInsets,
    pub padding: PaddingInsets,
}

impl Default for NinePatchStateConfig {
    fn default() -> Self {
        Self {
            source_image: None,
            slices: SliceInsets::uniform(12),
            padding: PaddingInsets::new(16.0, 24.0, 16.0, 24.0),
        }
    }
}

/// Nine-patch asset: shared label plus independent per-state slicing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NinePatchConfig {
    pub label: LabelConfig,
    pub states: PerState<NinePatchStateConfig>,
}
