//! Field-level edits applied to configuration values.
//!
//! Edits carry the raw string the user typed. Applying an edit never fails:
//! malformed input keeps the previous value. Each application returns the
//! new configuration together with what has to be recomputed.

use crate::coerce::{clamp_int, parse_non_negative, parse_number, parse_pixels};
use crate::color::Color;
use crate::config::{
    Anchor, ButtonConfig, LabelConfig, NinePatchConfig, NoiseBlend, BORDER_WIDTH_MAX,
    FONT_SIZE_MAX, FONT_SIZE_MIN, NOISE_AMOUNT_MAX, RADIUS_MAX,
};
use crate::insets::Edge;
use crate::state::{InteractionState, PerState};

/// Edit of the shared label settings.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelEdit {
    Text(String),
    /// Blank names are ignored, the current family stays active.
    FontFamily(String),
    FontSize(String),
    TextColor(String),
    HorizontalAnchor(String),
    VerticalAnchor(String),
}

/// Edit of a gradient button configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonEdit {
    Label(LabelEdit),
    Width(String),
    Height(String),
    Radius(String),
    StateColor(InteractionState, String),
    BorderWidth(String),
    BorderColor(String),
    NoiseColor(String),
    NoiseAmount(String),
    NoiseBlend(String),
    /// Explicit request for a fresh noise pattern.
    RefreshNoise,
}

/// Edit of a nine-patch configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum NinePatchEdit {
    Label(LabelEdit),
    SourceImage(InteractionState, String),
    Slice(InteractionState, Edge, String),
    Padding(InteractionState, Edge, String),
}

/// What the noise layer has to do after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseRefresh {
    /// Nothing noise-related changed.
    #[default]
    Keep,
    /// Only presentation (blend mode) changed; reuse the cached bitmap.
    Restyle,
    /// Pixel content changed or a refresh was requested.
    Regenerate,
}

/// Recompute set produced by a button edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonChanges {
    pub tokens: bool,
    pub noise: NoiseRefresh,
}

impl LabelConfig {
    /// Apply a label edit, returning the new label and whether anything
    /// changed.
    pub fn with_edit(&self, edit: &LabelEdit) -> (LabelConfig, bool) {
        let mut next = self.clone();
        match edit {
            LabelEdit::Text(text) => next.text = text.clone(),
            LabelEdit::FontFamily(name) => {
                let trimmed = name.trim();
                if !trimmed.is_empty() {
                    next.font_family = trimmed.to_string();
                }
            }
            LabelEdit::FontSize(raw) => {
                next.font_size = clamp_int(
                    raw,
                    FONT_SIZE_MIN as i64,
                    FONT_SIZE_MAX as i64,
                    self.font_size as i64,
                ) as u32;
            }
            LabelEdit::TextColor(raw) => next.text_color = Color::normalize(raw, self.text_color),
            LabelEdit::HorizontalAnchor(raw) => {
                next.horizontal_anchor = Anchor::parse(raw).unwrap_or(self.horizontal_anchor)
            }
            LabelEdit::VerticalAnchor(raw) => {
                next.vertical_anchor = Anchor::parse(raw).unwrap_or(self.vertical_anchor)
            }
        }
        let changed = next != *self;
        (next, changed)
    }
}

impl ButtonConfig {
    /// Apply an edit to a copy of this configuration.
    pub fn with_edit(&self, edit: &ButtonEdit) -> (ButtonConfig, ButtonChanges) {
        let mut next = self.clone();
        let mut noise = NoiseRefresh::Keep;

        match edit {
            ButtonEdit::Label(label_edit) => next.label = self.label.with_edit(label_edit).0,
            ButtonEdit::Width(raw) => next.width = parse_number(raw, self.width),
            ButtonEdit::Height(raw) => next.height = parse_number(raw, self.height),
            ButtonEdit::Radius(raw) => {
                next.radius = clamp_int(raw, 0, RADIUS_MAX as i64, self.radius as i64) as u32
            }
            // Restyle only, the normal color included; the grain keeps its own color.
            ButtonEdit::StateColor(state, raw) => {
                let current = *self.colors.get(*state);
                *next.colors.get_mut(*state) = Color::normalize(raw, current);
            }
            ButtonEdit::BorderWidth(raw) => {
                next.border.width =
                    clamp_int(raw, 0, BORDER_WIDTH_MAX as i64, self.border.width as i64) as u32
            }
            ButtonEdit::BorderColor(raw) => {
                next.border.color = Color::normalize(raw, self.border.color)
            }
            ButtonEdit::NoiseColor(raw) => {
                next.noise.color = Color::normalize(raw, self.noise.color);
                noise = NoiseRefresh::Regenerate;
            }
            ButtonEdit::NoiseAmount(raw) => {
                next.noise.amount =
                    clamp_int(raw, 0, NOISE_AMOUNT_MAX as i64, self.noise.amount as i64) as u32;
                noise = NoiseRefresh::Regenerate;
            }
            ButtonEdit::NoiseBlend(raw) => {
                next.noise.blend = raw.parse::<NoiseBlend>().unwrap_or(self.noise.blend);
                noise = NoiseRefresh::Restyle;
            }
            ButtonEdit::RefreshNoise => noise = NoiseRefresh::Regenerate,
        }

        let tokens = next != *self;
        (next, ButtonChanges { tokens, noise })
    }
}

impl NinePatchConfig {
    /// Apply an edit to a copy of this configuration, returning which states
    /// need a new raster.
    pub fn with_edit(&self, edit: &NinePatchEdit) -> (NinePatchConfig, PerState<bool>) {
        let mut next = self.clone();
        let mut dirty = PerState::new(false, false, false);

        match edit {
            NinePatchEdit::Label(label_edit) => {
                let (label, changed) = self.label.with_edit(label_edit);
                next.label = label;
                dirty = PerState::new(changed, changed, changed);
            }
            NinePatchEdit::SourceImage(state, raw) => {
                let trimmed = raw.trim();
                next.states.get_mut(*state).source_image =
                    (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            NinePatchEdit::Slice(state, edge, raw) => {
                let slices = self.states.get(*state).slices;
                let value = parse_pixels(raw, slices.get(*edge));
                next.states.get_mut(*state).slices = slices.with(*edge, value);
            }
            NinePatchEdit::Padding(state, edge, raw) => {
                let padding = self.states.get(*state).padding;
                let value = parse_non_negative(raw, padding.get(*edge));
                next.states.get_mut(*state).padding = padding.with(*edge, value);
            }
        }

        if let NinePatchEdit::SourceImage(state, _)
        | NinePatchEdit::Slice(state, _, _)
        | NinePatchEdit::Padding(state, _, _) = edit
        {
            *dirty.get_mut(*state) = next.states.get(*state) != self.states.get(*state);
        }

        (next, dirty)
    }
}
