//! Persisted configuration snapshots.
//!
//! Configurations are stored as JSON payload strings under fixed keys in a
//! key/value [`SnapshotStore`]. Restoring is lenient: every field is validated
//! on its own, invalid fields fall back to their defaults and the rest of the
//! payload is kept.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::color::Color;
use crate::config::{
    ButtonConfig, LabelConfig, NinePatchConfig, NinePatchStateConfig, NoiseSettings,
    BORDER_WIDTH_MAX, FONT_SIZE_MAX, FONT_SIZE_MIN, NOISE_AMOUNT_MAX, RADIUS_MAX,
};
use crate::error::StoreError;
use crate::insets::Edge;
use crate::state::{InteractionState, PerState};

/// Storage key of the nine-patch configuration.
pub const NINE_PATCH_KEY: &str = "buttonsmith.nine-patch.v1";

/// Storage key of the gradient button configuration.
pub const BUTTON_KEY: &str = "buttonsmith.button.v1";

/// String key/value storage for snapshot payloads.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, payload: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// Store backed by one JSON file holding an object of key -> payload string.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::NotAnObject(other.to_string())),
        }
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.get(key).and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            // Hand-edited files may hold the payload object directly.
            Value::Object(_) => Some(v.to_string()),
            _ => None,
        }))
    }

    fn set(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        // An unreadable file is reported, never replaced.
        let mut map = self.load()?;
        map.insert(key.to_string(), Value::String(payload.to_string()));
        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Fields dropped while restoring a snapshot, as dotted paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub discarded: Vec<String>,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.discarded.is_empty()
    }

    fn discard(&mut self, path: String) {
        tracing::warn!(field = %path, "discarding invalid snapshot field");
        self.discarded.push(path);
    }
}

/// Serialize a configuration and store it under `key`.
pub fn persist<T: Serialize>(
    store: &dyn SnapshotStore,
    key: &str,
    config: &T,
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(config)?;
    store.set(key, &payload)
}

/// Restore the nine-patch configuration, falling back per field.
pub fn restore_nine_patch(store: &dyn SnapshotStore) -> (NinePatchConfig, RestoreReport) {
    let mut report = RestoreReport::default();
    let config = match load_root(store, NINE_PATCH_KEY, &mut report) {
        Some(root) => nine_patch_from_value(&root, &mut report),
        None => NinePatchConfig::default(),
    };
    (config, report)
}

/// Restore the button configuration, falling back per field.
pub fn restore_button(store: &dyn SnapshotStore) -> (ButtonConfig, RestoreReport) {
    let mut report = RestoreReport::default();
    let config = match load_root(store, BUTTON_KEY, &mut report) {
        Some(root) => button_from_value(&root, &mut report),
        None => ButtonConfig::default(),
    };
    (config, report)
}

/// Restore a nine-patch configuration from an already parsed document.
pub fn nine_patch_from_value(root: &Value, report: &mut RestoreReport) -> NinePatchConfig {
    let defaults = NinePatchConfig::default();
    let Some(obj) = as_object(root, "", report) else {
        return defaults;
    };

    // Flat snapshots keep the label fields and the state objects at the top level.
    let label = match obj.get("label") {
        Some(v) => label_from_value(v, &defaults.label, "label", report),
        None => label_from_value(root, &defaults.label, "", report),
    };

    let (states_obj, prefix) = match obj.get("states") {
        Some(v) => (as_object(v, "states", report), "states."),
        None => (Some(obj), ""),
    };
    let states = PerState::from_fn(|state| {
        let fallback = defaults.states.get(state);
        match states_obj.and_then(|m| m.get(state.as_str())) {
            Some(v) => state_from_value(v, fallback, &format!("{}{}", prefix, state), report),
            None => fallback.clone(),
        }
    });

    NinePatchConfig { label, states }
}

/// Restore a button configuration from an already parsed document.
pub fn button_from_value(root: &Value, report: &mut RestoreReport) -> ButtonConfig {
    let defaults = ButtonConfig::default();
    let Some(obj) = as_object(root, "", report) else {
        return defaults;
    };

    let label = match obj.get("label") {
        Some(v) => label_from_value(v, &defaults.label, "label", report),
        None => defaults.label.clone(),
    };

    let width = take(obj, "", "width", report, |w: &f64| w.is_finite()).unwrap_or(defaults.width);
    let height =
        take(obj, "", "height", report, |h: &f64| h.is_finite()).unwrap_or(defaults.height);
    let radius =
        take(obj, "", "radius", report, |r: &u32| *r <= RADIUS_MAX).unwrap_or(defaults.radius);

    let colors_obj = obj
        .get("colors")
        .and_then(|v| as_object(v, "colors", report));
    let colors = PerState::from_fn(|state: InteractionState| match colors_obj {
        Some(m) => take(m, "colors", state.as_str(), report, |_: &Color| true)
            .unwrap_or(*defaults.colors.get(state)),
        None => *defaults.colors.get(state),
    });

    let mut border = defaults.border;
    if let Some(m) = obj.get("border").and_then(|v| as_object(v, "border", report)) {
        border.width = take(m, "border", "width", report, |w: &u32| *w <= BORDER_WIDTH_MAX)
            .unwrap_or(border.width);
        border.color = take(m, "border", "color", report, |_: &Color| true).unwrap_or(border.color);
    }

    let mut noise = NoiseSettings::default();
    if let Some(m) = obj.get("noise").and_then(|v| as_object(v, "noise", report)) {
        noise.color = take(m, "noise", "color", report, |_: &Color| true).unwrap_or(noise.color);
        noise.amount = take(m, "noise", "amount", report, |a: &u32| *a <= NOISE_AMOUNT_MAX)
            .unwrap_or(noise.amount);
        noise.blend = take(m, "noise", "blend", report, |_| true).unwrap_or(noise.blend);
    }

    ButtonConfig {
        label,
        width,
        height,
        radius,
        colors,
        border,
        noise,
    }
}

fn load_root(store: &dyn SnapshotStore, key: &str, report: &mut RestoreReport) -> Option<Value> {
    let payload = match store.get(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(err) => {
            tracing::warn!(key, error = %err, "snapshot store unreadable, using defaults");
            report.discard("<store>".to_string());
            return None;
        }
    };

    match serde_json::from_str::<Value>(&payload) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "snapshot payload is not JSON, using defaults");
            report.discard("<root>".to_string());
            None
        }
    }
}

fn label_from_value(
    value: &Value,
    defaults: &LabelConfig,
    path: &str,
    report: &mut RestoreReport,
) -> LabelConfig {
    let Some(m) = as_object(value, path, report) else {
        return defaults.clone();
    };

    LabelConfig {
        text: take(m, path, "text", report, |_: &String| true)
            .unwrap_or_else(|| defaults.text.clone()),
        font_family: take(m, path, "fontFamily", report, |f: &String| !f.trim().is_empty())
            .map(|f| f.trim().to_string())
            .unwrap_or_else(|| defaults.font_family.clone()),
        font_size: take(m, path, "fontSize", report, |s: &u32| {
            (FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(s)
        })
        .unwrap_or(defaults.font_size),
        horizontal_anchor: take(m, path, "horizontalAnchor", report, |_| true)
            .unwrap_or(defaults.horizontal_anchor),
        vertical_anchor: take(m, path, "verticalAnchor", report, |_| true)
            .unwrap_or(defaults.vertical_anchor),
        text_color: take(m, path, "textColor", report, |_: &Color| true)
            .unwrap_or(defaults.text_color),
    }
}

fn state_from_value(
    value: &Value,
    defaults: &NinePatchStateConfig,
    path: &str,
    report: &mut RestoreReport,
) -> NinePatchStateConfig {
    let Some(m) = as_object(value, path, report) else {
        return defaults.clone();
    };

    let source_image = match m.get("sourceImage") {
        None | Some(Value::Null) => defaults.source_image.clone(),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(_) => {
            report.discard(format!("{}.sourceImage", path));
            defaults.source_image.clone()
        }
    };

    let mut slices = defaults.slices;
    let slices_path = format!("{}.slices", path);
    if let Some(sm) = m.get("slices").and_then(|v| as_object(v, &slices_path, report)) {
        for edge in Edge::ALL {
            if let Some(v) = take(sm, &slices_path, edge.as_str(), report, |_: &u32| true) {
                slices = slices.with(edge, v);
            }
        }
    }

    let mut padding = defaults.padding;
    let padding_path = format!("{}.padding", path);
    if let Some(pm) = m.get("padding").and_then(|v| as_object(v, &padding_path, report)) {
        for edge in Edge::ALL {
            if let Some(v) = take(pm, &padding_path, edge.as_str(), report, |p: &f64| {
                p.is_finite() && *p >= 0.0
            }) {
                padding = padding.with(edge, v);
            }
        }
    }

    NinePatchStateConfig {
        source_image,
        slices,
        padding,
    }
}

fn as_object<'v>(
    value: &'v Value,
    path: &str,
    report: &mut RestoreReport,
) -> Option<&'v Map<String, Value>> {
    match value {
        Value::Object(m) => Some(m),
        _ => {
            report.discard(if path.is_empty() {
                "<root>".to_string()
            } else {
                path.to_string()
            });
            None
        }
    }
}

/// Read one field; a present but invalid field is recorded and dropped.
fn take<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    report: &mut RestoreReport,
    valid: impl Fn(&T) -> bool,
) -> Option<T> {
    let raw = obj.get(key)?;
    match serde_json::from_value::<T>(raw.clone()) {
        Ok(value) if valid(&value) => Some(value),
        _ => {
            report.discard(if path.is_empty() {
                key.to_string()
            } else {
                format!("{}.{}", path, key)
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Anchor, NoiseBlend};
    use crate::insets::SliceInsets;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_nine_patch() {
        let store = MemoryStore::new();
        let mut config = NinePatchConfig::default();
        config.label.text = "Play".to_string();
        config.label.vertical_anchor = Anchor::End;
        config.states.hover.slices = SliceInsets::new(1, 2, 3, 4);
        config.states.active.source_image = Some("active.png".to_string());

        persist(&store, NINE_PATCH_KEY, &config).unwrap();
        let (restored, report) = restore_nine_patch(&store);

        assert!(report.is_clean());
        assert_eq!(restored, config);
    }

    #[test]
    fn test_missing_key_yields_defaults() {
        let store = MemoryStore::new();
        let (restored, report) = restore_button(&store);
        assert!(report.is_clean());
        assert_eq!(restored, ButtonConfig::default());
    }

    #[test]
    fn test_corrupt_payload_yields_defaults() {
        let store = MemoryStore::new();
        store.set(NINE_PATCH_KEY, "{not json").unwrap();
        let (restored, report) = restore_nine_patch(&store);
        assert_eq!(restored, NinePatchConfig::default());
        assert_eq!(report.discarded, vec!["<root>".to_string()]);
    }

    #[test]
    fn test_invalid_fields_discarded_independently() {
        let store = MemoryStore::new();
        let payload = serde_json::json!({
            "label": {
                "text": "Go",
                "fontSize": 500,
                "textColor": "#00ff00",
                "horizontalAnchor": "sideways"
            },
            "states": {
                "normal": {
                    "slices": { "top": 4, "right": -1, "bottom": "x", "left": 8 },
                    "padding": { "top": 2.5, "left": -3 }
                },
                "hover": 17
            }
        });
        store.set(NINE_PATCH_KEY, &payload.to_string()).unwrap();

        let (restored, report) = restore_nine_patch(&store);
        let defaults = NinePatchConfig::default();

        assert_eq!(restored.label.text, "Go");
        assert_eq!(restored.label.font_size, defaults.label.font_size);
        assert_eq!(restored.label.text_color, Color::rgb(0, 255, 0));
        assert_eq!(restored.label.horizontal_anchor, Anchor::Center);
        assert_eq!(restored.states.normal.slices.top, 4);
        assert_eq!(restored.states.normal.slices.right, defaults.states.normal.slices.right);
        assert_eq!(restored.states.normal.slices.left, 8);
        assert_eq!(restored.states.normal.padding.top, 2.5);
        assert_eq!(restored.states.normal.padding.left, defaults.states.normal.padding.left);
        assert_eq!(restored.states.hover, defaults.states.hover);

        assert_eq!(
            report.discarded,
            vec![
                "label.fontSize".to_string(),
                "label.horizontalAnchor".to_string(),
                "states.normal.slices.right".to_string(),
                "states.normal.slices.bottom".to_string(),
                "states.normal.padding.left".to_string(),
                "states.hover".to_string(),
            ]
        );
    }

    #[test]
    fn test_flat_nine_patch_payload_restores() {
        let store = MemoryStore::new();
        let payload = serde_json::json!({
            "text": "Go",
            "fontSize": 20,
            "horizontalAnchor": "end",
            "textColor": "#fff",
            "normal": {
                "sourceImage": "normal.png",
                "slices": { "top": 3, "right": 3, "bottom": 3, "left": 3 }
            },
            "hover": { "padding": { "left": "wide" } }
        });
        store.set(NINE_PATCH_KEY, &payload.to_string()).unwrap();

        let (restored, report) = restore_nine_patch(&store);
        let defaults = NinePatchConfig::default();

        assert_eq!(restored.label.text, "Go");
        assert_eq!(restored.label.font_size, 20);
        assert_eq!(restored.label.horizontal_anchor, Anchor::End);
        assert_eq!(restored.label.vertical_anchor, defaults.label.vertical_anchor);
        assert_eq!(restored.label.text_color, Color::WHITE);
        assert_eq!(restored.states.normal.source_image.as_deref(), Some("normal.png"));
        assert_eq!(restored.states.normal.slices, SliceInsets::uniform(3));
        assert_eq!(restored.states.hover.padding, defaults.states.hover.padding);
        assert_eq!(restored.states.active, defaults.states.active);
        assert_eq!(report.discarded, vec!["hover.padding.left".to_string()]);
    }

    #[test]
    fn test_button_partial_restore() {
        let store = MemoryStore::new();
        let payload = serde_json::json!({
            "width": 200,
            "radius": 999,
            "colors": { "hover": "#abc", "active": "nope" },
            "border": { "width": 3 },
            "noise": { "blend": "soft-light", "amount": 101 }
        });
        store.set(BUTTON_KEY, &payload.to_string()).unwrap();

        let (restored, report) = restore_button(&store);
        let defaults = ButtonConfig::default();

        assert_eq!(restored.width, 200.0);
        assert_eq!(restored.height, defaults.height);
        assert_eq!(restored.radius, defaults.radius);
        assert_eq!(restored.colors.hover, Color::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(restored.colors.active, defaults.colors.active);
        assert_eq!(restored.border.width, 3);
        assert_eq!(restored.noise.blend, NoiseBlend::SoftLight);
        assert_eq!(restored.noise.amount, defaults.noise.amount);
        assert_eq!(report.discarded.len(), 3);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        assert_eq!(store.get(BUTTON_KEY).unwrap(), None);
        persist(&store, BUTTON_KEY, &ButtonConfig::default()).unwrap();
        persist(&store, NINE_PATCH_KEY, &NinePatchConfig::default()).unwrap();

        let (button, report) = restore_button(&store);
        assert!(report.is_clean());
        assert_eq!(button, ButtonConfig::default());
        assert!(store.get(NINE_PATCH_KEY).unwrap().is_some());
    }

    #[test]
    fn test_file_store_set_keeps_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let corrupt = r#"{"other": "keep", oops"#;
        std::fs::write(&path, corrupt).unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.set("k", "v"), Err(StoreError::Json(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), corrupt);

        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(
            persist(&store, BUTTON_KEY, &ButtonConfig::default()),
            Err(StoreError::NotAnObject(_))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1, 2]");
    }

    #[test]
    fn test_file_store_set_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"other": "keep"}"#).unwrap();

        let store = FileStore::new(&path);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("other").unwrap(), Some("keep".to_string()));
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_file_store_accepts_inline_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(
            &path,
            r##"{ "buttonsmith.button.v1": { "height": 64, "colors": { "normal": "#102030" } } }"##,
        )
        .unwrap();

        let (button, report) = restore_button(&FileStore::new(path));
        assert!(report.is_clean());
        assert_eq!(button.height, 64.0);
        assert_eq!(button.colors.normal, Color::rgb(0x10, 0x20, 0x30));
    }
}
