//! Fmt command implementation
//!
//! Rewrites a configuration document in canonical form: every field present,
//! invalid fields replaced by their defaults, payloads stored as JSON strings.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use buttonsmith_spec::{
    persist, restore_button, restore_nine_patch, FileStore, BUTTON_KEY, NINE_PATCH_KEY,
};
use colored::Colorize;

use crate::input::{open_store, print_report};

/// Run the fmt command
///
/// # Arguments
/// * `config_path` - Configuration document
/// * `output` - Output file path (default: overwrite input file)
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(config_path: &Path, output: Option<&Path>) -> Result<ExitCode> {
    println!("{} {}", "Formatting:".cyan().bold(), config_path.display());

    let store = open_store(config_path)?;
    let (button, mut report) = restore_button(&store);
    let (nine_patch, nine_patch_report) = restore_nine_patch(&store);
    report.discarded.extend(nine_patch_report.discarded);
    print_report(&report);

    let output_path = output.unwrap_or(config_path);
    let target = FileStore::new(output_path);
    persist(&target, BUTTON_KEY, &button)
        .with_context(|| format!("Failed to write to: {}", output_path.display()))?;
    persist(&target, NINE_PATCH_KEY, &nine_patch)
        .with_context(|| format!("Failed to write to: {}", output_path.display()))?;

    if output_path == config_path {
        println!("{} Formatted in place", "SUCCESS".green().bold());
    } else {
        println!(
            "{} Formatted to: {}",
            "SUCCESS".green().bold(),
            output_path.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buttonsmith_spec::{SnapshotStore, DEFAULT_TEXT};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    #[test]
    fn test_fmt_fills_defaults_and_drops_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        std::fs::write(
            &input,
            r#"{"buttonsmith.button.v1": {"width": 300, "radius": -4}}"#,
        )
        .unwrap();

        run(&input, Some(&output)).unwrap();

        let store = FileStore::new(&output);
        let payload = store.get(BUTTON_KEY).unwrap().unwrap();
        let button: Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(button["width"], Value::from(300.0));
        assert_eq!(button["radius"], Value::from(6));

        let nine_patch: Value =
            serde_json::from_str(&store.get(NINE_PATCH_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(nine_patch["label"]["text"], Value::from(DEFAULT_TEXT));
        assert!(nine_patch["states"]["hover"]["slices"].is_object());
    }

    #[test]
    fn test_fmt_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r##"{"buttonsmith.nine-patch.v1": {"label": {"textColor": "#ABC"}}}"##)
            .unwrap();

        run(&path, None).unwrap();
        let once = std::fs::read_to_string(&path).unwrap();
        run(&path, None).unwrap();
        let twice = std::fs::read_to_string(&path).unwrap();
        assert_eq!(once, twice);
        assert!(once.contains("#aabbcc"));
    }
}
