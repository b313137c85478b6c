//! Button command implementation
//!
//! Rasterizes the gradient button of a configuration document, one PNG per
//! interaction state.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use buttonsmith_render::png::{write_rgba_to_vec_with_hash, PngConfig};
use buttonsmith_render::NoiseRng;
use buttonsmith_spec::coerce::sanitize_file_name;
use buttonsmith_spec::{InteractionState, LabelConfig};
use colored::Colorize;

use crate::input::{font_loader, load_controller, print_report, runtime, selected_states};

/// File name of the gradient button raster for `state`.
pub fn file_name(label: &LabelConfig, state: InteractionState) -> String {
    sanitize_file_name(label.display_text(), &format!("gradient-{state}"))
}

/// Run the button command
///
/// # Arguments
/// * `config_path` - Configuration document
/// * `out_dir` - Directory receiving the PNG files (created if missing)
/// * `state` - Render only this state (default: all three)
/// * `font_dirs` - Directories searched for the label font
/// * `font_timeout_ms` - Upper bound on the font wait
/// * `seed` - Noise seed
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    config_path: &Path,
    out_dir: &Path,
    state: Option<InteractionState>,
    font_dirs: &[PathBuf],
    font_timeout_ms: Option<u64>,
    seed: Option<u64>,
) -> Result<ExitCode> {
    println!(
        "{} {}",
        "Rendering button:".cyan().bold(),
        config_path.display()
    );

    let fonts = font_loader(font_dirs, font_timeout_ms);
    let (mut controller, report) = load_controller(config_path, fonts, NoiseRng::from_option(seed))?;
    print_report(&report);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let rt = runtime()?;
    for state in selected_states(state) {
        let bitmap = rt.block_on(controller.render_button(state));
        let (bytes, hash) =
            write_rgba_to_vec_with_hash(&bitmap, &PngConfig::default()).context("Failed to encode PNG")?;

        let path = out_dir.join(file_name(&controller.button().label, state));
        fs::write(&path, bytes).with_context(|| format!("Failed to write: {}", path.display()))?;

        println!(
            "  {} {:<7} {}x{} -> {} [{}]",
            "+".green(),
            state.as_str(),
            bitmap.width,
            bitmap.height,
            path.display(),
            &hash[..16]
        );
    }

    println!("{} Button rendered", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buttonsmith_render::png::decode_rgba;

    #[test]
    fn test_file_name() {
        let mut label = LabelConfig::default();
        assert_eq!(
            file_name(&label, InteractionState::Hover),
            "button-gradient-hover.png"
        );
        label.text = "Buy".to_string();
        assert_eq!(
            file_name(&label, InteractionState::Normal),
            "buy-gradient-normal.png"
        );
    }

    #[test]
    fn test_button_uses_configured_size() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("button.json");
        fs::write(
            &config,
            r#"{"buttonsmith.button.v1": "{\"width\": 96, \"height\": 32, \"label\": {\"text\": \"Buy\"}}"}"#,
        )
        .unwrap();

        run(&config, dir.path(), Some(InteractionState::Normal), &[], Some(10), Some(3)).unwrap();

        let bytes = fs::read(dir.path().join("buy-gradient-normal.png")).unwrap();
        assert_eq!(decode_rgba(&bytes).unwrap().size(), (96, 32));
    }

    #[test]
    fn test_same_seed_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("button.json");
        fs::write(&config, "{}").unwrap();
        let (a, b) = (dir.path().join("a"), dir.path().join("b"));

        run(&config, &a, None, &[], Some(10), Some(9)).unwrap();
        run(&config, &b, None, &[], Some(10), Some(9)).unwrap();

        for state in InteractionState::ALL {
            let name = file_name(&LabelConfig::default(), state);
            assert_eq!(fs::read(a.join(&name)).unwrap(), fs::read(b.join(&name)).unwrap());
        }
    }
}
