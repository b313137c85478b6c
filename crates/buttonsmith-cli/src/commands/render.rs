//! Render command implementation
//!
//! Renders the nine-patch asset of a configuration document to one PNG per
//! interaction state.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use buttonsmith_render::png::hash_png;
use buttonsmith_render::{NinePatchRaster, NoiseRng};
use buttonsmith_spec::InteractionState;
use colored::Colorize;

use crate::input::{font_loader, load_controller, print_report, runtime, selected_states};

/// Run the render command
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
    println!("{} {}", "Rendering:".cyan().bold(), config_path.display());

    let fonts = font_loader(font_dirs, font_timeout_ms);
    let (mut controller, report) = load_controller(config_path, fonts, NoiseRng::from_option(seed))?;
    print_report(&report);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let states = selected_states(state);
    let rt = runtime()?;
    rt.block_on(async {
        for state in &states {
            controller.render_state(*state).await;
        }
    });

    for state in states {
        let raster = controller
            .raster(state)
            .with_context(|| format!("No raster produced for state '{}'", state))?;
        print_degraded(raster);

        let path = controller
            .export_to_dir(state, out_dir)
            .with_context(|| format!("Failed to export state '{}'", state))?;
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read back: {}", path.display()))?;

        println!(
            "  {} {:<7} {}x{} -> {} [{}]",
            "+".green(),
            state.as_str(),
            raster.bitmap.width,
            raster.bitmap.height,
            path.display(),
            &hash_png(&bytes)[..16]
        );
    }

    println!("{} Nine-patch rendered", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

fn print_degraded(raster: &NinePatchRaster) {
    if let Some(reason) = &raster.outcome.font {
        println!("  {} {}: {}, using fallback face", "!".yellow(), raster.state, reason);
    }
    if raster.outcome.source_missing {
        println!("  {} {}: no source image, text only", "!".yellow(), raster.state);
    }
    if raster.outcome.clamped {
        println!("  {} {}: canvas capped", "!".yellow(), raster.state);
    }
}
