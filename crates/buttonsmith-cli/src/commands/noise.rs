//! Noise command implementation
//!
//! Writes a single grain noise tile as PNG.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use buttonsmith_render::noise::{generate, NOISE_TILE_SIZE};
use buttonsmith_render::png::{write_rgba_to_vec_with_hash, PngConfig};
use buttonsmith_render::NoiseRng;
use buttonsmith_spec::{Color, NoiseSpec};
use colored::Colorize;

/// Run the noise command
///
/// # Arguments
/// * `color` - Base color of the grain
/// * `amount` - Intensity in percent (1-100)
/// * `out` - Output PNG path
/// * `seed` - RNG seed (default: entropy)
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(color: Color, amount: u32, out: &Path, seed: Option<u64>) -> Result<ExitCode> {
    println!(
        "{} {} at {}%",
        "Generating noise:".cyan().bold(),
        color,
        amount
    );

    let spec = NoiseSpec::new(color, amount as f64 / 100.0);
    if !spec.is_active() {
        bail!("Noise amount {}% produces no tile (expected 1-100)", amount);
    }

    let tile = generate(&spec, &mut NoiseRng::from_option(seed));
    let (bytes, hash) =
        write_rgba_to_vec_with_hash(&tile, &PngConfig::default()).context("Failed to encode PNG")?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(out, &bytes).with_context(|| format!("Failed to write: {}", out.display()))?;

    println!(
        "{} {}x{} tile written to {} [{}]",
        "SUCCESS".green().bold(),
        NOISE_TILE_SIZE,
        NOISE_TILE_SIZE,
        out.display(),
        &hash[..16]
    );
    Ok(ExitCode::SUCCESS)
}
