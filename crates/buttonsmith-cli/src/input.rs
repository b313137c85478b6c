//! Configuration loading and shared command plumbing.
//!
//! A configuration document is a JSON object mapping snapshot keys
//! (`buttonsmith.button.v1`, `buttonsmith.nine-patch.v1`) to payloads. A
//! payload may be a JSON string or an inline object.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use buttonsmith_render::{Controller, DirectoryFontResolver, FontLoader, NoiseRng};
use buttonsmith_spec::{FileStore, InteractionState, RestoreReport, SnapshotStore, BUTTON_KEY};
use colored::Colorize;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Current-thread runtime used for font waits and frame yields.
pub fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")
}

/// Font loader searching `font_dirs`, or the built-in face only when empty.
pub fn font_loader(font_dirs: &[PathBuf], timeout_ms: Option<u64>) -> FontLoader {
    let loader = if font_dirs.is_empty() {
        FontLoader::builtin_only()
    } else {
        FontLoader::new(Arc::new(DirectoryFontResolver::new(font_dirs.iter().cloned())))
    };
    match timeout_ms {
        Some(ms) => loader.with_timeout(Duration::from_millis(ms)),
        None => loader,
    }
}

/// States to process: the requested one, or all three.
pub fn selected_states(state: Option<InteractionState>) -> Vec<InteractionState> {
    match state {
        Some(state) => vec![state],
        None => InteractionState::ALL.to_vec(),
    }
}

/// Directory relative source paths resolve against.
pub fn base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Open a configuration document as a snapshot store.
///
/// Fails when the file is missing or not a JSON object. Individual invalid
/// fields are not errors; restoring drops them later.
pub fn open_store(config_path: &Path) -> Result<FileStore> {
    if !config_path.is_file() {
        bail!("Config file not found: {}", config_path.display());
    }
    let store = FileStore::new(config_path);
    store
        .get(BUTTON_KEY)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    Ok(store)
}

/// Restore a controller from a configuration document.
pub fn load_controller(
    config_path: &Path,
    fonts: FontLoader,
    rng: NoiseRng,
) -> Result<(Controller, RestoreReport)> {
    let store = open_store(config_path)?;
    let base = base_dir(config_path);
    debug!(config = %config_path.display(), base_dir = %base.display(), "loading configuration");
    Ok(Controller::restore(&store, Some(base), fonts, rng))
}

/// Print one warning line per discarded field.
pub fn print_report(report: &RestoreReport) {
    for field in &report.discarded {
        println!(
            "  {} invalid field '{}' replaced by its default",
            "!".yellow(),
            field
        );
    }
}
