//! Tokens command implementation
//!
//! Prints the style tokens of the gradient button as JSON or as a CSS rule.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use buttonsmith_render::tokens::state_tokens;
use buttonsmith_render::{FontLoader, NoiseRng, StyleTokens};
use buttonsmith_spec::InteractionState;

use crate::input::load_controller;

/// Selector used for `--css` output.
pub const CSS_SELECTOR: &str = ".buttonsmith-button";

/// Compute the tokens of a configuration document.
pub fn collect(
    config_path: &Path,
    state: Option<InteractionState>,
    seed: Option<u64>,
) -> Result<StyleTokens> {
    let fonts = FontLoader::builtin_only();
    // Discarded fields are already logged; stdout stays machine-readable.
    let (controller, _report) = load_controller(config_path, fonts, NoiseRng::from_option(seed))?;

    let tokens = controller.tokens();
    Ok(match state {
        Some(state) => state_tokens(&tokens, state),
        None => tokens,
    })
}

/// Run the tokens command
///
/// Output goes to stdout without status lines so it can be piped.
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    config_path: &Path,
    state: Option<InteractionState>,
    seed: Option<u64>,
    css: bool,
) -> Result<ExitCode> {
    let tokens = collect(config_path, state, seed)?;
    if css {
        println!("{}", tokens.to_css(CSS_SELECTOR));
    } else {
        let json = serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?;
        println!("{}", json);
    }
    Ok(ExitCode::SUCCESS)
}
