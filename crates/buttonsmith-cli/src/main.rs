//! Buttonsmith CLI - Command-line interface for UI button asset rendering
//!
//! This binary renders nine-patch and gradient button rasters, emits style
//! tokens, generates grain noise tiles and normalizes configuration files.

use std::path::PathBuf;
use std::process::ExitCode;

use buttonsmith_spec::{Color, InteractionState};
use clap::{Args, Parser, Subcommand};

// Use modules from the library crate
use buttonsmith_cli::commands;
use buttonsmith_cli::input::init_logging;

/// Buttonsmith - UI button and nine-patch asset renderer
#[derive(Parser)]
#[command(name = "buttonsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log engine decisions (font waits, noise regeneration) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Font lookup options shared by the raster commands.
#[derive(Args, Debug, Clone, Default)]
struct FontArgs {
    /// Directory searched for `<family>.ttf|.otf` (repeatable)
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Maximum time to wait for the label font before falling back
    #[arg(long)]
    font_timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the nine-patch asset, one PNG per state
    Render {
        /// Path to the configuration document
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Render a single state (normal, hover, active)
        #[arg(long)]
        state: Option<InteractionState>,

        #[command(flatten)]
        fonts: FontArgs,

        /// Noise seed (default: random)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Rasterize the gradient button, one PNG per state
    Button {
        /// Path to the configuration document
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Render a single state (normal, hover, active)
        #[arg(long)]
        state: Option<InteractionState>,

        #[command(flatten)]
        fonts: FontArgs,

        /// Noise seed (default: random)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the style tokens of the gradient button
    Tokens {
        /// Path to the configuration document
        #[arg(short, long)]
        config: PathBuf,

        /// Only the shared tokens plus this state's ramp
        #[arg(long)]
        state: Option<InteractionState>,

        /// Noise seed (default: random)
        #[arg(long)]
        seed: Option<u64>,

        /// Print a CSS rule instead of JSON
        #[arg(long)]
        css: bool,
    },

    /// Generate a 128x128 grain noise tile
    Noise {
        /// Base color (hex, `#` optional, 3 or 6 digits)
        #[arg(long)]
        color: Color,

        /// Intensity in percent
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        amount: u32,

        /// Output PNG path
        #[arg(short, long)]
        out: PathBuf,

        /// RNG seed (default: random)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Normalize a configuration document
    Fmt {
        /// Path to the configuration document
        #[arg(short, long)]
        config: PathBuf,

        /// Output file path (default: overwrite input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            config,
            out,
            state,
            fonts,
            seed,
        } => commands::render::run(
            &config,
            &out,
            state,
            &fonts.font_dirs,
            fonts.font_timeout_ms,
            seed,
        ),
        Commands::Button {
            config,
            out,
            state,
            fonts,
            seed,
        } => commands::button::run(
            &config,
            &out,
            state,
            &fonts.font_dirs,
            fonts.font_timeout_ms,
            seed,
        ),
        Commands::Tokens {
            config,
            state,
            seed,
            css,
        } => commands::tokens::run(&config, state, seed, css),
        Commands::Noise {
            color,
            amount,
            out,
            seed,
        } => commands::noise::run(color, amount, &out, seed),
        Commands::Fmt { config, output } => commands::fmt::run(&config, output.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
