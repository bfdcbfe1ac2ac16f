//! # landing CLI entry point
//!
//! Parses command-line arguments, initializes tracing, builds the content
//! pipeline once, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use landing_cli::check::{run_check, CheckArgs};
use landing_cli::css::{run_css, CssArgs};
use landing_cli::fingerprint::{run_fingerprint, FingerprintArgs};
use landing_cli::validate::{run_validate, ValidateArgs};

/// Landing content pipeline CLI.
///
/// Validates landing page documents, prints their normalized form and
/// content fingerprint, and previews publish decisions.
#[derive(Parser, Debug)]
#[command(name = "landing", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to a pipeline configuration file (YAML or JSON). Defaults to
    /// $LANDING_CONFIG, then built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate and normalize a document; print the result as JSON.
    Validate(ValidateArgs),

    /// Print the content fingerprint of a valid document.
    Fingerprint(FingerprintArgs),

    /// Preview the publish decision against a stored fingerprint.
    Check(CheckArgs),

    /// Print the resolved theme as CSS custom properties.
    Css(CssArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let pipeline = match landing_cli::load_pipeline(cli.config.as_deref()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &pipeline, &mut stdout),
        Commands::Fingerprint(args) => run_fingerprint(&args, &pipeline, &mut stdout),
        Commands::Check(args) => run_check(&args, &pipeline, &mut stdout),
        Commands::Css(args) => run_css(&args, &pipeline, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
