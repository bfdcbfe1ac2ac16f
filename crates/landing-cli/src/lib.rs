//! # landing-cli — Landing Content Command-Line Interface
//!
//! Runs the content pipeline over documents on disk, for authoring and CI.
//!
//! ## Subcommands
//!
//! - `validate` — print the full validation result as JSON
//! - `fingerprint` — print only the content fingerprint of a valid document
//! - `check` — print the publish decision against a stored fingerprint
//! - `css` — print the resolved theme as CSS custom properties
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handlers; handlers write to a
//!   caller-supplied writer and return the process exit code.
//! - No business logic here: every rule lives in `landing-contract`.

pub mod check;
pub mod css;
pub mod fingerprint;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use landing_contract::{ContentPipeline, PipelineConfig};

/// Build the pipeline from `--config`, falling back to `LANDING_CONFIG` and
/// then the built-in defaults.
pub fn load_pipeline(config: Option<&Path>) -> Result<ContentPipeline> {
    let config = match config {
        Some(path) => PipelineConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PipelineConfig::from_env().context("failed to load config from LANDING_CONFIG")?,
    };
    ContentPipeline::new(config).context("failed to build content pipeline")
}

/// Read a content document as text. JSON parsing is left to the pipeline so
/// that malformed files are reported as `invalid_json` issues.
pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
