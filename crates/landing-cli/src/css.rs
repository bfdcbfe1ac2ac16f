//! # CSS Subcommand
//!
//! Prints the normalized theme of a valid document as a `:root` block of
//! CSS custom properties, using the configured variable names.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use landing_contract::ContentPipeline;

/// Arguments for the css subcommand.
#[derive(Args, Debug)]
pub struct CssArgs {
    /// Path to the landing content JSON document.
    pub path: PathBuf,
}

pub fn run_css(args: &CssArgs, pipeline: &ContentPipeline, out: &mut impl Write) -> Result<u8> {
    let text = crate::read_document(&args.path)?;
    let result = pipeline.validate_and_normalize_str(&text)?;

    let Some(normalized) = result.normalized() else {
        for issue in result.errors() {
            writeln!(out, "error: {issue}")?;
        }
        return Ok(1);
    };
    for issue in result.warnings() {
        tracing::warn!(code = %issue.code, "{}", issue.message);
    }
    writeln!(
        out,
        "{}",
        normalized.theme.to_css(&pipeline.config().css_variables)
    )?;
    Ok(0)
}
