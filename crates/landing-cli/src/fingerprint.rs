//! # Fingerprint Subcommand
//!
//! Prints the content fingerprint of a valid document, one line of hex.
//! Invalid documents print one `error:` line per issue and exit 1.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use landing_contract::ContentPipeline;

/// Arguments for the fingerprint subcommand.
#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Path to the landing content JSON document.
    pub path: PathBuf,
}

pub fn run_fingerprint(
    args: &FingerprintArgs,
    pipeline: &ContentPipeline,
    out: &mut impl Write,
) -> Result<u8> {
    let text = crate::read_document(&args.path)?;
    let result = pipeline.validate_and_normalize_str(&text)?;

    match result.content_sha() {
        Some(sha) => {
            writeln!(out, "{sha}")?;
            Ok(0)
        }
        None => {
            for issue in result.errors() {
                writeln!(out, "error: {issue}")?;
            }
            Ok(1)
        }
    }
}
