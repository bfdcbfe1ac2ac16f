//! # Check Subcommand
//!
//! Dry run of a publish: validates the document and prints the decision the
//! publisher would take against a stored fingerprint, without writing
//! anything. Exit code 1 only when the document is rejected.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use landing_contract::{ContentPipeline, PublishDecision};
use landing_core::ContentFingerprint;
use serde_json::json;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the landing content JSON document.
    pub path: PathBuf,

    /// Fingerprint currently stored for the page (64 lowercase hex
    /// characters). Omit for a page that has never been published.
    #[arg(long)]
    pub stored: Option<String>,

    /// Page slug, used to derive the cache tag.
    #[arg(long, default_value = "page")]
    pub slug: String,
}

pub fn run_check(args: &CheckArgs, pipeline: &ContentPipeline, out: &mut impl Write) -> Result<u8> {
    let stored = args
        .stored
        .as_deref()
        .map(|s| s.parse::<ContentFingerprint>())
        .transpose()
        .context("--stored is not a content fingerprint")?;

    let text = crate::read_document(&args.path)?;
    let result = pipeline.validate_and_normalize_str(&text)?;
    let decision = PublishDecision::decide(&args.slug, stored.as_ref(), &result);
    tracing::info!(slug = %args.slug, decision = ?decision, "publish check");

    let report = json!({
        "slug": args.slug,
        "decision": decision,
        "errors": result.errors(),
        "warnings": result.warnings(),
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;

    Ok(match decision {
        PublishDecision::Rejected => 1,
        PublishDecision::Unchanged { .. } | PublishDecision::Write { .. } => 0,
    })
}
