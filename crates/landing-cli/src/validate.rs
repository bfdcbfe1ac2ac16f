//! # Validate Subcommand
//!
//! Runs the full pipeline over one document and prints the
//! `ValidationResult` as JSON. Exit code 0 when valid, 1 otherwise.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use landing_contract::ContentPipeline;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the landing content JSON document.
    pub path: PathBuf,

    /// Print single-line JSON instead of pretty-printed output.
    #[arg(long)]
    pub compact: bool,
}

pub fn run_validate(
    args: &ValidateArgs,
    pipeline: &ContentPipeline,
    out: &mut impl Write,
) -> Result<u8> {
    let text = crate::read_document(&args.path)?;
    let result = pipeline.validate_and_normalize_str(&text)?;

    for issue in result.errors() {
        tracing::debug!(code = %issue.code, field = ?issue.field, "{}", issue.message);
    }
    tracing::info!(
        path = %args.path.display(),
        valid = result.is_valid(),
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated"
    );

    let json = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    writeln!(out, "{json}")?;

    Ok(if result.is_valid() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_doc(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("page.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn valid_document_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(
            &dir,
            r#"{"hero":{"headline":"Ship faster"},"benefits":{"primary":"Deploy daily."}}"#,
        );
        let pipeline = ContentPipeline::with_defaults().unwrap();
        let mut out = Vec::new();
        let code = run_validate(
            &ValidateArgs {
                path,
                compact: true,
            },
            &pipeline,
            &mut out,
        )
        .unwrap();
        assert_eq!(code, 0);
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["isValid"], true);
        assert_eq!(v["normalized"]["hero"]["headline"], "Ship faster");
    }

    #[test]
    fn invalid_document_exits_one_and_lists_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(&dir, r#"{"hero":{"headline":""}}"#);
        let pipeline = ContentPipeline::with_defaults().unwrap();
        let mut out = Vec::new();
        let code = run_validate(
            &ValidateArgs {
                path,
                compact: false,
            },
            &pipeline,
            &mut out,
        )
        .unwrap();
        assert_eq!(code, 1);
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["errors"].as_array().unwrap().len(), 2);
        assert!(v.get("contentSha").is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let pipeline = ContentPipeline::with_defaults().unwrap();
        let result = run_validate(
            &ValidateArgs {
                path: PathBuf::from("/nonexistent/page.json"),
                compact: false,
            },
            &pipeline,
            &mut Vec::new(),
        );
        assert!(result.is_err());
    }
}
