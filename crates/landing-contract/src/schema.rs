//! # Shape Schema
//!
//! The JSON Schema (Draft 2020-12) in `schemas/landing-content.schema.json`
//! declares the value type of every recognized field. It is embedded at
//! compile time and compiled once per pipeline. Type mismatches become
//! `invalid_type` errors addressed by JSON Pointer.
//!
//! Presence, length, and URL rules are not expressed in the schema; the
//! content validator owns those so that each carries its own issue code.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;

use crate::issue::{IssueCode, IssueReport};

const CONTENT_SCHEMA: &str = include_str!("../../../schemas/landing-content.schema.json");

/// Compiled content shape schema.
pub struct ShapeSchema {
    validator: Validator,
}

impl fmt::Debug for ShapeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeSchema").finish_non_exhaustive()
    }
}

impl ShapeSchema {
    /// Parse and compile the embedded schema.
    pub fn compile() -> Result<Self, String> {
        let schema: Value = serde_json::from_str(CONTENT_SCHEMA)
            .map_err(|e| format!("embedded schema is not JSON: {e}"))?;
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts.build(&schema).map_err(|e| e.to_string())?;
        Ok(Self { validator })
    }

    /// Record one `invalid_type` error per mismatch. Returns true when the
    /// document has the expected shape.
    pub fn check(&self, instance: &Value, report: &mut IssueReport) -> bool {
        let before = report.errors.len();
        for error in self.validator.iter_errors(instance) {
            let pointer = error.instance_path.to_string();
            let field = if pointer.is_empty() {
                None
            } else {
                Some(pointer.as_str())
            };
            report.error(IssueCode::InvalidType, field, error.to_string());
        }
        report.errors.len() == before
    }
}
