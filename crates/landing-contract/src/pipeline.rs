//! # Validation Orchestrator
//!
//! [`ContentPipeline`] is the one entry point the rest of the system calls:
//! raw JSON in, [`ValidationResult`] out. It composes validation,
//! normalization, and fingerprinting; none of those stages is reachable
//! from outside this crate.
//!
//! ## Failure Semantics
//!
//! Malformed content is data: it comes back as `Ok` with `is_valid == false`
//! and a field-addressable error list. `Err(PipelineError)` means a defect
//! inside the pipeline itself (a stage contract was violated), never a bad
//! document.
//!
//! ## Concurrency
//!
//! The pipeline is immutable after construction and holds no per-call state.
//! Share one instance across threads freely.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use landing_core::{fingerprint_value, ContentFingerprint, FingerprintError};

use crate::config::{ConfigError, PipelineConfig};
use crate::issue::{IssueCode, IssueReport, ValidationIssue};
use crate::normalize::{ContractError, Normalizer};
use crate::normalized::NormalizedContent;
use crate::schema::ShapeSchema;
use crate::theme::ThemePalette;
use crate::validate::ContentValidator;
use crate::video::VideoResolver;

/// Internal failures. None of these is caused by document content.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("content schema failed to compile: {0}")]
    Schema(String),

    #[error("video pattern failed to compile: {0}")]
    VideoPattern(#[from] regex::Error),

    #[error("normalizer contract violated: {0}")]
    Contract(#[from] ContractError),

    #[error("fingerprint failed: {0}")]
    Fingerprint(#[from] FingerprintError),

    #[error("normalized content could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of validating and normalizing one document.
///
/// `normalized` and `content_sha` are present if and only if `is_valid`.
/// The fields are private so that invariant cannot be broken after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<NormalizedContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_sha: Option<ContentFingerprint>,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn invalid(report: IssueReport) -> Self {
        Self {
            is_valid: false,
            normalized: None,
            content_sha: None,
            errors: report.errors,
            warnings: report.warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn normalized(&self) -> Option<&NormalizedContent> {
        self.normalized.as_ref()
    }

    pub fn content_sha(&self) -> Option<&ContentFingerprint> {
        self.content_sha.as_ref()
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    /// The normalized document and its fingerprint, for valid results.
    pub fn into_normalized(self) -> Option<(NormalizedContent, ContentFingerprint)> {
        self.normalized.zip(self.content_sha)
    }
}

/// Validate → normalize → fingerprint.
#[derive(Debug)]
pub struct ContentPipeline {
    config: PipelineConfig,
    validator: ContentValidator,
    normalizer: Normalizer,
}

impl ContentPipeline {
    /// Build a pipeline from `config`, compiling the content schema and
    /// video patterns once.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let palette = ThemePalette::from_config(&config)?;
        let video = VideoResolver::new()?;
        let shape = ShapeSchema::compile().map_err(PipelineError::Schema)?;
        Ok(Self {
            validator: ContentValidator::new(shape, palette.clone(), video.clone()),
            normalizer: Normalizer::new(palette, video, config.meta_description_max),
            config,
        })
    }

    /// A pipeline with the built-in defaults.
    pub fn with_defaults() -> Result<Self, PipelineError> {
        Self::new(PipelineConfig::default())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validate `raw`; when valid, normalize and fingerprint it.
    pub fn validate_and_normalize(&self, raw: &Value) -> Result<ValidationResult, PipelineError> {
        let validated = self.validator.validate(raw);
        let report = validated.report;
        tracing::debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "content validated"
        );

        let content = match validated.content {
            Some(content) if report.is_clean() => content,
            _ => {
                tracing::info!(errors = report.errors.len(), "content rejected");
                return Ok(ValidationResult::invalid(report));
            }
        };

        let normalized = self.normalizer.normalize(&content)?;
        let content_sha = fingerprint_value(&serde_json::to_value(&normalized)?)?;
        tracing::debug!(content_sha = %content_sha, "content normalized");

        Ok(ValidationResult {
            is_valid: true,
            normalized: Some(normalized),
            content_sha: Some(content_sha),
            errors: report.errors,
            warnings: report.warnings,
        })
    }

    /// As [`Self::validate_and_normalize`], for raw JSON text. Text that is
    /// not JSON yields an invalid result with an `invalid_json` error.
    pub fn validate_and_normalize_str(&self, raw: &str) -> Result<ValidationResult, PipelineError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => self.validate_and_normalize(&value),
            Err(e) => {
                let mut report = IssueReport::default();
                report.error(IssueCode::InvalidJson, None, format!("not valid JSON: {e}"));
                Ok(ValidationResult::invalid(report))
            }
        }
    }
}
