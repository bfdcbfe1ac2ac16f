//! # Validation Issues
//!
//! A `ValidationIssue` is one field-addressable finding. Errors make a
//! document invalid; warnings leave it valid but record a degradation the
//! normalizer corrected or that the renderer must work around.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable issue code, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The input text was not JSON at all.
    InvalidJson,
    /// A field holds a value of the wrong JSON type.
    InvalidType,
    /// The document passed the type check but could not be read.
    InvalidDocument,
    /// A required field is absent or blank.
    Required,
    /// None of benefits, options, or proof has renderable content.
    MissingContentGroup,
    /// A URL uses a scheme other than `https`.
    InsecureUrl,
    /// A URL field does not parse as an absolute URL.
    InvalidUrl,
    /// Text is longer than its soft cap but within its hard limit.
    LengthSoftCap,
    /// Text is longer than its hard limit.
    LengthHardLimit,
    /// The demo video cannot be embedded and will render as a link.
    VideoNotEmbeddable,
    /// Theme text and background fall below the minimum contrast ratio.
    LowContrast,
    /// A theme color is not a `#rgb` or `#rrggbb` hex value.
    InvalidColor,
}

impl IssueCode {
    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::InvalidType => "invalid_type",
            Self::InvalidDocument => "invalid_document",
            Self::Required => "required",
            Self::MissingContentGroup => "missing_content_group",
            Self::InsecureUrl => "insecure_url",
            Self::InvalidUrl => "invalid_url",
            Self::LengthSoftCap => "length_soft_cap",
            Self::LengthHardLimit => "length_hard_limit",
            Self::VideoNotEmbeddable => "video_not_embeddable",
            Self::LowContrast => "low_contrast",
            Self::InvalidColor => "invalid_color",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable issue code.
    pub code: IssueCode,
    /// Human-readable description, suitable for direct display.
    pub message: String,
    /// JSON Pointer to the offending field, when the issue has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "[{}] {}: {}", self.code, field, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Errors and warnings collected during one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl IssueReport {
    pub fn error(&mut self, code: IssueCode, field: Option<&str>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            code,
            message: message.into(),
            field: field.map(str::to_string),
        });
    }

    pub fn warn(&mut self, code: IssueCode, field: Option<&str>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            code,
            message: message.into(),
            field: field.map(str::to_string),
        });
    }

    /// True when no error was recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
