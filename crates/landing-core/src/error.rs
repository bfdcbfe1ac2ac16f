//! # Error Types
//!
//! Errors raised while canonicalizing or fingerprinting a document. Both are
//! contract violations between pipeline stages, never content problems:
//! malformed content is reported as validation data upstream and never
//! reaches this crate.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values have no single canonical text form across encoders.
    /// Normalized documents carry integers and strings only.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error raised by the fingerprinter.
#[derive(Error, Debug)]
pub enum FingerprintError {
    /// The caller passed an absent document. Only valid results carry
    /// normalized content, so this means an invalid result was fingerprinted.
    #[error("cannot fingerprint a null document")]
    NullDocument,

    /// The document could not be brought into canonical form.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A stored fingerprint string was not 64 lowercase hex characters.
    #[error("malformed fingerprint '{0}': expected 64 lowercase hex characters")]
    Malformed(String),
}
