//! # landing-core — Canonical Bytes and Content Fingerprints
//!
//! Leaf crate of the landing content pipeline. It owns the one path by which
//! a normalized landing document becomes a fingerprint:
//!
//! 1. **`CanonicalBytes` newtype.** Object keys are sorted by an explicit
//!    recursive walk, then the tree is serialized with RFC 8785 (JCS).
//!    No raw `serde_json::to_vec()` feeds a digest.
//!
//! 2. **`fingerprint()` accepts only `&CanonicalBytes`.** The SHA-256 digest
//!    can only be computed over canonical bytes, so two documents that differ
//!    in key order always fingerprint identically.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `landing-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod fingerprint;

pub use canonical::CanonicalBytes;
pub use error::{CanonicalizationError, FingerprintError};
pub use fingerprint::{fingerprint, fingerprint_value, ContentFingerprint};
