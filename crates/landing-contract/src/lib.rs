//! # landing-contract — Landing Content Validation and Normalization
//!
//! Turns untrusted landing page content (an arbitrary JSON document) into a
//! normalized, render-ready document plus a stable content fingerprint.
//!
//! ## Pipeline
//!
//! [`ContentPipeline::validate_and_normalize`] runs three stages:
//!
//! - **Validation** reports every problem as a [`ValidationIssue`] with a
//!   stable [`IssueCode`] and a JSON Pointer field. Errors block rendering;
//!   warnings describe degradations the normalizer will apply.
//! - **Normalization** trims text, drops blank and unsafe optional fields,
//!   elides empty sections, resolves the theme, and derives SEO metadata.
//!   It runs only on documents with zero errors.
//! - **Fingerprinting** hashes the canonical JSON of the normalized document
//!   via `landing-core`. Equal normalized content always yields an equal
//!   fingerprint.
//!
//! ## Publishing
//!
//! The [`publish`] module uses the fingerprint to skip redundant writes and
//! to decide which cache tag to revalidate after a write.
//!
//! ## Crate Policy
//!
//! - Depends only on `landing-core` internally.
//! - Malformed content never produces `Err`; it produces an invalid
//!   [`ValidationResult`].
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod color;
pub mod config;
pub mod issue;
pub mod limits;
pub mod normalized;
pub mod pipeline;
pub mod publish;

mod link;
mod normalize;
mod raw;
mod schema;
mod theme;
mod validate;
mod video;

/// Version of the normalized document layout, stamped as `contractVersion`.
/// Bump when a change would alter the normalized output of existing input.
pub const CONTRACT_VERSION: u32 = 1;

pub use config::{ConfigError, PipelineConfig, CONFIG_ENV_VAR};
pub use issue::{IssueCode, ValidationIssue};
pub use landing_core::ContentFingerprint;
pub use normalize::ContractError;
pub use normalized::NormalizedContent;
pub use pipeline::{ContentPipeline, PipelineError, ValidationResult};
pub use publish::{
    cache_tag, publish, CacheInvalidator, ContentStore, InMemoryStore, PublishDecision,
    PublishError, PublishOutcome, RecordingInvalidator, StoreError, StoredContent, SwapOutcome,
};
