//! # Idempotent Publish
//!
//! Decides whether a validated document needs to be written and which cache
//! tag to revalidate afterwards. Persistence and cache invalidation belong
//! to the caller; this module defines the contracts they must satisfy:
//!
//! - [`ContentStore::compare_and_swap`] writes only when the stored
//!   fingerprint still equals the one the decision was made against. This
//!   serializes concurrent publishes per slug: of two racing writers that
//!   both read the same stored fingerprint, exactly one succeeds.
//! - [`CacheInvalidator::revalidate_tag`] is called only after a write that
//!   changed the fingerprint. Unchanged content invalidates nothing.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use landing_core::ContentFingerprint;

use crate::issue::ValidationIssue;
use crate::normalized::NormalizedContent;
use crate::pipeline::{ContentPipeline, PipelineError, ValidationResult};

/// Prefix of every landing page cache tag.
pub const CACHE_TAG_PREFIX: &str = "landing:";

/// Cache tag for a page slug: `landing:<slug>`.
pub fn cache_tag(slug: &str) -> String {
    format!("{CACHE_TAG_PREFIX}{slug}")
}

/// What a publish of one document should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PublishDecision {
    /// The document is invalid; nothing is written.
    Rejected,
    /// The stored fingerprint already matches; skip write and invalidation.
    #[serde(rename_all = "camelCase")]
    Unchanged { content_sha: ContentFingerprint },
    /// Write the new content, then revalidate the tag.
    #[serde(rename_all = "camelCase")]
    Write {
        content_sha: ContentFingerprint,
        revalidate_tag: String,
    },
}

impl PublishDecision {
    /// Compare a pipeline result with the fingerprint currently stored for
    /// `slug` (`None` when the page has never been published).
    pub fn decide(
        slug: &str,
        stored: Option<&ContentFingerprint>,
        result: &ValidationResult,
    ) -> PublishDecision {
        let Some(sha) = result.content_sha() else {
            return PublishDecision::Rejected;
        };
        if stored == Some(sha) {
            PublishDecision::Unchanged { content_sha: *sha }
        } else {
            PublishDecision::Write {
                content_sha: *sha,
                revalidate_tag: cache_tag(slug),
            }
        }
    }
}

/// A stored page: normalized content plus its fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredContent {
    pub normalized_content: NormalizedContent,
    pub content_sha: ContentFingerprint,
}

/// Result of a compare-and-swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    Swapped,
    /// The stored fingerprint changed since it was read.
    Conflict { current: Option<ContentFingerprint> },
}

/// Collaborator failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("content store error: {0}")]
    Backend(String),
    #[error("cache invalidation failed for tag '{tag}': {reason}")]
    Invalidation { tag: String, reason: String },
}

/// Persistence keyed by page slug.
pub trait ContentStore {
    /// Fingerprint currently stored for `slug`.
    fn load_sha(&self, slug: &str) -> Result<Option<ContentFingerprint>, StoreError>;

    /// Store `record` only if the current fingerprint equals `expected`.
    fn compare_and_swap(
        &self,
        slug: &str,
        expected: Option<&ContentFingerprint>,
        record: StoredContent,
    ) -> Result<SwapOutcome, StoreError>;
}

/// On-demand cache revalidation.
pub trait CacheInvalidator {
    fn revalidate_tag(&self, tag: &str) -> Result<(), StoreError>;
}

/// In-process store, for tests and single-node tooling.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pages: Mutex<HashMap<String, StoredContent>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slug: &str) -> Option<StoredContent> {
        self.pages.lock().get(slug).cloned()
    }
}

impl ContentStore for InMemoryStore {
    fn load_sha(&self, slug: &str) -> Result<Option<ContentFingerprint>, StoreError> {
        Ok(self.pages.lock().get(slug).map(|p| p.content_sha))
    }

    fn compare_and_swap(
        &self,
        slug: &str,
        expected: Option<&ContentFingerprint>,
        record: StoredContent,
    ) -> Result<SwapOutcome, StoreError> {
        let mut pages = self.pages.lock();
        let current = pages.get(slug).map(|p| p.content_sha);
        if current.as_ref() != expected {
            return Ok(SwapOutcome::Conflict { current });
        }
        pages.insert(slug.to_string(), record);
        Ok(SwapOutcome::Swapped)
    }
}

/// Invalidator that records the tags it was asked to revalidate.
#[derive(Debug, Default)]
pub struct RecordingInvalidator {
    tags: Mutex<Vec<String>>,
}

impl RecordingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> Vec<String> {
        self.tags.lock().clone()
    }
}

impl CacheInvalidator for RecordingInvalidator {
    fn revalidate_tag(&self, tag: &str) -> Result<(), StoreError> {
        self.tags.lock().push(tag.to_string());
        Ok(())
    }
}

/// What [`publish`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    Rejected {
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationIssue>,
    },
    Unchanged {
        content_sha: ContentFingerprint,
    },
    Written {
        content_sha: ContentFingerprint,
        revalidated_tag: String,
    },
    /// Another publish for the same slug won the race; nothing was written.
    Conflict {
        current: Option<ContentFingerprint>,
    },
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validate, compare with the stored fingerprint, write on change, and
/// revalidate the page's cache tag after a successful write.
pub fn publish(
    pipeline: &ContentPipeline,
    store: &impl ContentStore,
    invalidator: &impl CacheInvalidator,
    slug: &str,
    raw: &Value,
) -> Result<PublishOutcome, PublishError> {
    let result = pipeline.validate_and_normalize(raw)?;
    let errors = result.errors().to_vec();
    let warnings = result.warnings().to_vec();
    let Some((normalized_content, content_sha)) = result.into_normalized() else {
        tracing::warn!(slug, errors = errors.len(), "publish rejected");
        return Ok(PublishOutcome::Rejected { errors, warnings });
    };

    let stored = store.load_sha(slug)?;
    if stored == Some(content_sha) {
        tracing::info!(slug, content_sha = %content_sha, "content unchanged; publish skipped");
        return Ok(PublishOutcome::Unchanged { content_sha });
    }

    let record = StoredContent {
        normalized_content,
        content_sha,
    };
    match store.compare_and_swap(slug, stored.as_ref(), record)? {
        SwapOutcome::Swapped => {
            let tag = cache_tag(slug);
            invalidator.revalidate_tag(&tag)?;
            tracing::info!(slug, content_sha = %content_sha, tag = %tag, "content published");
            Ok(PublishOutcome::Written {
                content_sha,
                revalidated_tag: tag,
            })
        }
        SwapOutcome::Conflict { current } => {
            tracing::warn!(slug, "concurrent publish detected; write abandoned");
            Ok(PublishOutcome::Conflict { current })
        }
    }
}
