//! # Canonical Serialization — JCS Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that feed a content fingerprint.
//!
//! ## Invariant
//!
//! The inner `Vec<u8>` is private. The only constructor walks the JSON tree,
//! sorts every object's keys, rejects floats, and serializes the result with
//! `serde_jcs` (RFC 8785): sorted keys, compact separators, no insignificant
//! whitespace. Two documents that differ only in key insertion order produce
//! the same bytes.
//!
//! Keys are ordered by their UTF-16 code units, the ordering RFC 8785
//! prescribes, so the explicit sort and the encoder never disagree.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by key-sorted JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - Object keys are sorted recursively; array order is preserved.
/// - Numbers are integers; floats are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains a
    /// non-integer number, and `CanonicalizationError::SerializationFailed` if
    /// the value cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Self::from_value(&value)
    }

    /// Construct canonical bytes from an already-built JSON tree.
    pub fn from_value(value: &Value) -> Result<Self, CanonicalizationError> {
        let sorted = sort_keys(value)?;
        let s = serde_jcs::to_string(&sorted)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Rebuild `value` with every object's keys in canonical order.
///
/// An explicit tree walk over the six JSON variants. Arrays keep their
/// element order; only object keys move.
pub fn sort_keys(value: &Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value.clone()),
        Value::Number(n) => {
            if !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value.clone())
        }
        Value::Array(items) => {
            let sorted: Result<Vec<_>, _> = items.iter().map(sort_keys).collect();
            Ok(Value::Array(sorted?))
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));
            let mut out = Map::new();
            for (k, v) in entries {
                out.insert(k.clone(), sort_keys(v)?);
            }
            Ok(Value::Object(out))
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_value_no_floats() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,30}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-zA-Z]{1,8}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn canonical_bytes_deterministic(value in json_value_no_floats()) {
            let a = CanonicalBytes::from_value(&value).unwrap();
            let b = CanonicalBytes::from_value(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }

        #[test]
        fn canonical_bytes_reparse_to_same_tree(value in json_value_no_floats()) {
            let cb = CanonicalBytes::from_value(&value).unwrap();
            let parsed: Value = serde_json::from_slice(cb.as_bytes()).unwrap();
            prop_assert_eq!(parsed, value);
        }

        #[test]
        fn sorting_is_idempotent(value in json_value_no_floats()) {
            let once = sort_keys(&value).unwrap();
            let twice = sort_keys(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
