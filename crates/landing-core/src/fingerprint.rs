//! # Content Fingerprint
//!
//! A `ContentFingerprint` is the SHA-256 digest of a normalized document's
//! canonical bytes, rendered as 64 lowercase hex characters. Publish actions
//! compare the fresh fingerprint with the stored one and skip the
//! write-and-invalidate cycle when they match.
//!
//! ## Invariant
//!
//! `fingerprint()` accepts only `&CanonicalBytes`, so every fingerprint in
//! the system is computed over key-sorted JCS bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::FingerprintError;

/// SHA-256 fingerprint of a canonical document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentFingerprint([u8; 32]);

impl ContentFingerprint {
    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// True when `stored` names the same digest. A stored value that does
    /// not parse never matches, which forces a rewrite.
    pub fn matches(&self, stored: &str) -> bool {
        stored.parse::<Self>().map(|s| s == *self).unwrap_or(false)
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ContentFingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || FingerprintError::Malformed(s.to_string());
        if s.len() != 64 || !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(malformed());
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = s.get(i * 2..i * 2 + 2).ok_or_else(malformed)?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| malformed())?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for ContentFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentFingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Compute the SHA-256 fingerprint of canonical bytes.
pub fn fingerprint(data: &CanonicalBytes) -> ContentFingerprint {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentFingerprint(bytes)
}

/// Canonicalize and fingerprint a JSON tree.
///
/// # Errors
///
/// Returns `FingerprintError::NullDocument` for `null`: an absent document
/// means the caller tried to fingerprint an invalid result.
pub fn fingerprint_value(value: &Value) -> Result<ContentFingerprint, FingerprintError> {
    if value.is_null() {
        return Err(FingerprintError::NullDocument);
    }
    let cb = CanonicalBytes::from_value(value)?;
    Ok(fingerprint(&cb))
}
