//! # Fingerprint Test Vectors
//!
//! Fixed inputs with digests computed independently as
//! `sha256(json.dumps(obj, sort_keys=True, separators=(",", ":"), ensure_ascii=False))`.
//! A stored fingerprint written by any earlier build must keep matching, so
//! these vectors pin the canonical byte format.

use landing_core::{fingerprint_value, CanonicalBytes};
use serde_json::json;

fn check(value: serde_json::Value, canonical: &str, expected_hex: &str) {
    let cb = CanonicalBytes::from_value(&value).expect("canonicalization should succeed");
    assert_eq!(std::str::from_utf8(cb.as_bytes()).unwrap(), canonical);
    let fp = fingerprint_value(&value).expect("fingerprint should succeed");
    assert_eq!(fp.to_hex(), expected_hex);
}

#[test]
fn vector_flat_object() {
    check(
        json!({"b": 2, "a": 1, "c": "hello"}),
        r#"{"a":1,"b":2,"c":"hello"}"#,
        "264be526dd59f5bed5c756e96e5a6a08f285ca424658f70b981f2554b4709121",
    );
}

#[test]
fn vector_nested_object_and_array() {
    check(
        json!({"outer": {"b": 2, "a": 1}, "list": [3, 2, 1]}),
        r#"{"list":[3,2,1],"outer":{"a":1,"b":2}}"#,
        "11912f2dd3c354255a526d230468b0d40c32112625eca646bde6c92e3344881e",
    );
}

#[test]
fn vector_non_ascii_text_is_not_escaped() {
    check(
        json!({"name": "caf\u{e9}", "hero": {"headline": "Ship faster"}}),
        "{\"hero\":{\"headline\":\"Ship faster\"},\"name\":\"caf\u{e9}\"}",
        "a977bd25ab64aeb20138f45c19c955750f4168d1fe1d5fbbad634a47da881c31",
    );
}

#[test]
fn permuted_text_inputs_share_a_fingerprint() {
    let inputs = [
        r##"{"theme":{"text":"#111827","background":"#ffffff"},"hero":{"headline":"A"}}"##,
        r##"{"hero":{"headline":"A"},"theme":{"background":"#ffffff","text":"#111827"}}"##,
        r##"{"theme":{"background":"#ffffff","text":"#111827"},"hero":{"headline":"A"}}"##,
    ];
    let fps: Vec<_> = inputs
        .iter()
        .map(|s| {
            let v: serde_json::Value = serde_json::from_str(s).unwrap();
            fingerprint_value(&v).unwrap()
        })
        .collect();
    assert!(fps.windows(2).all(|w| w[0] == w[1]));
}
