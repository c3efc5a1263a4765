//! Canonical serialization for deterministic hashing and signing.
//!
//! Every reproducible-hash guarantee in this crate reduces to this module:
//! two structurally equal documents must canonicalize to byte-identical
//! output, regardless of how they were constructed in memory.
//!
//! ## Canonical form
//!
//! - UTF-8 JSON
//! - map keys sorted lexicographically (by Unicode code point) at every
//!   nesting level
//! - separators `","` and `":"`, no insignificant whitespace
//!
//! The routine is pure (no I/O, no clock reads) and total over
//! JSON-representable values. Input that cannot be represented as JSON
//! (non-string map keys, non-finite floats) is a programming error
//! upstream and surfaces as [`CanonicalError`], never a panic.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::hash::sha256_hex;

/// Canonicalization failure: the input has no JSON representation.
#[derive(Debug, Error)]
#[error("value is not JSON-representable: {source}")]
pub struct CanonicalError {
    #[from]
    source: serde_json::Error,
}

/// Serialize a value to canonical JSON bytes.
///
/// Structural equality implies byte equality:
/// `canon({"b":1,"a":2}) == canon({"a":2,"b":1})`.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CanonicalError> {
    let tree = serde_json::to_value(value)?;
    let mut buf = Vec::with_capacity(256);
    write_canonical(&tree, &mut buf)?;
    Ok(buf)
}

/// SHA-256 hex digest of a value's canonical bytes.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> Result<String, CanonicalError> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

fn write_canonical(value: &Value, buf: &mut Vec<u8>) -> Result<(), CanonicalError> {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        // serde_json's own formatting for numbers and strings: shortest
        // round-trippable numbers, standard JSON string escaping.
        Value::Number(_) | Value::String(_) => serde_json::to_writer(&mut *buf, value)?,
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_canonical(item, buf)?;
            }
            buf.push(b']');
        }
        Value::Object(map) => {
            // Explicit sort: correctness must not depend on serde_json's
            // map backing (preserve_order toggles it).
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            buf.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                serde_json::to_writer(&mut *buf, key)?;
                buf.push(b':');
                write_canonical(&map[key.as_str()], buf)?;
            }
            buf.push(b'}');
        }
    }
    Ok(())
}
