//! Deterministic cache-key derivation.
//!
//! A key is the SHA-256 of a canonical JSON fingerprint of the namespace,
//! query text, and variables. The fingerprint is written with explicitly
//! sorted object keys at every nesting level, so structurally identical
//! inputs produce the identical key regardless of map insertion order - and
//! regardless of which object representation serde_json was built with.
//! JSON itself distinguishes `"1"` from `1`.

use readset_core::{CacheResult, SerializationError};
use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a derived key in hex characters (SHA-256 output).
pub const KEY_LENGTH: usize = 64;

/// An opaque, fixed-length cache key.
///
/// Keys index stored results; no uniqueness is guaranteed beyond what
/// SHA-256 provides. Collisions are accepted as improbable and are not
/// mitigated further.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive a key from a query and its variables.
    ///
    /// Pure function: two calls with identical query text and structurally
    /// identical variables yield the identical key. The optional namespace
    /// partitions keyspaces so separate deployments never share entries.
    pub fn derive(
        namespace: Option<&str>,
        query: &str,
        variables: &JsonValue,
    ) -> CacheResult<Self> {
        let fingerprint = canonical_fingerprint(namespace, query, variables)?;
        let mut hasher = Sha256::new();
        hasher.update(fingerprint.as_bytes());
        Ok(Self(hex::encode(hasher.finalize())))
    }

    /// Get the key as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialize the key inputs to canonical JSON.
fn canonical_fingerprint(
    namespace: Option<&str>,
    query: &str,
    variables: &JsonValue,
) -> CacheResult<String> {
    let mut envelope = serde_json::Map::new();
    if let Some(namespace) = namespace {
        envelope.insert("namespace".to_string(), JsonValue::String(namespace.to_string()));
    }
    envelope.insert("query".to_string(), JsonValue::String(query.to_string()));
    envelope.insert("variables".to_string(), variables.clone());

    let mut out = String::new();
    write_canonical(&JsonValue::Object(envelope), &mut out)?;
    Ok(out)
}

/// Write `value` as JSON with object keys sorted at every nesting level.
///
/// Sorting is done here rather than trusting the map type backing
/// `JsonValue::Object`: that backing is a serde_json feature choice subject
/// to downstream feature unification, and key determinism must not hinge
/// on it.
fn write_canonical(value: &JsonValue, out: &mut String) -> CacheResult<()> {
    match value {
        JsonValue::Object(map) => {
            let mut entries: Vec<(&String, &JsonValue)> = map.iter().collect();
            entries.sort_by_key(|(key, _)| *key);

            out.push('{');
            for (i, (key, member)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&to_json_string(&JsonValue::String(key.clone()))?);
                out.push(':');
                write_canonical(member, out)?;
            }
            out.push('}');
        }
        JsonValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        leaf => out.push_str(&to_json_string(leaf)?),
    }
    Ok(())
}

fn to_json_string(value: &JsonValue) -> CacheResult<String> {
    serde_json::to_string(value).map_err(|e| {
        SerializationError::KeyInput {
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_derive_is_deterministic() {
        let variables = json!({"limit": 10, "author": "Le Guin"});
        let k1 = CacheKey::derive(None, "{ books { title } }", &variables)
            .expect("derive should succeed");
        let k2 = CacheKey::derive(None, "{ books { title } }", &variables)
            .expect("derive should succeed");
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_derive_fixed_length() {
        let k = CacheKey::derive(None, "{ books { title } }", &json!({}))
            .expect("derive should succeed");
        assert_eq!(k.as_str().len(), KEY_LENGTH);
    }

    #[test]
    fn test_query_text_changes_key() {
        let variables = json!({});
        let k1 = CacheKey::derive(None, "{ books { title } }", &variables)
            .expect("derive should succeed");
        let k2 = CacheKey::derive(None, "{ books { isbn } }", &variables)
            .expect("derive should succeed");
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_variable_value_changes_key() {
        let k1 = CacheKey::derive(None, "q", &json!({"limit": 10}))
            .expect("derive should succeed");
        let k2 = CacheKey::derive(None, "q", &json!({"limit": 11}))
            .expect("derive should succeed");
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_value_types_are_distinguished() {
        let k1 = CacheKey::derive(None, "q", &json!({"limit": 1}))
            .expect("derive should succeed");
        let k2 = CacheKey::derive(None, "q", &json!({"limit": "1"}))
            .expect("derive should succeed");
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_canonical_fingerprint_sorts_keys_at_every_level() {
        // The fingerprint must come out sorted even when the maps were
        // built in reverse order, whatever representation backs them.
        let mut inner = serde_json::Map::new();
        inner.insert("y".to_string(), json!(false));
        inner.insert("x".to_string(), json!(true));

        let mut variables = serde_json::Map::new();
        variables.insert("b".to_string(), JsonValue::Object(inner));
        variables.insert("a".to_string(), json!(1));

        let fingerprint = canonical_fingerprint(None, "q", &JsonValue::Object(variables))
            .expect("fingerprint should succeed");
        assert_eq!(
            fingerprint,
            r#"{"query":"q","variables":{"a":1,"b":{"x":true,"y":false}}}"#
        );
    }

    #[test]
    fn test_variable_order_is_insignificant() {
        // Keys are written in sorted order, so insertion order cannot leak
        // into the fingerprint.
        let mut forward = serde_json::Map::new();
        forward.insert("a".to_string(), json!(1));
        forward.insert("b".to_string(), json!({"x": true, "y": false}));

        let mut reversed = serde_json::Map::new();
        reversed.insert("b".to_string(), json!({"y": false, "x": true}));
        reversed.insert("a".to_string(), json!(1));

        let k1 = CacheKey::derive(None, "q", &JsonValue::Object(forward))
            .expect("derive should succeed");
        let k2 = CacheKey::derive(None, "q", &JsonValue::Object(reversed))
            .expect("derive should succeed");
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_namespace_partitions_keys() {
        let variables = json!({});
        let bare = CacheKey::derive(None, "q", &variables).expect("derive should succeed");
        let a = CacheKey::derive(Some("tenant-a"), "q", &variables)
            .expect("derive should succeed");
        let b = CacheKey::derive(Some("tenant-b"), "q", &variables)
            .expect("derive should succeed");
        assert_ne!(bare, a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_array_order_is_significant() {
        let k1 = CacheKey::derive(None, "q", &json!({"ids": [1, 2]}))
            .expect("derive should succeed");
        let k2 = CacheKey::derive(None, "q", &json!({"ids": [2, 1]}))
            .expect("derive should succeed");
        assert_ne!(k1, k2);
    }
}
