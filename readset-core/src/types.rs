//! Identity and result types for the readset cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// A named category of underlying records whose modification time can be
/// queried - typically a table or collection name.
///
/// Entity types are the unit of dependency tracking: each cache entry
/// remembers the set of entity types read while producing its response, and
/// staleness validation compares their last-modified timestamps against the
/// entry's creation time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    /// Create a new entity type from a collection name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the collection name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The result of one query execution.
///
/// A single well-defined result type: the payload is a JSON value whose
/// canonical serialized form is its serde_json encoding. The cache core
/// imposes no structural invariants beyond "round-trips exactly".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The execution payload.
    data: JsonValue,
}

impl QueryResponse {
    /// Create a response from an execution payload.
    pub fn new(data: JsonValue) -> Self {
        Self { data }
    }

    /// Get a reference to the payload.
    pub fn data(&self) -> &JsonValue {
        &self.data
    }

    /// Consume the response and return the payload.
    pub fn into_data(self) -> JsonValue {
        self.data
    }
}

impl From<JsonValue> for QueryResponse {
    fn from(data: JsonValue) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_type_display() {
        let book = EntityType::from("Book");
        assert_eq!(book.to_string(), "Book");
        assert_eq!(book.as_str(), "Book");
    }

    #[test]
    fn test_entity_type_equality_and_ordering() {
        let a = EntityType::from("Author");
        let b = EntityType::from("Book");
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a, EntityType::new("Author".to_string()));
    }

    #[test]
    fn test_entity_type_serde_transparent() {
        let book = EntityType::from("Book");
        let encoded = serde_json::to_string(&book).expect("serialize should succeed");
        assert_eq!(encoded, "\"Book\"");

        let decoded: EntityType = serde_json::from_str(&encoded).expect("deserialize should succeed");
        assert_eq!(decoded, book);
    }

    #[test]
    fn test_query_response_roundtrip() {
        let response = QueryResponse::new(json!({"books": [{"title": "X"}]}));
        let encoded = serde_json::to_value(&response).expect("serialize should succeed");
        let decoded: QueryResponse =
            serde_json::from_value(encoded).expect("deserialize should succeed");
        assert_eq!(decoded, response);
    }

    #[test]
    fn test_query_response_accessors() {
        let response = QueryResponse::new(json!([1, 2, 3]));
        assert_eq!(response.data(), &json!([1, 2, 3]));
        assert_eq!(response.into_data(), json!([1, 2, 3]));
    }
}
