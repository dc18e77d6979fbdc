//! Open item-field container.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema-less extension payload attached to an item.
///
/// A mapping from string keys to arbitrary JSON values (scalars, nested
/// objects, or arrays). Keys are not validated and unknown entries pass
/// through untouched; the container is an explicit extension point, not a
/// typed record. Deserialization is lenient: anything other than a JSON
/// object, a missing or malformed payload included, collapses to the empty
/// mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ItemFields(Map<String, Value>);

impl ItemFields {
    /// Create an empty field container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up a field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a field, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Consumes the container and returns the inner map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl<'de> Deserialize<'de> for ItemFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Non-object payloads collapse to the empty mapping instead of
        // failing the whole request.
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self(map)),
            _ => Ok(Self::default()),
        }
    }
}

impl From<Map<String, Value>> for ItemFields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ItemFields> for Value {
    fn from(fields: ItemFields) -> Self {
        Self::Object(fields.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_passes_through() {
        let fields: ItemFields =
            serde_json::from_value(json!({"field1": "value1", "nested": {"n": 1}})).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("field1"), Some(&json!("value1")));
        assert_eq!(fields.get("nested"), Some(&json!({"n": 1})));
    }

    #[test]
    fn test_non_object_collapses_to_empty() {
        let fields: ItemFields = serde_json::from_value(json!("not an object")).unwrap();
        assert!(fields.is_empty());

        let fields: ItemFields = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert!(fields.is_empty());

        let fields: ItemFields = serde_json::from_value(json!(null)).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_serialize_is_transparent() {
        let mut fields = ItemFields::new();
        fields.insert("field1", json!("value1"));
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({"field1": "value1"})
        );
    }
}
