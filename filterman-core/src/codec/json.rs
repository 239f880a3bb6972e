//! Structured format: a JSON object of `area id -> [sub-area, ...]`

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};
use tracing::warn;

use crate::error::{FilterError, Result};
use crate::model::{normalize, FilterStore, WILDCARD_RANGE};

/// Build the document for a store. Areas without sub-areas get an explicit
/// `["00-100"]`. A repeated id keeps its first position and its last value.
pub fn serialize(store: &FilterStore) -> Map<String, Value> {
    let mut doc = Map::new();

    for view in store.iterate() {
        let sub_areas: Vec<Value> = if view.sub_areas.is_empty() {
            vec![Value::from(WILDCARD_RANGE)]
        } else {
            view.sub_areas
                .iter()
                .map(|s| Value::from(normalize(s)))
                .collect()
        };

        if doc.insert(view.id.clone(), Value::Array(sub_areas)).is_some() {
            warn!(area = %view.id, "duplicate area id, later entry replaces earlier one");
        }
    }

    doc
}

/// Serialize with four-space indentation
pub fn to_string(store: &FilterStore) -> Result<String> {
    let doc = Value::Object(serialize(store));
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    doc.serialize(&mut ser)
        .map_err(|e| FilterError::malformed_document(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| FilterError::malformed_document(e.to_string()))
}

/// Build a fresh store from a document. Nothing is created unless the whole
/// document is valid.
pub fn deserialize(doc: &Value) -> Result<FilterStore> {
    let map = doc.as_object().ok_or_else(|| {
        FilterError::malformed_document(format!("expected an object, found {}", kind(doc)))
    })?;

    let mut entries = Vec::with_capacity(map.len());
    for (area, value) in map {
        let sub_areas = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(|s| s.trim().to_string()).ok_or_else(|| {
                        FilterError::malformed_document(format!(
                            "sub-area of '{}' must be a string, found {}",
                            area,
                            kind(item)
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Value::String(single) => vec![normalize(single.trim()).to_string()],
            other => {
                return Err(FilterError::malformed_document(format!(
                    "sub-areas of '{}' must be a list or a string, found {}",
                    area,
                    kind(other)
                )))
            }
        };
        entries.push((area.trim().to_string(), sub_areas));
    }

    let mut store = FilterStore::new();
    for (area, sub_areas) in entries {
        let handle = store.add_area(area);
        for token in sub_areas {
            store.add_sub_area(handle, token)?;
        }
    }
    store.mark_saved();
    Ok(store)
}

pub fn from_str(text: &str) -> Result<FilterStore> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| FilterError::malformed_document(e.to_string()))?;
    deserialize(&doc)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> FilterStore {
        let mut store = FilterStore::new();
        let a = store.add_area("A1");
        store.add_sub_area(a, "1").unwrap();
        store.add_sub_area(a, "*").unwrap();
        store.add_area("B2");
        store
    }

    #[test]
    fn test_serialize_expands_wildcards() {
        let doc = Value::Object(serialize(&sample()));
        assert_eq!(doc, json!({ "A1": ["1", "00-100"], "B2": ["00-100"] }));
    }

    #[test]
    fn test_serialize_keeps_store_order() {
        let mut store = FilterStore::new();
        store.add_area("Z");
        store.add_area("A");
        let keys: Vec<_> = serialize(&store).keys().cloned().collect();
        assert_eq!(keys, vec!["Z", "A"]);
    }

    #[test]
    fn test_to_string_uses_four_space_indent() {
        let text = to_string(&sample()).unwrap();
        assert!(text.starts_with("{\n    \"A1\": [\n        \"1\","));
    }

    #[test]
    fn test_round_trip() {
        let mut store = FilterStore::new();
        let a = store.add_area("A1");
        store.add_sub_area(a, "1").unwrap();
        store.add_sub_area(a, "5-9").unwrap();
        let b = store.add_area("North");
        store.add_sub_area(b, "x").unwrap();

        let loaded = from_str(&to_string(&store).unwrap()).unwrap();
        assert_eq!(loaded.iterate(), store.iterate());
        assert!(!loaded.is_dirty());
    }

    #[test]
    fn test_round_trip_materializes_empty_sub_areas() {
        let mut store = FilterStore::new();
        store.add_area("A1");

        let loaded = from_str(&to_string(&store).unwrap()).unwrap();
        assert_eq!(loaded.iterate()[0].sub_areas, vec!["00-100"]);
    }

    #[test]
    fn test_deserialize_trims_and_accepts_scalar() {
        let doc = json!({ " A1 ": [" 1 ", "2"], "B": " * ", "C": "7" });
        let store = deserialize(&doc).unwrap();
        let views = store.iterate();

        assert_eq!(views[0].id, "A1");
        assert_eq!(views[0].sub_areas, vec!["1", "2"]);
        assert_eq!(views[1].sub_areas, vec!["00-100"]);
        assert_eq!(views[2].sub_areas, vec!["7"]);
    }

    #[test]
    fn test_list_values_are_not_normalized() {
        let store = deserialize(&json!({ "A": ["*"] })).unwrap();
        assert_eq!(store.iterate()[0].sub_areas, vec!["*"]);
    }

    #[test]
    fn test_top_level_list_is_malformed() {
        let err = deserialize(&json!(["A1", "B1"])).unwrap_err();
        assert!(matches!(err, FilterError::MalformedDocument { .. }));
    }

    #[test]
    fn test_bad_value_shapes_are_malformed() {
        assert!(matches!(
            deserialize(&json!({ "A": 3 })),
            Err(FilterError::MalformedDocument { .. })
        ));
        assert!(matches!(
            deserialize(&json!({ "A": ["1", null] })),
            Err(FilterError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(from_str("{ nope"), Err(FilterError::MalformedDocument { .. })));
    }
}
