// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;

/// Failure to encode a value with the live API's wire configuration.
///
/// Well-formed wire models never hit this; a failing encode is a programming
/// defect that the unit tests surface.
#[derive(Debug)]
pub struct WireError(pub String);

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wire encoding failed: {}", self.0)
    }
}

impl std::error::Error for WireError {}

/// Encodes a value exactly as the live API would serialize it.
///
/// The DTOs declare their wire naming (camelCase renames) on the types
/// themselves, so routing an example through the same `Serialize` impls
/// guarantees every document generator displays the same bytes the running
/// API returns. Declared property order is preserved.
pub fn to_wire_value<T: Serialize>(value: &T) -> Result<Value, WireError> {
    serde_json::to_value(value).map_err(|e| WireError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::to_wire_value;
    use crate::models::{TodoItemModel, TodoListViewModel};
    use serde_json::json;

    fn sample_item() -> TodoItemModel {
        TodoItemModel {
            id: "a03952ca-880e-4af7-9cfa-630be0feb4a5".to_string(),
            text: "Buy eggs 🥚".to_string(),
            is_completed: false,
            last_updated: "2024-08-06 12:00:00Z".to_string(),
        }
    }

    #[test]
    fn wire_encoding_uses_camel_case_names() {
        let value = to_wire_value(&sample_item()).expect("encode item");
        let object = value.as_object().expect("json object");

        assert!(object.contains_key("isCompleted"));
        assert!(object.contains_key("lastUpdated"));
        assert!(!object.contains_key("is_completed"));
    }

    #[test]
    fn wire_encoding_preserves_declared_property_order() {
        let value = to_wire_value(&sample_item()).expect("encode item");
        let keys: Vec<&str> = value
            .as_object()
            .expect("json object")
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys, vec!["id", "text", "isCompleted", "lastUpdated"]);
    }

    #[test]
    fn wire_encoding_is_deterministic() {
        let first = to_wire_value(&sample_item()).expect("first encode");
        let second = to_wire_value(&sample_item()).expect("second encode");
        assert_eq!(first, second);
    }

    #[test]
    fn wire_encoding_handles_nested_graphs() {
        let list = TodoListViewModel {
            items: vec![sample_item()],
        };
        let value = to_wire_value(&list).expect("encode list");

        assert_eq!(
            value,
            json!({
                "items": [{
                    "id": "a03952ca-880e-4af7-9cfa-630be0feb4a5",
                    "text": "Buy eggs 🥚",
                    "isCompleted": false,
                    "lastUpdated": "2024-08-06 12:00:00Z",
                }]
            })
        );
    }

    #[test]
    fn wire_round_trip_reproduces_the_original_value() {
        let list = TodoListViewModel {
            items: vec![sample_item()],
        };
        let encoded = to_wire_value(&list).expect("encode list");
        let decoded: TodoListViewModel =
            serde_json::from_value(encoded).expect("decode list");

        assert_eq!(decoded, list);
    }
}
