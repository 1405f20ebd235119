//! Read-only helpers over a parsed API description document.
//!
//! The document is a plain `serde_json::Value` tree. Nothing here mutates it
//! or keeps state between calls.

use std::sync::OnceLock;

use serde_json::{Map, Value};

/// Returned for pointers that leave the document (`other.yaml#/...`).
fn empty_object() -> &'static Value {
    static EMPTY: OnceLock<Value> = OnceLock::new();
    EMPTY.get_or_init(|| Value::Object(Map::new()))
}

/// Follow a `$ref` pointer one hop, if `node` carries one.
///
/// - no `$ref`: `node` itself is returned
/// - external pointer (not `#/...`): an empty object, so field lookups read as absent
/// - local pointer that does not exist: `None`
///
/// Only one hop is taken. A target that is itself a pointer is returned as is,
/// which keeps resolution bounded even when schemas reference each other.
pub fn resolve<'a>(node: &'a Value, root: &'a Value) -> Option<&'a Value> {
    let Some(ref_path) = node.get("$ref").and_then(|v| v.as_str()) else {
        return Some(node);
    };
    let Some(pointer) = ref_path.strip_prefix("#/") else {
        tracing::trace!(reference = ref_path, "skipping external $ref");
        return Some(empty_object());
    };
    let target = lookup(root, pointer.split('/').map(unescape_segment));
    if target.is_none() {
        tracing::trace!(reference = ref_path, "unresolved $ref");
    }
    target
}

/// Walk `root` by literal keys. Sequences are indexed by numeric segments.
pub fn lookup<I, S>(root: &Value, segments: I) -> Option<&Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut current = root;
    for segment in segments {
        let segment = segment.as_ref();
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Decode JSON Pointer escapes so a segment can be used as a literal key.
fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// How meaningfully a field is present on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Key missing or `null`.
    Absent,
    /// Present but blank: `""`, `"  "`, `[]`, `[""]`, `{}`.
    Empty,
    /// Present with content.
    NonEmpty,
}

impl Presence {
    pub fn is_present(self) -> bool {
        self != Presence::Absent
    }

    pub fn is_non_empty(self) -> bool {
        self == Presence::NonEmpty
    }
}

/// Classify a field value.
///
/// Strings and sequences are judged on their trimmed text, with sequence
/// elements joined by a single space. Numbers and booleans always carry text.
pub fn presence(value: Option<&Value>) -> Presence {
    let blank = match value {
        None | Some(Value::Null) => return Presence::Absent,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => false,
    };
    if blank {
        Presence::Empty
    } else {
        Presence::NonEmpty
    }
}

/// Presence of `field` on `node`. Non-mapping nodes have no fields.
pub fn field_presence(node: &Value, field: &str) -> Presence {
    presence(node.as_object().and_then(|obj| obj.get(field)))
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_root() -> Value {
        serde_yaml::from_str(
            r##"
definitions:
  Pets:
    type: array
    items:
      $ref: "#/definitions/Pet"
  Pet:
    type: object
  a/b:
    type: string
  tilde~name:
    type: integer
parameters:
  Limit:
    name: limit
    in: query
    required: true
list:
  - first
  - second
"##,
        )
        .unwrap()
    }

    #[test]
    fn node_without_ref_is_returned_unchanged() {
        let root = sample_root();
        let node = json!({"type": "string"});
        assert_eq!(resolve(&node, &root), Some(&node));
    }

    #[test]
    fn local_ref_is_followed() {
        let root = sample_root();
        let node = json!({"$ref": "#/parameters/Limit"});
        let resolved = resolve(&node, &root).unwrap();
        assert_eq!(resolved["required"], json!(true));
    }

    #[test]
    fn only_one_hop_is_taken() {
        let root = sample_root();
        let node = json!({"$ref": "#/definitions/Pets/items"});
        let resolved = resolve(&node, &root).unwrap();
        assert_eq!(resolved, &json!({"$ref": "#/definitions/Pet"}));
    }

    #[test]
    fn escaped_segments_are_literal_keys() {
        let root = sample_root();
        let slash = json!({"$ref": "#/definitions/a~1b"});
        assert_eq!(resolve(&slash, &root).unwrap()["type"], "string");

        let tilde = json!({"$ref": "#/definitions/tilde~0name"});
        assert_eq!(resolve(&tilde, &root).unwrap()["type"], "integer");
    }

    #[test]
    fn numeric_segment_indexes_sequences() {
        let root = sample_root();
        let node = json!({"$ref": "#/list/1"});
        assert_eq!(resolve(&node, &root), Some(&json!("second")));
    }

    #[test]
    fn external_ref_resolves_to_empty_object() {
        let root = sample_root();
        let node = json!({"$ref": "common.yaml#/definitions/Pet"});
        assert_eq!(resolve(&node, &root), Some(&json!({})));
    }

    #[test]
    fn missing_target_is_none() {
        let root = sample_root();
        let node = json!({"$ref": "#/definitions/DoesNotExist"});
        assert_eq!(resolve(&node, &root), None);
    }

    #[test]
    fn non_string_ref_is_not_a_pointer() {
        let root = sample_root();
        let node = json!({"$ref": 42});
        assert_eq!(resolve(&node, &root), Some(&node));
    }

    #[test]
    fn presence_of_strings() {
        assert_eq!(presence(None), Presence::Absent);
        assert_eq!(presence(Some(&Value::Null)), Presence::Absent);
        assert_eq!(presence(Some(&json!(""))), Presence::Empty);
        assert_eq!(presence(Some(&json!("   "))), Presence::Empty);
        assert_eq!(presence(Some(&json!("x"))), Presence::NonEmpty);
    }

    #[test]
    fn presence_of_sequences() {
        assert_eq!(presence(Some(&json!([]))), Presence::Empty);
        assert_eq!(presence(Some(&json!(["", " "]))), Presence::Empty);
        assert_eq!(
            presence(Some(&json!(["application/json"]))),
            Presence::NonEmpty
        );
    }

    #[test]
    fn presence_of_other_values() {
        assert_eq!(presence(Some(&json!({}))), Presence::Empty);
        assert_eq!(presence(Some(&json!({"a": 1}))), Presence::NonEmpty);
        assert_eq!(presence(Some(&json!(0))), Presence::NonEmpty);
        assert_eq!(presence(Some(&json!(false))), Presence::NonEmpty);
    }

    #[test]
    fn field_presence_on_non_mapping_is_absent() {
        assert_eq!(field_presence(&json!("get"), "summary"), Presence::Absent);
        assert_eq!(
            field_presence(&json!({"summary": "List"}), "summary"),
            Presence::NonEmpty
        );
    }
}
