//! JSON output for compiled schemas
//!
//! Two shapes are produced:
//!
//! - [`to_json_schema`]: the canonical form, JSON-Schema naming plus
//!   `_`-prefixed metadata (`_label`, `_customMessages`, `_customValidators`)
//!   and the non-standard `exactLength` keyword.
//! - [`to_engine_schema`]: the same tree with every `_` key removed and
//!   `exactLength` rewritten as `minLength`/`maxLength`, safe for engines that
//!   reject unknown keywords.

use crate::constraint::number_value;
use crate::schema::{SchemaKind, SchemaNode};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Prefix marking internal metadata keywords
pub const METADATA_PREFIX: char = '_';

/// Canonical JSON form of a node
pub fn to_json_schema(node: &SchemaNode) -> Value {
    let mut out = Map::new();

    match node.kind {
        SchemaKind::Any => {}
        SchemaKind::Union => {
            out.insert(
                "oneOf".to_string(),
                Value::Array(node.variants.iter().map(to_json_schema).collect()),
            );
        }
        kind => {
            out.insert("type".to_string(), Value::String(kind.as_str().to_string()));
        }
    }

    if let Some(format) = node.format {
        out.insert("format".to_string(), Value::String(format.as_str().to_string()));
    }

    // String constraints
    let s = &node.string;
    insert_count(&mut out, "minLength", s.min_length);
    insert_count(&mut out, "maxLength", s.max_length);
    insert_count(&mut out, "exactLength", s.exact_length);

    // Numeric constraints
    let n = &node.numeric;
    insert_number(&mut out, "minimum", n.minimum);
    insert_number(&mut out, "maximum", n.maximum);
    insert_number(&mut out, "exclusiveMinimum", n.exclusive_minimum);
    insert_number(&mut out, "exclusiveMaximum", n.exclusive_maximum);
    insert_number(&mut out, "multipleOf", n.multiple_of);

    // Array constraints
    insert_count(&mut out, "minItems", node.list.min_items);
    insert_count(&mut out, "maxItems", node.list.max_items);

    if let Some(pattern) = &node.pattern {
        out.insert("pattern".to_string(), Value::String(pattern.clone()));
    }
    if let Some(values) = &node.enum_values {
        out.insert("enum".to_string(), Value::Array(values.clone()));
    }

    if let Some(items) = &node.items {
        out.insert("items".to_string(), to_json_schema(items));
    }

    if node.kind == SchemaKind::Object {
        let properties: Map<String, Value> = node
            .properties
            .iter()
            .map(|(key, child)| (key.clone(), to_json_schema(child)))
            .collect();
        out.insert("properties".to_string(), Value::Object(properties));

        // empty required lists are omitted, not serialized as []
        if !node.required.is_empty() {
            out.insert(
                "required".to_string(),
                Value::Array(node.required.iter().cloned().map(Value::String).collect()),
            );
        }
    }

    if let Some(description) = &node.description {
        out.insert("description".to_string(), Value::String(description.clone()));
    }
    if let Some(default) = &node.default {
        out.insert("default".to_string(), default.clone());
    }

    // Metadata
    if let Some(label) = &node.label {
        out.insert("_label".to_string(), Value::String(label.clone()));
    }
    if !node.custom_messages.is_empty() {
        let messages: Map<String, Value> = node
            .custom_messages
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        out.insert("_customMessages".to_string(), Value::Object(messages));
    }
    if !node.custom_validators.is_empty() {
        out.insert(
            "_customValidators".to_string(),
            Value::Array(
                node.custom_validators
                    .iter()
                    .map(|v| Value::String(v.name().to_string()))
                    .collect(),
            ),
        );
    }

    Value::Object(out)
}

/// Engine-safe JSON form: metadata stripped, `exactLength` rewritten
pub fn to_engine_schema(node: &SchemaNode) -> Value {
    let mut value = to_json_schema(node);
    strip_metadata(&mut value);
    value
}

/// Remove `_` keys and rewrite `exactLength` recursively, in place
///
/// Keys under `properties` are field names, not keywords, and are kept;
/// `default` and `enum` hold data and are left alone.
pub fn strip_metadata(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|key, _| !key.starts_with(METADATA_PREFIX));

            if let Some(exact) = map.remove("exactLength") {
                map.insert("minLength".to_string(), exact.clone());
                map.insert("maxLength".to_string(), exact);
            }

            for (key, child) in map.iter_mut() {
                if key == "default" || key == "enum" {
                    continue;
                }
                if key == "properties" {
                    if let Value::Object(props) = child {
                        props.values_mut().for_each(strip_metadata);
                    }
                } else {
                    strip_metadata(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_metadata),
        _ => {}
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json_schema(self).serialize(serializer)
    }
}

fn insert_count(out: &mut Map<String, Value>, key: &str, value: Option<usize>) {
    if let Some(v) = value {
        out.insert(key.to_string(), Value::from(v));
    }
}

fn insert_number(out: &mut Map<String, Value>, key: &str, value: Option<f64>) {
    if let Some(v) = value {
        out.insert(key.to_string(), number_value(v));
    }
}
