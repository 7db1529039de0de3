//! Object schema assembly
//!
//! Walks an ordered field map and builds an object node. Required markers are
//! collected from two places: a trailing `!` on the key (wins) and the
//! transient flag on the compiled value. Both end up in the parent's
//! `required` list and the child's flag is cleared.

use crate::error::{DslError, Result};
use crate::grammar;
use crate::registry::CustomTypeRegistry;
use crate::schema::SchemaNode;
use serde_json::Value;

// ============================================================================
// Field Values
// ============================================================================

/// Right-hand side of one field definition
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// DSL expression, compiled by the grammar
    Dsl(String),
    /// Nested field map, compiled into a nested object
    Nested(FieldMap),
    /// Already-built node, used as-is
    Node(SchemaNode),
}

impl From<&str> for FieldValue {
    fn from(expr: &str) -> Self {
        Self::Dsl(expr.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(expr: String) -> Self {
        Self::Dsl(expr)
    }
}

impl From<FieldMap> for FieldValue {
    fn from(map: FieldMap) -> Self {
        Self::Nested(map)
    }
}

impl From<SchemaNode> for FieldValue {
    fn from(node: SchemaNode) -> Self {
        Self::Node(node)
    }
}

// ============================================================================
// Field Map
// ============================================================================

/// Ordered `key -> value` definitions of an object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, FieldValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style)
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, FieldValue)> {
        self.entries.iter()
    }

    /// Build from a JSON object: strings are DSL expressions, objects recurse
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(DslError::Syntax {
                expr: value.to_string(),
                reason: "a field map must be a JSON object".to_string(),
            });
        };

        let mut map = FieldMap::new();
        for (key, field) in object {
            let field_value = match field {
                Value::String(expr) => FieldValue::Dsl(expr.clone()),
                Value::Object(_) => {
                    FieldValue::Nested(FieldMap::from_json(field).map_err(|e| e.at_field(key))?)
                }
                other => {
                    return Err(DslError::Syntax {
                        expr: other.to_string(),
                        reason: "field values must be DSL strings or objects".to_string(),
                    }
                    .at_field(key))
                }
            };
            map.insert(key.clone(), field_value);
        }
        Ok(map)
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

// ============================================================================
// Assembly
// ============================================================================

/// Compile a single field value
///
/// A pre-built node passes through untouched.
pub fn compile_value(value: FieldValue, registry: &CustomTypeRegistry) -> Result<SchemaNode> {
    match value {
        FieldValue::Dsl(expr) => grammar::compile_expression(&expr, registry),
        FieldValue::Nested(map) => assemble_object(map, registry),
        FieldValue::Node(node) => Ok(node),
    }
}

/// Build an object node from a field map
pub fn assemble_object(map: FieldMap, registry: &CustomTypeRegistry) -> Result<SchemaNode> {
    let mut object = SchemaNode::object();

    for (key, value) in map.entries {
        let (name, key_required) = match key.strip_suffix(grammar::REQUIRED_MARKER) {
            Some(name) => (name.to_string(), true),
            None => (key, false),
        };

        let mut child = compile_value(value, registry).map_err(|e| e.at_field(&name))?;

        // key marker wins; the value's own flag only counts without one
        let required = key_required || child.required_flag;
        child.required_flag = false;

        object.set_property(name.clone(), child);
        if required {
            object.add_required(&name);
        }
    }

    Ok(object)
}
