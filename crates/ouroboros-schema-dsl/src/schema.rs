//! Canonical schema tree
//!
//! Every DSL style compiles into a [`SchemaNode`]. Structural constraints are
//! grouped the same way the validation crate groups them (string, numeric,
//! list); metadata (label, messages, validators) rides alongside and is
//! stripped by [`crate::export::to_engine_schema`] before the schema reaches a
//! third-party engine.

use crate::constraint::{ListConstraints, NumericConstraints, StringConstraints};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Schema Kind
// ============================================================================

/// Base kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
    /// No type restriction
    #[default]
    Any,
    /// One of several variant schemas
    Union,
}

impl SchemaKind {
    /// JSON Schema type name (`any` and `union` have no `type` keyword on export)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
            Self::Any => "any",
            Self::Union => "union",
        }
    }

    /// Number or integer
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Integer)
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Semantic Formats
// ============================================================================

/// Semantic format tag carried by string nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Email,
    Url,
    Uuid,
    Date,
    DateTime,
    Time,
    Ipv4,
    Ipv6,
    Hostname,
}

impl Format {
    /// Keyword value emitted in the `format` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Url => "uri",
            Self::Uuid => "uuid",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Time => "time",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Hostname => "hostname",
        }
    }

    /// Parse a format keyword value; accepts both `uri` and `url`
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "email" => Some(Self::Email),
            "uri" | "url" => Some(Self::Url),
            "uuid" => Some(Self::Uuid),
            "date" => Some(Self::Date),
            "date-time" | "datetime" => Some(Self::DateTime),
            "time" => Some(Self::Time),
            "ipv4" => Some(Self::Ipv4),
            "ipv6" => Some(Self::Ipv6),
            "hostname" => Some(Self::Hostname),
            _ => None,
        }
    }
}

/// Normalize an engine-reported format name into its locale key segment
///
/// `uri` is reported by engines but the locale packs use `url`.
pub fn format_message_name(name: &str) -> &str {
    match name {
        "uri" => "url",
        other => other,
    }
}

// ============================================================================
// Custom Validators
// ============================================================================

/// A user-supplied validation hook stored on a schema node
///
/// The compiler never calls it; the executing validation engine does.
pub trait CustomValidator: Send + Sync {
    /// Identifier used in exported metadata and diagnostics
    fn name(&self) -> &str;

    /// Check a value, returning a message (or message key) on failure
    fn validate(&self, value: &Value) -> Result<(), String>;

    /// Whether the engine should run this validator asynchronously
    fn is_async(&self) -> bool {
        false
    }
}

/// Shared handle to a custom validator
#[derive(Clone)]
pub struct ValidatorRef(pub Arc<dyn CustomValidator>);

impl ValidatorRef {
    pub fn name(&self) -> &str {
        self.0.name()
    }
}

impl fmt::Debug for ValidatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidatorRef").field(&self.0.name()).finish()
    }
}

impl PartialEq for ValidatorRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Create a validator from a closure
pub struct FnValidator<F>
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync,
{
    name: String,
    validate_fn: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync,
{
    pub fn new(name: impl Into<String>, validate_fn: F) -> Self {
        Self {
            name: name.into(),
            validate_fn,
        }
    }
}

impl<F> CustomValidator for FnValidator<F>
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &Value) -> Result<(), String> {
        (self.validate_fn)(value)
    }
}

// ============================================================================
// Schema Node
// ============================================================================

/// Canonical, engine-neutral schema node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub format: Option<Format>,

    // Structural constraints
    pub string: StringConstraints,
    pub numeric: NumericConstraints,
    pub list: ListConstraints,
    pub pattern: Option<String>,
    pub enum_values: Option<Vec<Value>>,

    // Composite links
    /// Item schema (arrays only, at most one)
    pub items: Option<Box<SchemaNode>>,
    /// Ordered field map (objects only)
    pub properties: Vec<(String, SchemaNode)>,
    /// Required keys, each present in `properties`
    pub required: Vec<String>,
    /// Union variants, never themselves unions
    pub variants: Vec<SchemaNode>,

    // Metadata
    pub label: Option<String>,
    pub custom_messages: BTreeMap<String, String>,
    pub custom_validators: Vec<ValidatorRef>,
    pub description: Option<String>,
    pub default: Option<Value>,

    /// Transient required marker, hoisted into the parent and then cleared
    pub(crate) required_flag: bool,
}

impl SchemaNode {
    /// Create an unconstrained node of the given kind
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    /// String node tagged with a semantic format
    pub fn formatted(format: Format) -> Self {
        Self {
            format: Some(format),
            ..Self::string()
        }
    }

    /// Array node with an optional item schema
    pub fn array(items: Option<SchemaNode>) -> Self {
        Self {
            items: items.map(Box::new),
            ..Self::new(SchemaKind::Array)
        }
    }

    /// Empty object node
    pub fn object() -> Self {
        Self::new(SchemaKind::Object)
    }

    /// Union of variants; nested unions are flattened and a single variant
    /// collapses to itself
    pub fn union(variants: Vec<SchemaNode>) -> Self {
        let mut flat = Vec::with_capacity(variants.len());
        for variant in variants {
            if variant.kind == SchemaKind::Union {
                flat.extend(variant.variants);
            } else {
                flat.push(variant);
            }
        }

        if flat.len() == 1 {
            return flat.remove(0);
        }

        Self {
            variants: flat,
            ..Self::new(SchemaKind::Union)
        }
    }

    /// Whether the node carries an unhoisted required marker
    pub fn is_required(&self) -> bool {
        self.required_flag
    }

    /// Set the transient required marker
    pub fn set_required(&mut self, required: bool) {
        self.required_flag = required;
    }

    /// Look up a property schema by key
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    /// Insert or replace a property, keeping first-insertion order
    pub fn set_property(&mut self, name: impl Into<String>, node: SchemaNode) {
        let name = name.into();
        match self.properties.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = node,
            None => self.properties.push((name, node)),
        }
    }

    /// Mark a property as required; ignores keys absent from `properties`
    pub fn add_required(&mut self, name: &str) -> bool {
        if self.property(name).is_none() {
            return false;
        }
        if !self.required.iter().any(|key| key == name) {
            self.required.push(name.to_string());
        }
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_flattens_and_collapses() {
        let inner = SchemaNode::union(vec![SchemaNode::string(), SchemaNode::number()]);
        let outer = SchemaNode::union(vec![inner, SchemaNode::boolean()]);

        assert_eq!(outer.kind, SchemaKind::Union);
        assert_eq!(outer.variants.len(), 3);
        assert!(outer.variants.iter().all(|v| v.kind != SchemaKind::Union));

        let single = SchemaNode::union(vec![SchemaNode::integer()]);
        assert_eq!(single.kind, SchemaKind::Integer);
    }

    #[test]
    fn test_required_only_references_properties() {
        let mut node = SchemaNode::object();
        node.set_property("name", SchemaNode::string());

        assert!(node.add_required("name"));
        assert!(!node.add_required("missing"));
        assert!(node.add_required("name"));
        assert_eq!(node.required, vec!["name".to_string()]);
    }

    #[test]
    fn test_set_property_keeps_order() {
        let mut node = SchemaNode::object();
        node.set_property("b", SchemaNode::string());
        node.set_property("a", SchemaNode::number());
        node.set_property("b", SchemaNode::boolean());

        let keys: Vec<_> = node.properties.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(node.property("b").map(|n| n.kind), Some(SchemaKind::Boolean));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(Format::parse("uri"), Some(Format::Url));
        assert_eq!(Format::parse("url"), Some(Format::Url));
        assert_eq!(Format::Url.as_str(), "uri");
        assert_eq!(format_message_name("uri"), "url");
        assert_eq!(Format::parse("bogus"), None);
    }

    #[test]
    fn test_validator_ref_equality_is_identity() {
        let a = ValidatorRef(Arc::new(FnValidator::new("v", |_| Ok(()))));
        let b = ValidatorRef(Arc::new(FnValidator::new("v", |_| Ok(()))));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(format!("{:?}", a), "ValidatorRef(\"v\")");
    }
}
