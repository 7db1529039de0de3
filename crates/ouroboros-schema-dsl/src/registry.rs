//! Custom type registry
//!
//! User-defined type names map to either a static schema template or a
//! factory that receives the expression's constraint body. Built-in names
//! live in [`crate::types`] and can be neither shadowed nor removed.

use crate::error::{DslError, Result};
use crate::schema::{SchemaKind, SchemaNode};
use crate::types::BuiltinType;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Factory for a custom type; receives the constraint body, if any
pub type TypeFactory = Arc<dyn Fn(Option<&str>) -> Result<SchemaNode> + Send + Sync>;

/// Definition of a custom type
#[derive(Clone)]
pub enum TypeDefinition {
    /// Static template, cloned on every use
    Schema(SchemaNode),
    /// Generator invoked with the constraint body
    Factory(TypeFactory),
}

impl TypeDefinition {
    /// Wrap a closure as a factory definition
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<SchemaNode> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(f))
    }
}

impl From<SchemaNode> for TypeDefinition {
    fn from(node: SchemaNode) -> Self {
        Self::Schema(node)
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(node) => f.debug_tuple("Schema").field(&node.kind).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Table of user-defined types
#[derive(Default, Clone)]
pub struct CustomTypeRegistry {
    types: HashMap<String, TypeDefinition>,
}

impl CustomTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new type
    ///
    /// Fails on built-in names, duplicates (unregister first), names that
    /// would collide with DSL punctuation, and malformed schema templates.
    pub fn register(&mut self, name: &str, definition: impl Into<TypeDefinition>) -> Result<()> {
        validate_name(name)?;
        if BuiltinType::is_builtin(name) {
            return Err(DslError::BuiltinType(name.to_string()));
        }
        if self.types.contains_key(name) {
            return Err(DslError::DuplicateType(name.to_string()));
        }

        let definition = definition.into();
        if let TypeDefinition::Schema(node) = &definition {
            validate_shape(name, node)?;
        }

        self.types.insert(name.to_string(), definition);
        Ok(())
    }

    /// Remove a custom type, returning its definition
    pub fn unregister(&mut self, name: &str) -> Result<TypeDefinition> {
        if BuiltinType::is_builtin(name) {
            return Err(DslError::BuiltinType(name.to_string()));
        }
        self.types
            .remove(name)
            .ok_or_else(|| DslError::TypeNotRegistered(name.to_string()))
    }

    /// Whether a custom type with this name exists
    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered custom type names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    /// Remove every custom type
    pub fn clear(&mut self) {
        self.types.clear();
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }
}

impl fmt::Debug for CustomTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTypeRegistry")
            .field("types", &self.list())
            .finish()
    }
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| DslError::InvalidTypeDefinition {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    let starts_alpha = chars.next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false);
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !(starts_alpha && rest_ok) {
        return Err(invalid(
            "names must start with a letter and contain only letters, digits, '_' or '-'",
        ));
    }

    // `array-x` and `array2` would parse as constrained arrays
    let array_shaped = name
        .strip_prefix("array")
        .and_then(|rest| rest.chars().next())
        .map(|c| c == '-' || c.is_ascii_digit())
        .unwrap_or(false);
    if array_shaped {
        return Err(invalid("names starting with 'array' cannot continue with '-' or a digit"));
    }
    Ok(())
}

fn validate_shape(name: &str, node: &SchemaNode) -> Result<()> {
    let invalid = |reason: String| DslError::InvalidTypeDefinition {
        name: name.to_string(),
        reason,
    };

    if let Some(missing) = node.required.iter().find(|key| node.property(key).is_none()) {
        return Err(invalid(format!("required key '{}' has no property", missing)));
    }
    if node.kind != SchemaKind::Array && node.items.is_some() {
        return Err(invalid(format!("{} schema cannot have items", node.kind)));
    }
    if node.kind == SchemaKind::Union && node.variants.len() < 2 {
        return Err(invalid("union needs at least two variants".to_string()));
    }

    for (_, child) in &node.properties {
        validate_shape(name, child)?;
    }
    if let Some(items) = &node.items {
        validate_shape(name, items)?;
    }
    Ok(())
}
