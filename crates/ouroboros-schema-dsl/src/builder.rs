//! Fluent decorator over a schema node
//!
//! Attaches metadata (label, messages, validators, description, default) and
//! domain presets without disturbing structural constraints the caller has
//! already set.
//!
//! # Example
//!
//! ```
//! use ouroboros_schema_dsl::{DslEnvironment, FieldMap};
//!
//! let env = DslEnvironment::default();
//! let username = env
//!     .builder("string!")
//!     .unwrap()
//!     .label("Username")
//!     .username(Some("4-20"))
//!     .unwrap();
//!
//! let schema = env
//!     .compile_fields(FieldMap::new().field("username", username))
//!     .unwrap();
//! assert_eq!(schema.required, vec!["username".to_string()]);
//! ```

use crate::assembler::FieldValue;
use crate::constraint::{self, ConstraintTarget};
use crate::error::{DslError, Result};
use crate::patterns::{PasswordStrength, PatternEntry, PatternFamily, USERNAME};
use crate::schema::{CustomValidator, Format, SchemaKind, SchemaNode, ValidatorRef};
use serde_json::Value;
use std::sync::Arc;

/// Chainable decorator for a [`SchemaNode`]
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaBuilder {
    node: SchemaNode,
}

impl SchemaBuilder {
    /// Start from an existing node
    pub fn new(node: SchemaNode) -> Self {
        Self { node }
    }

    /// Borrow the node being decorated
    pub fn node(&self) -> &SchemaNode {
        &self.node
    }

    /// Finish decorating
    pub fn build(self) -> SchemaNode {
        self.node
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Display label, or a locale key that translates to one
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.node.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.node.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.node.default = Some(value);
        self
    }

    /// Custom message (template or locale key) for one keyword
    pub fn message(mut self, keyword: impl Into<String>, template: impl Into<String>) -> Self {
        self.node.custom_messages.insert(keyword.into(), template.into());
        self
    }

    /// Merge several custom messages
    pub fn messages<I, K, V>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (keyword, template) in messages {
            self.node.custom_messages.insert(keyword.into(), template.into());
        }
        self
    }

    /// Append a custom validator
    pub fn custom(mut self, validator: impl CustomValidator + 'static) -> Self {
        self.node.custom_validators.push(ValidatorRef(Arc::new(validator)));
        self
    }

    /// Append a shared validator handle
    pub fn validator(mut self, validator: ValidatorRef) -> Self {
        self.node.custom_validators.push(validator);
        self
    }

    pub fn required(mut self) -> Self {
        self.node.required_flag = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.node.required_flag = false;
        self
    }

    // ========================================================================
    // Structural decorations
    // ========================================================================

    /// Regular expression the value must match
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.node.pattern = Some(pattern.into());
        self
    }

    /// Pattern plus the message used when it does not match
    pub fn pattern_with_message(self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.pattern(pattern).message("pattern", message)
    }

    /// Minimum string length
    pub fn min(mut self, min_length: usize) -> Result<Self> {
        self.expect_string("min")?;
        self.node.string.min_length = Some(min_length);
        Ok(self)
    }

    /// Maximum string length
    pub fn max(mut self, max_length: usize) -> Result<Self> {
        self.expect_string("max")?;
        self.node.string.max_length = Some(max_length);
        Ok(self)
    }

    /// Semantic format tag
    pub fn format(mut self, format: Format) -> Result<Self> {
        self.expect_string("format")?;
        self.node.format = Some(format);
        Ok(self)
    }

    // ========================================================================
    // Domain presets
    // ========================================================================

    /// Username preset; `range` (e.g. `"4-20"`) defaults to 3-32
    pub fn username(mut self, range: Option<&str>) -> Result<Self> {
        self.expect_string("username")?;
        let bounds = constraint::parse_constraint(range.unwrap_or("3-32"), ConstraintTarget::Length, "username")?;
        self.default_lengths(bounds.string.min_length, bounds.string.max_length);
        Ok(self.pattern_with_message(USERNAME.pattern, USERNAME.message_key))
    }

    /// Password preset: `weak`, `medium`, `strong` or `veryStrong`
    pub fn password(self, strength: &str) -> Result<Self> {
        let strength = PasswordStrength::parse(strength)?;
        self.preset("password", &strength.preset())
    }

    pub fn phone(self, country: &str) -> Result<Self> {
        self.family(PatternFamily::Phone, country)
    }

    pub fn id_card(self, country: &str) -> Result<Self> {
        self.family(PatternFamily::IdCard, country)
    }

    pub fn credit_card(self, kind: &str) -> Result<Self> {
        self.family(PatternFamily::CreditCard, kind)
    }

    pub fn license_plate(self, country: &str) -> Result<Self> {
        self.family(PatternFamily::LicensePlate, country)
    }

    pub fn postal_code(self, country: &str) -> Result<Self> {
        self.family(PatternFamily::PostalCode, country)
    }

    pub fn passport(self, country: &str) -> Result<Self> {
        self.family(PatternFamily::Passport, country)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn family(self, family: PatternFamily, variant: &str) -> Result<Self> {
        let entry = family.lookup(Some(variant))?;
        self.preset(family.name(), entry)
    }

    fn preset(mut self, method: &str, entry: &PatternEntry) -> Result<Self> {
        self.expect_string(method)?;
        self.default_lengths(entry.min_length, entry.max_length);
        Ok(self.pattern_with_message(entry.pattern, entry.message_key))
    }

    /// Fill length bounds only where the caller has not set them
    fn default_lengths(&mut self, min: Option<usize>, max: Option<usize>) {
        let lengths = &mut self.node.string;
        if lengths.exact_length.is_some() {
            return;
        }
        if lengths.min_length.is_none() {
            lengths.min_length = min;
        }
        if lengths.max_length.is_none() {
            lengths.max_length = max;
        }
    }

    fn expect_string(&self, method: &str) -> Result<()> {
        if self.node.kind == SchemaKind::String {
            return Ok(());
        }
        Err(DslError::WrongBaseKind {
            method: method.to_string(),
            expected: SchemaKind::String.to_string(),
            actual: self.node.kind.to_string(),
        })
    }
}

impl From<SchemaNode> for SchemaBuilder {
    fn from(node: SchemaNode) -> Self {
        Self::new(node)
    }
}

impl From<SchemaBuilder> for SchemaNode {
    fn from(builder: SchemaBuilder) -> Self {
        builder.build()
    }
}

impl From<SchemaBuilder> for FieldValue {
    fn from(builder: SchemaBuilder) -> Self {
        FieldValue::Node(builder.build())
    }
}
