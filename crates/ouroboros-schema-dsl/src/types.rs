//! Built-in DSL type names
//!
//! The set of built-in names is closed; anything else must come from the
//! custom type registry.

use crate::error::Result;
use crate::patterns::{self, PatternEntry, PatternFamily};
use crate::schema::{Format, SchemaKind, SchemaNode};

/// Canonical names of every built-in type, used by the registry to reject
/// shadowing registrations
pub const BUILTIN_TYPE_NAMES: &[&str] = &[
    "string", "number", "integer", "boolean", "object", "array", "null", "any",
    "email", "url", "uuid", "date", "datetime", "time", "ipv4", "ipv6", "hostname",
    "objectId", "hexColor", "macAddress", "alphanum", "port",
    "phone", "idCard", "creditCard", "licensePlate", "postalCode", "passport",
];

/// A built-in DSL type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
    Any,
    /// String tagged with a semantic format
    Formatted(Format),
    /// String restricted by a fixed preset pattern
    Preset(Preset),
    /// TCP/UDP port (integer 1-65535)
    Port,
    /// Country/variant-parameterized pattern type
    Variant(PatternFamily),
}

/// Fixed pattern presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    ObjectId,
    HexColor,
    MacAddress,
    Alphanum,
}

impl Preset {
    pub fn entry(&self) -> PatternEntry {
        match self {
            Self::ObjectId => patterns::OBJECT_ID,
            Self::HexColor => patterns::HEX_COLOR,
            Self::MacAddress => patterns::MAC_ADDRESS,
            Self::Alphanum => patterns::ALPHANUM,
        }
    }
}

impl BuiltinType {
    /// Resolve a type name, including the short aliases `int`, `bool`, `date-time`
    pub fn parse(name: &str) -> Option<Self> {
        let ty = match name {
            "string" | "str" => Self::String,
            "number" => Self::Number,
            "integer" | "int" => Self::Integer,
            "boolean" | "bool" => Self::Boolean,
            "object" => Self::Object,
            "array" => Self::Array,
            "null" => Self::Null,
            "any" => Self::Any,
            "email" => Self::Formatted(Format::Email),
            "url" | "uri" => Self::Formatted(Format::Url),
            "uuid" => Self::Formatted(Format::Uuid),
            "date" => Self::Formatted(Format::Date),
            "datetime" | "date-time" => Self::Formatted(Format::DateTime),
            "time" => Self::Formatted(Format::Time),
            "ipv4" => Self::Formatted(Format::Ipv4),
            "ipv6" => Self::Formatted(Format::Ipv6),
            "hostname" => Self::Formatted(Format::Hostname),
            "objectId" => Self::Preset(Preset::ObjectId),
            "hexColor" => Self::Preset(Preset::HexColor),
            "macAddress" => Self::Preset(Preset::MacAddress),
            "alphanum" => Self::Preset(Preset::Alphanum),
            "port" => Self::Port,
            "phone" => Self::Variant(PatternFamily::Phone),
            "idCard" => Self::Variant(PatternFamily::IdCard),
            "creditCard" => Self::Variant(PatternFamily::CreditCard),
            "licensePlate" => Self::Variant(PatternFamily::LicensePlate),
            "postalCode" => Self::Variant(PatternFamily::PostalCode),
            "passport" => Self::Variant(PatternFamily::Passport),
            _ => return None,
        };
        Some(ty)
    }

    /// Whether a name (or alias) denotes a built-in type
    pub fn is_builtin(name: &str) -> bool {
        Self::parse(name).is_some()
    }

    /// Unconstrained node for this type
    ///
    /// Variant types need their variant, so they resolve through
    /// [`BuiltinType::variant_node`] instead; here they yield their default.
    pub fn base_node(&self) -> Result<SchemaNode> {
        let node = match self {
            Self::String => SchemaNode::string(),
            Self::Number => SchemaNode::number(),
            Self::Integer => SchemaNode::integer(),
            Self::Boolean => SchemaNode::boolean(),
            Self::Object => SchemaNode::object(),
            Self::Array => SchemaNode::array(None),
            Self::Null => SchemaNode::new(SchemaKind::Null),
            Self::Any => SchemaNode::any(),
            Self::Formatted(format) => SchemaNode::formatted(*format),
            Self::Preset(preset) => pattern_node(&preset.entry()),
            Self::Port => {
                let mut node = SchemaNode::integer();
                node.numeric.minimum = Some(1.0);
                node.numeric.maximum = Some(65535.0);
                node
            }
            Self::Variant(family) => return Self::variant_node(*family, None),
        };
        Ok(node)
    }

    /// Node for a variant-parameterized type; unknown variants are an error
    pub fn variant_node(family: PatternFamily, variant: Option<&str>) -> Result<SchemaNode> {
        let entry = family.lookup(variant)?;
        Ok(pattern_node(entry))
    }
}

/// String node carrying a library pattern, its bounds and its message key
pub fn pattern_node(entry: &PatternEntry) -> SchemaNode {
    let mut node = SchemaNode::string();
    node.pattern = Some(entry.pattern.to_string());
    node.string.min_length = entry.min_length;
    node.string.max_length = entry.max_length;
    node.custom_messages
        .insert("pattern".to_string(), entry.message_key.to_string());
    node
}
