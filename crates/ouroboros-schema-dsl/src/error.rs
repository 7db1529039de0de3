//! Compile-time error types
//!
//! Everything that can go wrong while turning DSL text into a schema tree is a
//! [`DslError`]. Message resolution never produces one: a missing translation
//! degrades to the next fallback tier instead (see [`crate::resolver`]).

use thiserror::Error;

/// Result type alias for schema construction
pub type Result<T> = std::result::Result<T, DslError>;

/// Unified error type for DSL compilation, type registration and locale loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DslError {
    #[error("Unknown type '{type_name}' in expression '{expr}'")]
    UnknownType { type_name: String, expr: String },

    #[error("Unsupported {family} variant '{variant}' (supported: {supported})")]
    UnsupportedVariant {
        family: String,
        variant: String,
        supported: String,
    },

    #[error("Invalid constraint '{constraint}' for type '{type_name}': {reason}")]
    InvalidConstraint {
        constraint: String,
        type_name: String,
        reason: String,
    },

    #[error("Invalid enum value '{value}': expected {expected}")]
    InvalidEnumValue { value: String, expected: String },

    #[error("Malformed expression '{expr}': {reason}")]
    Syntax { expr: String, reason: String },

    #[error("Custom type '{0}' is already registered")]
    DuplicateType(String),

    #[error("'{0}' is a built-in type and cannot be registered or unregistered")]
    BuiltinType(String),

    #[error("Custom type '{0}' is not registered")]
    TypeNotRegistered(String),

    #[error("Invalid definition for custom type '{name}': {reason}")]
    InvalidTypeDefinition { name: String, reason: String },

    #[error("{method}() requires a {expected} schema, got {actual}")]
    WrongBaseKind {
        method: String,
        expected: String,
        actual: String,
    },

    #[error("Locale error: {0}")]
    Locale(String),

    /// Wraps an error raised while compiling one field of an object
    #[error("Field '{path}': {source}")]
    Field {
        path: String,
        #[source]
        source: Box<DslError>,
    },
}

impl DslError {
    /// Attach a field path, extending an existing path instead of nesting wrappers
    pub fn at_field(self, field: &str) -> Self {
        match self {
            DslError::Field { path, source } => DslError::Field {
                path: format!("{}.{}", field, path),
                source,
            },
            other => DslError::Field {
                path: field.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Dotted path of the field that failed, if the error came from object assembly
    pub fn field_path(&self) -> Option<&str> {
        match self {
            DslError::Field { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The underlying error with any field wrappers removed
    pub fn root_cause(&self) -> &DslError {
        match self {
            DslError::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for DslError {
    fn from(err: serde_json::Error) -> Self {
        DslError::Locale(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for DslError {
    fn from(err: std::io::Error) -> Self {
        DslError::Locale(format!("I/O error: {}", err))
    }
}
