//! Ouroboros Schema DSL
//!
//! Compact constraint expressions compiled into engine-neutral JSON Schema,
//! plus localized formatting of the violations a validation engine reports.
//!
//! # Expressions
//!
//! ```text
//! "string:3-32!"          required string, length 3..=32
//! "number:>=18"           number with an inclusive minimum
//! "email!"                required email-formatted string
//! "phone:us"              pattern preset with a country variant
//! "array:1-5<string:1-10>" array of 1..=5 short strings
//! "pro|basic|free"        inferred string enum
//! "types:string|number"   union of two types
//! ```
//!
//! # Example
//!
//! ```rust
//! use ouroboros_schema_dsl::{DslEnvironment, ErrorDescriptor, FieldMap, to_engine_schema};
//! use serde_json::json;
//!
//! let env = DslEnvironment::default();
//! let schema = env
//!     .compile_fields(
//!         FieldMap::new()
//!             .field("username!", "string:3-32")
//!             .field("age", "number:18-120"),
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     to_engine_schema(&schema),
//!     json!({
//!         "type": "object",
//!         "properties": {
//!             "username": {"type": "string", "minLength": 3, "maxLength": 32},
//!             "age": {"type": "number", "minimum": 18, "maximum": 120}
//!         },
//!         "required": ["username"]
//!     })
//! );
//!
//! let age = schema.property("age").unwrap();
//! let error = ErrorDescriptor::new("minimum", "/age").param("limit", 18).schema(age);
//! assert_eq!(
//!     env.format_error(&error).message,
//!     "age must be greater than or equal to 18"
//! );
//! ```

// Public modules
pub mod assembler;
pub mod builder;
pub mod config;
pub mod constraint;
pub mod env;
pub mod error;
pub mod export;
pub mod grammar;
pub mod locale;
pub mod patterns;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod template;
pub mod types;

// Re-export commonly used types
pub use assembler::{FieldMap, FieldValue};
pub use builder::SchemaBuilder;
pub use config::DslConfig;
pub use constraint::{ListConstraints, NumericConstraints, StringConstraints};
pub use env::DslEnvironment;
pub use error::{DslError, Result};
pub use export::{to_engine_schema, to_json_schema};
pub use locale::{DirectoryLoader, LocaleLoader, LocalePackCache, LocaleStore, MessageMap};
pub use patterns::{PasswordStrength, PatternFamily};
pub use registry::{CustomTypeRegistry, TypeDefinition};
pub use resolver::{ErrorDescriptor, ErrorFormatter, FormattedError};
pub use schema::{CustomValidator, FnValidator, Format, SchemaKind, SchemaNode, ValidatorRef};
pub use template::{TemplateArg, TemplateContext};
pub use types::BuiltinType;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
