//! Compilation and resolution context
//!
//! A [`DslEnvironment`] owns the custom type registry and the locale store.
//! Every compile and format call goes through one, so independent
//! environments never see each other's types or translations.
//! [`DslEnvironment::global`] offers a shared instance for application code;
//! the library itself never reaches for it.

use crate::assembler::{self, FieldMap, FieldValue};
use crate::builder::SchemaBuilder;
use crate::config::DslConfig;
use crate::error::{DslError, Result};
use crate::grammar;
use crate::locale::{DirectoryLoader, LocaleStore};
use crate::registry::{CustomTypeRegistry, TypeDefinition};
use crate::resolver::{ErrorDescriptor, ErrorFormatter, FormattedError};
use crate::schema::SchemaNode;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

static GLOBAL: Lazy<DslEnvironment> = Lazy::new(DslEnvironment::default);

/// Registry, locale store and config for one application
#[derive(Debug)]
pub struct DslEnvironment {
    config: DslConfig,
    registry: RwLock<CustomTypeRegistry>,
    locales: LocaleStore,
}

impl DslEnvironment {
    pub fn new(config: DslConfig) -> Self {
        let mut locales = LocaleStore::new(&config.default_locale, &config.fallback_locale);
        if let Some(dir) = &config.locale_dir {
            locales = locales.with_loader(DirectoryLoader::new(dir), config.locale_cache_capacity);
        }
        debug!(
            locale = %config.default_locale,
            locale_dir = ?config.locale_dir,
            "Created DSL environment"
        );

        Self {
            config,
            registry: RwLock::new(CustomTypeRegistry::new()),
            locales,
        }
    }

    /// Process-wide instance with default config
    pub fn global() -> &'static DslEnvironment {
        &GLOBAL
    }

    pub fn config(&self) -> &DslConfig {
        &self.config
    }

    // ========================================================================
    // Compilation
    // ========================================================================

    /// Compile one DSL expression
    ///
    /// The result keeps its transient required flag until it is placed in an
    /// object.
    pub fn compile(&self, expr: &str) -> Result<SchemaNode> {
        let registry = self.registry.read();
        grammar::compile_expression(expr, &registry)
    }

    /// Compile an ordered field map into an object schema
    pub fn compile_fields(&self, fields: FieldMap) -> Result<SchemaNode> {
        let registry = self.registry.read();
        assembler::assemble_object(fields, &registry)
    }

    /// Compile a DSL string, a field map, or a pre-built node
    pub fn compile_value(&self, value: impl Into<FieldValue>) -> Result<SchemaNode> {
        let registry = self.registry.read();
        assembler::compile_value(value.into(), &registry)
    }

    /// Compile a JSON definition: a DSL string or an object of field definitions
    pub fn compile_json(&self, definition: &Value) -> Result<SchemaNode> {
        match definition {
            Value::String(expr) => self.compile(expr),
            Value::Object(_) => self.compile_fields(FieldMap::from_json(definition)?),
            other => Err(DslError::Syntax {
                expr: other.to_string(),
                reason: "expected a DSL string or an object of fields".to_string(),
            }),
        }
    }

    /// Compile an expression and start decorating it
    pub fn builder(&self, expr: &str) -> Result<SchemaBuilder> {
        self.compile(expr).map(SchemaBuilder::new)
    }

    // ========================================================================
    // Custom types
    // ========================================================================

    pub fn register_type(&self, name: &str, definition: impl Into<TypeDefinition>) -> Result<()> {
        self.registry.write().register(name, definition)?;
        debug!(name = %name, "Registered custom type");
        Ok(())
    }

    pub fn unregister_type(&self, name: &str) -> Result<()> {
        self.registry.write().unregister(name)?;
        debug!(name = %name, "Unregistered custom type");
        Ok(())
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.registry.read().has(name)
    }

    /// Registered custom type names, sorted
    pub fn list_types(&self) -> Vec<String> {
        self.registry.read().list()
    }

    pub fn clear_types(&self) {
        self.registry.write().clear();
        debug!("Cleared custom types");
    }

    // ========================================================================
    // Locales
    // ========================================================================

    pub fn locales(&self) -> &LocaleStore {
        &self.locales
    }

    pub fn locale(&self) -> String {
        self.locales.locale()
    }

    pub fn set_locale(&self, locale: &str) {
        self.locales.set_locale(locale);
    }

    /// Merge messages into one locale's overlay
    pub fn add_locale<I, K, V>(&self, locale: &str, messages: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.locales.add_locale(locale, messages);
    }

    /// Merge locale-independent message overrides
    pub fn set_messages<I, K, V>(&self, messages: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.locales.set_messages(messages);
    }

    pub fn load_locales_json(&self, value: &Value) -> Result<usize> {
        self.locales.load_locales_json(value)
    }

    pub fn load_locale_dir(&self, dir: impl AsRef<Path>) -> usize {
        self.locales.load_locale_dir(dir)
    }

    pub fn available_locales(&self) -> Vec<String> {
        self.locales.available_locales()
    }

    /// Drop locale overlays and overrides, back to the default locale
    pub fn reset_locales(&self) {
        self.locales.reset();
    }

    // ========================================================================
    // Error formatting
    // ========================================================================

    /// Formatter bound to this environment's locale store
    pub fn formatter(&self) -> ErrorFormatter<'_> {
        ErrorFormatter::new(&self.locales)
    }

    /// Format one violation in the current locale
    pub fn format_error(&self, error: &ErrorDescriptor<'_>) -> FormattedError {
        self.formatter().format(error)
    }
}

impl Default for DslEnvironment {
    fn default() -> Self {
        Self::new(DslConfig::default())
    }
}
