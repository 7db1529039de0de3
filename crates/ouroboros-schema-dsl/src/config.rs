//! Environment configuration
//!
//! Builder-style, and deserializable so a host application can keep it in its
//! own config file:
//!
//! ```json
//! { "default_locale": "zh-CN", "locale_dir": "./locales", "locale_cache_capacity": 4 }
//! ```

use crate::locale::{DEFAULT_CACHE_CAPACITY, DEFAULT_LOCALE};
use serde::Deserialize;
use std::path::PathBuf;

// ============================================================================
// DSL Config
// ============================================================================

/// Options for a [`DslEnvironment`](crate::DslEnvironment)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DslConfig {
    /// Locale the store starts in and returns to on reset
    pub default_locale: String,

    /// Locale consulted when the active one lacks a key
    pub fallback_locale: String,

    /// Directory of `<locale>.json` files loaded on first use
    pub locale_dir: Option<PathBuf>,

    /// Packs from `locale_dir` kept in memory at once
    pub locale_cache_capacity: usize,
}

impl Default for DslConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: DEFAULT_LOCALE.to_string(),
            locale_dir: None,
            locale_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl DslConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting locale
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Set the fallback locale
    pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    /// Load packs lazily from a directory
    pub fn locale_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locale_dir = Some(dir.into());
        self
    }

    /// Bound the number of lazily loaded packs
    pub fn locale_cache_capacity(mut self, capacity: usize) -> Self {
        self.locale_cache_capacity = capacity;
        self
    }
}
