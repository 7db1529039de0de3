//! External locale sources
//!
//! A [`LocaleLoader`] produces whole packs on demand. The bundled
//! implementation reads `<locale>.json` files from one directory; nested
//! objects in a file are flattened into dotted keys, so
//! `{"pattern": {"phone": "..."}}` defines `pattern.phone`.

use super::{is_locale_code, MessageMap};
use crate::error::{DslError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Source of locale packs outside the bundled set
pub trait LocaleLoader: Send + Sync {
    /// Load the pack for `locale`; `Ok(None)` when the source has none
    fn load(&self, locale: &str) -> Result<Option<MessageMap>>;

    /// Locales this source can provide
    fn available(&self) -> Vec<String>;
}

// ============================================================================
// Directory Loader
// ============================================================================

/// Reads `<dir>/<locale>.json`
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, locale: &str) -> PathBuf {
        self.root.join(format!("{}.json", locale))
    }
}

impl LocaleLoader for DirectoryLoader {
    fn load(&self, locale: &str) -> Result<Option<MessageMap>> {
        // the code becomes a file name, so reject anything path-like
        if !is_locale_code(locale) {
            return Ok(None);
        }

        let path = self.path_for(locale);
        if !path.is_file() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)?;
        let value: Value = serde_json::from_str(&text)?;
        let pack = flatten_messages(&value)?;
        debug!(locale = %locale, path = %path.display(), messages = pack.len(), "Loaded locale file");
        Ok(Some(pack))
    }

    fn available(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.root.display(), error = %err, "Locale directory is not readable");
                return Vec::new();
            }
        };

        let mut locales: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
            .filter(|stem| is_locale_code(stem))
            .collect();
        locales.sort();
        locales
    }
}

// ============================================================================
// Flattening
// ============================================================================

/// Flatten a JSON object of templates into dotted keys
///
/// Non-string leaves are skipped with a warning.
pub fn flatten_messages(value: &Value) -> Result<MessageMap> {
    let Value::Object(object) = value else {
        return Err(DslError::Locale(format!(
            "locale pack must be a JSON object, got {}",
            value
        )));
    };

    let mut pack = MessageMap::new();
    flatten_into(&mut pack, "", object);
    Ok(pack)
}

fn flatten_into(pack: &mut MessageMap, prefix: &str, object: &serde_json::Map<String, Value>) {
    for (key, value) in object {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::String(template) => {
                pack.insert(full_key, template.clone());
            }
            Value::Object(inner) => flatten_into(pack, &full_key, inner),
            other => {
                warn!(key = %full_key, value = %other, "Skipping non-string locale message");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_keys() {
        let pack = flatten_messages(&json!({
            "required": "{{#label}} fehlt",
            "pattern": { "phone": { "cn": "Handynummer", "_": 3 }, "base": "Muster" }
        }))
        .unwrap();

        assert_eq!(pack["required"], "{{#label}} fehlt");
        assert_eq!(pack["pattern.phone.cn"], "Handynummer");
        assert_eq!(pack["pattern.base"], "Muster");
        assert!(!pack.contains_key("pattern.phone._"));
    }

    #[test]
    fn test_flatten_rejects_non_objects() {
        assert!(matches!(flatten_messages(&json!(["a"])), Err(DslError::Locale(_))));
    }

    #[test]
    fn test_directory_loader() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("de-DE.json"), r#"{"required": "Pflichtfeld"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("de-AT.json"), "{").unwrap();

        let loader = DirectoryLoader::new(dir.path());
        let pack = loader.load("de-DE").unwrap().unwrap();
        assert_eq!(pack["required"], "Pflichtfeld");

        assert!(loader.load("it-IT").unwrap().is_none());
        assert!(loader.load("../etc").unwrap().is_none());
        assert_eq!(loader.available(), vec!["de-AT".to_string(), "de-DE".to_string()]);
        assert!(loader.load("de-AT").is_err());
    }

    #[test]
    fn test_missing_directory_is_not_fatal() {
        let loader = DirectoryLoader::new("/definitely/not/a/locale/dir");
        assert!(loader.available().is_empty());
        assert!(loader.load("en-US").unwrap().is_none());
    }
}
