//! Layered message lookup
//!
//! For a key and locale, the first hit wins:
//!
//! 1. Global overrides from [`LocaleStore::set_messages`] (locale-independent)
//! 2. Overlay for the locale, merged by [`LocaleStore::add_locale`]
//! 3. Pack from the external loader, kept in the LRU cache
//! 4. Bundled pack
//! 5. Steps 2-4 again for the fallback locale
//!
//! Per-call overrides sit above all of these and are handled by the resolver.

use super::cache::LocalePackCache;
use super::loader::{flatten_messages, DirectoryLoader, LocaleLoader};
use super::packs::{self, BUILTIN_LOCALES, DEFAULT_LOCALE};
use super::{normalize_locale, MessageMap};
use crate::error::{DslError, Result};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct LocaleState {
    current: String,
    overlays: HashMap<String, MessageMap>,
    global: MessageMap,
}

struct ExternalPacks {
    loader: Arc<dyn LocaleLoader>,
    cache: Mutex<LocalePackCache>,
}

/// Thread-safe locale state: current locale plus every message layer
pub struct LocaleStore {
    default_locale: String,
    fallback_locale: String,
    state: RwLock<LocaleState>,
    external: Option<ExternalPacks>,
}

impl LocaleStore {
    /// Store starting at `default_locale`, falling back to `fallback_locale`
    pub fn new(default_locale: &str, fallback_locale: &str) -> Self {
        let default_locale = normalize_locale(default_locale);
        Self {
            fallback_locale: normalize_locale(fallback_locale),
            state: RwLock::new(LocaleState {
                current: default_locale.clone(),
                ..Default::default()
            }),
            default_locale,
            external: None,
        }
    }

    /// Load packs lazily from `loader`, keeping at most `capacity` in memory
    pub fn with_loader(mut self, loader: impl LocaleLoader + 'static, capacity: usize) -> Self {
        self.external = Some(ExternalPacks {
            loader: Arc::new(loader),
            cache: Mutex::new(LocalePackCache::new(capacity)),
        });
        self
    }

    // ========================================================================
    // Current locale
    // ========================================================================

    pub fn locale(&self) -> String {
        self.state.read().current.clone()
    }

    /// Switch the current locale
    ///
    /// Unknown locales are accepted with a warning; lookups then fall through
    /// to the fallback locale.
    pub fn set_locale(&self, locale: &str) {
        let locale = normalize_locale(locale);
        if !self.is_known(&locale) {
            warn!(locale = %locale, fallback = %self.fallback_locale, "Unknown locale, messages will use the fallback");
        }
        debug!(locale = %locale, "Locale changed");
        self.state.write().current = locale;
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    /// Whether any layer can provide messages for `locale`
    pub fn is_known(&self, locale: &str) -> bool {
        let locale = normalize_locale(locale);
        if packs::is_builtin_locale(&locale) || self.state.read().overlays.contains_key(&locale) {
            return true;
        }
        self.external
            .as_ref()
            .map(|ext| ext.loader.available().contains(&locale))
            .unwrap_or(false)
    }

    /// Every locale any layer can provide, sorted
    pub fn available_locales(&self) -> Vec<String> {
        let mut locales: BTreeSet<String> = BUILTIN_LOCALES.iter().map(|l| l.to_string()).collect();
        locales.extend(self.state.read().overlays.keys().cloned());
        if let Some(ext) = &self.external {
            locales.extend(ext.loader.available());
        }
        locales.into_iter().collect()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Merge messages into the overlay for `locale`
    pub fn add_locale<I, K, V>(&self, locale: &str, messages: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let locale = normalize_locale(locale);
        let mut state = self.state.write();
        let overlay = state.overlays.entry(locale.clone()).or_default();
        let before = overlay.len();
        overlay.extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
        debug!(locale = %locale, added = overlay.len() - before, "Merged locale messages");
    }

    /// Merge locale-independent overrides
    pub fn set_messages<I, K, V>(&self, messages: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.state
            .write()
            .global
            .extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
    }

    /// Back to bundled-only state at the default locale
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.current = self.default_locale.clone();
        state.overlays.clear();
        state.global.clear();
        if let Some(ext) = &self.external {
            ext.cache.lock().clear();
        }
        debug!(locale = %self.default_locale, "Locale store reset");
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Merge `{locale: {key: template}}`; nested objects become dotted keys
    pub fn load_locales_json(&self, value: &Value) -> Result<usize> {
        let Value::Object(locales) = value else {
            return Err(DslError::Locale(
                "expected an object of the form {locale: {key: template}}".to_string(),
            ));
        };

        let mut parsed = Vec::with_capacity(locales.len());
        for (locale, messages) in locales {
            let pack = flatten_messages(messages)
                .map_err(|e| DslError::Locale(format!("locale '{}': {}", locale, e)))?;
            parsed.push((locale, pack));
        }

        let count = parsed.len();
        for (locale, pack) in parsed {
            self.add_locale(locale, pack);
        }
        Ok(count)
    }

    /// Eagerly merge every `<locale>.json` in `dir`
    ///
    /// A missing directory or a broken file is logged and skipped.
    pub fn load_locale_dir(&self, dir: impl AsRef<Path>) -> usize {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            warn!(path = %dir.display(), "Locale directory not found, skipping");
            return 0;
        }

        let loader = DirectoryLoader::new(dir);
        let mut loaded = 0;
        for locale in loader.available() {
            match loader.load(&locale) {
                Ok(Some(pack)) => {
                    self.add_locale(&locale, pack);
                    loaded += 1;
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(locale = %locale, path = %dir.display(), error = %err, "Skipping unreadable locale file");
                }
            }
        }
        loaded
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Template for `key` in `locale`, walking every layer and the fallback
    pub fn message(&self, key: &str, locale: &str) -> Option<String> {
        let state = self.state.read();
        if let Some(message) = state.global.get(key) {
            return Some(message.clone());
        }
        if let Some(message) = self.lookup_in(&state, locale, key) {
            return Some(message);
        }
        if locale != self.fallback_locale {
            return self.lookup_in(&state, &self.fallback_locale, key);
        }
        None
    }

    /// Locales currently held by the LRU cache, least recently used first
    pub fn cached_locales(&self) -> Vec<String> {
        self.external
            .as_ref()
            .map(|ext| ext.cache.lock().locales())
            .unwrap_or_default()
    }

    fn lookup_in(&self, state: &LocaleState, locale: &str, key: &str) -> Option<String> {
        if let Some(message) = state.overlays.get(locale).and_then(|overlay| overlay.get(key)) {
            return Some(message.clone());
        }
        if let Some(message) = self.external_pack(locale).and_then(|pack| pack.get(key).cloned()) {
            return Some(message);
        }
        packs::builtin_message(locale, key).map(str::to_string)
    }

    fn external_pack(&self, locale: &str) -> Option<Arc<MessageMap>> {
        let ext = self.external.as_ref()?;
        let mut cache = ext.cache.lock();
        if let Some(pack) = cache.get(locale) {
            return Some(pack);
        }

        // misses are cached as empty packs so the source is asked once
        let pack = match ext.loader.load(locale) {
            Ok(Some(pack)) => pack,
            Ok(None) => MessageMap::new(),
            Err(err) => {
                warn!(locale = %locale, error = %err, "Failed to load locale pack");
                MessageMap::new()
            }
        };
        let pack = Arc::new(pack);
        cache.set(locale, Arc::clone(&pack));
        Some(pack)
    }
}

impl Default for LocaleStore {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE, DEFAULT_LOCALE)
    }
}

impl fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleStore")
            .field("default_locale", &self.default_locale)
            .field("fallback_locale", &self.fallback_locale)
            .field("state", &*self.state.read())
            .field("external", &self.external.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_layer_priority() {
        let store = LocaleStore::default();
        assert_eq!(store.message("required", "en-US").unwrap(), "{{#label}} is required");

        store.add_locale("en-US", [("required", "{{#label}} missing")]);
        assert_eq!(store.message("required", "en-US").unwrap(), "{{#label}} missing");

        store.set_messages([("required", "Fill in {{#label}}")]);
        assert_eq!(store.message("required", "en-US").unwrap(), "Fill in {{#label}}");
        assert_eq!(store.message("required", "zh-CN").unwrap(), "Fill in {{#label}}");

        store.reset();
        assert_eq!(store.message("required", "en-US").unwrap(), "{{#label}} is required");
    }

    #[test]
    fn test_add_locale_merges() {
        let store = LocaleStore::default();
        store.add_locale("de-DE", [("required", "{{#label}} fehlt")]);
        store.add_locale("de_de", [("max", "{{#label}} zu groß")]);

        assert_eq!(store.message("required", "de-DE").unwrap(), "{{#label}} fehlt");
        assert_eq!(store.message("max", "de-DE").unwrap(), "{{#label}} zu groß");
        // keys the overlay lacks come from the fallback locale
        assert_eq!(store.message("enum", "de-DE").unwrap(), "{{#label}} must be one of: {{#allowedValues}}");
        assert!(store.available_locales().contains(&"de-DE".to_string()));
    }

    #[test]
    fn test_set_locale_accepts_unknown() {
        let store = LocaleStore::default();
        store.set_locale("zh_cn");
        assert_eq!(store.locale(), "zh-CN");
        store.set_locale("xx-YY");
        assert_eq!(store.locale(), "xx-YY");
        assert!(!store.is_known("xx-YY"));
        store.reset();
        assert_eq!(store.locale(), "en-US");
    }

    #[test]
    fn test_load_locales_json() {
        let store = LocaleStore::default();
        let count = store
            .load_locales_json(&json!({
                "it-IT": { "required": "{{#label}} è obbligatorio", "pattern": { "phone": "Telefono" } }
            }))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.message("pattern.phone", "it-IT").unwrap(), "Telefono");

        assert!(store.load_locales_json(&json!(["it-IT"])).is_err());
        assert!(store.load_locales_json(&json!({ "it-IT": "nope" })).is_err());
    }

    #[test]
    fn test_load_locale_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("pt-BR.json"), r#"{"required": "{{#label}} é obrigatório"}"#).unwrap();
        fs::write(dir.path().join("pt-PT.json"), "not json").unwrap();

        let store = LocaleStore::default();
        assert_eq!(store.load_locale_dir(dir.path()), 1);
        assert_eq!(store.message("required", "pt-BR").unwrap(), "{{#label}} é obrigatório");
        assert_eq!(store.load_locale_dir(dir.path().join("missing")), 0);
    }

    #[test]
    fn test_lazy_loader_uses_cache() {
        let dir = tempfile::tempdir().unwrap();
        for (locale, text) in [("de-DE", "Pflicht"), ("it-IT", "Obbligatorio"), ("nl-NL", "Verplicht")] {
            fs::write(
                dir.path().join(format!("{}.json", locale)),
                json!({ "required": text }).to_string(),
            )
            .unwrap();
        }

        let store = LocaleStore::default().with_loader(DirectoryLoader::new(dir.path()), 2);
        assert!(store.is_known("nl-NL"));
        assert_eq!(store.message("required", "de-DE").unwrap(), "Pflicht");
        assert_eq!(store.message("required", "it-IT").unwrap(), "Obbligatorio");
        assert_eq!(store.message("required", "nl-NL").unwrap(), "Verplicht");
        assert_eq!(store.cached_locales(), vec!["it-IT".to_string(), "nl-NL".to_string()]);

        // evicted packs are reloaded on demand
        assert_eq!(store.message("required", "de-DE").unwrap(), "Pflicht");
    }
}
