//! Locale packs and message lookup
//!
//! - [`packs`]: bundled packs (en-US, zh-CN, ja-JP, es-ES, fr-FR)
//! - [`LocaleStore`]: current locale, overlays, global overrides, fallback
//! - [`LocalePackCache`]: bounded LRU for packs read from external sources
//! - [`LocaleLoader`] / [`DirectoryLoader`]: those external sources

pub mod cache;
pub mod loader;
pub mod packs;
mod store;

pub use cache::{LocalePackCache, DEFAULT_CACHE_CAPACITY};
pub use loader::{flatten_messages, DirectoryLoader, LocaleLoader};
pub use packs::{BUILTIN_LOCALES, DEFAULT_LOCALE};
pub use store::LocaleStore;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// `key -> template` for one locale
pub type MessageMap = HashMap<String, String>;

static LOCALE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").unwrap());

/// Whether `code` is shaped like a BCP 47 tag (`en`, `en-US`, `zh-Hant-TW`)
pub fn is_locale_code(code: &str) -> bool {
    LOCALE_CODE.is_match(code)
}

/// Canonical casing for a locale tag: `en_us` -> `en-US`, `zh-hant-tw` -> `zh-Hant-TW`
pub fn normalize_locale(code: &str) -> String {
    let code = code.trim().replace('_', "-");
    let mut parts = code.split('-');
    let mut out = parts.next().unwrap_or_default().to_ascii_lowercase();

    for part in parts {
        out.push('-');
        match part.len() {
            2 if part.chars().all(|c| c.is_ascii_alphabetic()) => {
                out.push_str(&part.to_ascii_uppercase());
            }
            4 if part.chars().all(|c| c.is_ascii_alphabetic()) => {
                let mut chars = part.chars();
                if let Some(first) = chars.next() {
                    out.push(first.to_ascii_uppercase());
                    out.push_str(&chars.as_str().to_ascii_lowercase());
                }
            }
            _ => out.push_str(part),
        }
    }
    out
}
