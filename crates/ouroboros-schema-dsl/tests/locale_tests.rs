//! Locale store, pack cache and template tests

use ouroboros_schema_dsl::locale::{self, LocalePackCache, MessageMap};
use ouroboros_schema_dsl::template::{self, TemplateContext};
use ouroboros_schema_dsl::{DslConfig, DslEnvironment, ErrorDescriptor, SchemaBuilder, SchemaNode};
use serde_json::json;
use std::fs;

fn pack(required: &str) -> MessageMap {
    MessageMap::from([("required".to_string(), required.to_string())])
}

// ============================================================================
// Pack Cache Tests
// ============================================================================

#[test]
fn test_lru_evicts_oldest_locale() {
    let mut cache = LocalePackCache::new(2);
    cache.set("en-US", pack("en"));
    cache.set("zh-CN", pack("zh"));
    let evicted = cache.set("ja-JP", pack("ja"));

    assert_eq!(evicted.as_deref(), Some("en-US"));
    assert!(cache.get("en-US").is_none());
    assert!(cache.get("zh-CN").is_some());
    assert!(cache.get("ja-JP").is_some());
}

#[test]
fn test_lru_reaccess_protects_locale() {
    let mut cache = LocalePackCache::new(2);
    cache.set("en-US", pack("en"));
    cache.set("zh-CN", pack("zh"));
    cache.get("en-US");
    let evicted = cache.set("ja-JP", pack("ja"));

    assert_eq!(evicted.as_deref(), Some("zh-CN"));
    assert_eq!(cache.get("en-US").unwrap()["required"], "en");
}

// ============================================================================
// Locale Store Tests
// ============================================================================

#[test]
fn test_switching_locale_changes_messages() {
    let env = DslEnvironment::default();
    let error = ErrorDescriptor::new("required", "").param("missingProperty", "email");

    let expected = [
        ("en-US", "email is required"),
        ("zh-CN", "email不能为空"),
        ("ja-JP", "emailは必須です"),
        ("es-ES", "email es obligatorio"),
        ("fr-FR", "email est obligatoire"),
    ];
    for (locale, message) in expected {
        env.set_locale(locale);
        assert_eq!(env.locale(), locale);
        assert_eq!(env.format_error(&error).message, message);
    }

    env.reset_locales();
    assert_eq!(env.locale(), "en-US");
}

#[test]
fn test_add_locale_and_global_overrides() {
    let env = DslEnvironment::default();
    env.add_locale("de-DE", [("required", "{{#label}} ist erforderlich")]);
    env.set_locale("de-DE");

    let error = ErrorDescriptor::new("required", "").param("missingProperty", "name");
    assert_eq!(env.format_error(&error).message, "name ist erforderlich");

    env.set_messages([("required", "Please provide {{#label}}")]);
    assert_eq!(env.format_error(&error).message, "Please provide name");

    // per-call overrides sit above global ones
    let formatted = env
        .formatter()
        .with_messages([("required", "{{#label}}!")])
        .format(&error);
    assert_eq!(formatted.message, "name!");
}

#[test]
fn test_label_keys_translate() {
    let env = DslEnvironment::default();
    env.load_locales_json(&json!({
        "zh-CN": { "label": { "username": "用户名" }, "fields": { "age": "年龄" } }
    }))
    .unwrap();
    env.set_locale("zh-CN");

    let error = ErrorDescriptor::new("required", "").param("missingProperty", "username");
    assert_eq!(env.format_error(&error).message, "用户名不能为空");

    let age = SchemaBuilder::new(SchemaNode::integer()).label("fields.age").build();
    let error = ErrorDescriptor::new("minimum", "/age").param("limit", 18).schema(&age);
    assert_eq!(env.format_error(&error).message, "年龄必须大于或等于18");
}

#[test]
fn test_locale_directory_eager_and_lazy() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("it-IT.json"),
        json!({ "required": "{{#label}} è obbligatorio" }).to_string(),
    )
    .unwrap();
    fs::write(dir.path().join("nl-NL.json"), "{ broken").unwrap();

    // eager: broken files are skipped, the rest merged
    let env = DslEnvironment::default();
    assert_eq!(env.load_locale_dir(dir.path()), 1);
    assert_eq!(env.load_locale_dir(dir.path().join("nope")), 0);
    assert!(env.available_locales().contains(&"it-IT".to_string()));

    // lazy: loaded on first lookup
    let lazy = DslEnvironment::new(DslConfig::new().locale_dir(dir.path()).locale_cache_capacity(1));
    let error = ErrorDescriptor::new("required", "").param("missingProperty", "nome");
    let formatted = lazy.formatter().with_locale("it-IT").format(&error);
    assert_eq!(formatted.message, "nome è obbligatorio");

    // a broken file degrades to the fallback locale
    let formatted = lazy.formatter().with_locale("nl-NL").format(&error);
    assert_eq!(formatted.message, "nome is required");
}

#[test]
fn test_bundled_locales_listed() {
    let env = DslEnvironment::default();
    let available = env.available_locales();
    for locale in locale::BUILTIN_LOCALES {
        assert!(available.contains(&locale.to_string()));
    }
}

// ============================================================================
// Template Tests
// ============================================================================

#[test]
fn test_unresolved_placeholders_stay_visible() {
    let mut context = TemplateContext::new();
    context.insert("label".to_string(), "Age".into());
    assert_eq!(
        template::render("{{#label}} must be at least {{#limit}}", &context),
        "Age must be at least {{#limit}}"
    );
}
