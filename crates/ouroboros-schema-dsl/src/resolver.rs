//! Validation error formatting
//!
//! Turns one violation reported by a validation engine into a localized,
//! human-readable [`FormattedError`]. Resolution never fails: every lookup
//! miss degrades to the next tier, ending at a fixed literal.
//!
//! Message priority for keyword `k`, alias `a` (`minLength` -> `min`, ...),
//! node type `t` and pack family `f` (`string`, `number` or `array`):
//!
//! 1. Node custom messages: `t.k`, `t.a`, then `number.k`, `number.a` for
//!    integers, then `a`, `k`, `default`
//! 2. `format.<name>` for format violations (`uri` reads as `url`)
//! 3. Locale messages: `f.a`, `a`, `k`
//! 4. The engine's own message
//! 5. Locale `default`, then `"Validation error"`
//!
//! Locale lookups consult per-call overrides first, then the [`LocaleStore`]
//! layers. A resolved message from tiers 1-3 that is itself a locale key (no
//! whitespace) is translated, dropping trailing segments until a translation
//! is found.

use crate::constraint::number_value;
use crate::locale::{normalize_locale, LocaleStore, MessageMap};
use crate::schema::{format_message_name, SchemaKind, SchemaNode};
use crate::template::{self, TemplateArg, TemplateContext};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Message used when every other tier misses
pub const FALLBACK_MESSAGE: &str = "Validation error";

/// Label used for a violation on the root value
pub const ROOT_LABEL: &str = "value";

/// Engine keyword -> short alias used by custom messages and locale packs
const KEYWORD_ALIASES: &[(&str, &str)] = &[
    ("minLength", "min"),
    ("maxLength", "max"),
    ("minimum", "min"),
    ("maximum", "max"),
    ("minItems", "min"),
    ("maxItems", "max"),
];

/// Bound keyword -> the keyword bounding the other side
const OPPOSITE_BOUNDS: &[(&str, &str)] = &[
    ("minLength", "maxLength"),
    ("maxLength", "minLength"),
    ("minimum", "maximum"),
    ("maximum", "minimum"),
    ("minItems", "maxItems"),
    ("maxItems", "minItems"),
];

/// Short name for an engine keyword; unknown keywords pass through
pub fn alias_keyword(keyword: &str) -> &str {
    KEYWORD_ALIASES
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, alias)| *alias)
        .unwrap_or(keyword)
}

// ============================================================================
// Violation Records
// ============================================================================

/// One violation as reported by a validation engine
#[derive(Debug, Clone, Default)]
pub struct ErrorDescriptor<'a> {
    /// Failing keyword (`required`, `minimum`, `pattern`, ...)
    pub keyword: String,
    /// JSON pointer to the failing value (`/address/city`)
    pub instance_path: String,
    /// Keyword parameters (`limit`, `missingProperty`, `allowedValues`, ...)
    pub params: Map<String, Value>,
    /// Schema node that holds the failing keyword
    pub parent_schema: Option<&'a SchemaNode>,
    /// Message produced by the engine itself
    pub message: Option<String>,
}

impl<'a> ErrorDescriptor<'a> {
    pub fn new(keyword: impl Into<String>, instance_path: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            instance_path: instance_path.into(),
            ..Default::default()
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn schema(mut self, node: &'a SchemaNode) -> Self {
        self.parent_schema = Some(node);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Read an engine error object: `{keyword, instancePath, params, message}`
    ///
    /// The older `dataPath` spelling is accepted too.
    pub fn from_engine(error: &Value) -> Self {
        let text = |key: &str| error.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            keyword: text("keyword").unwrap_or_default(),
            instance_path: text("instancePath").or_else(|| text("dataPath")).unwrap_or_default(),
            params: error
                .get("params")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            parent_schema: None,
            message: text("message"),
        }
    }
}

/// A violation ready to show to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedError {
    /// Dotted field path (`address.city`), empty for the root value
    pub path: String,
    pub message: String,
    pub keyword: String,
    /// Violation parameters, with `limit` filled from the schema when missing
    pub params: Map<String, Value>,
}

impl fmt::Display for FormattedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// Resolves violations against a [`LocaleStore`]
#[derive(Debug, Clone)]
pub struct ErrorFormatter<'s> {
    store: &'s LocaleStore,
    locale: Option<String>,
    overrides: MessageMap,
}

impl<'s> ErrorFormatter<'s> {
    pub fn new(store: &'s LocaleStore) -> Self {
        Self {
            store,
            locale: None,
            overrides: MessageMap::new(),
        }
    }

    /// Use `locale` instead of the store's current locale
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(normalize_locale(locale));
        self
    }

    /// Per-call message overrides, consulted before every locale layer
    pub fn with_messages<I, K, V>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides
            .extend(messages.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Locale this formatter renders in
    pub fn locale(&self) -> String {
        self.locale.clone().unwrap_or_else(|| self.store.locale())
    }

    /// Format a batch of violations in order
    pub fn format_all<'a, I>(&self, errors: I) -> Vec<FormattedError>
    where
        I: IntoIterator<Item = ErrorDescriptor<'a>>,
    {
        let locale = self.locale();
        errors
            .into_iter()
            .map(|error| self.format_in(&error, &locale))
            .collect()
    }

    /// Format one violation
    pub fn format(&self, error: &ErrorDescriptor<'_>) -> FormattedError {
        self.format_in(error, &self.locale())
    }

    fn format_in(&self, error: &ErrorDescriptor<'_>, locale: &str) -> FormattedError {
        let keyword = error.keyword.as_str();
        let mut path = pointer_to_dotted(&error.instance_path);
        let mut node = error.parent_schema;

        // required violations point at the parent; report the missing child
        let missing = (keyword == "required")
            .then(|| error.params.get("missingProperty").and_then(Value::as_str))
            .flatten();
        if let Some(missing) = missing {
            path = join_path(&path, missing);
            if let Some(child) = node.and_then(|parent| parent.property(missing)) {
                node = Some(child);
            }
        }

        let field_name = path.rsplit('.').next().unwrap_or_default().to_string();
        let label = self.resolve_label(node, &path, &field_name, locale);
        let template = self.resolve_template(keyword, node, error, locale);

        let mut params = error.params.clone();
        if !params.contains_key("limit") {
            if let Some(limit) = node.and_then(|n| bound_of(n, keyword)) {
                params.insert("limit".to_string(), limit);
            }
        }

        let context = build_context(keyword, node, &params, &label, &field_name, &path);
        FormattedError {
            message: template::render(&template, &context),
            path,
            keyword: keyword.to_string(),
            params,
        }
    }

    // ========================================================================
    // Label
    // ========================================================================

    fn resolve_label(&self, node: Option<&SchemaNode>, path: &str, field_name: &str, locale: &str) -> String {
        if let Some(label) = node.and_then(|n| n.label.as_deref()) {
            return self.translate_label(label, locale);
        }
        if !path.is_empty() {
            if let Some(label) = self.label_lookup(&format!("label.{}", path), locale) {
                return label;
            }
        }
        if field_name.is_empty() {
            ROOT_LABEL.to_string()
        } else {
            field_name.to_string()
        }
    }

    /// A node label naming a key: `label.<label>` first, then the label
    /// itself when dotted (`fields.age`). Bare words such as `type` are never
    /// read as message keys.
    fn translate_label(&self, label: &str, locale: &str) -> String {
        if !looks_like_key(label) {
            return label.to_string();
        }
        let scoped = format!("label.{}", label);
        self.label_lookup(&scoped, locale)
            .or_else(|| {
                label
                    .contains('.')
                    .then(|| self.label_lookup(label, locale))
                    .flatten()
            })
            .unwrap_or_else(|| label.to_string())
    }

    /// Labels are plain text; templates never qualify
    fn label_lookup(&self, key: &str, locale: &str) -> Option<String> {
        self.lookup(key, locale)
            .filter(|label| !template::has_placeholders(label))
    }

    // ========================================================================
    // Message
    // ========================================================================

    fn resolve_template(
        &self,
        keyword: &str,
        node: Option<&SchemaNode>,
        error: &ErrorDescriptor<'_>,
        locale: &str,
    ) -> String {
        let alias = alias_keyword(keyword);
        let family = node.and_then(|n| pack_family(n.kind));

        // custom messages on the node
        if let Some((kind, custom)) = node
            .map(|n| (n.kind, &n.custom_messages))
            .filter(|(_, m)| !m.is_empty())
        {
            let mut keys = Vec::with_capacity(7);
            keys.push(format!("{}.{}", kind.as_str(), keyword));
            keys.push(format!("{}.{}", kind.as_str(), alias));
            if kind == SchemaKind::Integer {
                keys.push(format!("number.{}", keyword));
                keys.push(format!("number.{}", alias));
            }
            keys.extend([alias.to_string(), keyword.to_string(), "default".to_string()]);

            if let Some(message) = keys.iter().find_map(|key| custom.get(key)) {
                return self.translate_key(message, locale);
            }
        }

        if keyword == "format" {
            let format = error
                .params
                .get("format")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| node.and_then(|n| n.format).map(|f| f.as_str().to_string()));
            if let Some(format) = format {
                let key = format!("format.{}", format_message_name(&format));
                if let Some(message) = self.lookup(&key, locale) {
                    return self.translate_key(&message, locale);
                }
            }
        }

        let mut keys = Vec::with_capacity(3);
        if let Some(family) = family {
            keys.push(format!("{}.{}", family, alias));
        }
        keys.push(alias.to_string());
        if alias != keyword {
            keys.push(keyword.to_string());
        }
        if let Some(message) = keys.iter().find_map(|key| self.lookup(key, locale)) {
            return self.translate_key(&message, locale);
        }

        if let Some(message) = error.message.as_ref().filter(|m| !m.is_empty()) {
            return message.clone();
        }

        self.lookup("default", locale)
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }

    /// Translate a message that names a locale key, dropping trailing
    /// segments (`pattern.phone.cn` -> `pattern.phone` -> `pattern`)
    fn translate_key(&self, message: &str, locale: &str) -> String {
        if !looks_like_key(message) {
            return message.to_string();
        }

        let mut key = message;
        loop {
            // an override pointing at itself is not a translation
            if let Some(translated) = self.lookup(key, locale).filter(|t| t.as_str() != message) {
                return translated;
            }
            match key.rfind('.') {
                Some(pos) => key = &key[..pos],
                None => return message.to_string(),
            }
        }
    }

    fn lookup(&self, key: &str, locale: &str) -> Option<String> {
        if let Some(message) = self.overrides.get(key) {
            return Some(message.clone());
        }
        self.store.message(key, locale)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn looks_like_key(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(|c| c.is_whitespace() || c == '{' || c == '}')
}

/// Kind-qualified key prefix used by the bundled packs
fn pack_family(kind: SchemaKind) -> Option<&'static str> {
    match kind {
        SchemaKind::String => Some("string"),
        SchemaKind::Array => Some("array"),
        kind if kind.is_numeric() => Some("number"),
        _ => None,
    }
}

/// `/address/city` -> `address.city`; `~1` and `~0` unescape
pub fn pointer_to_dotted(pointer: &str) -> String {
    let trimmed = pointer.trim_start_matches(|c: char| c == '/' || c == '.');
    if trimmed.is_empty() {
        return String::new();
    }
    if !pointer.starts_with('/') {
        return trimmed.to_string();
    }
    trimmed
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}

/// Bound the schema declares for a keyword
fn bound_of(node: &SchemaNode, keyword: &str) -> Option<Value> {
    let count = |n: Option<usize>| n.map(Value::from);
    let number = |n: Option<f64>| n.map(number_value);
    let exact = node.string.exact_length;

    match keyword {
        "minLength" => count(node.string.min_length.or(exact)),
        "maxLength" => count(node.string.max_length.or(exact)),
        "exactLength" => count(exact),
        "minimum" => number(node.numeric.minimum),
        "maximum" => number(node.numeric.maximum),
        "exclusiveMinimum" => number(node.numeric.exclusive_minimum),
        "exclusiveMaximum" => number(node.numeric.exclusive_maximum),
        "minItems" => count(node.list.min_items),
        "maxItems" => count(node.list.max_items),
        _ => None,
    }
}

fn build_context(
    keyword: &str,
    node: Option<&SchemaNode>,
    params: &Map<String, Value>,
    label: &str,
    field_name: &str,
    path: &str,
) -> TemplateContext {
    let mut context: TemplateContext = params
        .iter()
        .map(|(k, v)| (k.clone(), TemplateArg::Value(v.clone())))
        .collect();

    // min/max are both filled: the side that fired gets the limit, the other
    // side its own bound when the schema has one
    if let Some(limit) = params.get("limit") {
        let alias = alias_keyword(keyword);
        if alias == "min" || alias == "max" {
            let other_alias = if alias == "min" { "max" } else { "min" };
            let other = OPPOSITE_BOUNDS
                .iter()
                .find(|(k, _)| *k == keyword)
                .and_then(|(_, opposite)| node.and_then(|n| bound_of(n, opposite)))
                .unwrap_or_else(|| limit.clone());
            context.insert(alias.to_string(), TemplateArg::Value(limit.clone()));
            context
                .entry(other_alias.to_string())
                .or_insert(TemplateArg::Value(other));
        }
    }

    if let Some(node) = node {
        let fill = |context: &mut TemplateContext, key: &str, value: Option<Value>| {
            if let Some(value) = value {
                context.entry(key.to_string()).or_insert(TemplateArg::Value(value));
            }
        };
        fill(&mut context, "allowedValues", node.enum_values.clone().map(Value::Array));
        fill(&mut context, "multipleOf", node.numeric.multiple_of.map(number_value));
        fill(&mut context, "format", node.format.map(|f| Value::from(f.as_str())));
        fill(&mut context, "type", Some(Value::from(node.kind.as_str())));
        if let Some(pattern) = &node.pattern {
            context
                .entry("pattern".to_string())
                .or_insert_with(|| TemplateArg::Pattern(pattern.clone()));
        }
    }

    context.insert("field".to_string(), field_name.into());
    context.insert("path".to_string(), path.into());
    context.insert("label".to_string(), label.into());
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Format;
    use serde_json::json;

    fn age_node() -> SchemaNode {
        let mut node = SchemaNode::number();
        node.numeric.minimum = Some(18.0);
        node.numeric.maximum = Some(120.0);
        node
    }

    #[test]
    fn test_alias_table() {
        assert_eq!(alias_keyword("minLength"), "min");
        assert_eq!(alias_keyword("maxItems"), "max");
        assert_eq!(alias_keyword("pattern"), "pattern");
    }

    #[test]
    fn test_pointer_to_dotted() {
        assert_eq!(pointer_to_dotted("/address/city"), "address.city");
        assert_eq!(pointer_to_dotted("/tags/0"), "tags.0");
        assert_eq!(pointer_to_dotted("/a~1b/c~0d"), "a/b.c~d");
        assert_eq!(pointer_to_dotted(".legacy.path"), "legacy.path");
        assert_eq!(pointer_to_dotted(""), "");
    }

    #[test]
    fn test_kind_qualified_message_and_limit() {
        let store = LocaleStore::default();
        let node = age_node();
        let error = ErrorDescriptor::new("minimum", "/age").param("limit", 18).schema(&node);

        let formatted = ErrorFormatter::new(&store).format(&error);
        assert_eq!(formatted.path, "age");
        assert_eq!(formatted.message, "age must be greater than or equal to 18");
        assert_eq!(formatted.params["limit"], json!(18));
    }

    #[test]
    fn test_limit_derived_from_schema() {
        let store = LocaleStore::default();
        let mut node = SchemaNode::string();
        node.string.min_length = Some(3);
        node.string.max_length = Some(32);
        node.custom_messages
            .insert("min".to_string(), "Between {{#min}} and {{#max}}".to_string());

        let error = ErrorDescriptor::new("minLength", "/username").schema(&node);
        let formatted = ErrorFormatter::new(&store).format(&error);
        assert_eq!(formatted.message, "Between 3 and 32");
        assert_eq!(formatted.params["limit"], json!(3));

        let mut code = SchemaNode::string();
        code.string.exact_length = Some(6);
        let error = ErrorDescriptor::new("exactLength", "/code").schema(&code);
        let formatted = ErrorFormatter::new(&store).format(&error);
        assert_eq!(formatted.message, "code must be exactly 6 characters");
        assert_eq!(formatted.params["limit"], json!(6));
    }

    #[test]
    fn test_required_uses_child_label() {
        let store = LocaleStore::default();
        let mut child = SchemaNode::string();
        child.label = Some("User name".to_string());
        let mut parent = SchemaNode::object();
        parent.set_property("username", child);
        parent.add_required("username");

        let error = ErrorDescriptor::new("required", "")
            .param("missingProperty", "username")
            .schema(&parent);
        let formatted = ErrorFormatter::new(&store).format(&error);
        assert_eq!(formatted.path, "username");
        assert_eq!(formatted.message, "User name is required");
    }

    #[test]
    fn test_label_translation() {
        let store = LocaleStore::default();
        store.add_locale("zh-CN", [("label.profile.email", "邮箱"), ("fields.age", "年龄")]);

        let email = SchemaNode::formatted(Format::Email);
        let error = ErrorDescriptor::new("format", "/profile/email")
            .param("format", "email")
            .schema(&email);
        let formatted = ErrorFormatter::new(&store).with_locale("zh-CN").format(&error);
        assert_eq!(formatted.message, "邮箱必须是有效的邮箱地址");

        let mut age = age_node();
        age.label = Some("fields.age".to_string());
        let error = ErrorDescriptor::new("maximum", "/age").param("limit", 120).schema(&age);
        let formatted = ErrorFormatter::new(&store).with_locale("zh-CN").format(&error);
        assert_eq!(formatted.message, "年龄必须小于或等于120");
    }

    #[test]
    fn test_dotted_custom_message_falls_back_by_segment() {
        let store = LocaleStore::default();
        let mut node = SchemaNode::string();
        node.custom_messages
            .insert("pattern".to_string(), "pattern.phone.cn".to_string());

        let error = ErrorDescriptor::new("pattern", "/mobile").schema(&node);
        let formatted = ErrorFormatter::new(&store).format(&error);
        assert_eq!(formatted.message, "mobile must be a valid phone number");

        // literal custom messages are rendered as-is
        node.custom_messages
            .insert("pattern".to_string(), "{{#label}} looks wrong".to_string());
        let error = ErrorDescriptor::new("pattern", "/mobile").schema(&node);
        assert_eq!(ErrorFormatter::new(&store).format(&error).message, "mobile looks wrong");
    }

    #[test]
    fn test_custom_message_priority() {
        let store = LocaleStore::default();
        let mut node = SchemaNode::string();
        node.string.min_length = Some(2);
        node.custom_messages.insert("default".to_string(), "default msg".to_string());
        node.custom_messages.insert("minLength".to_string(), "keyword msg".to_string());
        let formatter = ErrorFormatter::new(&store);

        let error = ErrorDescriptor::new("minLength", "/x").schema(&node);
        assert_eq!(formatter.format(&error).message, "keyword msg");

        node.custom_messages.insert("min".to_string(), "alias msg".to_string());
        let error = ErrorDescriptor::new("minLength", "/x").schema(&node);
        assert_eq!(formatter.format(&error).message, "alias msg");

        node.custom_messages.insert("string.min".to_string(), "kind alias msg".to_string());
        let error = ErrorDescriptor::new("minLength", "/x").schema(&node);
        assert_eq!(formatter.format(&error).message, "kind alias msg");

        node.custom_messages.insert("string.minLength".to_string(), "kind keyword msg".to_string());
        let error = ErrorDescriptor::new("minLength", "/x").schema(&node);
        assert_eq!(formatter.format(&error).message, "kind keyword msg");

        let error = ErrorDescriptor::new("pattern", "/x").schema(&node);
        assert_eq!(formatter.format(&error).message, "default msg");
    }

    #[test]
    fn test_custom_messages_keyed_by_node_type() {
        let store = LocaleStore::default();
        let formatter = ErrorFormatter::new(&store);

        let mut count = SchemaNode::integer();
        count.numeric.minimum = Some(1.0);
        count.custom_messages.insert("integer.minimum".to_string(), "INT MIN".to_string());
        let error = ErrorDescriptor::new("minimum", "/n").param("limit", 1).schema(&count);
        assert_eq!(formatter.format(&error).message, "INT MIN");

        // integers still honour number-qualified keys
        count.custom_messages.clear();
        count.custom_messages.insert("number.min".to_string(), "at least {{#limit}}".to_string());
        let error = ErrorDescriptor::new("minimum", "/n").param("limit", 1).schema(&count);
        assert_eq!(formatter.format(&error).message, "at least 1");

        let mut flag = SchemaNode::boolean();
        flag.custom_messages.insert("boolean.type".to_string(), "yes or no".to_string());
        let error = ErrorDescriptor::new("type", "/b").param("type", "boolean").schema(&flag);
        assert_eq!(formatter.format(&error).message, "yes or no");
    }

    #[test]
    fn test_keyword_label_stays_literal() {
        let store = LocaleStore::default();
        let mut parent = SchemaNode::object();
        for keyword in ["type", "format", "pattern", "required"] {
            let mut child = SchemaNode::string();
            child.label = Some(keyword.to_string());
            parent.set_property(keyword, child);
        }

        for keyword in ["type", "format", "pattern", "required"] {
            let error = ErrorDescriptor::new("required", "")
                .param("missingProperty", keyword)
                .schema(&parent);
            let message = ErrorFormatter::new(&store).format(&error).message;
            assert_eq!(message, format!("{} is required", keyword));
        }

        // a scoped label key still translates
        store.add_locale("en-US", [("label.type", "Kind")]);
        let error = ErrorDescriptor::new("required", "")
            .param("missingProperty", "type")
            .schema(&parent);
        assert_eq!(ErrorFormatter::new(&store).format(&error).message, "Kind is required");
    }

    #[test]
    fn test_override_naming_a_key_is_translated() {
        let store = LocaleStore::default();
        let node = SchemaNode::string();
        let error = ErrorDescriptor::new("pattern", "/mobile").schema(&node);

        let call = ErrorFormatter::new(&store).with_messages([("pattern", "pattern.phone.cn")]);
        assert_eq!(call.format(&error).message, "mobile must be a valid phone number");

        store.set_messages([("pattern", "pattern.phone.cn")]);
        assert_eq!(
            ErrorFormatter::new(&store).format(&error).message,
            "mobile must be a valid phone number"
        );
        let zh = ErrorFormatter::new(&store).with_locale("zh-CN").format(&error);
        assert_eq!(zh.message, "mobile必须是有效的手机号码");

        // a key with no translation renders as written
        let call = ErrorFormatter::new(&store).with_messages([("pattern", "nothing.here")]);
        assert_eq!(call.format(&error).message, "nothing.here");
    }

    #[test]
    fn test_format_uri_reads_as_url() {
        let store = LocaleStore::default();
        let node = SchemaNode::formatted(Format::Url);
        let error = ErrorDescriptor::new("format", "/site").param("format", "uri").schema(&node);
        assert_eq!(
            ErrorFormatter::new(&store).format(&error).message,
            "site must be a valid URL"
        );
    }

    #[test]
    fn test_fallback_tiers() {
        let store = LocaleStore::default();
        let formatter = ErrorFormatter::new(&store);

        let error = ErrorDescriptor::new("x-custom", "/a").message("engine says no");
        assert_eq!(formatter.format(&error).message, "engine says no");

        let error = ErrorDescriptor::new("x-custom", "/a");
        assert_eq!(formatter.format(&error).message, "a is invalid");

        let empty = LocaleStore::new("xx-YY", "xx-YY");
        let error = ErrorDescriptor::new("x-custom", "");
        assert_eq!(ErrorFormatter::new(&empty).format(&error).message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_per_call_overrides_and_locale() {
        let store = LocaleStore::default();
        store.set_messages([("required", "global {{#label}}")]);

        let error = ErrorDescriptor::new("required", "").param("missingProperty", "email");
        let formatter = ErrorFormatter::new(&store).with_messages([("required", "call {{#label}}")]);
        assert_eq!(formatter.format(&error).message, "call email");
        assert_eq!(ErrorFormatter::new(&store).format(&error).message, "global email");

        store.reset();
        let formatted = ErrorFormatter::new(&store).with_locale("ja_jp").format(&error);
        assert_eq!(formatted.message, "emailは必須です");
    }

    #[test]
    fn test_root_value_label() {
        let store = LocaleStore::default();
        let error = ErrorDescriptor::new("type", "").param("type", "string");
        let formatted = ErrorFormatter::new(&store).format(&error);
        assert_eq!(formatted.message, "value must be of type string");
        assert_eq!(formatted.to_string(), "value must be of type string");
    }

    #[test]
    fn test_from_engine() {
        let error = ErrorDescriptor::from_engine(&json!({
            "keyword": "enum",
            "instancePath": "/plan",
            "params": { "allowedValues": ["pro", "basic", "free"] },
            "message": "must be equal to one of the allowed values"
        }));
        let store = LocaleStore::default();
        let formatted = ErrorFormatter::new(&store).format(&error);
        assert_eq!(formatted.message, "plan must be one of: pro, basic, free");
        assert_eq!(formatted.to_string(), "plan: plan must be one of: pro, basic, free");
    }

    #[test]
    fn test_format_all_keeps_order() {
        let store = LocaleStore::default();
        let node = age_node();
        let errors = vec![
            ErrorDescriptor::new("required", "").param("missingProperty", "username"),
            ErrorDescriptor::new("minimum", "/age").param("limit", 18).schema(&node),
        ];
        let formatted = ErrorFormatter::new(&store).format_all(errors);
        let paths: Vec<_> = formatted.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["username", "age"]);
    }
}
