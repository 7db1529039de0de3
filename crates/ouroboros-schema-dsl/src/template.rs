//! Message template engine
//!
//! Three placeholder styles are recognised, tried in this order over the
//! whole template:
//!
//! 1. `{{#name}}`
//! 2. `{{name}}`
//! 3. `{name}`
//!
//! Placeholders whose value is missing or null are left verbatim so gaps are
//! visible rather than silently rendered as empty text. Dotted names
//! (`{{#user.name}}`) walk into object values.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;

static PLACEHOLDER_STYLES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\{\{#([\w.]+)\}\}").unwrap(),
        Regex::new(r"\{\{([\w.]+)\}\}").unwrap(),
        Regex::new(r"\{([\w.]+)\}").unwrap(),
    ]
});

// ============================================================================
// Template Arguments
// ============================================================================

/// A value that can be interpolated into a template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateArg {
    /// Plain JSON value; arrays render comma-separated
    Value(Value),
    /// Timestamp, rendered as RFC 3339
    Date(DateTime<Utc>),
    /// Regular expression, rendered as its source
    Pattern(String),
}

impl TemplateArg {
    /// Text for this argument, `None` when it should stay unresolved
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Value(value) => render_value(value),
            Self::Date(date) => Some(date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Self::Pattern(source) => Some(source.clone()),
        }
    }
}

impl From<Value> for TemplateArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for TemplateArg {
    fn from(text: &str) -> Self {
        Self::Value(Value::String(text.to_string()))
    }
}

impl From<String> for TemplateArg {
    fn from(text: String) -> Self {
        Self::Value(Value::String(text))
    }
}

impl From<i64> for TemplateArg {
    fn from(n: i64) -> Self {
        Self::Value(Value::from(n))
    }
}

impl From<f64> for TemplateArg {
    fn from(n: f64) -> Self {
        Self::Value(crate::constraint::number_value(n))
    }
}

impl From<DateTime<Utc>> for TemplateArg {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date)
    }
}

impl From<Regex> for TemplateArg {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex.as_str().to_string())
    }
}

/// Named arguments for one render
pub type TemplateContext = BTreeMap<String, TemplateArg>;

// ============================================================================
// Rendering
// ============================================================================

/// Substitute every resolvable placeholder in `template`
pub fn render(template: &str, context: &TemplateContext) -> String {
    let mut output = template.to_string();
    for style in PLACEHOLDER_STYLES.iter() {
        if !style.is_match(&output) {
            continue;
        }
        output = style
            .replace_all(&output, |caps: &Captures| {
                lookup(context, &caps[1]).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();
    }
    output
}

/// Whether any placeholder of any style remains
pub fn has_placeholders(text: &str) -> bool {
    PLACEHOLDER_STYLES.iter().any(|style| style.is_match(text))
}

fn lookup(context: &TemplateContext, name: &str) -> Option<String> {
    if let Some(arg) = context.get(name) {
        return arg.render();
    }

    // dotted path into an object argument
    let mut segments = name.split('.');
    let head = segments.next()?;
    let TemplateArg::Value(mut current) = context.get(head)?.clone() else {
        return None;
    };
    for segment in segments {
        current = current.get(segment)?.clone();
    }
    render_value(&current)
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(render_number(n)),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| render_value(item).unwrap_or_else(|| "null".to_string()))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn ctx(pairs: &[(&str, TemplateArg)]) -> TemplateContext {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_three_styles() {
        let context = ctx(&[("label", "Age".into()), ("limit", 18i64.into())]);
        assert_eq!(render("{{#label}} >= {{#limit}}", &context), "Age >= 18");
        assert_eq!(render("{{label}} >= {{limit}}", &context), "Age >= 18");
        assert_eq!(render("{label} >= {limit}", &context), "Age >= 18");
        assert_eq!(render("{{#label}} >= {limit}", &context), "Age >= 18");
    }

    #[test]
    fn test_missing_values_stay_verbatim() {
        let context = ctx(&[("label", "Age".into()), ("limit", TemplateArg::Value(Value::Null))]);
        assert_eq!(
            render("{{#label}} needs {{#limit}} and {{other}} and {x}", &context),
            "Age needs {{#limit}} and {{other}} and {x}"
        );
    }

    #[test]
    fn test_type_aware_stringification() {
        let date = Utc.with_ymd_and_hms(2024, 1, 19, 12, 0, 0).unwrap();
        let context = ctx(&[
            ("values", json!(["pro", "basic", 3]).into()),
            ("when", date.into()),
            ("re", Regex::new(r"^\d+$").unwrap().into()),
            ("ratio", 2.5f64.into()),
            ("whole", json!(3.0).into()),
        ]);
        assert_eq!(render("{{#values}}", &context), "pro, basic, 3");
        assert_eq!(render("{{#when}}", &context), "2024-01-19T12:00:00Z");
        assert_eq!(render("{{#re}}", &context), r"^\d+$");
        assert_eq!(render("{{#ratio}}", &context), "2.5");
        assert_eq!(render("{{#whole}}", &context), "3");
    }

    #[test]
    fn test_dotted_lookup() {
        let context = ctx(&[("user", json!({"name": "Ada"}).into())]);
        assert_eq!(render("Hi {{#user.name}}", &context), "Hi Ada");
        assert_eq!(render("Hi {{#user.age}}", &context), "Hi {{#user.age}}");
    }

    #[test]
    fn test_has_placeholders() {
        assert!(has_placeholders("x {{#a}}"));
        assert!(has_placeholders("x {a}"));
        assert!(!has_placeholders("plain text"));
    }
}
