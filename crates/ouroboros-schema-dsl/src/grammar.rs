//! DSL tokenizer and type resolver
//!
//! Recursive descent over the expression grammar, one function per production:
//!
//! ```text
//! expr     := union | array | enum | scalar
//! union    := 'types:' subexpr ('|' subexpr)+
//! array    := 'array' (':' constraint)? ('<' expr '>')? '!'?
//! enum     := token ('|' token)+            // no ':' and not a bare digit range
//! scalar   := typeName (':' constraint)? '!'?
//!           | typeName NUMBER-RANGE          // inline form, e.g. `string3-32`
//! ```
//!
//! `array!1-10` is rewritten to `array:1-10!` before parsing.

use crate::constraint::{self, ConstraintTarget};
use crate::error::{DslError, Result};
use crate::registry::{CustomTypeRegistry, TypeDefinition};
use crate::schema::SchemaNode;
use crate::types::BuiltinType;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Prefix marking a cross-type union
pub const UNION_MARKER: &str = "types:";

/// Trailing marker for required fields
pub const REQUIRED_MARKER: char = '!';

const ARRAY: &str = "array";

static INLINE_CONSTRAINT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)(\d+(?:-\d*)?|-\d+)$").unwrap());

// ============================================================================
// Tokenized Expression
// ============================================================================

/// A scalar expression split into its parts
///
/// Transient: only used while compiling one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DslExpression {
    pub type_name: String,
    pub constraint_body: Option<String>,
    pub required: bool,
}

/// Split an expression into type name, constraint body and required flag
///
/// Only built-in names are protected from the inline `name123` split; use
/// [`compile_expression`] for registry-aware resolution.
pub fn tokenize(expr: &str) -> DslExpression {
    let normalized = normalize(expr);
    let (body, required) = strip_required(&normalized);
    let (type_name, constraint_body) = split_type_constraint(body, BuiltinType::is_builtin);
    DslExpression {
        type_name: type_name.to_string(),
        constraint_body: constraint_body.map(str::to_string),
        required,
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Compile one DSL expression into a schema node
///
/// The returned node carries the transient required flag; the assembler
/// hoists it into the parent object.
pub fn compile_expression(expr: &str, registry: &CustomTypeRegistry) -> Result<SchemaNode> {
    let normalized = normalize(expr);
    let (body, required) = strip_required(&normalized);
    if body.is_empty() {
        return Err(DslError::Syntax {
            expr: expr.to_string(),
            reason: "empty expression".to_string(),
        });
    }

    let mut node = parse_expr(body, registry)?;
    node.required_flag = required;
    trace!(expr = %expr, kind = %node.kind, required, "compiled DSL expression");
    Ok(node)
}

/// Rewrite the `array!1-10` shorthand so the required marker trails the constraint
pub fn normalize(expr: &str) -> String {
    let expr = expr.trim();
    let Some(rest) = expr.strip_prefix("array!") else {
        return expr.to_string();
    };
    if rest.is_empty() {
        return expr.to_string();
    }
    if rest.starts_with('<') {
        format!("{}{}!", ARRAY, rest)
    } else {
        format!("{}:{}!", ARRAY, rest)
    }
}

/// Strip one trailing required marker
pub fn strip_required(expr: &str) -> (&str, bool) {
    match expr.trim().strip_suffix(REQUIRED_MARKER) {
        Some(body) => (body.trim_end(), true),
        None => (expr.trim(), false),
    }
}

// ============================================================================
// Productions
// ============================================================================

/// `expr := union | array | enum | scalar`
fn parse_expr(body: &str, registry: &CustomTypeRegistry) -> Result<SchemaNode> {
    if let Some(rest) = body.strip_prefix(UNION_MARKER) {
        return parse_union(rest, registry);
    }
    if is_array_expr(body) {
        return parse_array(body, registry);
    }
    if !body.contains(':') && constraint::is_enum_list(body) {
        return parse_enum(body);
    }
    parse_scalar(body, registry)
}

/// Nested expressions (union variants, array items) drop their own required marker
fn parse_subexpr(expr: &str, registry: &CustomTypeRegistry) -> Result<SchemaNode> {
    let normalized = normalize(expr);
    let (body, _) = strip_required(&normalized);
    if body.is_empty() {
        return Err(DslError::Syntax {
            expr: expr.to_string(),
            reason: "empty sub-expression".to_string(),
        });
    }
    parse_expr(body, registry)
}

/// `union := 'types:' subexpr ('|' subexpr)+`
fn parse_union(rest: &str, registry: &CustomTypeRegistry) -> Result<SchemaNode> {
    let variants = rest
        .split('|')
        .map(|part| parse_subexpr(part, registry))
        .collect::<Result<Vec<_>>>()?;
    Ok(SchemaNode::union(variants))
}

fn is_array_expr(body: &str) -> bool {
    match body.strip_prefix(ARRAY) {
        Some(rest) => match rest.chars().next() {
            None => true,
            Some(c) => c == ':' || c == '<' || c == '-' || c.is_ascii_digit(),
        },
        None => false,
    }
}

/// `array := 'array' (':' constraint)? ('<' expr '>')?`
fn parse_array(body: &str, registry: &CustomTypeRegistry) -> Result<SchemaNode> {
    let rest = &body[ARRAY.len()..];

    let (head, item_expr) = match rest.find('<') {
        Some(open) => {
            let inner = rest[open + 1..].strip_suffix('>').ok_or_else(|| DslError::Syntax {
                expr: body.to_string(),
                reason: "unterminated '<' in array item type".to_string(),
            })?;
            (&rest[..open], Some(inner))
        }
        None => (rest, None),
    };

    let constraint_body = head.strip_prefix(':').unwrap_or(head).trim();

    let items = item_expr
        .map(|inner| parse_subexpr(inner, registry))
        .transpose()?;
    let mut node = SchemaNode::array(items);

    if !constraint_body.is_empty() {
        constraint::parse_constraint(constraint_body, ConstraintTarget::Items, ARRAY)?.apply(&mut node);
    }
    Ok(node)
}

/// `enum := token ('|' token)+`, element type inferred from the tokens
fn parse_enum(body: &str) -> Result<SchemaNode> {
    let tokens = constraint::split_enum_tokens(body);
    if tokens.len() < 2 {
        return Err(DslError::Syntax {
            expr: body.to_string(),
            reason: "enumeration needs at least two values".to_string(),
        });
    }
    let (kind, values) = constraint::infer_enum(&tokens);
    let mut node = SchemaNode::new(kind);
    node.enum_values = Some(values);
    Ok(node)
}

/// `scalar := typeName (':' constraint)?`
fn parse_scalar(body: &str, registry: &CustomTypeRegistry) -> Result<SchemaNode> {
    let is_known = |name: &str| BuiltinType::is_builtin(name) || registry.has(name);
    let (type_name, constraint_body) = split_type_constraint(body, is_known);
    resolve_type(type_name, constraint_body, registry, body)
}

/// Split on the first `:`, else try the inline `name123-456` form
///
/// A name that `is_known` reports as a type is never split inline, so custom
/// names ending in digits (`md5`) survive.
pub fn split_type_constraint(body: &str, is_known: impl Fn(&str) -> bool) -> (&str, Option<&str>) {
    if let Some((type_name, constraint_body)) = body.split_once(':') {
        return (type_name.trim(), Some(constraint_body.trim()));
    }
    if is_known(body) {
        return (body, None);
    }
    if let Some(caps) = INLINE_CONSTRAINT_REGEX.captures(body) {
        if let (Some(name), Some(range)) = (caps.get(1), caps.get(2)) {
            return (name.as_str(), Some(range.as_str()));
        }
    }
    (body, None)
}

// ============================================================================
// Type Resolution
// ============================================================================

fn resolve_type(
    type_name: &str,
    constraint_body: Option<&str>,
    registry: &CustomTypeRegistry,
    expr: &str,
) -> Result<SchemaNode> {
    if let Some(builtin) = BuiltinType::parse(type_name) {
        if let BuiltinType::Variant(family) = builtin {
            return BuiltinType::variant_node(family, constraint_body);
        }
        let mut node = builtin.base_node()?;
        apply_constraint(&mut node, constraint_body, type_name)?;
        return Ok(node);
    }

    match registry.get(type_name) {
        Some(TypeDefinition::Schema(template)) => {
            let mut node = template.clone();
            apply_constraint(&mut node, constraint_body, type_name)?;
            Ok(node)
        }
        Some(TypeDefinition::Factory(factory)) => factory(constraint_body),
        None => Err(DslError::UnknownType {
            type_name: type_name.to_string(),
            expr: expr.to_string(),
        }),
    }
}

fn apply_constraint(node: &mut SchemaNode, body: Option<&str>, type_name: &str) -> Result<()> {
    let Some(body) = body.map(str::trim).filter(|b| !b.is_empty()) else {
        return Ok(());
    };
    let target = ConstraintTarget::for_kind(node.kind).ok_or_else(|| DslError::InvalidConstraint {
        constraint: body.to_string(),
        type_name: type_name.to_string(),
        reason: format!("{} types take no constraint", node.kind),
    })?;
    constraint::parse_constraint(body, target, type_name)?.apply(node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Format, SchemaKind};
    use serde_json::json;

    fn compile(expr: &str) -> Result<SchemaNode> {
        compile_expression(expr, &CustomTypeRegistry::new())
    }

    #[test]
    fn test_tokenize_forms() {
        let t = tokenize("string:3-32!");
        assert_eq!(t.type_name, "string");
        assert_eq!(t.constraint_body.as_deref(), Some("3-32"));
        assert!(t.required);

        let t = tokenize("string3-32");
        assert_eq!(t.type_name, "string");
        assert_eq!(t.constraint_body.as_deref(), Some("3-32"));
        assert!(!t.required);

        let t = tokenize("email");
        assert_eq!(t.type_name, "email");
        assert_eq!(t.constraint_body, None);
    }

    #[test]
    fn test_normalize_array_shorthand() {
        assert_eq!(normalize("array!1-10"), "array:1-10!");
        assert_eq!(normalize("array!<string>"), "array<string>!");
        assert_eq!(normalize("array!"), "array!");
        assert_eq!(normalize("string!"), "string!");
    }

    #[test]
    fn test_scalar_with_range() {
        let node = compile("string:3-32!").unwrap();
        assert_eq!(node.kind, SchemaKind::String);
        assert_eq!(node.string.min_length, Some(3));
        assert_eq!(node.string.max_length, Some(32));
        assert!(node.is_required());
    }

    #[test]
    fn test_inline_digits() {
        let node = compile("string3-32").unwrap();
        assert_eq!(node.string.min_length, Some(3));
        assert_eq!(node.string.max_length, Some(32));
    }

    #[test]
    fn test_array_forms() {
        let node = compile("array<string:1-10>").unwrap();
        assert_eq!(node.kind, SchemaKind::Array);
        let items = node.items.as_deref().unwrap();
        assert_eq!(items.kind, SchemaKind::String);
        assert_eq!(items.string.min_length, Some(1));
        assert_eq!(items.string.max_length, Some(10));

        let node = compile("array:1-5<number>").unwrap();
        assert_eq!(node.list.min_items, Some(1));
        assert_eq!(node.list.max_items, Some(5));
        assert_eq!(node.items.as_deref().map(|i| i.kind), Some(SchemaKind::Number));

        let node = compile("array!1-10").unwrap();
        assert!(node.is_required());
        assert_eq!(node.list.min_items, Some(1));
        assert_eq!(node.list.max_items, Some(10));
        assert!(node.items.is_none());

        let node = compile("array<array<integer>>").unwrap();
        let inner = node.items.as_deref().unwrap();
        assert_eq!(inner.kind, SchemaKind::Array);
        assert_eq!(inner.items.as_deref().map(|i| i.kind), Some(SchemaKind::Integer));
    }

    #[test]
    fn test_array_item_required_marker_is_dropped() {
        let node = compile("array<string!>").unwrap();
        assert!(!node.items.as_deref().unwrap().is_required());
    }

    #[test]
    fn test_unterminated_array() {
        assert!(matches!(compile("array<string"), Err(DslError::Syntax { .. })));
    }

    #[test]
    fn test_bare_enums() {
        let node = compile("a|b|c").unwrap();
        assert_eq!(node.kind, SchemaKind::String);
        assert_eq!(node.enum_values, Some(vec![json!("a"), json!("b"), json!("c")]));

        let node = compile("true|false").unwrap();
        assert_eq!(node.kind, SchemaKind::Boolean);
        assert_eq!(node.enum_values, Some(vec![json!(true), json!(false)]));

        let node = compile("1|2|3!").unwrap();
        assert_eq!(node.kind, SchemaKind::Number);
        assert!(node.is_required());
    }

    #[test]
    fn test_union() {
        let node = compile("types:string:1-5|number:>0").unwrap();
        assert_eq!(node.kind, SchemaKind::Union);
        assert_eq!(node.variants.len(), 2);
        assert_eq!(node.variants[0].string.max_length, Some(5));
        assert_eq!(node.variants[1].numeric.exclusive_minimum, Some(0.0));

        let single = compile("types:email").unwrap();
        assert_eq!(single.format, Some(Format::Email));
    }

    #[test]
    fn test_variant_types() {
        let node = compile("phone:us").unwrap();
        assert_eq!(
            node.custom_messages.get("pattern").map(String::as_str),
            Some("pattern.phone.us")
        );
        let node = compile("phone").unwrap();
        assert_eq!(
            node.custom_messages.get("pattern").map(String::as_str),
            Some("pattern.phone.cn")
        );
        assert!(matches!(
            compile("phone:zz"),
            Err(DslError::UnsupportedVariant { .. })
        ));
    }

    #[test]
    fn test_unknown_type_and_bad_constraint() {
        match compile("strng:3") {
            Err(DslError::UnknownType { type_name, expr }) => {
                assert_eq!(type_name, "strng");
                assert_eq!(expr, "strng:3");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            compile("boolean:5"),
            Err(DslError::InvalidConstraint { .. })
        ));
        assert!(matches!(compile("!"), Err(DslError::Syntax { .. })));
    }

    #[test]
    fn test_custom_types() {
        let mut registry = CustomTypeRegistry::new();
        let mut slug = SchemaNode::string();
        slug.pattern = Some("^[a-z-]+$".to_string());
        registry.register("slug", slug).unwrap();
        registry
            .register(
                "md5",
                TypeDefinition::factory(|_| {
                    let mut node = SchemaNode::string();
                    node.string.exact_length = Some(32);
                    Ok(node)
                }),
            )
            .unwrap();

        let node = compile_expression("slug:3-20!", &registry).unwrap();
        assert_eq!(node.pattern.as_deref(), Some("^[a-z-]+$"));
        assert_eq!(node.string.min_length, Some(3));
        assert!(node.is_required());

        let node = compile_expression("md5", &registry).unwrap();
        assert_eq!(node.string.exact_length, Some(32));
    }
}
