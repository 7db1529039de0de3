//! Constraint groups and the constraint parser
//!
//! A constraint body is the text after the type name (`3-32`, `>=18`, `5`,
//! `red|green`). Parsing is split into one function per production of the
//! grammar so each can be tested on its own:
//!
//! ```text
//! constraint  := range | comparison | single | enumList
//! range       := NUMBER? '-' NUMBER?
//! comparison  := ('>='|'<='|'>'|'<'|'=') NUMBER
//! single      := NUMBER
//! enumList    := token ('|' token)+
//! ```
//!
//! A bare single value means *exact length* for strings but an *upper bound*
//! for numbers and arrays. The asymmetry is kept on purpose.

use crate::error::{DslError, Result};
use crate::schema::{SchemaKind, SchemaNode};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// ============================================================================
// Constraint Groups
// ============================================================================

/// Length constraints for string nodes (in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringConstraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Exact length, emitted as the non-standard `exactLength` keyword
    pub exact_length: Option<usize>,
}

impl StringConstraints {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none() && self.max_length.is_none() && self.exact_length.is_none()
    }
}

/// Numeric bounds for number and integer nodes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericConstraints {
    /// Minimum value (inclusive)
    pub minimum: Option<f64>,
    /// Maximum value (inclusive)
    pub maximum: Option<f64>,
    /// Minimum value (exclusive)
    pub exclusive_minimum: Option<f64>,
    /// Maximum value (exclusive)
    pub exclusive_maximum: Option<f64>,
    /// Value must be a multiple of this number
    pub multiple_of: Option<f64>,
}

/// Item-count constraints for array nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListConstraints {
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

// ============================================================================
// Parse Target and Result
// ============================================================================

/// Which bounds a constraint body maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintTarget {
    /// String length (`minLength`/`maxLength`/`exactLength`)
    Length,
    /// Numeric value; `integer` rejects fractional bounds
    Numeric { integer: bool },
    /// Array item count (`minItems`/`maxItems`)
    Items,
}

impl ConstraintTarget {
    /// Target for a node kind, or `None` when the kind takes no constraint
    pub fn for_kind(kind: SchemaKind) -> Option<Self> {
        match kind {
            SchemaKind::String => Some(Self::Length),
            SchemaKind::Number => Some(Self::Numeric { integer: false }),
            SchemaKind::Integer => Some(Self::Numeric { integer: true }),
            SchemaKind::Array => Some(Self::Items),
            _ => None,
        }
    }
}

/// Canonical bounds produced from one constraint body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bounds {
    pub string: StringConstraints,
    pub numeric: NumericConstraints,
    pub list: ListConstraints,
    pub enum_values: Option<Vec<Value>>,
}

impl Bounds {
    /// Merge every bound that is set into `node`, leaving the rest untouched
    pub fn apply(self, node: &mut SchemaNode) {
        let s = self.string;
        node.string.min_length = s.min_length.or(node.string.min_length);
        node.string.max_length = s.max_length.or(node.string.max_length);
        node.string.exact_length = s.exact_length.or(node.string.exact_length);

        let n = self.numeric;
        node.numeric.minimum = n.minimum.or(node.numeric.minimum);
        node.numeric.maximum = n.maximum.or(node.numeric.maximum);
        node.numeric.exclusive_minimum = n.exclusive_minimum.or(node.numeric.exclusive_minimum);
        node.numeric.exclusive_maximum = n.exclusive_maximum.or(node.numeric.exclusive_maximum);
        node.numeric.multiple_of = n.multiple_of.or(node.numeric.multiple_of);

        node.list.min_items = self.list.min_items.or(node.list.min_items);
        node.list.max_items = self.list.max_items.or(node.list.max_items);

        if self.enum_values.is_some() {
            node.enum_values = self.enum_values;
        }
    }
}

// ============================================================================
// Lexical Patterns
// ============================================================================

static RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)?-(-?\d+(?:\.\d+)?)?$").unwrap()
});

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").unwrap());

static BARE_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+-\d+$").unwrap());

/// Whether text has the bare `digits-digits` shape of a numeric range
pub fn looks_like_numeric_range(text: &str) -> bool {
    BARE_RANGE_REGEX.is_match(text.trim())
}

/// Whether a body should be read as an enumeration rather than a range
pub fn is_enum_list(text: &str) -> bool {
    text.contains('|') && !looks_like_numeric_range(text)
}

/// Parse a finite number token
pub fn parse_number(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// JSON number for a bound, using an integer when the value is whole
pub fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Parse a constraint body against a target
///
/// `type_name` is only used for error context.
pub fn parse_constraint(body: &str, target: ConstraintTarget, type_name: &str) -> Result<Bounds> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Bounds::default());
    }

    if is_enum_list(body) {
        return parse_enum_list(body, target, type_name);
    }

    if let ConstraintTarget::Numeric { integer } = target {
        if let Some(bounds) = parse_comparison(body, integer, type_name)? {
            return Ok(bounds);
        }
    }

    if let Some(bounds) = parse_range(body, target, type_name)? {
        return Ok(bounds);
    }

    if let Some(bounds) = parse_single(body, target, type_name)? {
        return Ok(bounds);
    }

    Err(invalid(
        body,
        type_name,
        "expected a range, comparison, single value or enumeration",
    ))
}

// ============================================================================
// Productions
// ============================================================================

/// Comparison operators, longest first so `<` never matches inside `<=`
const COMPARISON_OPERATORS: [&str; 5] = [">=", "<=", ">", "<", "="];

/// `comparison := ('>='|'<='|'>'|'<'|'=') NUMBER`
pub fn parse_comparison(body: &str, integer: bool, type_name: &str) -> Result<Option<Bounds>> {
    let Some(op) = COMPARISON_OPERATORS.iter().find(|op| body.starts_with(**op)) else {
        return Ok(None);
    };

    let operand = &body[op.len()..];
    let value = parse_number(operand)
        .ok_or_else(|| invalid(body, type_name, "comparison operand must be a number"))?;
    check_integer(value, integer, body, type_name)?;

    let mut bounds = Bounds::default();
    match *op {
        ">=" => bounds.numeric.minimum = Some(value),
        "<=" => bounds.numeric.maximum = Some(value),
        ">" => bounds.numeric.exclusive_minimum = Some(value),
        "<" => bounds.numeric.exclusive_maximum = Some(value),
        _ => bounds.enum_values = Some(vec![number_value(value)]),
    }
    Ok(Some(bounds))
}

/// `range := NUMBER? '-' NUMBER?`
pub fn parse_range(body: &str, target: ConstraintTarget, type_name: &str) -> Result<Option<Bounds>> {
    let Some(caps) = RANGE_REGEX.captures(body) else {
        return Ok(None);
    };

    let min = caps.get(1).map(|m| m.as_str());
    let max = caps.get(2).map(|m| m.as_str());
    if min.is_none() && max.is_none() {
        return Err(invalid(body, type_name, "range needs at least one bound"));
    }

    let mut bounds = Bounds::default();
    match target {
        ConstraintTarget::Length | ConstraintTarget::Items => {
            let min = min.map(|m| parse_count(m, body, type_name)).transpose()?;
            let max = max.map(|m| parse_count(m, body, type_name)).transpose()?;
            if let (Some(lo), Some(hi)) = (min, max) {
                if lo > hi {
                    return Err(invalid(body, type_name, "minimum exceeds maximum"));
                }
            }
            if target == ConstraintTarget::Length {
                bounds.string.min_length = min;
                bounds.string.max_length = max;
            } else {
                bounds.list.min_items = min;
                bounds.list.max_items = max;
            }
        }
        ConstraintTarget::Numeric { integer } => {
            let min = min.and_then(parse_number);
            let max = max.and_then(parse_number);
            for value in min.iter().chain(max.iter()) {
                check_integer(*value, integer, body, type_name)?;
            }
            if let (Some(lo), Some(hi)) = (min, max) {
                if lo > hi {
                    return Err(invalid(body, type_name, "minimum exceeds maximum"));
                }
            }
            bounds.numeric.minimum = min;
            bounds.numeric.maximum = max;
        }
    }
    Ok(Some(bounds))
}

/// `single := NUMBER`
pub fn parse_single(body: &str, target: ConstraintTarget, type_name: &str) -> Result<Option<Bounds>> {
    if !NUMBER_REGEX.is_match(body) {
        return Ok(None);
    }

    let mut bounds = Bounds::default();
    match target {
        // exact length for strings
        ConstraintTarget::Length => {
            bounds.string.exact_length = Some(parse_count(body, body, type_name)?);
        }
        // upper bound for arrays
        ConstraintTarget::Items => {
            bounds.list.max_items = Some(parse_count(body, body, type_name)?);
        }
        // upper bound for numbers
        ConstraintTarget::Numeric { integer } => {
            let value = parse_number(body)
                .ok_or_else(|| invalid(body, type_name, "not a finite number"))?;
            check_integer(value, integer, body, type_name)?;
            bounds.numeric.maximum = Some(value);
        }
    }
    Ok(Some(bounds))
}

/// `enumList := token ('|' token)+`, converted to the target's element type
pub fn parse_enum_list(body: &str, target: ConstraintTarget, type_name: &str) -> Result<Bounds> {
    let tokens = split_enum_tokens(body);
    if tokens.len() < 2 {
        return Err(invalid(body, type_name, "enumeration needs at least two values"));
    }

    let values = match target {
        ConstraintTarget::Length => tokens.into_iter().map(|t| Value::String(t.to_string())).collect(),
        ConstraintTarget::Numeric { integer } => tokens
            .into_iter()
            .map(|token| {
                let n = parse_number(token).ok_or_else(|| DslError::InvalidEnumValue {
                    value: token.to_string(),
                    expected: type_name.to_string(),
                })?;
                if integer && n.fract() != 0.0 {
                    return Err(DslError::InvalidEnumValue {
                        value: token.to_string(),
                        expected: "integer".to_string(),
                    });
                }
                Ok(number_value(n))
            })
            .collect::<Result<Vec<_>>>()?,
        ConstraintTarget::Items => {
            return Err(invalid(body, type_name, "arrays do not take an enumeration"));
        }
    };

    Ok(Bounds {
        enum_values: Some(values),
        ..Default::default()
    })
}

/// Split an enumeration body on `|`, trimming tokens and dropping empties
pub fn split_enum_tokens(body: &str) -> Vec<&str> {
    body.split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Infer the element kind of a bare enumeration and convert its tokens
///
/// Boolean if every token is `true`/`false`, number if every token is a
/// finite number, otherwise string.
pub fn infer_enum(tokens: &[&str]) -> (SchemaKind, Vec<Value>) {
    if tokens.iter().all(|t| *t == "true" || *t == "false") {
        let values = tokens.iter().map(|t| Value::Bool(*t == "true")).collect();
        return (SchemaKind::Boolean, values);
    }

    let numbers: Option<Vec<f64>> = tokens.iter().map(|t| parse_number(t)).collect();
    if let Some(numbers) = numbers {
        return (SchemaKind::Number, numbers.into_iter().map(number_value).collect());
    }

    let values = tokens.iter().map(|t| Value::String(t.to_string())).collect();
    (SchemaKind::String, values)
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_count(text: &str, body: &str, type_name: &str) -> Result<usize> {
    text.parse::<usize>()
        .map_err(|_| invalid(body, type_name, "lengths and item counts must be non-negative integers"))
}

fn check_integer(value: f64, integer: bool, body: &str, type_name: &str) -> Result<()> {
    if integer && value.fract() != 0.0 {
        return Err(invalid(body, type_name, "integer bounds must be whole numbers"));
    }
    Ok(())
}

fn invalid(body: &str, type_name: &str, reason: &str) -> DslError {
    DslError::InvalidConstraint {
        constraint: body.to_string(),
        type_name: type_name.to_string(),
        reason: reason.to_string(),
    }
}
