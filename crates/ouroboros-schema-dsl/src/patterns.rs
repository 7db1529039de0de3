//! Pattern library for country/variant-parameterized types
//!
//! Each entry is a (regex, length bounds, message key) triple. Patterns are
//! emitted verbatim into the `pattern` keyword for the executing engine, so
//! they stick to the regex subset shared by ECMA-262 and the `regex` crate.
//! Password strength presets are the exception (they need lookahead) and live
//! in a separate table.

use crate::error::{DslError, Result};

// ============================================================================
// Pattern Entry
// ============================================================================

/// A named constraint template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternEntry {
    /// Regular expression source
    pub pattern: &'static str,
    /// Minimum length in characters
    pub min_length: Option<usize>,
    /// Maximum length in characters
    pub max_length: Option<usize>,
    /// Locale key for the mismatch message
    pub message_key: &'static str,
}

const fn entry(
    pattern: &'static str,
    min_length: usize,
    max_length: usize,
    message_key: &'static str,
) -> PatternEntry {
    PatternEntry {
        pattern,
        min_length: Some(min_length),
        max_length: Some(max_length),
        message_key,
    }
}

const fn unbounded(pattern: &'static str, message_key: &'static str) -> PatternEntry {
    PatternEntry {
        pattern,
        min_length: None,
        max_length: None,
        message_key,
    }
}

// ============================================================================
// Variant Tables
// ============================================================================

const PHONE: &[(&str, PatternEntry)] = &[
    ("cn", entry(r"^1[3-9]\d{9}$", 11, 11, "pattern.phone.cn")),
    ("us", entry(r"^(\+1)?[2-9]\d{2}[2-9]\d{6}$", 10, 12, "pattern.phone.us")),
    ("uk", entry(r"^(\+44|0)7\d{9}$", 11, 13, "pattern.phone.uk")),
    ("hk", entry(r"^(\+852)?[569]\d{7}$", 8, 12, "pattern.phone.hk")),
    ("tw", entry(r"^(\+886|0)9\d{8}$", 10, 13, "pattern.phone.tw")),
    ("jp", entry(r"^(\+81|0)[789]0\d{8}$", 11, 13, "pattern.phone.jp")),
    ("kr", entry(r"^(\+82|0)1[016789]\d{7,8}$", 10, 14, "pattern.phone.kr")),
    ("international", entry(r"^\+[1-9]\d{6,14}$", 8, 16, "pattern.phone.international")),
];

const ID_CARD: &[(&str, PatternEntry)] = &[(
    "cn",
    entry(
        r"^[1-9]\d{5}(18|19|20)\d{2}(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01])\d{3}[\dXx]$",
        18,
        18,
        "pattern.idCard.cn",
    ),
)];

const CREDIT_CARD: &[(&str, PatternEntry)] = &[
    ("visa", entry(r"^4\d{12}(\d{3})?$", 13, 16, "pattern.creditCard.visa")),
    (
        "mastercard",
        entry(
            r"^(5[1-5]\d{4}|2(2[2-9]\d{2}|[3-6]\d{3}|7[01]\d{2}|720\d))\d{10}$",
            16,
            16,
            "pattern.creditCard.mastercard",
        ),
    ),
    ("amex", entry(r"^3[47]\d{13}$", 15, 15, "pattern.creditCard.amex")),
    ("discover", entry(r"^6(011|5\d{2})\d{12}$", 16, 16, "pattern.creditCard.discover")),
    ("jcb", entry(r"^35(2[89]|[3-8]\d)\d{12}$", 16, 16, "pattern.creditCard.jcb")),
    ("unionpay", entry(r"^62\d{14,17}$", 16, 19, "pattern.creditCard.unionpay")),
];

const LICENSE_PLATE: &[(&str, PatternEntry)] = &[(
    "cn",
    entry(
        r"^[京津沪渝冀豫云辽黑湘皖鲁新苏浙赣鄂桂甘晋蒙陕吉闽贵粤青藏川宁琼][A-HJ-NP-Z][A-HJ-NP-Z0-9]{4,5}[A-HJ-NP-Z0-9挂学警港澳]$",
        7,
        8,
        "pattern.licensePlate.cn",
    ),
)];

const POSTAL_CODE: &[(&str, PatternEntry)] = &[
    ("cn", entry(r"^[1-9]\d{5}$", 6, 6, "pattern.postalCode.cn")),
    ("us", entry(r"^\d{5}(-\d{4})?$", 5, 10, "pattern.postalCode.us")),
    ("uk", entry(r"^[A-Za-z]{1,2}\d[A-Za-z\d]?\s?\d[A-Za-z]{2}$", 5, 8, "pattern.postalCode.uk")),
    ("jp", entry(r"^\d{3}-?\d{4}$", 7, 8, "pattern.postalCode.jp")),
    ("de", entry(r"^\d{5}$", 5, 5, "pattern.postalCode.de")),
    ("fr", entry(r"^\d{5}$", 5, 5, "pattern.postalCode.fr")),
];

const PASSPORT: &[(&str, PatternEntry)] = &[
    ("cn", entry(r"^([EGDSPH]\d{8}|[EG][A-HJ-NP-Z]\d{7})$", 9, 9, "pattern.passport.cn")),
    ("us", entry(r"^[A-Z0-9]{9}$", 9, 9, "pattern.passport.us")),
    ("uk", entry(r"^\d{9}$", 9, 9, "pattern.passport.uk")),
];

// ============================================================================
// Pattern Families
// ============================================================================

/// A group of patterns selected by a country or variant name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternFamily {
    Phone,
    IdCard,
    CreditCard,
    LicensePlate,
    PostalCode,
    Passport,
}

impl PatternFamily {
    pub const ALL: [PatternFamily; 6] = [
        Self::Phone,
        Self::IdCard,
        Self::CreditCard,
        Self::LicensePlate,
        Self::PostalCode,
        Self::Passport,
    ];

    /// DSL type name of the family
    pub fn name(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::IdCard => "idCard",
            Self::CreditCard => "creditCard",
            Self::LicensePlate => "licensePlate",
            Self::PostalCode => "postalCode",
            Self::Passport => "passport",
        }
    }

    /// Variant used when the expression names none
    pub fn default_variant(&self) -> &'static str {
        match self {
            Self::CreditCard => "visa",
            _ => "cn",
        }
    }

    fn table(&self) -> &'static [(&'static str, PatternEntry)] {
        match self {
            Self::Phone => PHONE,
            Self::IdCard => ID_CARD,
            Self::CreditCard => CREDIT_CARD,
            Self::LicensePlate => LICENSE_PLATE,
            Self::PostalCode => POSTAL_CODE,
            Self::Passport => PASSPORT,
        }
    }

    /// Supported variant names, in table order
    pub fn variants(&self) -> Vec<&'static str> {
        self.table().iter().map(|(name, _)| *name).collect()
    }

    /// Resolve a variant (case-insensitive); `None` selects the default
    pub fn lookup(&self, variant: Option<&str>) -> Result<&'static PatternEntry> {
        let wanted = variant
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(self.default_variant())
            .to_ascii_lowercase();

        self.table()
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, entry)| entry)
            .ok_or_else(|| DslError::UnsupportedVariant {
                family: self.name().to_string(),
                variant: wanted,
                supported: self.variants().join(", "),
            })
    }
}

// ============================================================================
// Fixed Presets
// ============================================================================

pub const OBJECT_ID: PatternEntry = entry(r"^[0-9a-fA-F]{24}$", 24, 24, "pattern.objectId");
pub const HEX_COLOR: PatternEntry = entry(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$", 4, 7, "pattern.hexColor");
pub const MAC_ADDRESS: PatternEntry =
    entry(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$", 17, 17, "pattern.macAddress");
pub const ALPHANUM: PatternEntry = unbounded(r"^[a-zA-Z0-9]+$", "pattern.alphanum");
pub const USERNAME: PatternEntry = entry(r"^[a-zA-Z][a-zA-Z0-9_]*$", 3, 32, "pattern.username");

/// Password strength presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl PasswordStrength {
    /// Parse `weak|medium|strong|veryStrong`
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "weak" => Ok(Self::Weak),
            "medium" => Ok(Self::Medium),
            "strong" => Ok(Self::Strong),
            "veryStrong" => Ok(Self::VeryStrong),
            other => Err(DslError::UnsupportedVariant {
                family: "password".to_string(),
                variant: other.to_string(),
                supported: "weak, medium, strong, veryStrong".to_string(),
            }),
        }
    }

    /// Pattern (ECMA-262, uses lookahead), minimum length and message key
    pub fn preset(&self) -> PatternEntry {
        match self {
            Self::Weak => PatternEntry {
                pattern: r"^.{6,}$",
                min_length: Some(6),
                max_length: Some(64),
                message_key: "pattern.password.weak",
            },
            Self::Medium => PatternEntry {
                pattern: r"^(?=.*[A-Za-z])(?=.*\d).{8,}$",
                min_length: Some(8),
                max_length: Some(64),
                message_key: "pattern.password.medium",
            },
            Self::Strong => PatternEntry {
                pattern: r"^(?=.*[a-z])(?=.*[A-Z])(?=.*\d).{8,}$",
                min_length: Some(8),
                max_length: Some(64),
                message_key: "pattern.password.strong",
            },
            Self::VeryStrong => PatternEntry {
                pattern: r"^(?=.*[a-z])(?=.*[A-Z])(?=.*\d)(?=.*[^A-Za-z\d]).{10,}$",
                min_length: Some(10),
                max_length: Some(64),
                message_key: "pattern.password.veryStrong",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_all_library_patterns_compile() {
        for family in PatternFamily::ALL {
            for (variant, entry) in family.table() {
                assert!(
                    Regex::new(entry.pattern).is_ok(),
                    "{}:{} does not compile",
                    family.name(),
                    variant
                );
            }
        }
        for preset in [OBJECT_ID, HEX_COLOR, MAC_ADDRESS, ALPHANUM, USERNAME] {
            assert!(Regex::new(preset.pattern).is_ok());
        }
    }

    #[test]
    fn test_phone_patterns_match_samples() {
        let cn = Regex::new(PatternFamily::Phone.lookup(Some("cn")).unwrap().pattern).unwrap();
        assert!(cn.is_match("13800138000"));
        assert!(!cn.is_match("12800138000"));

        let us = Regex::new(PatternFamily::Phone.lookup(Some("US")).unwrap().pattern).unwrap();
        assert!(us.is_match("+12125551234"));
        assert!(us.is_match("2125551234"));
    }

    #[test]
    fn test_credit_card_patterns_match_samples() {
        let visa = Regex::new(PatternFamily::CreditCard.lookup(None).unwrap().pattern).unwrap();
        assert!(visa.is_match("4111111111111111"));

        let amex = Regex::new(PatternFamily::CreditCard.lookup(Some("amex")).unwrap().pattern).unwrap();
        assert!(amex.is_match("378282246310005"));
        assert!(!amex.is_match("4111111111111111"));
    }

    #[test]
    fn test_default_variants() {
        assert_eq!(
            PatternFamily::Phone.lookup(None).unwrap().message_key,
            "pattern.phone.cn"
        );
        assert_eq!(
            PatternFamily::CreditCard.lookup(Some("")).unwrap().message_key,
            "pattern.creditCard.visa"
        );
    }

    #[test]
    fn test_unknown_variant_is_error() {
        let err = PatternFamily::Phone.lookup(Some("atlantis")).unwrap_err();
        match err {
            DslError::UnsupportedVariant { family, variant, supported } => {
                assert_eq!(family, "phone");
                assert_eq!(variant, "atlantis");
                assert!(supported.contains("cn"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_password_strength() {
        assert_eq!(PasswordStrength::parse("strong").unwrap(), PasswordStrength::Strong);
        assert!(PasswordStrength::parse("iron").is_err());
        assert_eq!(PasswordStrength::VeryStrong.preset().min_length, Some(10));
    }
}
