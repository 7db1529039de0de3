//! Bundled locale packs
//!
//! Templates use `{{#name}}` placeholders. Every pack carries the same keys:
//!
//! - Engine keywords (`required`, `type`, `enum`, `pattern`, ...)
//! - Keyword aliases (`min`, `max`) and their kind-qualified forms
//!   (`string.min`, `number.max`, `array.min`, ...)
//! - `format.<name>` for each semantic format (`url`, not `uri`)
//! - `pattern.<preset>` for the pattern library, looked up with trailing
//!   segments dropped (`pattern.phone.cn` falls back to `pattern.phone`)

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Locale used when nothing else is configured
pub const DEFAULT_LOCALE: &str = "en-US";

/// Locales bundled with the crate
pub const BUILTIN_LOCALES: [&str; 5] = ["en-US", "zh-CN", "ja-JP", "es-ES", "fr-FR"];

type Pack = HashMap<&'static str, &'static str>;

static PACKS: Lazy<HashMap<&'static str, Pack>> = Lazy::new(|| {
    let mut packs = HashMap::new();
    packs.insert("en-US", EN_US.iter().copied().collect());
    packs.insert("zh-CN", ZH_CN.iter().copied().collect());
    packs.insert("ja-JP", JA_JP.iter().copied().collect());
    packs.insert("es-ES", ES_ES.iter().copied().collect());
    packs.insert("fr-FR", FR_FR.iter().copied().collect());
    packs
});

/// Template for `key` in a bundled pack
pub fn builtin_message(locale: &str, key: &str) -> Option<&'static str> {
    PACKS.get(locale)?.get(key).copied()
}

/// Whether `locale` has a bundled pack
pub fn is_builtin_locale(locale: &str) -> bool {
    PACKS.contains_key(locale)
}

/// Keys defined by a bundled pack, sorted
pub fn builtin_keys(locale: &str) -> Vec<&'static str> {
    let mut keys: Vec<_> = PACKS
        .get(locale)
        .map(|pack| pack.keys().copied().collect())
        .unwrap_or_default();
    keys.sort_unstable();
    keys
}

// ============================================================================
// en-US
// ============================================================================

const EN_US: &[(&str, &str)] = &[
    ("required", "{{#label}} is required"),
    ("type", "{{#label}} must be of type {{#type}}"),
    ("min", "{{#label}} must be at least {{#limit}}"),
    ("max", "{{#label}} must be at most {{#limit}}"),
    ("string.min", "{{#label}} must be at least {{#limit}} characters"),
    ("string.max", "{{#label}} must be at most {{#limit}} characters"),
    ("number.min", "{{#label}} must be greater than or equal to {{#limit}}"),
    ("number.max", "{{#label}} must be less than or equal to {{#limit}}"),
    ("array.min", "{{#label}} must contain at least {{#limit}} items"),
    ("array.max", "{{#label}} must contain at most {{#limit}} items"),
    ("exactLength", "{{#label}} must be exactly {{#limit}} characters"),
    ("exclusiveMinimum", "{{#label}} must be greater than {{#limit}}"),
    ("exclusiveMaximum", "{{#label}} must be less than {{#limit}}"),
    ("multipleOf", "{{#label}} must be a multiple of {{#multipleOf}}"),
    ("pattern", "{{#label}} has an invalid format"),
    ("enum", "{{#label}} must be one of: {{#allowedValues}}"),
    ("const", "{{#label}} must be equal to {{#allowedValue}}"),
    ("format", "{{#label}} must be a valid {{#format}}"),
    ("format.email", "{{#label}} must be a valid email address"),
    ("format.url", "{{#label}} must be a valid URL"),
    ("format.uuid", "{{#label}} must be a valid UUID"),
    ("format.date", "{{#label}} must be a valid date"),
    ("format.date-time", "{{#label}} must be a valid date and time"),
    ("format.time", "{{#label}} must be a valid time"),
    ("format.ipv4", "{{#label}} must be a valid IPv4 address"),
    ("format.ipv6", "{{#label}} must be a valid IPv6 address"),
    ("format.hostname", "{{#label}} must be a valid hostname"),
    ("uniqueItems", "{{#label}} must not contain duplicate items"),
    ("additionalProperties", "{{#label}} has an unknown property {{#additionalProperty}}"),
    ("oneOf", "{{#label}} must match exactly one allowed schema"),
    ("default", "{{#label}} is invalid"),
    ("pattern.phone", "{{#label}} must be a valid phone number"),
    ("pattern.idCard", "{{#label}} must be a valid ID card number"),
    ("pattern.creditCard", "{{#label}} must be a valid credit card number"),
    ("pattern.licensePlate", "{{#label}} must be a valid license plate"),
    ("pattern.postalCode", "{{#label}} must be a valid postal code"),
    ("pattern.passport", "{{#label}} must be a valid passport number"),
    ("pattern.objectId", "{{#label}} must be a valid ObjectId"),
    ("pattern.hexColor", "{{#label}} must be a valid hex color"),
    ("pattern.macAddress", "{{#label}} must be a valid MAC address"),
    ("pattern.alphanum", "{{#label}} must contain only letters and numbers"),
    (
        "pattern.username",
        "{{#label}} must start with a letter and contain only letters, numbers and underscores",
    ),
    ("pattern.password", "{{#label}} is not strong enough"),
    (
        "pattern.password.strong",
        "{{#label}} must contain upper and lower case letters and a number",
    ),
    (
        "pattern.password.veryStrong",
        "{{#label}} must contain upper and lower case letters, a number and a symbol",
    ),
];

// ============================================================================
// zh-CN
// ============================================================================

const ZH_CN: &[(&str, &str)] = &[
    ("required", "{{#label}}不能为空"),
    ("type", "{{#label}}的类型必须是{{#type}}"),
    ("min", "{{#label}}不能小于{{#limit}}"),
    ("max", "{{#label}}不能大于{{#limit}}"),
    ("string.min", "{{#label}}长度不能少于{{#limit}}个字符"),
    ("string.max", "{{#label}}长度不能超过{{#limit}}个字符"),
    ("number.min", "{{#label}}必须大于或等于{{#limit}}"),
    ("number.max", "{{#label}}必须小于或等于{{#limit}}"),
    ("array.min", "{{#label}}至少需要{{#limit}}项"),
    ("array.max", "{{#label}}最多只能有{{#limit}}项"),
    ("exactLength", "{{#label}}长度必须为{{#limit}}个字符"),
    ("exclusiveMinimum", "{{#label}}必须大于{{#limit}}"),
    ("exclusiveMaximum", "{{#label}}必须小于{{#limit}}"),
    ("multipleOf", "{{#label}}必须是{{#multipleOf}}的倍数"),
    ("pattern", "{{#label}}格式不正确"),
    ("enum", "{{#label}}必须是以下值之一：{{#allowedValues}}"),
    ("const", "{{#label}}必须等于{{#allowedValue}}"),
    ("format", "{{#label}}必须是有效的{{#format}}"),
    ("format.email", "{{#label}}必须是有效的邮箱地址"),
    ("format.url", "{{#label}}必须是有效的网址"),
    ("format.uuid", "{{#label}}必须是有效的UUID"),
    ("format.date", "{{#label}}必须是有效的日期"),
    ("format.date-time", "{{#label}}必须是有效的日期时间"),
    ("format.time", "{{#label}}必须是有效的时间"),
    ("format.ipv4", "{{#label}}必须是有效的IPv4地址"),
    ("format.ipv6", "{{#label}}必须是有效的IPv6地址"),
    ("format.hostname", "{{#label}}必须是有效的主机名"),
    ("uniqueItems", "{{#label}}不能包含重复项"),
    ("additionalProperties", "{{#label}}包含未知属性{{#additionalProperty}}"),
    ("oneOf", "{{#label}}必须且只能匹配一种允许的格式"),
    ("default", "{{#label}}无效"),
    ("pattern.phone", "{{#label}}必须是有效的手机号码"),
    ("pattern.idCard", "{{#label}}必须是有效的身份证号码"),
    ("pattern.creditCard", "{{#label}}必须是有效的信用卡号"),
    ("pattern.licensePlate", "{{#label}}必须是有效的车牌号"),
    ("pattern.postalCode", "{{#label}}必须是有效的邮政编码"),
    ("pattern.passport", "{{#label}}必须是有效的护照号码"),
    ("pattern.objectId", "{{#label}}必须是有效的ObjectId"),
    ("pattern.hexColor", "{{#label}}必须是有效的十六进制颜色值"),
    ("pattern.macAddress", "{{#label}}必须是有效的MAC地址"),
    ("pattern.alphanum", "{{#label}}只能包含字母和数字"),
    ("pattern.username", "{{#label}}必须以字母开头，只能包含字母、数字和下划线"),
    ("pattern.password", "{{#label}}强度不足"),
    ("pattern.password.strong", "{{#label}}必须包含大小写字母和数字"),
    ("pattern.password.veryStrong", "{{#label}}必须包含大小写字母、数字和特殊字符"),
];

// ============================================================================
// ja-JP
// ============================================================================

const JA_JP: &[(&str, &str)] = &[
    ("required", "{{#label}}は必須です"),
    ("type", "{{#label}}は{{#type}}型である必要があります"),
    ("min", "{{#label}}は{{#limit}}以上である必要があります"),
    ("max", "{{#label}}は{{#limit}}以下である必要があります"),
    ("string.min", "{{#label}}は{{#limit}}文字以上で入力してください"),
    ("string.max", "{{#label}}は{{#limit}}文字以内で入力してください"),
    ("number.min", "{{#label}}は{{#limit}}以上の値を入力してください"),
    ("number.max", "{{#label}}は{{#limit}}以下の値を入力してください"),
    ("array.min", "{{#label}}には{{#limit}}件以上の項目が必要です"),
    ("array.max", "{{#label}}の項目は{{#limit}}件以内にしてください"),
    ("exactLength", "{{#label}}は{{#limit}}文字で入力してください"),
    ("exclusiveMinimum", "{{#label}}は{{#limit}}より大きい必要があります"),
    ("exclusiveMaximum", "{{#label}}は{{#limit}}より小さい必要があります"),
    ("multipleOf", "{{#label}}は{{#multipleOf}}の倍数である必要があります"),
    ("pattern", "{{#label}}の形式が正しくありません"),
    ("enum", "{{#label}}は次のいずれかである必要があります: {{#allowedValues}}"),
    ("const", "{{#label}}は{{#allowedValue}}である必要があります"),
    ("format", "{{#label}}は有効な{{#format}}である必要があります"),
    ("format.email", "{{#label}}は有効なメールアドレスである必要があります"),
    ("format.url", "{{#label}}は有効なURLである必要があります"),
    ("format.uuid", "{{#label}}は有効なUUIDである必要があります"),
    ("format.date", "{{#label}}は有効な日付である必要があります"),
    ("format.date-time", "{{#label}}は有効な日時である必要があります"),
    ("format.time", "{{#label}}は有効な時刻である必要があります"),
    ("format.ipv4", "{{#label}}は有効なIPv4アドレスである必要があります"),
    ("format.ipv6", "{{#label}}は有効なIPv6アドレスである必要があります"),
    ("format.hostname", "{{#label}}は有効なホスト名である必要があります"),
    ("uniqueItems", "{{#label}}に重複した項目を含めることはできません"),
    ("additionalProperties", "{{#label}}に不明なプロパティ{{#additionalProperty}}が含まれています"),
    ("oneOf", "{{#label}}は許可された形式のいずれか1つだけに一致する必要があります"),
    ("default", "{{#label}}が無効です"),
    ("pattern.phone", "{{#label}}は有効な電話番号である必要があります"),
    ("pattern.idCard", "{{#label}}は有効な身分証番号である必要があります"),
    ("pattern.creditCard", "{{#label}}は有効なクレジットカード番号である必要があります"),
    ("pattern.licensePlate", "{{#label}}は有効なナンバープレートである必要があります"),
    ("pattern.postalCode", "{{#label}}は有効な郵便番号である必要があります"),
    ("pattern.passport", "{{#label}}は有効なパスポート番号である必要があります"),
    ("pattern.objectId", "{{#label}}は有効なObjectIdである必要があります"),
    ("pattern.hexColor", "{{#label}}は有効な16進カラーコードである必要があります"),
    ("pattern.macAddress", "{{#label}}は有効なMACアドレスである必要があります"),
    ("pattern.alphanum", "{{#label}}には英数字のみ使用できます"),
    ("pattern.username", "{{#label}}は英字で始まり、英数字とアンダースコアのみ使用できます"),
    ("pattern.password", "{{#label}}の強度が不十分です"),
    ("pattern.password.strong", "{{#label}}には大文字、小文字、数字を含めてください"),
    ("pattern.password.veryStrong", "{{#label}}には大文字、小文字、数字、記号を含めてください"),
];

// ============================================================================
// es-ES
// ============================================================================

const ES_ES: &[(&str, &str)] = &[
    ("required", "{{#label}} es obligatorio"),
    ("type", "{{#label}} debe ser de tipo {{#type}}"),
    ("min", "{{#label}} debe ser al menos {{#limit}}"),
    ("max", "{{#label}} debe ser como máximo {{#limit}}"),
    ("string.min", "{{#label}} debe tener al menos {{#limit}} caracteres"),
    ("string.max", "{{#label}} debe tener como máximo {{#limit}} caracteres"),
    ("number.min", "{{#label}} debe ser mayor o igual que {{#limit}}"),
    ("number.max", "{{#label}} debe ser menor o igual que {{#limit}}"),
    ("array.min", "{{#label}} debe contener al menos {{#limit}} elementos"),
    ("array.max", "{{#label}} debe contener como máximo {{#limit}} elementos"),
    ("exactLength", "{{#label}} debe tener exactamente {{#limit}} caracteres"),
    ("exclusiveMinimum", "{{#label}} debe ser mayor que {{#limit}}"),
    ("exclusiveMaximum", "{{#label}} debe ser menor que {{#limit}}"),
    ("multipleOf", "{{#label}} debe ser múltiplo de {{#multipleOf}}"),
    ("pattern", "{{#label}} tiene un formato no válido"),
    ("enum", "{{#label}} debe ser uno de: {{#allowedValues}}"),
    ("const", "{{#label}} debe ser igual a {{#allowedValue}}"),
    ("format", "{{#label}} debe ser un {{#format}} válido"),
    ("format.email", "{{#label}} debe ser una dirección de correo válida"),
    ("format.url", "{{#label}} debe ser una URL válida"),
    ("format.uuid", "{{#label}} debe ser un UUID válido"),
    ("format.date", "{{#label}} debe ser una fecha válida"),
    ("format.date-time", "{{#label}} debe ser una fecha y hora válidas"),
    ("format.time", "{{#label}} debe ser una hora válida"),
    ("format.ipv4", "{{#label}} debe ser una dirección IPv4 válida"),
    ("format.ipv6", "{{#label}} debe ser una dirección IPv6 válida"),
    ("format.hostname", "{{#label}} debe ser un nombre de host válido"),
    ("uniqueItems", "{{#label}} no debe contener elementos duplicados"),
    ("additionalProperties", "{{#label}} tiene una propiedad desconocida {{#additionalProperty}}"),
    ("oneOf", "{{#label}} debe coincidir exactamente con un esquema permitido"),
    ("default", "{{#label}} no es válido"),
    ("pattern.phone", "{{#label}} debe ser un número de teléfono válido"),
    ("pattern.idCard", "{{#label}} debe ser un número de documento de identidad válido"),
    ("pattern.creditCard", "{{#label}} debe ser un número de tarjeta de crédito válido"),
    ("pattern.licensePlate", "{{#label}} debe ser una matrícula válida"),
    ("pattern.postalCode", "{{#label}} debe ser un código postal válido"),
    ("pattern.passport", "{{#label}} debe ser un número de pasaporte válido"),
    ("pattern.objectId", "{{#label}} debe ser un ObjectId válido"),
    ("pattern.hexColor", "{{#label}} debe ser un color hexadecimal válido"),
    ("pattern.macAddress", "{{#label}} debe ser una dirección MAC válida"),
    ("pattern.alphanum", "{{#label}} solo puede contener letras y números"),
    (
        "pattern.username",
        "{{#label}} debe empezar por una letra y contener solo letras, números y guiones bajos",
    ),
    ("pattern.password", "{{#label}} no es lo bastante segura"),
    ("pattern.password.strong", "{{#label}} debe contener mayúsculas, minúsculas y un número"),
    (
        "pattern.password.veryStrong",
        "{{#label}} debe contener mayúsculas, minúsculas, un número y un símbolo",
    ),
];

// ============================================================================
// fr-FR
// ============================================================================

const FR_FR: &[(&str, &str)] = &[
    ("required", "{{#label}} est obligatoire"),
    ("type", "{{#label}} doit être de type {{#type}}"),
    ("min", "{{#label}} doit être au moins {{#limit}}"),
    ("max", "{{#label}} doit être au plus {{#limit}}"),
    ("string.min", "{{#label}} doit contenir au moins {{#limit}} caractères"),
    ("string.max", "{{#label}} doit contenir au plus {{#limit}} caractères"),
    ("number.min", "{{#label}} doit être supérieur ou égal à {{#limit}}"),
    ("number.max", "{{#label}} doit être inférieur ou égal à {{#limit}}"),
    ("array.min", "{{#label}} doit contenir au moins {{#limit}} éléments"),
    ("array.max", "{{#label}} doit contenir au plus {{#limit}} éléments"),
    ("exactLength", "{{#label}} doit contenir exactement {{#limit}} caractères"),
    ("exclusiveMinimum", "{{#label}} doit être supérieur à {{#limit}}"),
    ("exclusiveMaximum", "{{#label}} doit être inférieur à {{#limit}}"),
    ("multipleOf", "{{#label}} doit être un multiple de {{#multipleOf}}"),
    ("pattern", "{{#label}} a un format invalide"),
    ("enum", "{{#label}} doit être l'une des valeurs suivantes : {{#allowedValues}}"),
    ("const", "{{#label}} doit être égal à {{#allowedValue}}"),
    ("format", "{{#label}} doit être un {{#format}} valide"),
    ("format.email", "{{#label}} doit être une adresse e-mail valide"),
    ("format.url", "{{#label}} doit être une URL valide"),
    ("format.uuid", "{{#label}} doit être un UUID valide"),
    ("format.date", "{{#label}} doit être une date valide"),
    ("format.date-time", "{{#label}} doit être une date et une heure valides"),
    ("format.time", "{{#label}} doit être une heure valide"),
    ("format.ipv4", "{{#label}} doit être une adresse IPv4 valide"),
    ("format.ipv6", "{{#label}} doit être une adresse IPv6 valide"),
    ("format.hostname", "{{#label}} doit être un nom d'hôte valide"),
    ("uniqueItems", "{{#label}} ne doit pas contenir de doublons"),
    ("additionalProperties", "{{#label}} contient une propriété inconnue {{#additionalProperty}}"),
    ("oneOf", "{{#label}} doit correspondre à exactement un schéma autorisé"),
    ("default", "{{#label}} est invalide"),
    ("pattern.phone", "{{#label}} doit être un numéro de téléphone valide"),
    ("pattern.idCard", "{{#label}} doit être un numéro de carte d'identité valide"),
    ("pattern.creditCard", "{{#label}} doit être un numéro de carte bancaire valide"),
    ("pattern.licensePlate", "{{#label}} doit être une plaque d'immatriculation valide"),
    ("pattern.postalCode", "{{#label}} doit être un code postal valide"),
    ("pattern.passport", "{{#label}} doit être un numéro de passeport valide"),
    ("pattern.objectId", "{{#label}} doit être un ObjectId valide"),
    ("pattern.hexColor", "{{#label}} doit être une couleur hexadécimale valide"),
    ("pattern.macAddress", "{{#label}} doit être une adresse MAC valide"),
    ("pattern.alphanum", "{{#label}} ne peut contenir que des lettres et des chiffres"),
    (
        "pattern.username",
        "{{#label}} doit commencer par une lettre et ne contenir que des lettres, des chiffres et des tirets bas",
    ),
    ("pattern.password", "{{#label}} n'est pas assez sécurisé"),
    (
        "pattern.password.strong",
        "{{#label}} doit contenir des majuscules, des minuscules et un chiffre",
    ),
    (
        "pattern.password.veryStrong",
        "{{#label}} doit contenir des majuscules, des minuscules, un chiffre et un symbole",
    ),
];
