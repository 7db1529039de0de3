//! Error Messages Example
//!
//! Formats engine violations in several locales, with labels and overrides.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-schema-dsl --example error_messages
//! ```

use ouroboros_schema_dsl::{DslEnvironment, ErrorDescriptor, FieldMap};
use serde_json::json;

fn main() {
    println!("Error Messages Example");
    println!("======================\n");

    let env = DslEnvironment::default();
    let schema = match env.compile_fields(
        FieldMap::new()
            .field("username!", "string:3-32")
            .field("age", "number:18-120")
            .field("plan", "pro|basic|free"),
    ) {
        Ok(schema) => schema,
        Err(err) => {
            println!("compile error: {}", err);
            return;
        }
    };

    env.add_locale("zh-CN", [("label.username", "用户名"), ("label.age", "年龄")]);

    for locale in ["en-US", "zh-CN", "ja-JP", "fr-FR"] {
        println!("{}", locale);
        let violations = vec![
            ErrorDescriptor::new("required", "")
                .param("missingProperty", "username")
                .schema(&schema),
            ErrorDescriptor::new("minimum", "/age")
                .param("limit", 18)
                .schema(schema.property("age").unwrap_or(&schema)),
            ErrorDescriptor::new("enum", "/plan")
                .param("allowedValues", json!(["pro", "basic", "free"]))
                .schema(schema.property("plan").unwrap_or(&schema)),
        ];
        for error in env.formatter().with_locale(locale).format_all(violations) {
            println!("  {}", error);
        }
        println!();
    }

    println!("Per-call override");
    let error = ErrorDescriptor::new("required", "").param("missingProperty", "email");
    let formatted = env
        .formatter()
        .with_messages([("required", "Please tell us your {{#label}}")])
        .format(&error);
    println!("  {}", formatted);
}
