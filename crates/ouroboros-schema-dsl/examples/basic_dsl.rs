//! Basic DSL Example
//!
//! Compiles a few field maps and prints the engine-ready JSON Schema.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-schema-dsl --example basic_dsl
//! ```

use ouroboros_schema_dsl::{to_engine_schema, to_json_schema, DslEnvironment, FieldMap, SchemaNode};
use serde_json::json;

// ============================================================================
// Field Maps
// ============================================================================

fn compile_signup_form(env: &DslEnvironment) {
    println!("1. Signup form");
    println!("--------------");

    let schema = env.compile_fields(
        FieldMap::new()
            .field("username!", "string:3-32")
            .field("email!", "email")
            .field("age", "integer:18-120")
            .field("plan", "pro|basic|free")
            .field("tags", "array:0-5<string:1-20>")
            .field(
                "address",
                FieldMap::new()
                    .field("city!", "string:1-100")
                    .field("postcode", "postalCode:uk"),
            ),
    );

    match schema {
        Ok(schema) => println!("{}", pretty(&to_engine_schema(&schema))),
        Err(err) => println!("  error: {}", err),
    }
    println!();
}

fn compile_from_json(env: &DslEnvironment) {
    println!("2. Definition from JSON");
    println!("-----------------------");

    let definition = json!({
        "id!": "uuid",
        "price": "number:>0",
        "quantity": "integer:1-",
    });
    match env.compile_json(&definition) {
        Ok(schema) => println!("{}", pretty(&to_engine_schema(&schema))),
        Err(err) => println!("  error: {}", err),
    }
    println!();
}

// ============================================================================
// Custom Types and Decorators
// ============================================================================

fn custom_types(env: &DslEnvironment) {
    println!("3. Custom type + builder");
    println!("------------------------");

    let mut slug = SchemaNode::string();
    slug.pattern = Some("^[a-z0-9]+(-[a-z0-9]+)*$".to_string());
    if let Err(err) = env.register_type("slug", slug) {
        println!("  error: {}", err);
        return;
    }

    let password = env
        .builder("string!")
        .and_then(|b| b.label("Password").password("strong"));

    let schema = password.and_then(|password| {
        env.compile_fields(
            FieldMap::new()
                .field("handle!", "slug:3-40")
                .field("password", password),
        )
    });
    match schema {
        Ok(schema) => println!("{}", pretty(&to_json_schema(&schema))),
        Err(err) => println!("  error: {}", err),
    }
    println!();
}

fn compile_errors(env: &DslEnvironment) {
    println!("4. Compile errors");
    println!("-----------------");

    for expr in ["strng:3", "string:10-3", "phone:zz", "number:1|two"] {
        match env.compile(expr) {
            Ok(_) => println!("  {:<14} ok", expr),
            Err(err) => println!("  {:<14} {}", expr, err),
        }
    }
    println!();
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn main() {
    println!("Schema DSL Example");
    println!("==================\n");

    let env = DslEnvironment::default();
    compile_signup_form(&env);
    compile_from_json(&env);
    custom_types(&env);
    compile_errors(&env);
}
