use serde_json::{json, Value};
use shapeguard::middleware::{Context, Flow, SchemaMiddleware, BAD_REQUEST};
use shapeguard::schema::Schema;
use shapeguard::validate::MessageCatalog;

fn apply(gate: &SchemaMiddleware, body: Value) -> (Context, Flow<bool>) {
    let mut ctx = Context::new(body);
    let flow = gate.handle(&mut ctx, |_| true);
    (ctx, flow)
}

fn profile_schema() -> Schema {
    Schema::from_value(&json!({
        "name": "string",
        "phone": "number",
        "hobbies": { "type": "array", "items": { "type": "string" } },
        "city": {
            "type": "object",
            "required": ["lng", "lat"],
            "properties": { "lng": "number", "lat": "number" }
        },
        "preferences": {
            "type": "object",
            "required": ["mine"],
            "properties": {
                "mine": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["title", "score"],
                        "properties": { "title": "string", "score": "number" }
                    }
                }
            }
        }
    }))
    .expect("profile schema should parse")
}

fn hobbies_and_name() -> Schema {
    Schema::from_value(&json!({ "hobbies": "array", "name": "string" }))
        .expect("schema should parse")
}

#[test]
fn send_body_with_correct_data() {
    let gate = SchemaMiddleware::new(profile_schema());
    let (ctx, flow) = apply(
        &gate,
        json!({
            "name": "Mikhail",
            "phone": 79959978504u64,
            "hobbies": ["Basketball"],
            "city": { "lng": 15, "lat": 15 },
            "preferences": { "mine": [{ "title": "Football", "score": 2 }] }
        }),
    );

    assert_eq!(flow, Flow::Continued(true));
    assert_eq!(ctx.status, None);
}

#[test]
fn send_body_with_incorrect_data() {
    let gate = SchemaMiddleware::new(hobbies_and_name());
    let (ctx, flow) = apply(&gate, json!({ "hobbies": "football" }));

    assert_eq!(ctx.status, Some(BAD_REQUEST));
    assert_eq!(
        ctx.response_body,
        Some(json!({ "error": ["hobbies must be array", "name must be string"] }))
    );
    assert_eq!(flow, Flow::Halted);
}

#[test]
fn send_body_with_incorrect_data_and_transfer_errors() {
    let gate = SchemaMiddleware::new(hobbies_and_name()).transfer_errors(true);
    let (ctx, flow) = apply(&gate, json!({ "hobbies": "football" }));

    let errors = ctx.errors.expect("errors should be transferred");
    assert_eq!(errors, vec!["hobbies must be array", "name must be string"]);
    assert_eq!(ctx.status, None);
    assert_eq!(flow, Flow::Continued(true));
}

#[test]
fn send_body_with_unused_field_in_strict_mode() {
    let schema = Schema::from_value(&json!({ "name": "string" })).expect("schema should parse");
    let body = json!({ "name": "Mikhail Semin", "age": 18 });

    let (ctx, flow) = apply(&SchemaMiddleware::new(schema.clone()).strict_mode(true), body.clone());
    assert_eq!(ctx.status, Some(BAD_REQUEST));
    assert_eq!(
        ctx.response_body,
        Some(json!({ "error": ["age field(s) are unused, you mustn't send them"] }))
    );
    assert_eq!(flow, Flow::Halted);

    let (ctx, flow) = apply(&SchemaMiddleware::new(schema), body);
    assert_eq!(ctx.status, None);
    assert_eq!(flow, Flow::Continued(true));
}

#[test]
fn nested_errors_reach_the_response_in_traversal_order() {
    let gate = SchemaMiddleware::new(profile_schema());
    let (ctx, _) = apply(
        &gate,
        json!({
            "name": "Mikhail",
            "phone": "79959978504",
            "hobbies": [],
            "city": { "lng": 10 },
            "preferences": { "mine": [{ "title": "Football" }] }
        }),
    );

    assert_eq!(
        ctx.response_body,
        Some(json!({
            "error": [
                "phone must be number",
                "hobbies[0] must be string",
                "city.lat is required",
                "city.lat must be number",
                "preferences.mine[0].score is required",
                "preferences.mine[0].score must be number"
            ]
        }))
    );
}

#[test]
fn one_schema_serves_many_gates() {
    let schema = std::sync::Arc::new(hobbies_and_name());
    let strict = SchemaMiddleware::new(std::sync::Arc::clone(&schema)).strict_mode(true);
    let lenient = SchemaMiddleware::new(schema);

    let body = json!({ "hobbies": [], "name": "x", "extra": true });
    assert!(strict.validate_request(&body).halt);
    assert!(lenient.validate_request(&body).is_valid());
}

#[test]
fn localized_catalog_flows_through_gate() {
    let locales = MessageCatalog::from_json_str(
        r#"{
            "invalidValueType": "%property% doit être de type %type%",
            "propertyIsRequired": "%property% est obligatoire",
            "unusedFields": "champs inutilisés : %fields%"
        }"#,
    )
    .expect("catalog should parse");
    let gate = SchemaMiddleware::new(hobbies_and_name())
        .strict_mode(true)
        .locales(locales);

    let (ctx, _) = apply(&gate, json!({ "hobbies": [], "age": 1 }));
    assert_eq!(
        ctx.response_body,
        Some(json!({
            "error": ["name doit être de type string", "champs inutilisés : age"]
        }))
    );
}
