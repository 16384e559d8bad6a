use serde_json::Value;
use shapeguard_schema::Schema;

/// Top-level record keys the schema does not declare, in record order.
///
/// Only used in strict mode. Nested objects are not inspected, and a record
/// that is not an object has no extra fields.
pub fn extra_fields(record: &Value, schema: &Schema) -> Vec<String> {
    match record {
        Value::Object(object) => object
            .keys()
            .filter(|key| !schema.contains(key))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shapeguard_schema::SchemaType;

    use super::*;

    #[test]
    fn reports_undeclared_keys_in_record_order() {
        let schema = Schema::new().with_field("name", SchemaType::String);
        let record = json!({ "zip": 1, "name": "Mikhail Semin", "age": 18 });

        assert_eq!(extra_fields(&record, &schema), vec!["zip", "age"]);
    }

    #[test]
    fn declared_keys_are_never_extra() {
        let schema = Schema::new()
            .with_field("name", SchemaType::String)
            .with_field("age", SchemaType::Number);
        let record = json!({ "name": 1, "age": "wrong type" });

        assert!(extra_fields(&record, &schema).is_empty());
    }

    #[test]
    fn nested_extras_are_ignored() {
        let schema = Schema::new().with_field("city", SchemaType::Object);
        let record = json!({ "city": { "unexpected": true } });

        assert!(extra_fields(&record, &schema).is_empty());
    }

    #[test]
    fn non_object_records_have_no_extras() {
        let schema = Schema::new();
        assert!(extra_fields(&json!([1, 2]), &schema).is_empty());
        assert!(extra_fields(&json!(null), &schema).is_empty());
    }
}
