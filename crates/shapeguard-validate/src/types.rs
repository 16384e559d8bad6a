use serde_json::Value;
use shapeguard_schema::{SchemaNode, SchemaType};

/// Whether `value` satisfies the node's declared type.
///
/// Arrays only satisfy `array`; objects only satisfy `object`. Absent values
/// and `null` satisfy nothing. No coercion is performed.
pub fn is_type_valid(value: Option<&Value>, node: &SchemaNode) -> bool {
    matches_type(value, node.kind())
}

pub fn matches_type(value: Option<&Value>, kind: SchemaType) -> bool {
    matches!(
        (kind, value),
        (SchemaType::Array, Some(Value::Array(_)))
            | (SchemaType::String, Some(Value::String(_)))
            | (SchemaType::Number, Some(Value::Number(_)))
            | (SchemaType::Boolean, Some(Value::Bool(_)))
            | (SchemaType::Object, Some(Value::Object(_)))
    )
}

/// Truthiness used by required-field checks.
///
/// Absent, `null`, `false`, zero, `""` and `[]` are falsy. Objects are always
/// truthy, even when empty.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64() != Some(0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(_)) => true,
    }
}
