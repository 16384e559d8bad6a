//! The recursive validation walk.
//!
//! Every value is checked by [`Engine::validate_value`], whatever its depth:
//!
//! 1. a type-mismatch finding when the value does not satisfy the node type;
//! 2. if the value is an array and the node declares `items`, each element is
//!    walked at `path[i]` (an empty array yields one finding at `path[0]`);
//! 3. if the value is an object, the node's `required` fields are checked,
//!    then each declared property is walked at `path.name`.
//!
//! The three checks are independent, so one malformed value can produce a
//! type finding and nested findings at once. Findings are emitted in schema
//! declaration order, depth-first.

use serde_json::{Map, Value};
use shapeguard_schema::{Schema, SchemaNode, SchemaType};
use tracing::debug;

use crate::error::ValidationError;
use crate::messages::{MessageCatalog, INVALID_VALUE_TYPE, PROPERTY_IS_REQUIRED};
use crate::types::{is_truthy, is_type_valid};

/// Validate `record` against `schema` with the English catalog.
pub fn validate(record: &Value, schema: &Schema) -> Vec<ValidationError> {
    let catalog = MessageCatalog::english();
    Engine::new(&catalog).validate(record, schema)
}

/// Validation walk bound to a message catalog.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'c> {
    catalog: &'c MessageCatalog,
}

impl<'c> Engine<'c> {
    pub fn new(catalog: &'c MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c MessageCatalog {
        self.catalog
    }

    /// Validate every top-level schema field of `record`.
    ///
    /// A record that is not an object is treated as having no fields.
    pub fn validate(&self, record: &Value, schema: &Schema) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (name, node) in schema.iter() {
            self.check_value(record.get(name), node, name, &mut errors);
        }
        debug!(
            fields = schema.len(),
            errors = errors.len(),
            "validated record"
        );
        errors
    }

    /// Validate a single value found at `path`.
    pub fn validate_value(
        &self,
        value: Option<&Value>,
        node: &SchemaNode,
        path: &str,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.check_value(value, node, path, &mut errors);
        errors
    }

    /// Validate the elements of an array found at `path`.
    pub fn validate_items(
        &self,
        items: &[Value],
        item_node: &SchemaNode,
        path: &str,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.check_items(items, item_node, path, &mut errors);
        errors
    }

    /// Check that each of `required` is present and truthy in `object`.
    pub fn has_required_fields(
        &self,
        object: &Map<String, Value>,
        required: &[String],
        prefix: &str,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.check_required(object, required, prefix, &mut errors);
        errors
    }

    /// Validate each declared property of `object`.
    pub fn is_properties_valid(
        &self,
        object: &Map<String, Value>,
        properties: &Schema,
        prefix: &str,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.check_properties(object, properties, prefix, &mut errors);
        errors
    }

    fn check_value(
        &self,
        value: Option<&Value>,
        node: &SchemaNode,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if !is_type_valid(value, node) {
            errors.push(self.type_mismatch(path, node.kind()));
        }

        match value {
            Some(Value::Array(items)) => {
                if let Some(item_node) = node.items() {
                    self.check_items(items, item_node, path, errors);
                }
            }
            Some(Value::Object(object)) => {
                self.check_required(object, node.required(), path, errors);
                self.check_properties(object, node.properties(), path, errors);
            }
            _ => {}
        }
    }

    fn check_items(
        &self,
        items: &[Value],
        item_node: &SchemaNode,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if items.is_empty() {
            errors.push(self.type_mismatch(&format!("{path}[0]"), item_node.kind()));
        }

        for (index, item) in items.iter().enumerate() {
            self.check_value(Some(item), item_node, &format!("{path}[{index}]"), errors);
        }
    }

    fn check_required(
        &self,
        object: &Map<String, Value>,
        required: &[String],
        prefix: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        for name in required {
            if !is_truthy(object.get(name)) {
                errors.push(self.missing_required(&join(prefix, name)));
            }
        }
    }

    fn check_properties(
        &self,
        object: &Map<String, Value>,
        properties: &Schema,
        prefix: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        for (name, node) in properties.iter() {
            self.check_value(object.get(name), node, &join(prefix, name), errors);
        }
    }

    fn type_mismatch(&self, path: &str, kind: SchemaType) -> ValidationError {
        ValidationError::new(self.catalog.render(
            INVALID_VALUE_TYPE,
            &[("property", path), ("type", kind.as_str())],
        ))
    }

    fn missing_required(&self, path: &str) -> ValidationError {
        ValidationError::new(
            self.catalog
                .render(PROPERTY_IS_REQUIRED, &[("property", path)]),
        )
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    /// A schema node paired with a value that satisfies it.
    fn node_and_value() -> impl Strategy<Value = (SchemaNode, Value)> {
        let leaf = prop_oneof![
            "[a-zA-Z ]{1,12}".prop_map(|s| (SchemaNode::new(SchemaType::String), Value::String(s))),
            any::<i64>().prop_map(|n| (SchemaNode::new(SchemaType::Number), json!(n))),
            any::<bool>().prop_map(|b| (SchemaNode::new(SchemaType::Boolean), Value::Bool(b))),
            prop::collection::vec(any::<i32>(), 0..4)
                .prop_map(|v| (SchemaNode::new(SchemaType::Array), json!(v))),
        ];
        leaf.prop_recursive(4, 48, 4, |inner| {
            prop_oneof![
                (inner.clone(), 1usize..4).prop_map(|((node, value), count)| {
                    (SchemaNode::array_of(node), Value::Array(vec![value; count]))
                }),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|fields| {
                    let mut properties = Schema::new();
                    let mut object = Map::new();
                    for (name, (node, value)) in fields {
                        properties = properties.with_field(name.clone(), node);
                        object.insert(name, value);
                    }
                    let required: Vec<String> = object
                        .iter()
                        .filter(|(_, value)| is_truthy(Some(value)))
                        .map(|(name, _)| name.clone())
                        .collect();
                    let node = SchemaNode::object()
                        .with_required(required)
                        .with_properties(properties);
                    (node, Value::Object(object))
                }),
            ]
        })
    }

    fn schema_and_record() -> impl Strategy<Value = (Schema, Value)> {
        prop::collection::vec(("[a-z]{1,6}", node_and_value()), 0..6).prop_map(|fields| {
            let mut schema = Schema::new();
            let mut record = Map::new();
            for (name, (node, value)) in fields {
                schema = schema.with_field(name.clone(), node);
                record.insert(name, value);
            }
            (schema, Value::Object(record))
        })
    }

    fn mismatched_value(kind: SchemaType) -> Value {
        match kind {
            SchemaType::String => json!(1),
            SchemaType::Number => json!("1"),
            SchemaType::Boolean => json!("true"),
            SchemaType::Object => json!([]),
            SchemaType::Array => json!({}),
        }
    }

    /// Walk down to one leaf picked by `seed` and replace it with a value of
    /// the wrong kind.
    fn corrupt(node: &SchemaNode, value: &mut Value, seed: usize) {
        match value {
            Value::Object(object) if !node.properties().is_empty() => {
                let count = node.properties().len();
                if let Some((name, child)) = node.properties().iter().nth(seed % count) {
                    if let Some(inner) = object.get_mut(name) {
                        corrupt(child, inner, seed / count);
                        return;
                    }
                }
            }
            Value::Array(items) if !items.is_empty() => {
                if let Some(child) = node.items() {
                    let count = items.len();
                    corrupt(child, &mut items[seed % count], seed / count);
                    return;
                }
            }
            _ => {}
        }
        *value = mismatched_value(node.kind());
    }

    proptest! {
        /// Records built to match their schema never produce findings.
        #[test]
        fn generated_valid_records_pass((schema, record) in schema_and_record()) {
            let errors = validate(&record, &schema);
            prop_assert!(errors.is_empty(), "unexpected findings: {:?}", errors);
        }

        /// Breaking any single leaf of a valid record yields a finding.
        #[test]
        fn corrupted_leaf_is_reported(
            (schema, mut record) in schema_and_record(),
            seed in any::<usize>(),
        ) {
            prop_assume!(!schema.is_empty());
            let (name, node) = schema.iter().nth(seed % schema.len()).unwrap();
            let name = name.to_string();
            let field = record.get_mut(&name).unwrap();
            corrupt(node, field, seed / schema.len());

            let errors = validate(&record, &schema);
            prop_assert!(!errors.is_empty(), "corruption went unnoticed: {}", record);
        }

        /// Same inputs, same findings, same order.
        #[test]
        fn findings_are_deterministic(
            (schema, _) in schema_and_record(),
            (_, record) in schema_and_record(),
        ) {
            prop_assert_eq!(validate(&record, &schema), validate(&record, &schema));
        }

        /// An empty record yields exactly one type finding per top-level field.
        #[test]
        fn empty_record_flags_each_field((schema, _) in schema_and_record()) {
            let errors = validate(&json!({}), &schema);
            prop_assert_eq!(errors.len(), schema.len());
        }
    }
}
