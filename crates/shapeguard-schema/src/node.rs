use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::{value::StrDeserializer, IntoDeserializer};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

/// Default maximum nesting depth accepted when parsing schemas.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Primitive type a schema node expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    /// The lowercase name used in schema definitions and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
        }
    }

    /// Parse a type name. Names are case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        let name: StrDeserializer<'_, serde::de::value::Error> = name.into_deserializer();
        Self::deserialize(name).ok()
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected shape of a single value.
///
/// `required` and `properties` only apply when the value is an object;
/// `items` only applies when it is an array. A node without `items` checks
/// array-ness alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    kind: SchemaType,
    required: Vec<String>,
    properties: Schema,
    items: Option<Arc<SchemaNode>>,
}

impl SchemaNode {
    /// Create a bare node of the given type (the shorthand form).
    pub fn new(kind: SchemaType) -> Self {
        Self {
            kind,
            required: Vec::new(),
            properties: Schema::new(),
            items: None,
        }
    }

    /// Shorthand for `SchemaNode::new(SchemaType::Object)`.
    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    /// An array node whose elements must match `items`.
    pub fn array_of(items: impl Into<SchemaNode>) -> Self {
        Self::new(SchemaType::Array).with_items(items)
    }

    /// Set the ordered list of fields that must be present and truthy.
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add a nested property.
    pub fn with_property(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.properties.insert(name, Arc::new(node.into()));
        self
    }

    /// Replace all nested properties.
    pub fn with_properties(mut self, properties: Schema) -> Self {
        self.properties = properties;
        self
    }

    /// Set the element shape.
    pub fn with_items(self, items: impl Into<SchemaNode>) -> Self {
        self.with_shared_items(Arc::new(items.into()))
    }

    /// Set an element shape shared with other schemas.
    pub fn with_shared_items(mut self, items: Arc<SchemaNode>) -> Self {
        self.items = Some(items);
        self
    }

    pub fn kind(&self) -> SchemaType {
        self.kind
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn properties(&self) -> &Schema {
        &self.properties
    }

    pub fn items(&self) -> Option<&SchemaNode> {
        self.items.as_deref()
    }
}

impl From<SchemaType> for SchemaNode {
    fn from(kind: SchemaType) -> Self {
        SchemaNode::new(kind)
    }
}

/// Ordered mapping of field name to [`SchemaNode`].
///
/// Iteration follows declaration order; validation output depends on it.
/// Lookups by name go through an index and do not scan the field list.
#[derive(Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<(String, Arc<SchemaNode>)>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Schema::insert`].
    pub fn with_field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.insert(name, Arc::new(node.into()));
        self
    }

    /// Builder form of [`Schema::insert`] for a node shared with other schemas.
    pub fn with_shared_field(mut self, name: impl Into<String>, node: Arc<SchemaNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Declare a field. Redeclaring a field replaces its node in place.
    pub fn insert(&mut self, name: impl Into<String>, node: Arc<SchemaNode>) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&slot) => self.fields[slot].1 = node,
            None => {
                self.index.insert(name.clone(), self.fields.len());
                self.fields.push((name, node));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.index
            .get(name)
            .map(|&slot| self.fields[slot].1.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.fields
            .iter()
            .map(|(name, node)| (name.as_str(), node.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a schema from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Parse a schema from a JSON value with the default depth limit.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::from_value_with_max_depth(value, DEFAULT_MAX_DEPTH)
    }

    /// Parse a schema from a JSON value.
    ///
    /// The value must be an object mapping field names to node definitions.
    /// A definition is either a type name or an object with `type` and the
    /// optional `required`, `properties` and `items` keys. Other keys (such as
    /// `description`) are ignored.
    pub fn from_value_with_max_depth(value: &Value, max_depth: usize) -> Result<Self> {
        parse_schema(value, "", 1, max_depth)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Schema::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        parse_node(&value, "", 1, DEFAULT_MAX_DEPTH).map_err(serde::de::Error::custom)
    }
}

fn parse_schema(value: &Value, path: &str, depth: usize, max_depth: usize) -> Result<Schema> {
    let Value::Object(map) = value else {
        return Err(invalid(path, "expected an object of field definitions"));
    };
    parse_fields(map, path, depth, max_depth)
}

fn parse_fields(
    map: &Map<String, Value>,
    path: &str,
    depth: usize,
    max_depth: usize,
) -> Result<Schema> {
    let mut schema = Schema::new();
    for (name, definition) in map {
        let child = child_path(path, name);
        let node = parse_node(definition, &child, depth, max_depth)?;
        schema.insert(name.clone(), Arc::new(node));
    }
    Ok(schema)
}

/// Wire form of a single node definition.
///
/// Nested `properties` and `items` stay as raw JSON so that errors below this
/// node can name the field they occur in.
#[derive(Deserialize)]
#[serde(untagged)]
enum NodeDef {
    Shorthand(SchemaType),
    Full {
        #[serde(rename = "type")]
        kind: SchemaType,
        #[serde(default)]
        required: Option<Vec<String>>,
        #[serde(default)]
        properties: Option<Map<String, Value>>,
        #[serde(default)]
        items: Option<Value>,
    },
}

fn parse_node(value: &Value, path: &str, depth: usize, max_depth: usize) -> Result<SchemaNode> {
    if depth > max_depth {
        return Err(SchemaError::TooDeep {
            path: location(path),
            max: max_depth,
        });
    }

    let definition = NodeDef::deserialize(value).map_err(|_| match value {
        Value::String(name) => invalid(path, format!("unknown type \"{name}\"")),
        _ => invalid(
            path,
            "expected a type name or an object with a known \"type\"",
        ),
    })?;

    let (kind, required, properties, items) = match definition {
        NodeDef::Shorthand(kind) => return Ok(SchemaNode::new(kind)),
        NodeDef::Full {
            kind,
            required,
            properties,
            items,
        } => (kind, required, properties, items),
    };

    let properties = match properties {
        Some(map) => parse_fields(&map, path, depth + 1, max_depth)?,
        None => Schema::new(),
    };
    let items = match items {
        Some(definition) => {
            let items_path = format!("{}[]", location(path));
            Some(Arc::new(parse_node(
                &definition,
                &items_path,
                depth + 1,
                max_depth,
            )?))
        }
        None => None,
    };

    Ok(SchemaNode {
        kind,
        required: required.unwrap_or_default(),
        properties,
        items,
    })
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn location(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::Invalid {
        path: location(path),
        reason: reason.into(),
    }
}
