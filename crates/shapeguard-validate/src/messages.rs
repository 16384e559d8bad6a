use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::error::{CatalogError, Result};

/// Type mismatch. Variables: `property`, `type`.
pub const INVALID_VALUE_TYPE: &str = "invalidValueType";
/// Missing or falsy required field. Variables: `property`.
pub const PROPERTY_IS_REQUIRED: &str = "propertyIsRequired";
/// Undeclared fields in strict mode. Variables: `fields` (comma-joined).
pub const UNUSED_FIELDS: &str = "unusedFields";

const ENGLISH: [(&str, &str); 3] = [
    (INVALID_VALUE_TYPE, "%property% must be %type%"),
    (PROPERTY_IS_REQUIRED, "%property% is required"),
    (
        UNUSED_FIELDS,
        "%fields% field(s) are unused, you mustn't send them",
    ),
];

/// Flat mapping of message key to a `%variable%` template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// The built-in English catalog.
    pub fn english() -> Self {
        let mut catalog = Self::new();
        for (key, template) in ENGLISH {
            catalog.insert(key, template);
        }
        catalog
    }

    /// Parse a catalog from a JSON object of `key -> template` strings.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Build a catalog from a JSON object of `key -> template` strings.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let mut catalog = Self::new();
        for (key, template) in map {
            let template = template
                .as_str()
                .ok_or_else(|| CatalogError::InvalidTemplate { key: key.clone() })?;
            catalog.insert(key.clone(), template);
        }
        Ok(catalog)
    }

    /// Add or replace a template.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Layer `overrides` on top of this catalog. Keys missing from
    /// `overrides` keep their current template.
    pub fn with_overrides(mut self, overrides: MessageCatalog) -> Self {
        self.templates.extend(overrides.templates);
        self
    }

    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render the template at `key`, substituting every `%name%` occurrence.
    ///
    /// An unknown key renders as the key itself.
    pub fn render(&self, key: &str, variables: &[(&str, &str)]) -> String {
        match self.template(key) {
            Some(template) => render_template(template, variables),
            None => {
                warn!(key, "message key missing from catalog");
                key.to_string()
            }
        }
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

/// Substitute `%name%` placeholders in one pass.
///
/// Substituted values are never rescanned. Placeholders without a matching
/// variable are left as-is.
pub fn render_template(template: &str, variables: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let substituted = after.find('%').and_then(|end| {
            let name = &after[..end];
            variables
                .iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (end, *value))
        });

        match substituted {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
