use crate::node::DEFAULT_MAX_DEPTH;

/// Controls how schemas are loaded and looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// When true, routes without a schema return `SchemaError::NoSchema`.
    pub fail_on_missing_schema: bool,
    /// Maximum number of schemas loaded from a directory.
    pub max_schemas_from_directory: usize,
    /// Maximum bytes allowed per schema file loaded from a directory.
    pub max_schema_file_size: usize,
    /// Maximum nesting depth (properties/items) accepted in a schema.
    pub max_schema_depth: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fail_on_missing_schema: false,
            max_schemas_from_directory: 256,
            max_schema_file_size: 256 * 1024,
            max_schema_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
