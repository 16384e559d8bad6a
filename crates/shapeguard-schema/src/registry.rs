use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{Result, SchemaError};
use crate::node::Schema;

const SCHEMA_SUFFIX: &str = ".schema.json";

/// Route-keyed registry of parsed schemas.
///
/// Schemas are registered once at startup and handed out as `Arc<Schema>`.
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Create an empty registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            schemas: HashMap::new(),
            config,
        }
    }

    /// Register a schema for a route from a JSON string.
    pub fn register(&mut self, route: &str, schema_json: &str) -> Result<()> {
        let schema: Value = serde_json::from_str(schema_json)?;
        self.register_value(route, &schema)
    }

    /// Register a schema for a route from a JSON value.
    pub fn register_value(&mut self, route: &str, schema: &Value) -> Result<()> {
        let parsed = Schema::from_value_with_max_depth(schema, self.config.max_schema_depth)?;
        self.register_schema(route, parsed);
        Ok(())
    }

    /// Register an already-built schema for a route.
    pub fn register_schema(&mut self, route: &str, schema: impl Into<Arc<Schema>>) {
        let schema = schema.into();
        debug!(route, fields = schema.len(), "registered schema");
        self.schemas.insert(route.to_string(), schema);
    }

    /// Load schemas from a directory.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, RegistryConfig::default())
    }

    /// Load schemas from a directory with explicit config.
    ///
    /// Every `<route>.schema.json` regular file becomes the schema for
    /// `<route>`. Other files are skipped; symlinked schema files are refused.
    pub fn from_directory_with_config(dir: &Path, config: RegistryConfig) -> Result<Self> {
        let mut registry = Self::with_config(config);
        let entries = fs::read_dir(dir).map_err(|err| load_failed(dir, err))?;

        for entry in entries {
            let entry = entry.map_err(|err| load_failed(dir, err))?;
            let Some(route) = schema_route(&entry)? else {
                continue;
            };

            let max_schemas = registry.config.max_schemas_from_directory;
            if registry.schemas.len() >= max_schemas {
                return Err(SchemaError::LoadFailed(format!(
                    "{} holds more than {max_schemas} schemas",
                    dir.display()
                )));
            }

            let text = read_bounded(&entry.path(), registry.config.max_schema_file_size)?;
            registry.register(&route, &text)?;
        }

        debug!(
            path = %dir.display(),
            count = registry.schemas.len(),
            "loaded schema directory"
        );
        Ok(registry)
    }

    /// Load from embedded `(route, schema_json)` pairs.
    pub fn from_embedded(schemas: &[(&str, &str)]) -> Result<Self> {
        let mut registry = Self::new();
        for (route, schema) in schemas {
            registry.register(route, schema)?;
        }
        Ok(registry)
    }

    /// Get the schema registered for a route.
    pub fn get(&self, route: &str) -> Option<Arc<Schema>> {
        self.schemas.get(route).cloned()
    }

    /// Look up a route, honoring `fail_on_missing_schema`.
    pub fn lookup(&self, route: &str) -> Result<Option<Arc<Schema>>> {
        match self.schemas.get(route) {
            Some(schema) => Ok(Some(Arc::clone(schema))),
            None if self.config.fail_on_missing_schema => {
                Err(SchemaError::NoSchema(route.to_string()))
            }
            None => Ok(None),
        }
    }

    /// Check if a route has a registered schema.
    pub fn has_schema(&self, route: &str) -> bool {
        self.schemas.contains_key(route)
    }

    /// Get routes that have registered schemas, sorted.
    pub fn routes(&self) -> Vec<String> {
        let mut routes: Vec<String> = self.schemas.keys().cloned().collect();
        routes.sort_unstable();
        routes
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Route served by a directory entry, or `None` when the entry is not a
/// schema file.
fn schema_route(entry: &fs::DirEntry) -> Result<Option<String>> {
    let file_name = entry.file_name();
    let Some(route) = file_name
        .to_str()
        .and_then(|name| name.strip_suffix(SCHEMA_SUFFIX))
    else {
        return Ok(None);
    };

    // DirEntry::file_type does not follow symlinks.
    let file_type = entry
        .file_type()
        .map_err(|err| load_failed(&entry.path(), err))?;
    if file_type.is_symlink() {
        return Err(SchemaError::LoadFailed(format!(
            "refusing to load schema symlink: {}",
            entry.path().display()
        )));
    }
    if !file_type.is_file() {
        return Ok(None);
    }

    if !is_route_name(route) {
        return Err(SchemaError::LoadFailed(format!(
            "unrecognized schema filename: {}",
            entry.path().display()
        )));
    }
    Ok(Some(route.to_string()))
}

fn is_route_name(route: &str) -> bool {
    !route.is_empty()
        && !route.starts_with('.')
        && route
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn read_bounded(path: &Path, max_bytes: usize) -> Result<String> {
    #[cfg(unix)]
    let listed = fs::symlink_metadata(path).map_err(|err| load_failed(path, err))?;
    let file = fs::File::open(path).map_err(|err| load_failed(path, err))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        let opened = file.metadata().map_err(|err| load_failed(path, err))?;
        if listed.dev() != opened.dev() || listed.ino() != opened.ino() {
            return Err(SchemaError::LoadFailed(format!(
                "schema file changed during load: {}",
                path.display()
            )));
        }
    }

    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut text = String::new();
    file.take(limit)
        .read_to_string(&mut text)
        .map_err(|err| load_failed(path, err))?;
    if text.len() > max_bytes {
        return Err(SchemaError::LoadFailed(format!(
            "schema file larger than {max_bytes} bytes: {}",
            path.display()
        )));
    }
    Ok(text)
}

fn load_failed(path: &Path, err: std::io::Error) -> SchemaError {
    SchemaError::LoadFailed(format!("{}: {err}", path.display()))
}
