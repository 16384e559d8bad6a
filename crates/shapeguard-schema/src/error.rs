/// Errors that can occur while building or loading schemas.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file could not be loaded.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// The schema definition is malformed.
    #[error("invalid schema at {path}: {reason}")]
    Invalid { path: String, reason: String },

    /// The schema nests deeper than the configured limit.
    #[error("schema at {path} exceeds max depth {max}")]
    TooDeep { path: String, max: usize },

    /// The schema source is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// No schema registered for the given route.
    #[error("no schema registered for route {0}")]
    NoSchema(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
