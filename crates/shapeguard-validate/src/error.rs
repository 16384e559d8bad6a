use std::fmt;

use serde::{Deserialize, Serialize};

/// A single rendered validation finding.
///
/// The key path is part of the message text (`city.lat is required`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }

    pub fn into_message(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidationError {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ValidationError {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ValidationError {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Errors that can occur while building a message catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog source is not valid JSON.
    #[error("catalog is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The catalog is not an object of string templates.
    #[error("invalid catalog entry {key}: template must be a string")]
    InvalidTemplate { key: String },

    /// The catalog root is not a JSON object.
    #[error("catalog must be a JSON object of key -> template")]
    NotAnObject,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
