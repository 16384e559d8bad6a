//! Declarative shape schemas for request body validation.
//!
//! A schema maps top-level field names to [`SchemaNode`]s. Each node declares
//! a primitive type, and optionally the required fields and nested properties
//! of an object, or the element shape of an array. Nodes may be written in
//! shorthand as a bare type name (`"string"`).
//!
//! Schemas are built once (by hand, from JSON, or through a
//! [`SchemaRegistry`]) and are read-only afterwards, so they can be shared
//! freely across threads.

pub mod config;
pub mod error;
pub mod node;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{Result, SchemaError};
pub use node::{Schema, SchemaNode, SchemaType, DEFAULT_MAX_DEPTH};
pub use registry::SchemaRegistry;
