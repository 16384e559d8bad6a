//! Request pipeline gate that validates bodies against shapeguard schemas.
//!
//! Mount a [`SchemaMiddleware`] in front of a handler. On failure it either
//! halts the pipeline with a 400 and `{"error": [...]}` body, or (in transfer
//! mode) records the findings on the context and lets the request through.

pub mod config;
pub mod context;
pub mod middleware;

pub use config::ValidatorOptions;
pub use context::{Context, RequestContext};
pub use middleware::{validate_request, Flow, Outcome, SchemaMiddleware, BAD_REQUEST};
