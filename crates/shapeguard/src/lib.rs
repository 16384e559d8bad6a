//! Declarative structural validation for request bodies.
//!
//! shapeguard checks parsed request bodies against small declarative schemas
//! (types, required fields, nested objects, typed arrays) and reports every
//! mismatch as a readable, localizable message.
//!
//! # Crate Structure
//!
//! - [`schema`]: Schema model, shorthand parsing, route registry
//! - [`validate`]: Recursive validation engine and message catalogs
//! - [`middleware`]: Pipeline gate with halt, transfer and strict modes
//!
//! ```
//! use serde_json::json;
//! use shapeguard::middleware::{Context, Flow, SchemaMiddleware};
//! use shapeguard::schema::Schema;
//!
//! let schema = Schema::from_value(&json!({ "name": "string" })).unwrap();
//! let gate = SchemaMiddleware::new(schema);
//!
//! let mut ctx = Context::new(json!({ "name": 42 }));
//! let flow = gate.handle(&mut ctx, |_| "handled");
//!
//! assert_eq!(flow, Flow::Halted);
//! assert_eq!(ctx.status, Some(400));
//! ```

/// Re-export schema types.
pub mod schema {
    pub use shapeguard_schema::*;
}

/// Re-export validation types.
pub mod validate {
    pub use shapeguard_validate::*;
}

/// Re-export middleware types.
pub mod middleware {
    pub use shapeguard_middleware::*;
}
