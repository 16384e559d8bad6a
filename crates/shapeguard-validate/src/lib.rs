//! Recursive structural validation of request records.
//!
//! [`Engine`] walks a record alongside a [`Schema`](shapeguard_schema::Schema)
//! and collects every type mismatch, missing required field and malformed
//! array element as a rendered, localizable [`ValidationError`]. Findings are
//! data: validation itself never fails.
//!
//! Messages come from an explicit [`MessageCatalog`]; the English defaults
//! are available through [`MessageCatalog::english`].

pub mod engine;
pub mod error;
pub mod messages;
pub mod strict;
pub mod types;

pub use engine::{validate, Engine};
pub use error::{CatalogError, ValidationError};
pub use messages::{MessageCatalog, INVALID_VALUE_TYPE, PROPERTY_IS_REQUIRED, UNUSED_FIELDS};
pub use strict::extra_fields;
pub use types::{is_truthy, is_type_valid};
