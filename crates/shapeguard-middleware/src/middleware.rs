use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use shapeguard_schema::{Schema, SchemaRegistry};
use shapeguard_validate::{extra_fields, Engine, ValidationError, UNUSED_FIELDS};
use tracing::debug;

use crate::config::ValidatorOptions;
use crate::context::RequestContext;

/// Status set on the context when the gate halts.
pub const BAD_REQUEST: u16 = 400;

/// Result of validating one request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub errors: Vec<ValidationError>,
    /// True when the pipeline must stop here.
    pub halt: bool,
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// What happened to the pipeline after the gate ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow<R> {
    /// Validation failed; `next` was not called.
    Halted,
    /// `next` was called and returned `R`.
    Continued(R),
}

impl<R> Flow<R> {
    pub fn is_halted(&self) -> bool {
        matches!(self, Flow::Halted)
    }

    pub fn into_option(self) -> Option<R> {
        match self {
            Flow::Halted => None,
            Flow::Continued(value) => Some(value),
        }
    }
}

/// Validate `record` against `schema` and decide whether to halt.
pub fn validate_request(record: &Value, schema: &Schema, options: &ValidatorOptions) -> Outcome {
    let mut errors = Engine::new(&options.locales).validate(record, schema);

    if options.strict_mode {
        let extras = extra_fields(record, schema);
        if !extras.is_empty() {
            let fields = extras.join(", ");
            errors.push(ValidationError::new(
                options
                    .locales
                    .render(UNUSED_FIELDS, &[("fields", fields.as_str())]),
            ));
        }
    }

    let halt = !errors.is_empty() && !options.transfer_errors;
    Outcome { errors, halt }
}

/// A mounted validator: one schema plus its options.
#[derive(Debug, Clone)]
pub struct SchemaMiddleware {
    schema: Arc<Schema>,
    options: ValidatorOptions,
}

impl SchemaMiddleware {
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            schema: schema.into(),
            options: ValidatorOptions::default(),
        }
    }

    /// Build a gate for a registered route.
    ///
    /// Returns `Ok(None)` for unknown routes unless the registry is configured
    /// with `fail_on_missing_schema`.
    pub fn for_route(
        registry: &SchemaRegistry,
        route: &str,
        options: ValidatorOptions,
    ) -> shapeguard_schema::Result<Option<Self>> {
        Ok(registry
            .lookup(route)?
            .map(|schema| Self::new(schema).with_options(options)))
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn transfer_errors(mut self, enabled: bool) -> Self {
        self.options.transfer_errors = enabled;
        self
    }

    pub fn strict_mode(mut self, enabled: bool) -> Self {
        self.options.strict_mode = enabled;
        self
    }

    pub fn locales(mut self, locales: shapeguard_validate::MessageCatalog) -> Self {
        self.options.locales = locales;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn validate_request(&self, record: &Value) -> Outcome {
        validate_request(record, &self.schema, &self.options)
    }

    /// Run the gate for one request.
    ///
    /// On halt the context gets status 400 and an `{"error": [...]}` body and
    /// `next` is not called. In transfer mode findings go to the context's
    /// error slot and `next` runs; the status is left untouched.
    pub fn handle<C, F, R>(&self, ctx: &mut C, next: F) -> Flow<R>
    where
        C: RequestContext,
        F: FnOnce(&mut C) -> R,
    {
        let outcome = self.validate_request(ctx.body());

        if outcome.halt {
            debug!(errors = outcome.errors.len(), "request body rejected");
            ctx.set_status(BAD_REQUEST);
            ctx.set_response_body(json!({ "error": outcome.errors }));
            return Flow::Halted;
        }

        if !outcome.errors.is_empty() {
            debug!(
                errors = outcome.errors.len(),
                "transferring validation errors to next stage"
            );
            ctx.set_errors(outcome.errors);
        }

        Flow::Continued(next(ctx))
    }
}
