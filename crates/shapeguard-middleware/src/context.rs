use serde_json::Value;
use shapeguard_validate::ValidationError;

/// What the gate needs from a pipeline's per-request context.
pub trait RequestContext {
    /// The parsed request body.
    fn body(&self) -> &Value;

    /// Set the response status code.
    fn set_status(&mut self, status: u16);

    /// Set the response body.
    fn set_response_body(&mut self, body: Value);

    /// Store findings for later pipeline stages (transfer mode).
    fn set_errors(&mut self, errors: Vec<ValidationError>);
}

/// Minimal in-memory context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    pub body: Value,
    pub status: Option<u16>,
    pub response_body: Option<Value>,
    pub errors: Option<Vec<ValidationError>>,
}

impl Context {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            ..Self::default()
        }
    }
}

impl RequestContext for Context {
    fn body(&self) -> &Value {
        &self.body
    }

    fn set_status(&mut self, status: u16) {
        self.status = Some(status);
    }

    fn set_response_body(&mut self, body: Value) {
        self.response_body = Some(body);
    }

    fn set_errors(&mut self, errors: Vec<ValidationError>) {
        self.errors = Some(errors);
    }
}
