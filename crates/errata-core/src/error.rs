use serde_json::Value;

use crate::catalog::ErrorKind;
use crate::message::derive_message;

/// Capabilities shared by every catalog-compatible error
///
/// Implemented by [`HttpError`] for the fixed table. Other crates implement
/// it to add error kinds the table does not cover; the responder treats
/// those exactly like catalog entries.
pub trait CatalogError: std::error::Error + Send + Sync + 'static {
    /// Status code to respond with
    fn code(&self) -> u16;

    /// Kind name (e.g. `NotFound`)
    fn kind(&self) -> &str;

    /// Message sent when no response override is present
    ///
    /// Defaults to the message derived from [`CatalogError::kind`].
    fn message(&self) -> String {
        derive_message(self.kind())
    }

    /// Free-form payload attached to this occurrence
    fn data(&self) -> Option<&Value> {
        None
    }
}

/// One occurrence of a catalog error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .kind.message())]
pub struct HttpError {
    kind: ErrorKind,
    data: Option<Value>,
}

impl HttpError {
    /// Build an error of the given kind without a payload
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self { kind, data: None }
    }

    /// Attach a payload
    ///
    /// A `response` field in the payload replaces the message as the
    /// response body.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Catalog entry this error belongs to
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Numeric status code
    pub const fn code(&self) -> u16 {
        self.kind.code()
    }

    /// Reason phrase derived from the kind name
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// Attached payload, if any
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

impl From<ErrorKind> for HttpError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl CatalogError for HttpError {
    fn code(&self) -> u16 {
        self.kind.code()
    }

    fn kind(&self) -> &str {
        self.kind.name()
    }

    fn message(&self) -> String {
        self.kind.message().to_owned()
    }

    fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

/// The `response` field of a payload, when it should replace the message
///
/// Absent, `null`, `false`, `0`, and `""` all count as no override.
pub fn response_override(data: Option<&Value>) -> Option<&Value> {
    data.and_then(|data| data.get("response")).filter(|response| is_truthy(response))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n.is_normal() || n.is_subnormal()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
