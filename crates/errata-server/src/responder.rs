use axum::response::{IntoResponse, Response};
use errata_core::{CatalogError, response_override};
use http::StatusCode;
use serde_json::Value;

use crate::fault::Fault;

/// Body sent when a foreign failure has no message
const FALLBACK_MESSAGE: &str = "Internal Server Error";

/// Response body chosen for a fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Sent as `text/plain`
    Text(String),
    /// Sent as `application/json`
    Json(Value),
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Json(other),
        }
    }
}

impl IntoResponse for Body {
    fn into_response(self) -> Response {
        match self {
            Self::Text(text) => text.into_response(),
            Self::Json(value) => axum::Json(value).into_response(),
        }
    }
}

/// Decide the status and body for a fault
///
/// Catalog and extension errors answer with their own code and either the
/// `data.response` override or their message. Validation failures are
/// always `422` with the validation payload. Anything else keeps its own
/// status when it has one and falls back to `500 Internal Server Error`.
pub fn respond(fault: &Fault) -> (StatusCode, Body) {
    match fault {
        Fault::Catalog(error) => catalog_response(error),
        Fault::Extension(error) => catalog_response(&**error),
        Fault::Validation(payload) => (StatusCode::UNPROCESSABLE_ENTITY, Body::Json(payload.clone())),
        Fault::Foreign { status, message } => {
            let status = status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let message = if message.is_empty() {
                FALLBACK_MESSAGE.to_owned()
            } else {
                message.clone()
            };
            (status, Body::Text(message))
        }
    }
}

fn catalog_response(error: &dyn CatalogError) -> (StatusCode, Body) {
    let status = StatusCode::from_u16(error.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match response_override(error.data()) {
        Some(response) => Body::from(response.clone()),
        None => Body::Text(error.message()),
    };

    (status, body)
}

impl IntoResponse for Fault {
    /// Build the response and keep the fault in the response extensions
    ///
    /// The error-handling middleware takes it back out to log it alongside
    /// the request.
    fn into_response(self) -> Response {
        let (status, body) = respond(&self);
        let mut response = (status, body).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
