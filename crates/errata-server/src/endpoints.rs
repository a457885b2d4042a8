use errata_core::{ErrorKind, HttpError};
use serde::Deserialize;
use serde_json::json;

use crate::extract::{Path, Query};
use crate::fault::Fault;

/// Health check handler
pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    /// Body to send instead of the kind's message
    response: Option<String>,
}

/// Respond with the catalog error named in the path
///
/// Unknown names are `404 Not Found`. A `response` query parameter is
/// attached as the error's response override.
pub async fn status(Path(name): Path<String>, Query(params): Query<StatusParams>) -> Fault {
    let Ok(kind) = name.parse::<ErrorKind>() else {
        return Fault::from(ErrorKind::NotFound);
    };

    let error = HttpError::new(kind);
    match params.response {
        Some(response) => error.with_data(json!({ "response": response })).into(),
        None => error.into(),
    }
}
