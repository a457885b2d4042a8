use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use crate::fault::Fault;

/// JSON extractor whose rejections become faults
///
/// A body that is not valid JSON, or does not match the target type, is a
/// validation failure (`422` with the failure detail). Other rejections,
/// such as a missing `Content-Type`, keep their own status.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(Fault))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string extractor whose rejections become faults
///
/// A query string that does not match the target type is a validation
/// failure.
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Fault))]
pub struct Query<T>(pub T);

/// Path parameter extractor whose rejections become faults
///
/// Parameters that do not parse as the target type are a validation
/// failure. Routing mistakes (missing or miscounted parameters) keep their
/// own status.
#[derive(Debug, Clone, Copy, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Fault))]
pub struct Path<T>(pub T);

fn validation(message: String) -> Fault {
    Fault::Validation(json!([{ "message": message }]))
}

impl From<JsonRejection> for Fault {
    fn from(rejection: JsonRejection) -> Self {
        match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => validation(rejection.body_text()),
            _ => Self::foreign(Some(rejection.status()), rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for Fault {
    fn from(rejection: QueryRejection) -> Self {
        match &rejection {
            QueryRejection::FailedToDeserializeQueryString(_) => validation(rejection.body_text()),
            _ => Self::foreign(Some(rejection.status()), rejection.body_text()),
        }
    }
}

impl From<PathRejection> for Fault {
    fn from(rejection: PathRejection) -> Self {
        match &rejection {
            PathRejection::FailedToDeserializePathParams(_) if rejection.status().is_client_error() => {
                validation(rejection.body_text())
            }
            _ => Self::foreign(Some(rejection.status()), rejection.body_text()),
        }
    }
}
