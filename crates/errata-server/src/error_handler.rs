use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::fault::Fault;

/// Global error-handling middleware
///
/// Runs the request, then looks for a fault stashed in the response by
/// [`Fault`]'s `IntoResponse` impl. When one is present it is logged with
/// the request line and the outgoing status. The response itself is never
/// changed.
pub async fn error_handler(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let mut response = next.run(request).await;

    if let Some(fault) = response.extensions_mut().remove::<Fault>() {
        tracing::error!(
            kind = fault.label(),
            %method,
            %uri,
            status = response.status().as_u16(),
            error = ?fault,
            "{fault}"
        );
    }

    response
}
