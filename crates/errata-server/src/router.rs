use std::any::Any;
use std::sync::Arc;

use axum::Router;
use axum::handler::Handler;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodFilter, MethodRouter};
use http::{Method, Uri};
use indexmap::IndexMap;
use tower_http::catch_panic::CatchPanicLayer;

use crate::error_handler::error_handler;
use crate::fault::Fault;
use crate::registry::{Methods, RouteRegistry};

/// Errors raised while registering routes
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Route path does not start with `/`
    #[error("route path must start with '/': `{path}`")]
    InvalidPath { path: String },

    /// Route declared an empty method list
    #[error("route `{path}` declares no methods")]
    NoMethods { path: String },

    /// Method has no routing filter (e.g. an extension method)
    #[error("method `{method}` on route `{path}` cannot be routed")]
    UnsupportedMethod { path: String, method: Method },

    /// Method already has a handler on this path
    #[error("method `{method}` on route `{path}` is already registered")]
    DuplicateMethod { path: String, method: Method },
}

/// Router builder that records every route's methods
///
/// Routes registered here feed the [`RouteRegistry`]. The finished router
/// answers unmatched requests with `404 Not Found` or `405 Method Not
/// Allowed` according to that registry, turns handler panics into `500
/// Internal Server Error`, and logs every fault through [`error_handler`].
pub struct FaultRouter<S = ()> {
    registry: RouteRegistry,
    routes: IndexMap<String, MethodRouter<S>>,
}

impl<S> Default for FaultRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FaultRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create a builder with no routes
    pub fn new() -> Self {
        Self {
            registry: RouteRegistry::new(),
            routes: IndexMap::new(),
        }
    }

    /// Register `handler` for one or more methods on `path`
    ///
    /// Paths use axum syntax (`/users/{id}`). Registering the same path
    /// again adds methods to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute, no method is given, a
    /// method cannot be routed, or a method already has a handler on `path`
    pub fn route<H, T>(mut self, path: &str, methods: impl Into<Methods>, handler: H) -> Result<Self, RouteError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if !path.starts_with('/') {
            return Err(RouteError::InvalidPath { path: path.to_owned() });
        }

        let methods = methods.into();
        let filter = method_filter(path, &methods)?;

        let registered = self.registry.allowed(path);
        if let Some(method) = methods.as_slice().iter().find(|method| registered.contains(method)) {
            return Err(RouteError::DuplicateMethod {
                path: path.to_owned(),
                method: method.clone(),
            });
        }

        self.registry.record(path, methods);

        let slot = self.routes.entry(path.to_owned()).or_insert_with(MethodRouter::new);
        *slot = std::mem::replace(slot, MethodRouter::new()).on(filter, handler);

        tracing::debug!(path, "route registered");

        Ok(self)
    }

    /// Methods registered so far
    pub const fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Finish registration and build the axum router
    ///
    /// The registry is frozen and shared read-only with the fallbacks.
    pub fn into_router(self) -> Router<S> {
        let registry = Arc::new(self.registry);
        let mut router = Router::new();

        for (pattern, methods) in self.routes {
            let registry = Arc::clone(&registry);
            let path = pattern.clone();
            let method_fallback = move |method: Method| {
                let fault = unmatched(&registry, &path, &method);
                async move { fault }
            };
            router = router.route(&pattern, methods.fallback(method_fallback));
        }

        let path_fallback = move |method: Method, uri: Uri| {
            let fault = unmatched(&registry, uri.path(), &method);
            async move { fault }
        };

        router
            .fallback(path_fallback)
            .layer(CatchPanicLayer::custom(handler_panicked))
            .layer(axum::middleware::from_fn(error_handler))
    }
}

fn handler_panicked(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => panic
            .downcast_ref::<&str>()
            .map_or_else(|| "unknown panic payload".to_owned(), |message| (*message).to_owned()),
    };
    tracing::error!(%detail, "handler panicked");

    Fault::foreign(None, "").into_response()
}

fn method_filter(path: &str, methods: &Methods) -> Result<MethodFilter, RouteError> {
    let to_filter = |method: &Method| {
        MethodFilter::try_from(method.clone()).map_err(|_| RouteError::UnsupportedMethod {
            path: path.to_owned(),
            method: method.clone(),
        })
    };

    let (first, rest) = methods
        .as_slice()
        .split_first()
        .ok_or_else(|| RouteError::NoMethods { path: path.to_owned() })?;

    rest.iter()
        .try_fold(to_filter(first)?, |filter, method| Ok(filter.or(to_filter(method)?)))
}

fn unmatched(registry: &RouteRegistry, path: &str, method: &Method) -> Fault {
    let kind = registry.classify(path, method);
    tracing::debug!(%method, path, kind = kind.name(), "no route matched");
    Fault::from(kind)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn router() -> Router {
        FaultRouter::new()
            .route("/x", Method::GET, || async { "x" })
            .unwrap()
            .route("/items/{id}", [Method::PUT, Method::DELETE], || async { "item" })
            .unwrap()
            .into_router()
    }

    #[tokio::test]
    async fn registered_route_is_served() {
        assert_eq!(send(router(), Method::GET, "/x").await, (StatusCode::OK, "x".to_owned()));
    }

    #[tokio::test]
    async fn wrong_method_is_405() {
        let (status, body) = send(router(), Method::POST, "/x").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "Method Not Allowed");
    }

    #[tokio::test]
    async fn wrong_method_on_parameterized_path_is_405() {
        let (status, body) = send(router(), Method::GET, "/items/7").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "Method Not Allowed");

        let (status, _) = send(router(), Method::DELETE, "/items/7").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let (status, body) = send(router(), Method::POST, "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not Found");
    }

    #[tokio::test]
    async fn empty_router_is_404() {
        let router: Router = FaultRouter::new().into_router();
        assert_eq!(
            send(router, Method::GET, "/").await,
            (StatusCode::NOT_FOUND, "Not Found".to_owned())
        );
    }

    #[tokio::test]
    async fn methods_accumulate_per_path() {
        let router: Router = FaultRouter::new()
            .route("/x", Method::GET, || async { "get" })
            .unwrap()
            .route("/x", Method::POST, || async { "post" })
            .unwrap()
            .into_router();

        assert_eq!(send(router.clone(), Method::POST, "/x").await, (StatusCode::OK, "post".to_owned()));
        assert_eq!(send(router, Method::PATCH, "/x").await.0, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn handler_faults_are_rendered() {
        let router: Router = FaultRouter::new()
            .route("/calm", Method::GET, || async { Fault::from(errata_core::ErrorKind::EnhanceYourCalm) })
            .unwrap()
            .into_router();

        let (status, body) = send(router, Method::GET, "/calm").await;
        assert_eq!(status.as_u16(), 420);
        assert_eq!(body, "Enhance Your Calm");
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn panicking_handler_is_500() {
        let router: Router = FaultRouter::new()
            .route("/boom", Method::GET, boom)
            .unwrap()
            .into_router();

        let (status, body) = send(router.clone(), Method::GET, "/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");

        let (status, _) = send(router, Method::GET, "/elsewhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn registry_tracks_routes() {
        let builder: FaultRouter = FaultRouter::new()
            .route("/a", [Method::POST, Method::GET], || async {})
            .unwrap();
        assert_eq!(builder.registry().allowed("/a"), [Method::GET, Method::POST]);
    }

    #[test]
    fn rejects_relative_path() {
        let result = FaultRouter::<()>::new().route("a", Method::GET, || async {});
        assert!(matches!(result, Err(RouteError::InvalidPath { .. })));
    }

    #[test]
    fn rejects_empty_methods() {
        let result = FaultRouter::<()>::new().route("/a", Vec::<Method>::new(), || async {});
        assert!(matches!(result, Err(RouteError::NoMethods { .. })));
    }

    #[test]
    fn rejects_duplicate_method() {
        let result = FaultRouter::<()>::new()
            .route("/x", Method::GET, || async {})
            .unwrap()
            .route("/x", [Method::POST, Method::GET], || async {});

        let Err(RouteError::DuplicateMethod { path, method }) = result else {
            panic!("expected a duplicate method error");
        };
        assert_eq!(path, "/x");
        assert_eq!(method, Method::GET);
    }

    #[test]
    fn same_method_on_other_path_is_fine() {
        let builder: FaultRouter = FaultRouter::new()
            .route("/x", Method::GET, || async {})
            .unwrap()
            .route("/y", Method::GET, || async {})
            .unwrap();
        assert!(builder.registry().is_known("/y"));
    }

    #[test]
    fn rejects_extension_methods() {
        let method = Method::from_bytes(b"PURGE").unwrap();
        let result = FaultRouter::<()>::new().route("/a", method, || async {});
        assert!(matches!(result, Err(RouteError::UnsupportedMethod { .. })));
    }
}
