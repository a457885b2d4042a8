use std::collections::{HashMap, HashSet};

use errata_core::ErrorKind;
use http::Method;

/// One or more HTTP methods for a route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Methods(Vec<Method>);

impl Methods {
    pub(crate) fn as_slice(&self) -> &[Method] {
        &self.0
    }
}

impl From<Method> for Methods {
    fn from(method: Method) -> Self {
        Self(vec![method])
    }
}

impl From<Vec<Method>> for Methods {
    fn from(methods: Vec<Method>) -> Self {
        Self(methods)
    }
}

impl<const N: usize> From<[Method; N]> for Methods {
    fn from(methods: [Method; N]) -> Self {
        Self(methods.into())
    }
}

impl From<&[Method]> for Methods {
    fn from(methods: &[Method]) -> Self {
        Self(methods.to_vec())
    }
}

/// Methods registered for each route path
///
/// Grows while routes are registered and is only read once the router is
/// built. Used to tell an unknown path (`404`) from a known path hit with
/// the wrong method (`405`).
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: HashMap<String, HashSet<Method>>,
}

impl RouteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add methods to the set registered for `path`
    ///
    /// Recording a method that is already present changes nothing.
    pub fn record(&mut self, path: impl Into<String>, methods: impl Into<Methods>) {
        let methods = methods.into();
        self.routes.entry(path.into()).or_default().extend(methods.0);
    }

    /// Methods registered for `path`, sorted by name
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<_> = self.routes.get(path).into_iter().flatten().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// Whether at least one method is registered for `path`
    pub fn is_known(&self, path: &str) -> bool {
        self.routes.get(path).is_some_and(|methods| !methods.is_empty())
    }

    /// Classify a request that matched no route
    ///
    /// A known path hit with an unregistered method is
    /// [`ErrorKind::MethodNotAllowed`]; everything else is
    /// [`ErrorKind::NotFound`].
    pub fn classify(&self, path: &str, method: &Method) -> ErrorKind {
        match self.routes.get(path) {
            Some(methods) if !methods.is_empty() && !methods.contains(method) => ErrorKind::MethodNotAllowed,
            _ => ErrorKind::NotFound,
        }
    }
}
