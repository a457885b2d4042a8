use std::sync::Arc;

use errata_core::{CatalogError, ErrorKind, HttpError};
use http::StatusCode;
use serde_json::Value;

/// Any failure a handler can raise
///
/// Handlers return `Result<T, Fault>` and the responder turns the fault into
/// exactly one response. Catalog errors, extension errors, JSON rejections,
/// and `anyhow` errors all convert with `?`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Fault {
    /// Error from the fixed catalog
    #[error(transparent)]
    Catalog(#[from] HttpError),

    /// Catalog-compatible error defined outside the fixed table
    #[error("{0}")]
    Extension(Arc<dyn CatalogError>),

    /// Request body rejected by schema validation
    #[error("request validation failed")]
    Validation(Value),

    /// Anything else
    #[error("{message}")]
    Foreign {
        /// Status carried by the failure, if any
        status: Option<StatusCode>,
        /// Failure message; empty when the failure had none
        message: String,
    },
}

impl Fault {
    /// Wrap a third-party catalog-compatible error
    pub fn extension(error: impl CatalogError) -> Self {
        Self::Extension(Arc::new(error))
    }

    /// Build a failure outside the catalog
    pub fn foreign(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        Self::Foreign {
            status,
            message: message.into(),
        }
    }

    /// Short label used when logging
    ///
    /// The kind name for catalog and extension errors, `validation` or
    /// `foreign` otherwise.
    pub fn label(&self) -> &str {
        match self {
            Self::Catalog(error) => error.kind().name(),
            Self::Extension(error) => error.kind(),
            Self::Validation(_) => "validation",
            Self::Foreign { .. } => "foreign",
        }
    }
}

impl From<ErrorKind> for Fault {
    fn from(kind: ErrorKind) -> Self {
        Self::Catalog(HttpError::new(kind))
    }
}

impl From<anyhow::Error> for Fault {
    fn from(error: anyhow::Error) -> Self {
        Self::foreign(None, error.to_string())
    }
}
