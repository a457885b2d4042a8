//! Catalog of HTTP error conditions
//!
//! Every entry of the status table becomes an [`ErrorKind`] variant with a
//! status code and a message derived from its name. Application code raises
//! [`HttpError`] values built from those kinds, and third-party crates can
//! add kinds of their own through [`CatalogError`].
#![allow(clippy::must_use_candidate)]

mod catalog;
mod error;
mod message;

pub use catalog::ErrorKind;
pub use error::{CatalogError, HttpError, response_override};
pub use message::derive_message;
