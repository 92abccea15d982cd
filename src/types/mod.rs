//! Shared error types.

mod error;

pub use error::{CatalogError, Result};
