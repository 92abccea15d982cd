//! Cinedex: an in-memory catalog of movies, actors and directors.
//!
//! Data is loaded from CSV files into a [`storage::catalog::Catalog`], which
//! answers lookups, filters, rankings and mutations. The `cinedex` binary
//! wraps the catalog in an interactive command loop.

#![warn(missing_docs)]

pub mod cli;
/// Entity records and query result views.
pub mod model;
pub mod storage;
pub mod types;

pub use model::{Actor, Director, Movie};
pub use storage::catalog::{Catalog, CatalogOptions};
pub use types::{CatalogError, Result};
