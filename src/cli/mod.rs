#![forbid(unsafe_code)]

//! Command-line support: CSV ingestion and the interactive command language.
//!
//! Nothing here writes to the console; the binary renders what these
//! functions return.

/// Command parsing and execution against a catalog.
///
/// Turns a line of user input into a typed [`command::Command`] and runs it,
/// producing a serializable [`command::Response`].
pub mod command;

/// CSV loading for movies, actors and directors.
pub mod import;
