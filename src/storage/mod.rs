//! Entity storage.

/// The in-memory movie catalog and its query engines.
///
/// Holds the movie, actor and director maps and every operation that reads
/// or mutates them.
pub mod catalog;
