use thiserror::Error;

/// Outcomes reported by catalog operations that did not find their target.
///
/// Empty filter results are not errors; only point lookups, mutations and
/// name-based director resolution fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No movie matched the id (or title) that was asked for.
    #[error("movie not found: {query}")]
    MovieNotFound {
        /// The id or title supplied by the caller.
        query: String,
    },
    /// No director carries the requested name.
    #[error("director not found: {name}")]
    DirectorNotFound {
        /// The director name supplied by the caller.
        name: String,
    },
}

impl CatalogError {
    pub(crate) fn movie_not_found(query: impl Into<String>) -> Self {
        CatalogError::MovieNotFound {
            query: query.into(),
        }
    }

    pub(crate) fn director_not_found(name: impl Into<String>) -> Self {
        CatalogError::DirectorNotFound { name: name.into() }
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
