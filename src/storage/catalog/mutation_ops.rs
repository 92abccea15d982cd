use tracing::{debug, info};

use super::Catalog;
use crate::model::Movie;
use crate::types::{CatalogError, Result};

impl Catalog {
    /// Inserts `movie`, replacing any movie with the same id.
    ///
    /// Foreign keys and numeric ranges are not checked. Returns the replaced
    /// movie, if any.
    pub fn insert_movie(&mut self, movie: Movie) -> Option<Movie> {
        let movie_id = movie.movie_id.clone();
        let replaced = self.movies.insert(movie_id.clone(), movie);
        info!(
            movie_id = %movie_id,
            replaced = replaced.is_some(),
            "catalog.movie.inserted"
        );
        replaced
    }

    /// Sets the rating of an existing movie, leaving every other field as is.
    pub fn update_rating(&mut self, movie_id: &str, rating: f64) -> Result<()> {
        let movie = self
            .movies
            .get_mut(movie_id)
            .ok_or_else(|| CatalogError::movie_not_found(movie_id))?;
        debug!(
            movie_id,
            old = movie.rating,
            new = rating,
            "catalog.movie.rating_updated"
        );
        movie.rating = rating;
        Ok(())
    }

    /// Removes a movie. Actors and directors are left untouched.
    pub fn delete_movie(&mut self, movie_id: &str) -> Result<Movie> {
        let removed = self
            .movies
            .remove(movie_id)
            .ok_or_else(|| CatalogError::movie_not_found(movie_id))?;
        info!(movie_id, "catalog.movie.deleted");
        Ok(removed)
    }
}
