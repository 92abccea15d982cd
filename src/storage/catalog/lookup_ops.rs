use tracing::trace;

use super::matching::eq_ignore_case;
use super::Catalog;
use crate::model::{Director, Movie, MovieDetails};
use crate::types::{CatalogError, Result};

impl Catalog {
    /// Finds a movie by exact id or case-insensitive title.
    ///
    /// An id match wins; otherwise the first title match in store order is
    /// returned.
    pub fn find_movie(&self, query: &str) -> Result<&Movie> {
        if let Some(movie) = self.movies.get(query) {
            return Ok(movie);
        }
        self.movies
            .values()
            .find(|movie| eq_ignore_case(&movie.title, query))
            .ok_or_else(|| CatalogError::movie_not_found(query))
    }

    /// [`Catalog::find_movie`] with director and cast resolved to names.
    pub fn movie_info(&self, query: &str) -> Result<MovieDetails<'_>> {
        let movie = self.find_movie(query)?;
        Ok(self.movie_details(movie))
    }

    /// Movies whose genre matches case-insensitively, in store order.
    pub fn filter_by_genre(&self, genre: &str) -> Vec<&Movie> {
        self.movies
            .values()
            .filter(|movie| eq_ignore_case(&movie.genre, genre))
            .collect()
    }

    /// First director (in store order) whose name matches case-insensitively.
    pub fn find_director_by_name(&self, name: &str) -> Result<&Director> {
        self.directors
            .values()
            .find(|director| eq_ignore_case(&director.name, name))
            .ok_or_else(|| CatalogError::director_not_found(name))
    }

    /// Movies by the director named `name`.
    ///
    /// Fails with [`CatalogError::DirectorNotFound`] when no director has
    /// that name; a known director with no movies gives an empty list.
    pub fn filter_by_director_name(&self, name: &str) -> Result<Vec<&Movie>> {
        let director = self.find_director_by_name(name)?;
        trace!(director_id = %director.director_id, "catalog.lookup.director_resolved");
        Ok(self
            .movies
            .values()
            .filter(|movie| movie.director_id == director.director_id)
            .collect())
    }

    /// Movies released in `year`.
    pub fn filter_by_year(&self, year: i32) -> Vec<&Movie> {
        self.movies
            .values()
            .filter(|movie| movie.release_year == year)
            .collect()
    }

    /// Movies released in `start..=end`; empty when `start > end`.
    pub fn filter_by_year_range(&self, start: i32, end: i32) -> Vec<&Movie> {
        self.movies
            .values()
            .filter(|movie| (start..=end).contains(&movie.release_year))
            .collect()
    }
}
