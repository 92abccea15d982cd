#![forbid(unsafe_code)]

//! In-memory movie catalog.
//!
//! The catalog owns three id-keyed maps (movies, actors, directors). Every
//! query, ranking and mutation is a method on [`Catalog`], split across the
//! `*_ops` modules by concern. Maps are ordered by id, so "store order" is
//! ascending id order and every tie-break below is reproducible.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::model::{Actor, ActorId, Director, DirectorId, Movie, MovieId};

mod lookup_ops;
mod matching;
mod mutation_ops;
mod ranking_ops;
mod resolve_ops;


pub use matching::eq_ignore_case;

/// Tunables for a catalog instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Year used when reporting actor ages.
    pub reference_year: i32,
    /// Default `k` for the top-rated ranking.
    pub top_rated_limit: usize,
    /// Default `k` for the release-year listing.
    pub by_year_limit: usize,
    /// Default `k` for the director ranking.
    pub top_directors_limit: usize,
    /// Default `k` for the actor ranking.
    pub top_actors_limit: usize,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            reference_year: 2025,
            top_rated_limit: 10,
            by_year_limit: 15,
            top_directors_limit: 5,
            top_actors_limit: 5,
        }
    }
}

/// Entity counts and reference health for a catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Movies stored.
    pub movies: usize,
    /// Actors stored.
    pub actors: usize,
    /// Directors stored.
    pub directors: usize,
    /// Movies whose director id has no director record.
    pub dangling_director_refs: usize,
    /// Actor id slots (duplicates included) with no actor record.
    pub dangling_actor_refs: usize,
}

/// The entity store: movies, actors and directors keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    movies: BTreeMap<MovieId, Movie>,
    actors: BTreeMap<ActorId, Actor>,
    directors: BTreeMap<DirectorId, Director>,
    options: CatalogOptions,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new(options: CatalogOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Options this catalog was created with.
    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    /// Merges a fully loaded movie map; existing ids are overwritten.
    pub fn merge_movies(&mut self, movies: impl IntoIterator<Item = (MovieId, Movie)>) -> usize {
        let before = self.movies.len();
        let mut merged = 0usize;
        for (id, movie) in movies {
            self.movies.insert(id, movie);
            merged += 1;
        }
        debug!(merged, new = self.movies.len() - before, "catalog.movies.merged");
        merged
    }

    /// Merges a fully loaded actor map; existing ids are overwritten.
    pub fn merge_actors(&mut self, actors: impl IntoIterator<Item = (ActorId, Actor)>) -> usize {
        let before = self.actors.len();
        let mut merged = 0usize;
        for (id, actor) in actors {
            self.actors.insert(id, actor);
            merged += 1;
        }
        debug!(merged, new = self.actors.len() - before, "catalog.actors.merged");
        merged
    }

    /// Merges a fully loaded director map; existing ids are overwritten.
    pub fn merge_directors(
        &mut self,
        directors: impl IntoIterator<Item = (DirectorId, Director)>,
    ) -> usize {
        let before = self.directors.len();
        let mut merged = 0usize;
        for (id, director) in directors {
            self.directors.insert(id, director);
            merged += 1;
        }
        debug!(
            merged,
            new = self.directors.len() - before,
            "catalog.directors.merged"
        );
        merged
    }

    /// Movie with exactly this id.
    pub fn movie(&self, movie_id: &str) -> Option<&Movie> {
        self.movies.get(movie_id)
    }

    /// Actor with exactly this id.
    pub fn actor(&self, actor_id: &str) -> Option<&Actor> {
        self.actors.get(actor_id)
    }

    /// Director with exactly this id.
    pub fn director(&self, director_id: &str) -> Option<&Director> {
        self.directors.get(director_id)
    }

    /// Movies in store order.
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    /// Actors in store order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Directors in store order.
    pub fn directors(&self) -> impl Iterator<Item = &Director> {
        self.directors.values()
    }

    /// Number of stored movies.
    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// Entity counts plus how many movie references point at nothing.
    pub fn stats(&self) -> CatalogStats {
        let dangling_director_refs = self
            .movies
            .values()
            .filter(|movie| !self.directors.contains_key(&movie.director_id))
            .count();
        let dangling_actor_refs = self
            .movies
            .values()
            .flat_map(|movie| movie.actor_ids.iter())
            .filter(|id| !self.actors.contains_key(*id))
            .count();
        CatalogStats {
            movies: self.movies.len(),
            actors: self.actors.len(),
            directors: self.directors.len(),
            dangling_director_refs,
            dangling_actor_refs,
        }
    }
}
