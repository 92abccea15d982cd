use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use tracing::trace;

use super::Catalog;
use crate::model::{ActorCount, DirectorCount, Movie, YoungestActorMovies};

impl Catalog {
    /// The `k` highest rated movies, ties broken by ascending movie id.
    pub fn top_rated(&self, k: usize) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self.movies.values().collect();
        movies.sort_by(|a, b| {
            b.rating
                .total_cmp(&a.rating)
                .then_with(|| a.movie_id.cmp(&b.movie_id))
        });
        movies.truncate(k);
        movies
    }

    /// The `k` earliest released movies, ties broken by ascending movie id.
    pub fn sorted_by_year_ascending(&self, k: usize) -> Vec<&Movie> {
        let mut movies: Vec<&Movie> = self.movies.values().collect();
        movies.sort_by(|a, b| {
            a.release_year
                .cmp(&b.release_year)
                .then_with(|| a.movie_id.cmp(&b.movie_id))
        });
        movies.truncate(k);
        movies
    }

    /// Directors with the most movies. Dangling ids are reported as
    /// [`crate::model::UNKNOWN_NAME`].
    pub fn top_directors_by_movie_count(&self, k: usize) -> Vec<DirectorCount<'_>> {
        let counts = count_ids(self.movies.values().map(|movie| movie.director_id.as_str()));
        rank_counts(counts, k)
            .into_iter()
            .map(|(director_id, movie_count)| DirectorCount {
                director_id,
                name: self.resolve_director_name(director_id),
                movie_count,
            })
            .collect()
    }

    /// Actors with the most movie credits. An actor listed twice in one movie
    /// is counted twice.
    pub fn top_actors_by_movie_count(&self, k: usize) -> Vec<ActorCount<'_>> {
        let counts = count_ids(
            self.movies
                .values()
                .flat_map(|movie| movie.actor_ids.iter().map(String::as_str)),
        );
        rank_counts(counts, k)
            .into_iter()
            .map(|(actor_id, movie_count)| ActorCount {
                actor_id,
                name: self.resolve_actor_name(actor_id),
                movie_count,
            })
            .collect()
    }

    /// Movies of the actor with the numerically smallest birth year.
    ///
    /// The smallest birth year is the chronologically oldest actor; this
    /// selection is kept as-is and labelled "youngest" by callers. Ties go to
    /// the smaller actor id. Returns `None` when there are no actors.
    pub fn movies_of_youngest_actor(&self) -> Option<YoungestActorMovies<'_>> {
        let actor = self.actors.values().min_by(|a, b| {
            a.birth_year
                .cmp(&b.birth_year)
                .then_with(|| a.actor_id.cmp(&b.actor_id))
        })?;
        trace!(actor_id = %actor.actor_id, birth_year = actor.birth_year, "catalog.ranking.youngest_actor");
        let movies = self
            .movies
            .values()
            .filter(|movie| movie.actor_ids.iter().any(|id| *id == actor.actor_id))
            .collect();
        Some(YoungestActorMovies {
            actor,
            age: actor.age_in(self.options.reference_year),
            movies,
        })
    }
}

fn count_ids<'a>(ids: impl Iterator<Item = &'a str>) -> FxHashMap<&'a str, usize> {
    let mut counts: FxHashMap<&'a str, usize> = FxHashMap::default();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Count descending, then id ascending; first `k` kept.
fn rank_counts(counts: FxHashMap<&str, usize>, k: usize) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    ranked.truncate(k);
    ranked
}
