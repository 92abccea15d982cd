use serde::{Deserialize, Serialize};

/// Name reported for director or actor references that point at nothing.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Primary key of a movie.
pub type MovieId = String;
/// Primary key of an actor.
pub type ActorId = String;
/// Primary key of a director.
pub type DirectorId = String;

/// A catalog movie. Only `rating` changes after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique, case-sensitive id.
    pub movie_id: MovieId,
    /// Display title.
    pub title: String,
    /// Not checked against the director store; may dangle.
    pub director_id: DirectorId,
    /// Release year, unbounded.
    pub release_year: i32,
    /// Unbounded; ordered with `f64::total_cmp`.
    pub rating: f64,
    /// Free-form genre label.
    pub genre: String,
    /// Order and duplicates are kept exactly as supplied.
    pub actor_ids: Vec<ActorId>,
}

/// An actor, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique id.
    pub actor_id: ActorId,
    /// Display name.
    pub name: String,
    /// Birth year, unbounded.
    pub birth_year: i32,
}

impl Actor {
    /// Age in whole years as of `reference_year`.
    ///
    /// Computed in `i64` because birth years are not range-checked.
    pub fn age_in(&self, reference_year: i32) -> i64 {
        i64::from(reference_year) - i64::from(self.birth_year)
    }
}

/// A director, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    /// Unique id.
    pub director_id: DirectorId,
    /// Display name.
    pub name: String,
}

/// A movie with its director and cast resolved to names.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails<'a> {
    /// The stored movie.
    #[serde(flatten)]
    pub movie: &'a Movie,
    /// Director name, or [`UNKNOWN_NAME`].
    pub director_name: &'a str,
    /// One name per actor id, in the same order.
    pub actor_names: Vec<&'a str>,
}

/// One row of the director ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorCount<'a> {
    /// Director id as referenced by movies; may dangle.
    pub director_id: &'a str,
    /// Director name, or [`UNKNOWN_NAME`].
    pub name: &'a str,
    /// Movies referencing this id.
    pub movie_count: usize,
}

/// One row of the actor ranking; credits are counted per occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorCount<'a> {
    /// Actor id as referenced by movies; may dangle.
    pub actor_id: &'a str,
    /// Actor name, or [`UNKNOWN_NAME`].
    pub name: &'a str,
    /// Credits across all movies.
    pub movie_count: usize,
}

/// Movies featuring the actor with the smallest birth year.
#[derive(Debug, Clone, Serialize)]
pub struct YoungestActorMovies<'a> {
    /// The selected actor.
    pub actor: &'a Actor,
    /// `reference_year - birth_year`.
    pub age: i64,
    /// Movies crediting the actor, in store order.
    pub movies: Vec<&'a Movie>,
}
