use super::Catalog;
use crate::model::{Movie, MovieDetails, UNKNOWN_NAME};

impl Catalog {
    /// Director name for `director_id`, or [`UNKNOWN_NAME`] when it dangles.
    pub fn resolve_director_name(&self, director_id: &str) -> &str {
        self.directors
            .get(director_id)
            .map_or(UNKNOWN_NAME, |director| director.name.as_str())
    }

    /// Actor name for `actor_id`, or [`UNKNOWN_NAME`] when it dangles.
    pub fn resolve_actor_name(&self, actor_id: &str) -> &str {
        self.actors
            .get(actor_id)
            .map_or(UNKNOWN_NAME, |actor| actor.name.as_str())
    }

    /// Resolves every id in order, keeping duplicates.
    pub fn resolve_actor_names<'a, I, S>(&'a self, actor_ids: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + ?Sized + 'a,
    {
        actor_ids
            .into_iter()
            .map(|id| self.resolve_actor_name(id.as_ref()))
            .collect()
    }

    /// Display-ready view of `movie` with its references resolved.
    pub fn movie_details<'a>(&'a self, movie: &'a Movie) -> MovieDetails<'a> {
        MovieDetails {
            movie,
            director_name: self.resolve_director_name(&movie.director_id),
            actor_names: self.resolve_actor_names(&movie.actor_ids),
        }
    }
}
