#![allow(missing_docs)]

use cinedex::model::UNKNOWN_NAME;
use cinedex::{Actor, Catalog, CatalogError, CatalogOptions, Director, Movie};

fn movie(id: &str, title: &str, director: &str, year: i32, rating: f64, actors: &[&str]) -> Movie {
    Movie {
        movie_id: id.to_string(),
        title: title.to_string(),
        director_id: director.to_string(),
        release_year: year,
        rating,
        genre: "Sci-Fi".to_string(),
        actor_ids: actors.iter().map(|a| a.to_string()).collect(),
    }
}

fn seeded() -> Catalog {
    let mut catalog = Catalog::new(CatalogOptions::default());
    catalog.merge_directors([
        (
            "d1".to_string(),
            Director {
                director_id: "d1".to_string(),
                name: "Denis Villeneuve".to_string(),
            },
        ),
        (
            "d2".to_string(),
            Director {
                director_id: "d2".to_string(),
                name: "Christopher Nolan".to_string(),
            },
        ),
    ]);
    catalog.merge_actors(
        [("a1", "Timothée Chalamet", 1995), ("a2", "Zendaya", 1996), ("a3", "Michael Caine", 1933)]
            .into_iter()
            .map(|(id, name, birth_year)| {
                (
                    id.to_string(),
                    Actor {
                        actor_id: id.to_string(),
                        name: name.to_string(),
                        birth_year,
                    },
                )
            }),
    );
    catalog.merge_movies(
        [
            movie("m1", "Dune", "d1", 2021, 8.0, &["a1", "a2"]),
            movie("m2", "Arrival", "d1", 2016, 7.9, &[]),
            movie("m3", "Interstellar", "d2", 2014, 8.7, &["a3"]),
            movie("m4", "Tenet", "d2", 2020, 7.3, &["a3", "a9"]),
            movie("m5", "Prestige", "d7", 2006, 8.5, &["a3"]),
        ]
        .into_iter()
        .map(|m| (m.movie_id.clone(), m)),
    );
    catalog
}

#[test]
fn info_resolves_names_by_title_and_id() {
    let catalog = seeded();
    let by_title = catalog.movie_info("dune").expect("title lookup");
    let by_id = catalog.movie_info("m1").expect("id lookup");
    assert_eq!(by_title.movie, by_id.movie);
    assert_eq!(by_title.director_name, "Denis Villeneuve");
    assert_eq!(by_title.actor_names, vec!["Timothée Chalamet", "Zendaya"]);
}

#[test]
fn dangling_references_render_as_unknown() {
    let catalog = seeded();
    let tenet = catalog.movie_info("Tenet").expect("tenet");
    assert_eq!(tenet.actor_names, vec!["Michael Caine", UNKNOWN_NAME]);
    let prestige = catalog.movie_info("m5").expect("prestige");
    assert_eq!(prestige.director_name, UNKNOWN_NAME);

    let stats = catalog.stats();
    assert_eq!(stats.dangling_director_refs, 1);
    assert_eq!(stats.dangling_actor_refs, 1);
}

#[test]
fn director_filter_is_case_insensitive_and_reports_missing_director() {
    let catalog = seeded();
    let titles: Vec<&str> = catalog
        .filter_by_director_name("christopher NOLAN")
        .expect("known director")
        .into_iter()
        .map(|m| m.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Interstellar", "Tenet"]);

    let err = catalog.filter_by_director_name("Kubrick").unwrap_err();
    assert!(matches!(err, CatalogError::DirectorNotFound { .. }));
}

#[test]
fn rankings_use_deterministic_tie_breaks() {
    let catalog = seeded();
    let top: Vec<&str> = catalog.top_rated(3).iter().map(|m| m.movie_id.as_str()).collect();
    assert_eq!(top, vec!["m3", "m5", "m1"]);

    let oldest: Vec<i32> = catalog
        .sorted_by_year_ascending(10)
        .iter()
        .map(|m| m.release_year)
        .collect();
    assert_eq!(oldest, vec![2006, 2014, 2016, 2020, 2021]);

    let directors = catalog.top_directors_by_movie_count(5);
    let counted: Vec<(&str, usize)> = directors
        .iter()
        .map(|d| (d.director_id, d.movie_count))
        .collect();
    assert_eq!(counted, vec![("d1", 2), ("d2", 2), ("d7", 1)]);
    assert_eq!(directors[2].name, UNKNOWN_NAME);

    let actors = catalog.top_actors_by_movie_count(1);
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].name, "Michael Caine");
    assert_eq!(actors[0].movie_count, 3);
}

#[test]
fn youngest_actor_query_reports_age_and_movies() {
    let catalog = seeded();
    let result = catalog.movies_of_youngest_actor().expect("actors loaded");
    assert_eq!(result.actor.actor_id, "a3");
    assert_eq!(result.age, 2025 - 1933);
    let titles: Vec<&str> = result.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Interstellar", "Tenet", "Prestige"]);

    assert!(Catalog::default().movies_of_youngest_actor().is_none());
}

#[test]
fn mutations_are_visible_to_later_queries() {
    let mut catalog = seeded();
    catalog.update_rating("m4", 9.9).expect("rate");
    assert_eq!(catalog.top_rated(1)[0].title, "Tenet");

    let removed = catalog.delete_movie("m4").expect("delete");
    assert_eq!(removed.title, "Tenet");
    assert!(matches!(
        catalog.find_movie("Tenet"),
        Err(CatalogError::MovieNotFound { .. })
    ));
    assert!(catalog.delete_movie("m4").is_err());

    let previous = catalog.insert_movie(movie("m6", "Oppenheimer", "d2", 2023, 8.4, &[]));
    assert!(previous.is_none());
    assert_eq!(catalog.filter_by_year_range(2020, 2025).len(), 2);
    assert_eq!(catalog.movie_count(), 5);
}
