#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};

use cinedex::cli::import::{import_into, load_catalog, load_movies, CliError, ImportConfig};
use cinedex::model::UNKNOWN_NAME;
use cinedex::{Catalog, CatalogOptions};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn fixture_dir() -> (TempDir, ImportConfig) {
    let dir = TempDir::new().expect("tempdir");
    let movies = write(
        dir.path(),
        "movies.csv",
        "movie_id,title,director_id,release_year,rating,genre,actor_ids\n\
         m1,Dune,d1,2021,8.0,Sci-Fi,\"a1,a2\"\n\
         m2,Arrival,d1,2016,7.9,Sci-Fi,a3\n\
         m3,\"Crouching Tiger, Hidden Dragon\",d2,2000,7.9,Action,\n",
    );
    let actors = write(
        dir.path(),
        "actors.csv",
        "actor_id,name,birth_year\na1,Timothée Chalamet,1995\na2,Zendaya,1996\n",
    );
    let directors = write(
        dir.path(),
        "directors.csv",
        "director_id,name\nd1,Denis Villeneuve\nd2,Ang Lee\n",
    );
    let cfg = ImportConfig {
        movies: Some(movies),
        actors: Some(actors),
        directors: Some(directors),
    };
    (dir, cfg)
}

#[test]
fn loads_all_three_files() {
    let (_dir, cfg) = fixture_dir();
    let (catalog, summary) = load_catalog(&cfg, CatalogOptions::default()).expect("load");
    assert_eq!(summary.movies_imported, 3);
    assert_eq!(summary.actors_imported, 2);
    assert_eq!(summary.directors_imported, 2);

    let dune = catalog.movie_info("Dune").expect("dune");
    assert_eq!(dune.movie.actor_ids, vec!["a1", "a2"]);
    assert_eq!(dune.actor_names, vec!["Timothée Chalamet", "Zendaya"]);

    let arrival = catalog.movie_info("arrival").expect("arrival");
    assert_eq!(arrival.actor_names, vec![UNKNOWN_NAME]);

    let crouching = catalog.movie_info("m3").expect("m3");
    assert_eq!(crouching.movie.title, "Crouching Tiger, Hidden Dragon");
    assert!(crouching.movie.actor_ids.is_empty());
}

#[test]
fn missing_files_leave_stores_empty() {
    let (_dir, mut cfg) = fixture_dir();
    cfg.actors = None;
    cfg.directors = None;
    let (catalog, summary) = load_catalog(&cfg, CatalogOptions::default()).expect("load");
    assert_eq!(summary.actors_imported, 0);
    assert_eq!(catalog.stats().dangling_director_refs, 3);
    assert!(catalog.movies_of_youngest_actor().is_none());
}

#[test]
fn bad_cell_reports_line_and_column() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "movies.csv",
        "movie_id,title,director_id,release_year,rating,genre,actor_ids\n\
         m1,Dune,d1,2021,8.0,Sci-Fi,a1\n\
         m2,Arrival,d1,soon,7.9,Sci-Fi,a3\n",
    );
    match load_movies(&path) {
        Err(CliError::Parse {
            line,
            column,
            value,
            ..
        }) => {
            assert_eq!(line, 3);
            assert_eq!(column, "release_year");
            assert_eq!(value, "soon");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn failed_file_does_not_partially_load() {
    let (dir, mut cfg) = fixture_dir();
    let mut catalog = Catalog::default();
    cfg.movies = None;
    import_into(&mut catalog, &cfg).expect("actors and directors");

    cfg.movies = Some(write(
        dir.path(),
        "broken.csv",
        "movie_id,title,director_id,release_year,rating,genre,actor_ids\n\
         m1,Dune,d1,2021,8.0,Sci-Fi,a1\n\
         m2,Arrival,d1,2016,great,Sci-Fi,a3\n",
    ));
    assert!(import_into(&mut catalog, &cfg).is_err());
    assert_eq!(catalog.movie_count(), 0);
    assert!(catalog.find_movie("Dune").is_err());
}

#[test]
fn missing_column_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(dir.path(), "movies.csv", "movie_id,title\nm1,Dune\n");
    let err = load_movies(&path).unwrap_err();
    assert!(err.to_string().contains("director_id"), "{err}");
}

#[test]
fn headers_are_matched_loosely() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "movies.csv",
        "Movie_ID, Title ,DIRECTOR_ID,release_year,rating,genre,actor_ids\n\
         m1, Dune ,d1,2021,8.0,Sci-Fi, a1 , a2 \n",
    );
    let movies = load_movies(&path).expect("load");
    let dune = &movies["m1"];
    assert_eq!(dune.title, "Dune");
    assert_eq!(dune.actor_ids, vec!["a1"]);
}

#[test]
fn duplicate_ids_keep_the_last_row() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "movies.csv",
        "movie_id,title,director_id,release_year,rating,genre,actor_ids\n\
         m1,Dune,d1,2021,8.0,Sci-Fi,a1\n\
         m1,Dune Redux,d1,2021,6.0,Sci-Fi,a1\n",
    );
    let movies = load_movies(&path).expect("load");
    assert_eq!(movies.len(), 1);
    assert_eq!(movies["m1"].title, "Dune Redux");
}
