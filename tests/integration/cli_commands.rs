#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn setup_data() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    fs::write(
        root.join("movies.csv"),
        "movie_id,title,director_id,release_year,rating,genre,actor_ids\n\
         m1,Dune,d1,2021,8.0,Sci-Fi,\"a1,a2\"\n\
         m2,Arrival,d1,2016,7.9,Sci-Fi,a3\n\
         m3,Memento,d2,2000,8.4,Thriller,\n",
    )
    .expect("movies");
    fs::write(
        root.join("actors.csv"),
        "actor_id,name,birth_year\na1,Timothée Chalamet,1995\na2,Zendaya,1996\na3,Amy Adams,1974\n",
    )
    .expect("actors");
    fs::write(
        root.join("directors.csv"),
        "director_id,name\nd1,Denis Villeneuve\nd2,Christopher Nolan\n",
    )
    .expect("directors");
    dir
}

/// Command running inside `dir`, so the default data files are picked up and
/// no user config leaks in.
fn cinedex(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("cinedex");
    cmd.current_dir(dir)
        .env_remove("CINEDEX_CONFIG")
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env("HOME", dir);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf8 stdout")
}

#[test]
fn help_lists_subcommands() {
    let dir = setup_data();
    let stdout = stdout_of(cinedex(dir.path()).arg("--help"));
    for subcommand in ["shell", "exec", "stats"] {
        assert!(stdout.contains(subcommand), "{stdout}");
    }
}

#[test]
fn exec_youngest_reports_wide_ages() {
    let dir = setup_data();
    fs::write(
        dir.path().join("actors.csv"),
        "actor_id,name,birth_year\na1,Timothée Chalamet,1995\na9,Ancient,-2147483648\n",
    )
    .expect("actors");
    let stdout = stdout_of(cinedex(dir.path()).args(["--quiet", "exec", "youngest"]));
    assert_eq!(stdout, "");

    let json = stdout_of(cinedex(dir.path()).args(["--format", "json", "exec", "youngest"]));
    let json: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(json["age"], 2025_i64 + 2_147_483_648_i64);
}

#[test]
fn exec_info_prints_menu_style_block() {
    let dir = setup_data();
    let stdout = stdout_of(cinedex(dir.path()).args(["--quiet", "exec", "info", "dune"]));
    assert_eq!(
        stdout,
        "Movie: Dune\n\
         Year: 2021\n\
         Genre: Sci-Fi\n\
         Rating: 8.0\n\
         Director: Denis Villeneuve\n\
         Actors: Timothée Chalamet, Zendaya\n"
    );
}

#[test]
fn numeric_aliases_match_named_commands() {
    let dir = setup_data();
    let named = stdout_of(cinedex(dir.path()).args(["--quiet", "exec", "top-rated", "2"]));
    let aliased = stdout_of(cinedex(dir.path()).args(["--quiet", "exec", "2", "2"]));
    assert_eq!(named, "Memento - 8.4\nDune - 8.0\n");
    assert_eq!(named, aliased);
}

#[test]
fn range_and_director_filters() {
    let dir = setup_data();
    let range = stdout_of(cinedex(dir.path()).args(["--quiet", "exec", "range", "2010-2020"]));
    assert_eq!(range, "Arrival\n");

    let director = stdout_of(cinedex(dir.path()).args([
        "--quiet",
        "exec",
        "director",
        "denis",
        "villeneuve",
    ]));
    assert_eq!(director, "Dune\nArrival\n");
}

#[test]
fn missing_movie_fails_with_message() {
    let dir = setup_data();
    let output = cinedex(dir.path())
        .args(["--quiet", "exec", "info", "m404"])
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(output).expect("utf8 stderr");
    assert!(stderr.contains("movie not found: m404"), "{stderr}");
}

#[test]
fn json_output_is_tagged() {
    let dir = setup_data();
    let stdout = stdout_of(cinedex(dir.path()).args(["--format", "json", "exec", "info", "m1"]));
    let json: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["kind"], "movie_info");
    assert_eq!(json["title"], "Dune");
    assert_eq!(json["director_name"], "Denis Villeneuve");
    assert_eq!(json["actor_names"][1], "Zendaya");

    let stdout = stdout_of(cinedex(dir.path()).args(["--format", "json", "stats"]));
    let json: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["kind"], "stats");
    assert_eq!(json["movies"], 3);
    assert_eq!(json["dangling_actor_refs"], 0);
}

#[test]
fn explicit_data_flags_override_defaults() {
    let dir = setup_data();
    let other = TempDir::new().expect("tempdir");
    let movies = other.path().join("films.csv");
    fs::write(
        &movies,
        "movie_id,title,director_id,release_year,rating,genre,actor_ids\nx1,Solaris,d9,1972,8.1,Drama,\n",
    )
    .expect("films");
    let stdout = stdout_of(
        cinedex(dir.path())
            .arg("--quiet")
            .arg("--movies")
            .arg(&movies)
            .args(["exec", "info", "x1"]),
    );
    assert!(stdout.contains("Movie: Solaris"), "{stdout}");
    assert!(stdout.contains("Director: Unknown"), "{stdout}");
}

#[test]
fn config_file_sets_reference_year() {
    let dir = setup_data();
    let config = dir.path().join("cinedex.toml");
    fs::write(&config, "[catalog]\nreference_year = 2000\n").expect("config");
    let stdout = stdout_of(
        cinedex(dir.path())
            .arg("--config")
            .arg(&config)
            .args(["--quiet", "exec", "youngest"]),
    );
    assert_eq!(stdout, "Arrival - Age: 26\n");
}

#[test]
fn unknown_config_keys_are_rejected() {
    let dir = setup_data();
    let config = dir.path().join("cinedex.toml");
    fs::write(&config, "[catalog]\nreference_yaer = 2000\n").expect("config");
    cinedex(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["exec", "stats"])
        .assert()
        .failure();
}

#[test]
fn shell_session_applies_mutations_in_order() {
    let dir = setup_data();
    let stdout = stdout_of(
        cinedex(dir.path())
            .args(["--quiet", "shell"])
            .write_stdin("rate m2 9.5\n2 1\nbogus\ndelete m2\n9 m2\n2 1\nexit\n"),
    );
    assert!(stdout.contains("Rating updated."), "{stdout}");
    assert!(stdout.contains("Arrival - 9.5"), "{stdout}");
    assert!(stdout.contains("Movie deleted."), "{stdout}");
    assert!(stdout.contains("Memento - 8.4"), "{stdout}");
    assert!(stdout.contains("Exiting..."), "{stdout}");
}
