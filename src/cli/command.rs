use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use super::import::{split_ids, CliError};
use crate::model::{ActorCount, DirectorCount, Movie, MovieDetails, YoungestActorMovies};
use crate::storage::catalog::{Catalog, CatalogStats};

/// One entry per command: name, menu alias, argument synopsis, description.
const COMMANDS: &[(&str, &str, &str, &str)] = &[
    ("info", "1", "<id-or-title>", "Get movie information"),
    ("top-rated", "2", "[k]", "Top rated movies"),
    ("genre", "3", "<genre>", "Movies by genre"),
    ("director", "4", "<name>", "Movies by director"),
    ("year", "5", "<year>", "Movies by release year"),
    ("range", "6", "<start>-<end>", "Movies by release year range"),
    (
        "add",
        "7",
        "<id> <title> <director_id> <year> <rating> <genre> [actor_ids]",
        "Add a new movie",
    ),
    ("rate", "8", "<id> <rating>", "Update movie rating"),
    ("delete", "9", "<id>", "Delete a movie"),
    ("by-year", "10", "[k]", "Movies sorted by release year"),
    ("top-directors", "11", "[k]", "Directors with the most movies"),
    ("top-actors", "12", "[k]", "Actors in the most movies"),
    ("youngest", "13", "", "Movies of the youngest actor"),
    ("exit", "14", "", "Exit"),
    ("stats", "", "", "Catalog statistics"),
    ("help", "", "", "Show this list"),
];

/// A parsed command with typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show one movie with its director and cast resolved.
    Info {
        /// Movie id or title.
        query: String,
    },
    /// Highest rated movies.
    TopRated {
        /// How many to list; the catalog default when omitted.
        limit: Option<usize>,
    },
    /// Movies of a genre.
    Genre {
        /// Genre, matched case-insensitively.
        genre: String,
    },
    /// Movies by a named director.
    Director {
        /// Director name, matched case-insensitively.
        name: String,
    },
    /// Movies released in one year.
    Year {
        /// Release year.
        year: i32,
    },
    /// Movies released in an inclusive year range.
    Range {
        /// First year.
        start: i32,
        /// Last year.
        end: i32,
    },
    /// Insert or replace a movie.
    Add(Movie),
    /// Change the rating of an existing movie.
    Rate {
        /// Target movie.
        movie_id: String,
        /// New rating.
        rating: f64,
    },
    /// Remove a movie.
    Delete {
        /// Target movie.
        movie_id: String,
    },
    /// Earliest released movies.
    ByYear {
        /// How many to list; the catalog default when omitted.
        limit: Option<usize>,
    },
    /// Directors ranked by movie count.
    TopDirectors {
        /// How many to list; the catalog default when omitted.
        limit: Option<usize>,
    },
    /// Actors ranked by movie count.
    TopActors {
        /// How many to list; the catalog default when omitted.
        limit: Option<usize>,
    },
    /// Movies of the actor with the smallest birth year.
    Youngest,
    /// Catalog counts and dangling references.
    Stats,
    /// Command reference.
    Help,
    /// Leave the shell.
    Exit,
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Command>, CliError> {
        let words = split_args(line)?;
        if words.is_empty() {
            return Ok(None);
        }
        Self::from_words(&words).map(Some)
    }

    /// Parses an already tokenized command.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Command, CliError> {
        let Some((head, rest)) = words.split_first() else {
            return Err(usage("empty command"));
        };
        let rest: Vec<&str> = rest.iter().map(|word| word.as_ref()).collect();
        let name = canonical_name(head.as_ref())?;
        let cmd = match name {
            "info" => Command::Info {
                query: joined(&rest, "info <id-or-title>")?,
            },
            "top-rated" => Command::TopRated {
                limit: optional_limit(&rest, "top-rated [k]")?,
            },
            "genre" => Command::Genre {
                genre: joined(&rest, "genre <genre>")?,
            },
            "director" => Command::Director {
                name: joined(&rest, "director <name>")?,
            },
            "year" => match rest.as_slice() {
                [year] => Command::Year {
                    year: parse_arg(year, "year")?,
                },
                _ => return Err(usage("year <year>")),
            },
            "range" => {
                let (start, end) = parse_range(&rest)?;
                Command::Range { start, end }
            }
            "add" => Command::Add(parse_movie(&rest)?),
            "rate" => match rest.as_slice() {
                [movie_id, rating] => Command::Rate {
                    movie_id: movie_id.to_string(),
                    rating: parse_arg(rating, "rating")?,
                },
                _ => return Err(usage("rate <id> <rating>")),
            },
            "delete" => match rest.as_slice() {
                [movie_id] => Command::Delete {
                    movie_id: movie_id.to_string(),
                },
                _ => return Err(usage("delete <id>")),
            },
            "by-year" => Command::ByYear {
                limit: optional_limit(&rest, "by-year [k]")?,
            },
            "top-directors" => Command::TopDirectors {
                limit: optional_limit(&rest, "top-directors [k]")?,
            },
            "top-actors" => Command::TopActors {
                limit: optional_limit(&rest, "top-actors [k]")?,
            },
            "youngest" => no_args(&rest, "youngest", Command::Youngest)?,
            "stats" => no_args(&rest, "stats", Command::Stats)?,
            "help" => Command::Help,
            "exit" => Command::Exit,
            other => return Err(usage(format!("unknown command '{other}' (try 'help')"))),
        };
        Ok(cmd)
    }

    /// Runs the command against `catalog`.
    ///
    /// Not-found outcomes come back as [`CliError::Catalog`]; empty matches
    /// are a successful, empty response.
    pub fn execute(self, catalog: &mut Catalog) -> Result<Response<'_>, CliError> {
        debug!(command = ?self, "command.execute");
        let response = match self {
            Command::Info { query } => Response::MovieInfo(catalog.movie_info(&query)?),
            Command::TopRated { limit } => {
                let k = limit.unwrap_or(catalog.options().top_rated_limit);
                Response::movies(ListStyle::WithRating, catalog.top_rated(k))
            }
            Command::Genre { genre } => {
                Response::movies(ListStyle::Titles, catalog.filter_by_genre(&genre))
            }
            Command::Director { name } => {
                Response::movies(ListStyle::Titles, catalog.filter_by_director_name(&name)?)
            }
            Command::Year { year } => {
                Response::movies(ListStyle::Titles, catalog.filter_by_year(year))
            }
            Command::Range { start, end } => Response::movies(
                ListStyle::Titles,
                catalog.filter_by_year_range(start, end),
            ),
            Command::Add(movie) => {
                let movie_id = movie.movie_id.clone();
                let replaced = catalog.insert_movie(movie).is_some();
                Response::Inserted { movie_id, replaced }
            }
            Command::Rate { movie_id, rating } => {
                catalog.update_rating(&movie_id, rating)?;
                Response::RatingUpdated { movie_id, rating }
            }
            Command::Delete { movie_id } => {
                catalog.delete_movie(&movie_id)?;
                Response::Deleted { movie_id }
            }
            Command::ByYear { limit } => {
                let k = limit.unwrap_or(catalog.options().by_year_limit);
                Response::movies(ListStyle::WithYear, catalog.sorted_by_year_ascending(k))
            }
            Command::TopDirectors { limit } => {
                let k = limit.unwrap_or(catalog.options().top_directors_limit);
                Response::Directors {
                    directors: catalog.top_directors_by_movie_count(k),
                }
            }
            Command::TopActors { limit } => {
                let k = limit.unwrap_or(catalog.options().top_actors_limit);
                Response::Actors {
                    actors: catalog.top_actors_by_movie_count(k),
                }
            }
            Command::Youngest => match catalog.movies_of_youngest_actor() {
                Some(result) => Response::YoungestActor(result),
                None => Response::NoActors,
            },
            Command::Stats => Response::Stats(catalog.stats()),
            Command::Help => Response::Help,
            Command::Exit => Response::Exit,
        };
        Ok(response)
    }
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse_line(s)?.ok_or_else(|| usage("empty command"))
    }
}

/// How a movie list is printed in text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `Title`
    Titles,
    /// `Title - 8.8`
    WithRating,
    /// `Title (2010)`
    WithYear,
}

/// Result of a command, ready to be printed or serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response<'a> {
    /// A movie with resolved names.
    MovieInfo(MovieDetails<'a>),
    /// A list of movies.
    Movies {
        /// How the text form prints each movie.
        #[serde(skip)]
        style: ListStyle,
        /// Matching movies, in result order.
        movies: Vec<&'a Movie>,
    },
    /// Director ranking.
    Directors {
        /// Ranked entries.
        directors: Vec<DirectorCount<'a>>,
    },
    /// Actor ranking.
    Actors {
        /// Ranked entries.
        actors: Vec<ActorCount<'a>>,
    },
    /// Movies of the actor with the smallest birth year.
    YoungestActor(YoungestActorMovies<'a>),
    /// The youngest-actor query ran on an empty actor store.
    NoActors,
    /// A movie was added.
    Inserted {
        /// Id of the new movie.
        movie_id: String,
        /// Whether an existing movie with that id was replaced.
        replaced: bool,
    },
    /// A rating was changed.
    RatingUpdated {
        /// Target movie.
        movie_id: String,
        /// Rating now stored.
        rating: f64,
    },
    /// A movie was removed.
    Deleted {
        /// Removed movie.
        movie_id: String,
    },
    /// Catalog statistics.
    Stats(CatalogStats),
    /// Command reference.
    Help,
    /// The shell should stop.
    Exit,
}

impl<'a> Response<'a> {
    fn movies(style: ListStyle, movies: Vec<&'a Movie>) -> Self {
        Response::Movies { style, movies }
    }

    /// True for [`Response::Exit`].
    pub fn is_exit(&self) -> bool {
        matches!(self, Response::Exit)
    }

    /// Text lines for this response, one item per line.
    pub fn text_lines(&self) -> Vec<String> {
        match self {
            Response::MovieInfo(details) => {
                let movie = details.movie;
                vec![
                    format!("Movie: {}", movie.title),
                    format!("Year: {}", movie.release_year),
                    format!("Genre: {}", movie.genre),
                    format!("Rating: {}", format_rating(movie.rating)),
                    format!("Director: {}", details.director_name),
                    format!("Actors: {}", details.actor_names.join(", ")),
                ]
            }
            Response::Movies { style, movies } => movies
                .iter()
                .map(|movie| match style {
                    ListStyle::Titles => movie.title.clone(),
                    ListStyle::WithRating => {
                        format!("{} - {}", movie.title, format_rating(movie.rating))
                    }
                    ListStyle::WithYear => format!("{} ({})", movie.title, movie.release_year),
                })
                .collect(),
            Response::Directors { directors } => directors
                .iter()
                .map(|entry| format!("{} - {} movies", entry.name, entry.movie_count))
                .collect(),
            Response::Actors { actors } => actors
                .iter()
                .map(|entry| format!("{} - {} movies", entry.name, entry.movie_count))
                .collect(),
            Response::YoungestActor(result) => result
                .movies
                .iter()
                .map(|movie| format!("{} - Age: {}", movie.title, result.age))
                .collect(),
            Response::NoActors => vec!["No actors loaded.".to_string()],
            Response::Inserted { .. } => vec!["Movie added successfully.".to_string()],
            Response::RatingUpdated { .. } => vec!["Rating updated.".to_string()],
            Response::Deleted { .. } => vec!["Movie deleted.".to_string()],
            Response::Stats(stats) => vec![
                format!("Movies: {}", stats.movies),
                format!("Actors: {}", stats.actors),
                format!("Directors: {}", stats.directors),
                format!("Dangling director references: {}", stats.dangling_director_refs),
                format!("Dangling actor references: {}", stats.dangling_actor_refs),
            ],
            Response::Help => help_lines(),
            Response::Exit => vec!["Exiting...".to_string()],
        }
    }
}

/// Command reference, one command per line.
pub fn help_lines() -> Vec<String> {
    COMMANDS
        .iter()
        .map(|(name, alias, args, about)| {
            let alias = if alias.is_empty() {
                String::new()
            } else {
                format!("{alias}.")
            };
            let synopsis = format!("{name} {args}");
            format!("{alias:>4} {:<46} {about}", synopsis.trim_end())
        })
        .collect()
}

/// Splits a line on whitespace; double quotes group words.
pub fn split_args(line: &str) -> Result<Vec<String>, CliError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_quotes {
        return Err(usage("unterminated quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn canonical_name(raw: &str) -> Result<&'static str, CliError> {
    let lowered = raw.to_ascii_lowercase();
    if lowered == "quit" {
        return Ok("exit");
    }
    COMMANDS
        .iter()
        .find(|(name, alias, _, _)| *name == lowered || (!alias.is_empty() && *alias == lowered))
        .map(|(name, _, _, _)| *name)
        .ok_or_else(|| usage(format!("unknown command '{raw}' (try 'help')")))
}

fn usage(message: impl Into<String>) -> CliError {
    CliError::Usage(message.into())
}

fn joined(rest: &[&str], synopsis: &str) -> Result<String, CliError> {
    if rest.is_empty() {
        return Err(usage(synopsis));
    }
    Ok(rest.join(" "))
}

fn no_args(rest: &[&str], synopsis: &str, cmd: Command) -> Result<Command, CliError> {
    if rest.is_empty() {
        Ok(cmd)
    } else {
        Err(usage(format!("{synopsis} takes no arguments")))
    }
}

fn optional_limit(rest: &[&str], synopsis: &str) -> Result<Option<usize>, CliError> {
    match rest {
        [] => Ok(None),
        [k] => parse_arg(k, "k").map(Some),
        _ => Err(usage(synopsis)),
    }
}

fn parse_arg<T: FromStr>(raw: &str, what: &str) -> Result<T, CliError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| usage(format!("invalid {what} '{raw}'")))
}

fn parse_range(rest: &[&str]) -> Result<(i32, i32), CliError> {
    match rest {
        [start, end] => Ok((parse_arg(start, "year")?, parse_arg(end, "year")?)),
        [joined] => {
            // Skip the first char so a leading minus sign is not taken as the separator.
            let split = joined
                .char_indices()
                .skip(1)
                .find(|(_, c)| *c == '-')
                .map(|(idx, _)| idx)
                .ok_or_else(|| usage("range <start>-<end>"))?;
            let (start, end) = (&joined[..split], &joined[split + 1..]);
            Ok((parse_arg(start, "year")?, parse_arg(end, "year")?))
        }
        _ => Err(usage("range <start>-<end>")),
    }
}

fn parse_movie(rest: &[&str]) -> Result<Movie, CliError> {
    let (fields, actors) = match rest {
        [a, b, c, d, e, f] => ([*a, *b, *c, *d, *e, *f], ""),
        [a, b, c, d, e, f, g] => ([*a, *b, *c, *d, *e, *f], *g),
        _ => {
            return Err(usage(
                "add <id> <title> <director_id> <year> <rating> <genre> [actor_ids]",
            ))
        }
    };
    let [movie_id, title, director_id, year, rating, genre] = fields;
    Ok(Movie {
        movie_id: movie_id.to_string(),
        title: title.to_string(),
        director_id: director_id.to_string(),
        release_year: parse_arg(year, "year")?,
        rating: parse_arg(rating, "rating")?,
        genre: genre.to_string(),
        actor_ids: split_ids(actors),
    })
}

/// Ratings always show a fractional part (`8.0`, not `8`).
fn format_rating(rating: f64) -> String {
    format!("{rating:?}")
}
