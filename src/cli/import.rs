use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::{Actor, ActorId, Director, DirectorId, Movie, MovieId};
use crate::storage::catalog::{Catalog, CatalogOptions};
use crate::types::CatalogError;

const MOVIE_ID_COLUMN: &str = "movie_id";
const TITLE_COLUMN: &str = "title";
const DIRECTOR_ID_COLUMN: &str = "director_id";
const RELEASE_YEAR_COLUMN: &str = "release_year";
const RATING_COLUMN: &str = "rating";
const GENRE_COLUMN: &str = "genre";
const ACTOR_IDS_COLUMN: &str = "actor_ids";
const ACTOR_ID_COLUMN: &str = "actor_id";
const NAME_COLUMN: &str = "name";
const BIRTH_YEAR_COLUMN: &str = "birth_year";

/// Configuration for loading a catalog from CSV files.
///
/// Each file is optional; a missing entry leaves that store empty.
#[derive(Debug, Clone, Default)]
pub struct ImportConfig {
    /// CSV with `movie_id,title,director_id,release_year,rating,genre,actor_ids`.
    pub movies: Option<PathBuf>,
    /// CSV with `actor_id,name,birth_year`.
    pub actors: Option<PathBuf>,
    /// CSV with `director_id,name`.
    pub directors: Option<PathBuf>,
}

/// Summary statistics from an import operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ImportSummary {
    /// Distinct movies loaded.
    pub movies_imported: usize,
    /// Distinct actors loaded.
    pub actors_imported: usize,
    /// Distinct directors loaded.
    pub directors_imported: usize,
}

/// Error type for CSV import and command handling.
#[derive(Error, Debug)]
pub enum CliError {
    /// Generic error message.
    #[error("{0}")]
    Message(String),
    /// A command line could not be parsed.
    #[error("usage: {0}")]
    Usage(String),
    /// A CSV cell could not be converted to the column's type.
    #[error("{path}:{line}: column '{column}' has invalid value '{value}'")]
    Parse {
        /// File being read.
        path: PathBuf,
        /// 1-based line of the offending record.
        line: u64,
        /// Column name.
        column: String,
        /// Raw cell contents.
        value: String,
    },
    /// CSV parsing error.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// Catalog operation outcome.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<String> for CliError {
    fn from(value: String) -> Self {
        CliError::Message(value)
    }
}

/// Loads every configured file and merges it into a new catalog.
///
/// Each file is parsed into a complete map before it is merged, so an error
/// in one file never leaves part of that file in the catalog.
pub fn load_catalog(
    cfg: &ImportConfig,
    options: CatalogOptions,
) -> Result<(Catalog, ImportSummary), CliError> {
    let mut catalog = Catalog::new(options);
    let summary = import_into(&mut catalog, cfg)?;
    Ok((catalog, summary))
}

/// Loads the configured files into an existing catalog.
pub fn import_into(catalog: &mut Catalog, cfg: &ImportConfig) -> Result<ImportSummary, CliError> {
    let mut summary = ImportSummary::default();
    if let Some(path) = &cfg.directors {
        summary.directors_imported = catalog.merge_directors(load_directors(path)?);
    }
    if let Some(path) = &cfg.actors {
        summary.actors_imported = catalog.merge_actors(load_actors(path)?);
    }
    if let Some(path) = &cfg.movies {
        summary.movies_imported = catalog.merge_movies(load_movies(path)?);
    }
    Ok(summary)
}

/// Reads a movies CSV into an id-keyed map.
pub fn load_movies(path: impl AsRef<Path>) -> Result<BTreeMap<MovieId, Movie>, CliError> {
    let path = path.as_ref();
    let start = Instant::now();
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let id_index = find_column(&headers, MOVIE_ID_COLUMN)?;
    let title_index = find_column(&headers, TITLE_COLUMN)?;
    let director_index = find_column(&headers, DIRECTOR_ID_COLUMN)?;
    let year_index = find_column(&headers, RELEASE_YEAR_COLUMN)?;
    let rating_index = find_column(&headers, RATING_COLUMN)?;
    let genre_index = find_column(&headers, GENRE_COLUMN)?;
    let actors_index = find_column(&headers, ACTOR_IDS_COLUMN)?;

    let mut movies = BTreeMap::new();
    for result in reader.records() {
        let record = result?;
        let movie_id = get_required(&record, id_index, MOVIE_ID_COLUMN)?.to_string();
        let movie = Movie {
            movie_id: movie_id.clone(),
            title: get_optional(&record, title_index).to_string(),
            director_id: get_optional(&record, director_index).to_string(),
            release_year: parse_cell(path, &record, year_index, RELEASE_YEAR_COLUMN)?,
            rating: parse_cell(path, &record, rating_index, RATING_COLUMN)?,
            genre: get_optional(&record, genre_index).to_string(),
            actor_ids: split_ids(get_optional(&record, actors_index)),
        };
        if movies.insert(movie_id.clone(), movie).is_some() {
            warn!(movie_id = %movie_id, path = %path.display(), "import.movies.duplicate_id");
        }
    }
    info!(
        count = movies.len(),
        path = %path.display(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0,
        "import.movies.completed"
    );
    Ok(movies)
}

/// Reads an actors CSV into an id-keyed map.
pub fn load_actors(path: impl AsRef<Path>) -> Result<BTreeMap<ActorId, Actor>, CliError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let id_index = find_column(&headers, ACTOR_ID_COLUMN)?;
    let name_index = find_column(&headers, NAME_COLUMN)?;
    let birth_index = find_column(&headers, BIRTH_YEAR_COLUMN)?;

    let mut actors = BTreeMap::new();
    for result in reader.records() {
        let record = result?;
        let actor_id = get_required(&record, id_index, ACTOR_ID_COLUMN)?.to_string();
        let actor = Actor {
            actor_id: actor_id.clone(),
            name: get_optional(&record, name_index).to_string(),
            birth_year: parse_cell(path, &record, birth_index, BIRTH_YEAR_COLUMN)?,
        };
        if actors.insert(actor_id.clone(), actor).is_some() {
            warn!(actor_id = %actor_id, path = %path.display(), "import.actors.duplicate_id");
        }
    }
    info!(count = actors.len(), path = %path.display(), "import.actors.completed");
    Ok(actors)
}

/// Reads a directors CSV into an id-keyed map.
pub fn load_directors(path: impl AsRef<Path>) -> Result<BTreeMap<DirectorId, Director>, CliError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let id_index = find_column(&headers, DIRECTOR_ID_COLUMN)?;
    let name_index = find_column(&headers, NAME_COLUMN)?;

    let mut directors = BTreeMap::new();
    for result in reader.records() {
        let record = result?;
        let director_id = get_required(&record, id_index, DIRECTOR_ID_COLUMN)?.to_string();
        let director = Director {
            director_id: director_id.clone(),
            name: get_optional(&record, name_index).to_string(),
        };
        if directors.insert(director_id.clone(), director).is_some() {
            warn!(director_id = %director_id, path = %path.display(), "import.directors.duplicate_id");
        }
    }
    info!(count = directors.len(), path = %path.display(), "import.directors.completed");
    Ok(directors)
}

/// Splits a comma-separated id list, keeping order and duplicates.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize, CliError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| format!("column '{name}' not found").into())
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, CliError> {
    record
        .get(idx)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            format!("line {line}: missing value for column '{name}'").into()
        })
}

fn get_optional(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(|s| s.trim()).unwrap_or_default()
}

fn parse_cell<T: FromStr>(
    path: &Path,
    record: &StringRecord,
    idx: usize,
    column: &str,
) -> Result<T, CliError> {
    let raw = get_optional(record, idx);
    raw.parse::<T>().map_err(|_| CliError::Parse {
        path: path.to_path_buf(),
        line: record.position().map(|p| p.line()).unwrap_or(0),
        column: column.to_string(),
        value: raw.to_string(),
    })
}
