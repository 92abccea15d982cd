use super::ui::Theme;
use cinedex::CatalogOptions;
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings read from `cli.toml`. Every field is optional; flags win.
#[derive(Debug, Default)]
pub struct CliConfig {
    path: Option<PathBuf>,
    data: RawConfig,
    theme: Option<Theme>,
}

impl CliConfig {
    /// Loads `explicit`, or the default location when it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file just yields an empty config.
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let (path, data) = match explicit {
            Some(path) => {
                let data = read_file(&path)?;
                (Some(path), data)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    let data = read_file(&path)?;
                    (Some(path), data)
                }
                _ => (None, RawConfig::default()),
            },
        };
        let theme = match data.ui.theme.as_deref() {
            Some(value) => Some(Theme::from_str(value, true).map_err(|_| {
                ConfigError::InvalidTheme {
                    value: value.to_string(),
                }
            })?),
            None => None,
        };
        Ok(Self { path, data, theme })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn movies_path(&self) -> Option<&PathBuf> {
        self.data.data.movies.as_ref()
    }

    pub fn actors_path(&self) -> Option<&PathBuf> {
        self.data.data.actors.as_ref()
    }

    pub fn directors_path(&self) -> Option<&PathBuf> {
        self.data.data.directors.as_ref()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Catalog options with any configured values applied over the defaults.
    pub fn catalog_options(&self) -> CatalogOptions {
        let mut opts = CatalogOptions::default();
        let raw = &self.data.catalog;
        if let Some(year) = raw.reference_year {
            opts.reference_year = year;
        }
        if let Some(k) = raw.top_rated_limit {
            opts.top_rated_limit = k;
        }
        if let Some(k) = raw.by_year_limit {
            opts.by_year_limit = k;
        }
        if let Some(k) = raw.top_directors_limit {
            opts.top_directors_limit = k;
        }
        if let Some(k) = raw.top_actors_limit {
            opts.top_actors_limit = k;
        }
        opts
    }
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    data: DataSection,
    #[serde(default)]
    catalog: CatalogSection,
    #[serde(default)]
    ui: UiSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DataSection {
    movies: Option<PathBuf>,
    actors: Option<PathBuf>,
    directors: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogSection {
    reference_year: Option<i32>,
    top_rated_limit: Option<usize>,
    by_year_limit: Option<usize>,
    top_directors_limit: Option<usize>,
    top_actors_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct UiSection {
    theme: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config theme '{value}' is invalid (expected auto, light, dark or plain)")]
    InvalidTheme { value: String },
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("cinedex").join("cli.toml"))
}
