//! Binary entry point for the cinedex catalog shell.
#![forbid(unsafe_code)]

#[path = "cli/config.rs"]
mod config;
#[path = "cli/ui.rs"]
mod ui;

use std::error::Error;
use std::path::{Path, PathBuf};

use cinedex::cli::command::{Command as ShellCommand, Response};
use cinedex::cli::import::{load_catalog, CliError, ImportConfig, ImportSummary};
use cinedex::Catalog;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::CliConfig;
use ui::{format_duration, Theme, Ui};

const DEFAULT_MOVIES_FILE: &str = "movies.csv";
const DEFAULT_ACTORS_FILE: &str = "actors.csv";
const DEFAULT_DIRECTORS_FILE: &str = "directors.csv";

#[derive(Parser, Debug)]
#[command(
    name = "cinedex",
    version,
    about = "Query and edit an in-memory movie catalog loaded from CSV files",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        env = "CINEDEX_CONFIG",
        value_name = "FILE",
        help = "Config file (defaults to the platform config dir)"
    )]
    config: Option<PathBuf>,

    #[command(flatten)]
    data: DataArgs,

    #[arg(
        long,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for command results"
    )]
    format: OutputFormat,

    #[arg(long, value_enum, help = "Colour theme for terminal output")]
    theme: Option<Theme>,

    #[arg(short, long, help = "Print bare result lines only")]
    quiet: bool,

    #[arg(long, value_name = "YEAR", help = "Year used to compute actor ages")]
    reference_year: Option<i32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug)]
struct DataArgs {
    #[arg(long, value_name = "FILE", help = "CSV file containing movies")]
    movies: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "CSV file containing actors")]
    actors: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "CSV file containing directors")]
    directors: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Start the interactive shell (default)")]
    Shell,

    #[command(about = "Run a single shell command and exit")]
    Exec {
        #[arg(
            value_name = "COMMAND",
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        words: Vec<String>,
    },

    #[command(about = "Print catalog statistics")]
    Stats,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.clone())?;
    if let Some(path) = config.path() {
        info!(path = %path.display(), "cli.config.loaded");
    }

    let theme = cli.theme.or(config.theme()).unwrap_or(Theme::Auto);
    let ui = Ui::new(theme, cli.quiet || cli.format == OutputFormat::Json);

    let mut options = config.catalog_options();
    if let Some(year) = cli.reference_year {
        options.reference_year = year;
    }

    let import_cfg = build_import_config(&cli.data, &config);
    let task = ui.task("Loading catalog");
    let (mut catalog, summary) = load_catalog(&import_cfg, options)?;
    let elapsed = task.finish();
    info!(
        movies = summary.movies_imported,
        actors = summary.actors_imported,
        directors = summary.directors_imported,
        elapsed_ms = elapsed.as_secs_f64() * 1_000.0,
        "cli.catalog.loaded"
    );

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            if !ui.is_quiet() {
                print_load_summary(&ui, &summary, &format_duration(elapsed));
            }
            run_shell(&mut catalog, &ui, cli.format)?;
        }
        Command::Exec { words } => {
            let command = ShellCommand::from_words(&words)?;
            let response = command.execute(&mut catalog)?;
            emit(&ui, cli.format, &response)?;
        }
        Command::Stats => {
            let response = ShellCommand::Stats.execute(&mut catalog)?;
            emit(&ui, cli.format, &response)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CINEDEX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn build_import_config(args: &DataArgs, config: &CliConfig) -> ImportConfig {
    ImportConfig {
        movies: resolve_data_path(&args.movies, config.movies_path(), DEFAULT_MOVIES_FILE),
        actors: resolve_data_path(&args.actors, config.actors_path(), DEFAULT_ACTORS_FILE),
        directors: resolve_data_path(
            &args.directors,
            config.directors_path(),
            DEFAULT_DIRECTORS_FILE,
        ),
    }
}

/// Flag, then config, then the default file name if it exists in the
/// working directory.
fn resolve_data_path(
    flag: &Option<PathBuf>,
    configured: Option<&PathBuf>,
    default_name: &str,
) -> Option<PathBuf> {
    if let Some(path) = flag.as_ref().or(configured) {
        return Some(path.clone());
    }
    let fallback = Path::new(default_name);
    if fallback.exists() {
        Some(fallback.to_path_buf())
    } else {
        warn!(file = default_name, "cli.data.default_missing");
        None
    }
}

fn run_shell(catalog: &mut Catalog, ui: &Ui, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let mut editor = DefaultEditor::new()?;
    if !ui.is_quiet() {
        ui.info("Type 'help' for the command list, 'exit' to quit.");
    }
    loop {
        let line = match editor.readline(&ui.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(Box::new(err)),
        };
        let command = match ShellCommand::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                report_error(ui, &err);
                continue;
            }
        };
        let _ = editor.add_history_entry(line.trim());
        match command.execute(catalog) {
            Ok(response) => {
                emit(ui, format, &response)?;
                if response.is_exit() {
                    break;
                }
            }
            Err(err) => report_error(ui, &err),
        }
    }
    Ok(())
}

fn report_error(ui: &Ui, err: &CliError) {
    ui.warn(&err.to_string());
}

fn emit(ui: &Ui, format: OutputFormat, response: &Response<'_>) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(response)?;
            println!("{json}");
        }
        OutputFormat::Text => print_response_text(ui, response),
    }
    Ok(())
}

fn print_response_text(ui: &Ui, response: &Response<'_>) {
    let lines = response.text_lines();
    match response {
        Response::MovieInfo(_) => ui.section("Movie", split_rows(&lines)),
        Response::Stats(_) => ui.section("Catalog", split_rows(&lines)),
        Response::Movies { .. } => ui.list("Movies", lines),
        Response::Directors { .. } => ui.list("Directors with the most movies", lines),
        Response::Actors { .. } => ui.list("Actors in the most movies", lines),
        Response::YoungestActor(result) => ui.list(
            &format!(
                "Movies of {} (born {}, age {})",
                result.actor.name, result.actor.birth_year, result.age
            ),
            lines,
        ),
        Response::NoActors => {
            for line in &lines {
                ui.warn(line);
            }
        }
        Response::Inserted { .. } | Response::RatingUpdated { .. } | Response::Deleted { .. } => {
            for line in &lines {
                ui.success(line);
            }
        }
        Response::Help | Response::Exit => {
            for line in &lines {
                println!("{line}");
            }
        }
    }
}

fn split_rows(lines: &[String]) -> Vec<(&str, &str)> {
    lines
        .iter()
        .filter_map(|line| line.split_once(": "))
        .collect()
}

fn print_load_summary(ui: &Ui, summary: &ImportSummary, elapsed: &str) {
    ui.success(&format!(
        "Loaded {} movies, {} actors and {} directors in {elapsed}",
        summary.movies_imported, summary.actors_imported, summary.directors_imported
    ));
}
