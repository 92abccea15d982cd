use indicatif::{ProgressBar, ProgressStyle};
use nu_ansi_term::{Color, Style};
use std::fmt::Display;
use std::io::IsTerminal;
use std::time::{Duration, Instant};

const PROMPT: &str = "cinedex> ";
const HEADING_ICON: &str = "▸";
const SUCCESS_ICON: &str = "✔";
const WARNING_ICON: &str = "⚠";
const INFO_ICON: &str = "ℹ";
const PROGRESS_ICON: &str = "▶";

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Theme {
    Auto,
    Light,
    Dark,
    Plain,
}

/// Console output for the shell. Quiet mode prints bare lines only, which
/// keeps the output identical to the classic menu program.
pub struct Ui {
    palette: Palette,
    paint: bool,
    quiet: bool,
}

impl Ui {
    pub fn new(theme: Theme, quiet: bool) -> Self {
        let paint = theme != Theme::Plain && !quiet && std::io::stdout().is_terminal();

        #[cfg(windows)]
        if paint {
            let _ = nu_ansi_term::enable_ansi_support();
        }

        let palette = match theme {
            Theme::Plain => Palette::plain(),
            Theme::Light => Palette::light(),
            Theme::Dark | Theme::Auto => Palette::dark(),
        };

        Self {
            palette,
            paint,
            quiet,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn prompt(&self) -> String {
        if self.paint {
            self.palette.heading.paint(PROMPT).to_string()
        } else {
            PROMPT.to_string()
        }
    }

    /// Key/value block, keys right-aligned.
    pub fn section<'a, I, V>(&self, title: &str, rows: I)
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Display,
    {
        let rows: Vec<(&str, String)> = rows
            .into_iter()
            .map(|(key, value)| (key, value.to_string()))
            .collect();
        if rows.is_empty() {
            return;
        }
        if self.quiet {
            for (key, value) in &rows {
                println!("{key}: {value}");
            }
            return;
        }

        self.heading(title);
        let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in rows {
            let key = format!("{key:>width$}:");
            println!(
                "  {} {}",
                self.style(self.palette.key, key),
                self.style(self.palette.value, value)
            );
        }
    }

    pub fn list<I>(&self, title: &str, entries: I)
    where
        I: IntoIterator<Item = String>,
    {
        let entries: Vec<String> = entries.into_iter().collect();
        if self.quiet {
            for entry in entries {
                println!("{entry}");
            }
            return;
        }
        if entries.is_empty() {
            self.info("No matching movies.");
            return;
        }
        self.heading(title);
        let bullet = if self.paint { "•" } else { "-" };
        for entry in entries {
            println!("  {} {entry}", self.style(self.palette.bullet, bullet));
        }
    }

    pub fn info(&self, message: &str) {
        self.status(self.palette.info, INFO_ICON, message, false);
    }

    pub fn success(&self, message: &str) {
        self.status(self.palette.success, SUCCESS_ICON, message, false);
    }

    pub fn warn(&self, message: &str) {
        self.status(self.palette.warn, WARNING_ICON, message, true);
    }

    /// Starts a spinner for a long-running step. Dropping the guard without
    /// calling [`TaskGuard::finish`] reports the step as failed.
    pub fn task(&self, label: impl Into<String>) -> TaskGuard<'_> {
        let label = label.into();
        let pb = (!self.quiet).then(|| {
            let style = ProgressStyle::with_template("{prefix} {spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
            let pb = ProgressBar::new_spinner();
            pb.set_style(style);
            pb.set_prefix(self.style(self.palette.info, PROGRESS_ICON));
            pb.set_message(label.clone());
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        });
        TaskGuard {
            ui: self,
            label,
            start: Instant::now(),
            pb,
            finished: false,
        }
    }

    fn status(&self, style: Style, icon: &str, message: &str, to_stderr: bool) {
        let line = if self.quiet {
            message.to_string()
        } else {
            format!("{} {message}", self.style(style, icon))
        };
        if to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn heading(&self, title: &str) {
        println!(
            "{}",
            self.style(self.palette.heading, format!("{HEADING_ICON} {title}"))
        );
    }

    fn style(&self, style: Style, text: impl Display) -> String {
        if self.paint {
            style.paint(text.to_string()).to_string()
        } else {
            text.to_string()
        }
    }
}

pub struct TaskGuard<'a> {
    ui: &'a Ui,
    label: String,
    start: Instant,
    pb: Option<ProgressBar>,
    finished: bool,
}

impl TaskGuard<'_> {
    pub fn finish(mut self) -> Duration {
        self.finished = true;
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
        self.start.elapsed()
    }
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let message = format!(
            "{} failed after {}",
            self.label,
            format_duration(self.start.elapsed())
        );
        match self.pb.take() {
            Some(pb) => pb.abandon_with_message(message),
            None => self.ui.warn(&message),
        }
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        format!("{:.0}ms", secs * 1_000.0)
    }
}

#[derive(Clone, Copy)]
struct Palette {
    heading: Style,
    key: Style,
    value: Style,
    bullet: Style,
    info: Style,
    success: Style,
    warn: Style,
}

impl Palette {
    fn dark() -> Self {
        Self {
            heading: Color::Purple.bold(),
            key: Color::LightBlue.bold(),
            value: Color::White.normal(),
            bullet: Color::LightBlue.normal(),
            info: Color::LightCyan.normal(),
            success: Color::LightGreen.bold(),
            warn: Color::Yellow.bold(),
        }
    }

    fn light() -> Self {
        Self {
            heading: Color::Blue.bold(),
            key: Color::Black.bold(),
            value: Color::Black.normal(),
            bullet: Color::Blue.normal(),
            info: Color::Purple.normal(),
            success: Color::Green.bold(),
            warn: Color::Red.bold(),
        }
    }

    fn plain() -> Self {
        let none = Style::new();
        Self {
            heading: none,
            key: none,
            value: none,
            bullet: none,
            info: none,
            success: none,
            warn: none,
        }
    }
}
