//! Run logging.
//!
//! This module provides the process-wide [`Logger`] used by the sorter. Every
//! line carries a timestamp, a severity and a message, and is styled per
//! severity according to the configured color theme. Tests swap the terminal
//! for an in-memory sink and inspect the emitted [`Record`]s.

use console::{Style, Term};
use std::sync::{Arc, Mutex};

use crate::config::LogConfig;

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    /// Start and end markers of a run
    Custom,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &str {
        match self {
            Level::Info => "INFO",
            Level::Custom => "CUSTOM_INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

/// A single emitted log line, without styling or timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
}

/// Per-severity styles for one theme.
#[derive(Debug, Clone)]
pub struct LevelStyles {
    pub info: Style,
    pub custom: Style,
    pub warning: Style,
    pub error: Style,
}

impl LevelStyles {
    /// Builds the style table for a theme name.
    ///
    /// `"default"` (and any unrecognised name) uses green info, blue markers,
    /// yellow warnings and red errors. Named themes use shades of one color.
    pub fn for_theme(theme: &str) -> Self {
        let (info, custom, warning, error) = match theme {
            "cyan" => (
                Style::new().cyan(),
                Style::new().color256(123),
                Style::new().color256(51),
                Style::new().color256(87),
            ),
            "magenta" => (
                Style::new().magenta(),
                Style::new().color256(213),
                Style::new().color256(201),
                Style::new().color256(126),
            ),
            "yellow" => (
                Style::new().yellow(),
                Style::new().color256(227),
                Style::new().color256(226),
                Style::new().color256(178),
            ),
            "green" => (
                Style::new().green(),
                Style::new().color256(120),
                Style::new().color256(46),
                Style::new().color256(28),
            ),
            "red" => (
                Style::new().red(),
                Style::new().color256(210),
                Style::new().color256(196),
                Style::new().color256(124),
            ),
            "blue" => (
                Style::new().blue(),
                Style::new().color256(117),
                Style::new().color256(39),
                Style::new().color256(25),
            ),
            "white" => (
                Style::new().white(),
                Style::new().color256(255),
                Style::new().color256(255),
                Style::new().color256(250),
            ),
            _ => (
                Style::new().green(),
                Style::new().blue(),
                Style::new().yellow(),
                Style::new().red(),
            ),
        };

        Self {
            info,
            custom,
            warning,
            error,
        }
    }

    /// Styles that render as plain text.
    pub fn plain() -> Self {
        Self {
            info: Style::new(),
            custom: Style::new(),
            warning: Style::new(),
            error: Style::new(),
        }
    }

    pub fn get(&self, level: Level) -> &Style {
        match level {
            Level::Info => &self.info,
            Level::Custom => &self.custom,
            Level::Warning => &self.warning,
            Level::Error => &self.error,
        }
    }
}

enum Sink {
    Term(Term),
    Memory(Mutex<Vec<Record>>),
}

struct Inner {
    styles: LevelStyles,
    timestamp_format: String,
    sink: Sink,
}

/// Handle to the run log.
///
/// Cloning is cheap; all clones write to the same sink. Writing never fails
/// from the caller's point of view: a log line that cannot reach the terminal
/// is dropped.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Creates a logger writing styled lines to stderr.
    pub fn new(theme: &str, config: &LogConfig) -> Self {
        let styles = if config.color {
            LevelStyles::for_theme(theme)
        } else {
            LevelStyles::plain()
        };

        Self {
            inner: Arc::new(Inner {
                styles,
                timestamp_format: config.timestamp_format.clone(),
                sink: Sink::Term(Term::stderr()),
            }),
        }
    }

    /// Creates a logger that keeps records in memory instead of printing them.
    pub fn memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                styles: LevelStyles::plain(),
                timestamp_format: LogConfig::default().timestamp_format,
                sink: Sink::Memory(Mutex::new(Vec::new())),
            }),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message.into());
    }

    pub fn custom(&self, message: impl Into<String>) {
        self.log(Level::Custom, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message.into());
    }

    pub fn log(&self, level: Level, message: String) {
        match &self.inner.sink {
            Sink::Term(term) => {
                let line = self.format_line(level, &message);
                let _ = term.write_line(&line);
            }
            Sink::Memory(records) => {
                if let Ok(mut records) = records.lock() {
                    records.push(Record { level, message });
                }
            }
        }
    }

    /// Renders `<timestamp> - <LEVEL> - <message>` with the level's style.
    pub fn format_line(&self, level: Level, message: &str) -> String {
        let style = self.inner.styles.get(level);
        let timestamp = chrono::Local::now().format(&self.inner.timestamp_format);

        format!(
            "{} - {} - {}",
            timestamp,
            style.apply_to(level.as_str()),
            style.apply_to(message)
        )
    }

    /// Returns the records captured by a memory logger.
    ///
    /// Terminal loggers keep nothing and return an empty list.
    pub fn records(&self) -> Vec<Record> {
        match &self.inner.sink {
            Sink::Term(_) => Vec::new(),
            Sink::Memory(records) => records
                .lock()
                .map(|records| records.clone())
                .unwrap_or_default(),
        }
    }

    /// Captured records of one severity.
    pub fn records_at(&self, level: Level) -> Vec<Record> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .collect()
    }
}
