//! crates/scopelog/src/config.rs
//! Logger construction settings.

use std::path::PathBuf;

use crate::levels::{LevelFilter, ParseLevelError};
use crate::line_ending::LineEnding;

/// Environment variable consulted by [`LoggerConfig::from_env`].
pub const LEVEL_ENV: &str = "SCOPELOG_LEVEL";

/// Built-in destination a logger creates at construction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DefaultDestination {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
    /// A file, truncated when the logger is created.
    File(PathBuf),
    /// No built-in destination.
    Disabled,
}

/// Settings used to build a [`Logger`](crate::Logger).
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LoggerConfig {
    /// Default threshold. New destinations inherit it, and scope indentation
    /// is only rendered while it is [`LevelFilter::Debug`].
    pub level: LevelFilter,
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Terminator appended to every line.
    pub line_ending: LineEnding,
    /// Built-in destination.
    pub default_destination: DefaultDestination,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            indent_width: 2,
            line_ending: LineEnding::Lf,
            default_destination: DefaultDestination::Stderr,
        }
    }
}

impl LoggerConfig {
    /// Creates a configuration from a `-v` count: 0 is warnings, 1 adds
    /// informational messages, 2 and above add debug output.
    #[must_use]
    pub fn from_verbose_level(verbose: u8) -> Self {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        Self {
            level,
            ..Self::default()
        }
    }

    /// Creates a configuration whose level comes from `SCOPELOG_LEVEL`.
    ///
    /// An unset or empty variable yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ParseLevelError`] when the variable names no known level.
    pub fn from_env() -> Result<Self, ParseLevelError> {
        Self::from_env_value(std::env::var(LEVEL_ENV).ok().as_deref())
    }

    pub(crate) fn from_env_value(value: Option<&str>) -> Result<Self, ParseLevelError> {
        let mut config = Self::default();
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            config.level = value.parse()?;
        }
        Ok(config)
    }

    /// Replaces the default threshold.
    #[must_use]
    pub const fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Replaces the number of spaces per nesting level.
    #[must_use]
    pub const fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Replaces the line terminator.
    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Replaces the built-in destination.
    #[must_use]
    pub fn with_default_destination(mut self, destination: DefaultDestination) -> Self {
        self.default_destination = destination;
        self
    }
}
