//! crates/scopelog/src/levels.rs
//! Message severities and destination thresholds.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity of a log message, ordered from least to most important.
///
/// [`Level::Passthru`] sorts above every other level: it is emitted without a
/// prefix and reaches every destination whose threshold is not
/// [`LevelFilter::Off`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[repr(u8)]
pub enum Level {
    /// Diagnostic detail, including scope entry and exit markers.
    Debug = 0,
    /// Routine progress information.
    Info = 1,
    /// Unexpected but recoverable conditions.
    Warn = 2,
    /// Failures.
    Error = 3,
    /// Text emitted verbatim, without a severity prefix.
    Passthru = 4,
}

impl Level {
    /// Every level, in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Passthru,
    ];

    /// Returns the prefix rendered in front of messages at this level.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Debug => "DEBG: ",
            Self::Info => "INFO: ",
            Self::Warn => "WARN: ",
            Self::Error => "ERRR: ",
            Self::Passthru => "",
        }
    }

    /// Returns the lowercase name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Passthru => "passthru",
        }
    }

    /// Returns the numeric index of the level.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a numeric index back into a level.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Debug),
            1 => Some(Self::Info),
            2 => Some(Self::Warn),
            3 => Some(Self::Error),
            4 => Some(Self::Passthru),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Level {
    type Error = ParseLevelError;

    fn try_from(value: u8) -> Result<Self, ParseLevelError> {
        Self::from_u8(value).ok_or(ParseLevelError::OutOfRange {
            value,
            max: Self::Passthru.as_u8(),
        })
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match LevelFilter::from_str(s)?.level() {
            Some(level) => Ok(level),
            None => Err(ParseLevelError::UnknownName(s.to_owned())),
        }
    }
}

/// Minimum severity a destination accepts.
///
/// The variants mirror [`Level`] and add [`LevelFilter::Off`], which rejects
/// every message including [`Level::Passthru`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[repr(u8)]
pub enum LevelFilter {
    /// Accept everything.
    Debug = 0,
    /// Accept [`Level::Info`] and above.
    Info = 1,
    /// Accept [`Level::Warn`] and above.
    #[default]
    Warn = 2,
    /// Accept [`Level::Error`] and [`Level::Passthru`].
    Error = 3,
    /// Accept only [`Level::Passthru`].
    Passthru = 4,
    /// Accept nothing.
    Off = 5,
}

impl LevelFilter {
    /// Reports whether a message at `level` passes this threshold.
    #[must_use]
    pub const fn admits(self, level: Level) -> bool {
        level as u8 >= self as u8
    }

    /// Reports whether this threshold enables scope indentation.
    #[must_use]
    pub const fn indents(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// Returns the least severe level admitted, or `None` for [`LevelFilter::Off`].
    #[must_use]
    pub const fn level(self) -> Option<Level> {
        Level::from_u8(self as u8)
    }

    /// Returns the lowercase name of the threshold.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.level() {
            Some(level) => level.as_str(),
            None => "off",
        }
    }

    /// Returns the numeric index of the threshold.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a numeric index back into a threshold.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Debug),
            1 => Some(Self::Info),
            2 => Some(Self::Warn),
            3 => Some(Self::Error),
            4 => Some(Self::Passthru),
            5 => Some(Self::Off),
            _ => None,
        }
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => Self::Debug,
            Level::Info => Self::Info,
            Level::Warn => Self::Warn,
            Level::Error => Self::Error,
            Level::Passthru => Self::Passthru,
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for LevelFilter {
    type Error = ParseLevelError;

    fn try_from(value: u8) -> Result<Self, ParseLevelError> {
        Self::from_u8(value).ok_or(ParseLevelError::OutOfRange {
            value,
            max: Self::Off.as_u8(),
        })
    }
}

impl FromStr for LevelFilter {
    type Err = ParseLevelError;

    /// Parses a level name or its four-letter display tag, ignoring case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "debug" | "debg" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "errr" => Ok(Self::Error),
            "passthru" | "passthrough" => Ok(Self::Passthru),
            "off" | "none" => Ok(Self::Off),
            _ => Err(ParseLevelError::UnknownName(s.to_owned())),
        }
    }
}

/// Error returned when converting text or integers into a [`Level`] or
/// [`LevelFilter`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseLevelError {
    /// The name does not match any level.
    #[error("unknown log level `{0}`")]
    UnknownName(String),
    /// The index lies outside the closed set of levels.
    #[error("log level index {value} is outside the supported range 0-{max}")]
    OutOfRange {
        /// Rejected index.
        value: u8,
        /// Largest accepted index.
        max: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    mod level_tests {
        use super::*;

        #[test]
        fn ordering_follows_declaration() {
            assert!(Level::Debug < Level::Info);
            assert!(Level::Info < Level::Warn);
            assert!(Level::Warn < Level::Error);
            assert!(Level::Error < Level::Passthru);
        }

        #[test]
        fn prefixes_match_display_tags() {
            assert_eq!(Level::Debug.prefix(), "DEBG: ");
            assert_eq!(Level::Info.prefix(), "INFO: ");
            assert_eq!(Level::Warn.prefix(), "WARN: ");
            assert_eq!(Level::Error.prefix(), "ERRR: ");
            assert_eq!(Level::Passthru.prefix(), "");
        }

        #[test]
        fn index_round_trip_covers_all_levels() {
            for level in Level::ALL {
                assert_eq!(Level::from_u8(level.as_u8()), Some(level));
            }
        }

        #[test]
        fn index_outside_closed_set_is_rejected() {
            assert_eq!(Level::from_u8(5), None);
            assert_eq!(
                Level::try_from(9),
                Err(ParseLevelError::OutOfRange { value: 9, max: 4 })
            );
        }

        #[test]
        fn parse_accepts_names_and_tags() {
            assert_eq!("debug".parse::<Level>(), Ok(Level::Debug));
            assert_eq!("DEBG".parse::<Level>(), Ok(Level::Debug));
            assert_eq!(" Warning ".parse::<Level>(), Ok(Level::Warn));
            assert_eq!("ERRR".parse::<Level>(), Ok(Level::Error));
            assert_eq!("passthru".parse::<Level>(), Ok(Level::Passthru));
        }

        #[test]
        fn parse_rejects_off_as_message_level() {
            assert_eq!(
                "off".parse::<Level>(),
                Err(ParseLevelError::UnknownName("off".to_owned()))
            );
        }

        #[test]
        fn display_uses_lowercase_name() {
            assert_eq!(Level::Error.to_string(), "error");
        }
    }

    mod filter_tests {
        use super::*;

        #[test]
        fn default_is_warn() {
            assert_eq!(LevelFilter::default(), LevelFilter::Warn);
        }

        #[test]
        fn admits_levels_at_or_above_threshold() {
            assert!(LevelFilter::Info.admits(Level::Info));
            assert!(LevelFilter::Info.admits(Level::Error));
            assert!(!LevelFilter::Info.admits(Level::Debug));
        }

        #[test]
        fn passthru_reaches_everything_but_off() {
            for filter in [
                LevelFilter::Debug,
                LevelFilter::Info,
                LevelFilter::Warn,
                LevelFilter::Error,
                LevelFilter::Passthru,
            ] {
                assert!(filter.admits(Level::Passthru), "{filter} rejected passthru");
            }
            assert!(!LevelFilter::Off.admits(Level::Passthru));
        }

        #[test]
        fn off_admits_nothing() {
            assert!(Level::ALL.iter().all(|level| !LevelFilter::Off.admits(*level)));
        }

        #[test]
        fn only_debug_indents() {
            assert!(LevelFilter::Debug.indents());
            assert!(!LevelFilter::Info.indents());
            assert!(!LevelFilter::Off.indents());
        }

        #[test]
        fn from_level_preserves_index() {
            for level in Level::ALL {
                assert_eq!(LevelFilter::from(level).as_u8(), level.as_u8());
                assert_eq!(LevelFilter::from(level).level(), Some(level));
            }
            assert_eq!(LevelFilter::Off.level(), None);
        }

        #[test]
        fn parse_accepts_off_aliases() {
            assert_eq!("off".parse::<LevelFilter>(), Ok(LevelFilter::Off));
            assert_eq!("NONE".parse::<LevelFilter>(), Ok(LevelFilter::Off));
        }

        #[test]
        fn parse_rejects_unknown_names() {
            let error = "verbose".parse::<LevelFilter>().expect_err("unknown");
            assert_eq!(error.to_string(), "unknown log level `verbose`");
        }

        #[test]
        fn try_from_rejects_out_of_range() {
            assert_eq!(LevelFilter::try_from(5), Ok(LevelFilter::Off));
            assert!(LevelFilter::try_from(6).is_err());
        }
    }
}
