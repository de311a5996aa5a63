//! crates/scopelog/src/global.rs
//! Process-wide logger, created once on first use.

use std::sync::OnceLock;

use thiserror::Error;

use crate::config::{LEVEL_ENV, LoggerConfig};
use crate::logger::Logger;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Error returned by [`init`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum InitError {
    /// The global logger was created before this call, either by an earlier
    /// [`init`] or lazily by [`logger`].
    #[error("the global logger is already initialized")]
    AlreadyInitialized,
}

/// Returns the global logger, creating it on first use.
///
/// The lazily created logger writes to standard error at the threshold named
/// by `SCOPELOG_LEVEL`, or at Warn when the variable is unset or invalid.
pub fn logger() -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::with_config(&config_from_env()))
}

/// Creates the global logger from `config`.
///
/// # Errors
///
/// Returns [`InitError::AlreadyInitialized`] if the global logger already
/// exists; the existing logger is left untouched.
pub fn init(config: &LoggerConfig) -> Result<&'static Logger, InitError> {
    let mut created = false;
    let logger = GLOBAL.get_or_init(|| {
        created = true;
        Logger::with_config(config)
    });
    if created {
        Ok(logger)
    } else {
        Err(InitError::AlreadyInitialized)
    }
}

fn config_from_env() -> LoggerConfig {
    LoggerConfig::from_env().unwrap_or_else(|error| {
        tracing::warn!(target: "scopelog::config", %error, "ignoring {LEVEL_ENV}");
        LoggerConfig::default()
    })
}
