//! crates/scopelog/src/macros.rs
//! Logging macros over the global logger or an explicit one.
//!
//! Every macro accepts an optional `logger: <expr>;` prefix that selects the
//! target logger. Message arguments use [`format_args!`] syntax, so argument
//! mismatches are compile errors and nothing is formatted for filtered
//! levels.

/// Logs a message at the given [`Level`](crate::Level).
///
/// # Example
/// ```
/// use scopelog::{Level, LevelFilter, Logger};
///
/// let logger = Logger::new(LevelFilter::Off);
/// scopelog::log!(logger: &logger; Level::Info, "copied {} files", 3);
/// ```
#[macro_export]
macro_rules! log {
    (logger: $logger:expr; $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::core::format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::logger().log($level, ::core::format_args!($($arg)+))
    };
}

/// Logs at [`Level::Debug`](crate::Level::Debug).
///
/// # Example
/// ```
/// scopelog::debug!("checksum {:08x}", 0xdead_beef_u32);
/// ```
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr; $($arg:tt)+) => {
        $crate::log!(logger: $logger; $crate::Level::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

/// Logs at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! info {
    (logger: $logger:expr; $($arg:tt)+) => {
        $crate::log!(logger: $logger; $crate::Level::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

/// Logs at [`Level::Warn`](crate::Level::Warn).
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr; $($arg:tt)+) => {
        $crate::log!(logger: $logger; $crate::Level::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warn, $($arg)+)
    };
}

/// Logs at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    (logger: $logger:expr; $($arg:tt)+) => {
        $crate::log!(logger: $logger; $crate::Level::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

/// Writes text without prefix or indentation.
#[macro_export]
macro_rules! passthru {
    (logger: $logger:expr; $($arg:tt)+) => {
        $crate::log!(logger: $logger; $crate::Level::Passthru, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Passthru, $($arg)+)
    };
}

/// Traces the rest of the enclosing block as a named scope.
///
/// # Example
/// ```
/// fn sync_directory(path: &str) {
///     scopelog::scope!("sync_directory");
///     scopelog::debug!("scanning {path}");
/// }
/// # sync_directory("/tmp");
/// ```
#[macro_export]
macro_rules! scope {
    (logger: $logger:expr; $name:expr) => {
        let _scope_tracer = $crate::ScopeTracer::with_logger($logger, $name);
    };
    ($name:expr) => {
        let _scope_tracer = $crate::ScopeTracer::new($name);
    };
}

/// Logs a printf-style runtime template, evaluating to
/// `Result<(), TemplateError>`.
///
/// # Example
/// ```
/// use scopelog::{Level, LevelFilter, Logger};
///
/// let logger = Logger::new(LevelFilter::Off);
/// scopelog::log_template!(logger: &logger; Level::Info, "%s: %d", "count", 4)?;
/// # Ok::<(), scopelog::TemplateError>(())
/// ```
#[macro_export]
macro_rules! log_template {
    (logger: $logger:expr; $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_template($level, $template, &[$($crate::Arg::from($arg)),*])
    };
    ($level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::logger().log_template($level, $template, &[$($crate::Arg::from($arg)),*])
    };
}
