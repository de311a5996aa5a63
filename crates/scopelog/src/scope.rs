//! crates/scopelog/src/scope.rs
//! RAII scope tracing with entry and exit markers.

use std::borrow::Cow;
use std::ffi::OsStr;

use crate::format::Indent;
use crate::global;
use crate::levels::Level;
use crate::logger::Logger;
use crate::nesting::{self, DepthGuard};

/// Marks a named scope in the log for as long as it is alive.
///
/// Creating a tracer raises the calling thread's nesting depth and logs
/// `Entering <name>` at [`Level::Debug`]. Dropping it logs `Leaving <name>`
/// and restores the depth, on normal exit, early return and unwinding alike.
/// Messages logged in between are indented one level deeper than the
/// markers whenever the logger's default threshold is Debug.
///
/// The tracer is bound to the thread that created it and cannot be sent
/// elsewhere.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use scopelog::{DefaultDestination, LevelFilter, Logger, LoggerConfig, MemorySink, ScopeTracer};
///
/// let logger = Logger::with_config(
///     &LoggerConfig::default()
///         .with_level(LevelFilter::Debug)
///         .with_default_destination(DefaultDestination::Disabled),
/// );
/// let capture = Arc::new(MemorySink::new());
/// logger.add_destination(capture.clone(), None);
///
/// {
///     let _scope = ScopeTracer::with_logger(&logger, "Foo");
///     logger.debug("inner");
/// }
///
/// assert_eq!(
///     capture.contents(),
///     "DEBG: Entering Foo\n  DEBG: inner\nDEBG: Leaving Foo\n"
/// );
/// ```
#[must_use = "the scope ends as soon as the tracer is dropped"]
pub struct ScopeTracer<'a> {
    logger: &'a Logger,
    name: Cow<'a, str>,
    depth: DepthGuard,
}

impl<'a> ScopeTracer<'a> {
    /// Traces `name` on the global logger.
    pub fn new(name: impl Into<Cow<'a, str>>) -> Self {
        Self::with_logger(global::logger(), name)
    }

    /// Traces `name` on `logger`.
    pub fn with_logger(logger: &'a Logger, name: impl Into<Cow<'a, str>>) -> Self {
        let name = name.into();
        let depth = nesting::enter();
        marker(logger, "Entering", &name, depth.depth());
        Self {
            logger,
            name,
            depth,
        }
    }

    /// Traces a platform string, replacing invalid Unicode with U+FFFD.
    pub fn from_os_str(logger: &'a Logger, name: &'a OsStr) -> Self {
        Self::with_logger(logger, name.to_string_lossy())
    }

    /// Returns the traced name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the nesting depth of this scope, `0` for an outermost scope.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth.depth()
    }
}

impl Drop for ScopeTracer<'_> {
    fn drop(&mut self) {
        // `self.depth` is dropped after this body, even if the marker panics.
        marker(self.logger, "Leaving", &self.name, self.depth.depth());
    }
}

impl std::fmt::Debug for ScopeTracer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeTracer")
            .field("name", &self.name)
            .field("depth", &self.depth.depth())
            .finish_non_exhaustive()
    }
}

fn marker(logger: &Logger, verb: &str, name: &str, depth: i32) {
    logger.emit(Level::Debug, Indent::Marker(depth), &format_args!("{verb} {name}"));
}
