//! crates/scopelog/src/logger.rs
//! The logger facade: default threshold, built-in destination, registry.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scopelog_sink::{ConsoleSink, FileSink, Sink, SinkId};

use crate::config::{DefaultDestination, LoggerConfig};
use crate::format::{Indent, Layout};
use crate::levels::{Level, LevelFilter};
use crate::registry::{DestinationInfo, Registry, WriteFailure};
use crate::scope::ScopeTracer;
use crate::template::{self, Arg, TemplateError};

/// A leveled logger broadcasting each line to every qualifying destination.
///
/// A logger starts with one built-in destination (standard error unless
/// configured otherwise) registered at the default threshold. Further
/// destinations are added with [`add_destination`](Self::add_destination);
/// the logger only keeps a weak handle to them, so callers own their sinks
/// and should remove them before dropping them.
///
/// Logging methods never fail. A destination that rejects a write is skipped,
/// the remaining destinations still receive the line, and the first failure
/// of each destination is reported through `tracing` under the
/// `scopelog::broadcast` target.
///
/// Sinks must not log through the logger they are registered with.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use scopelog::{DefaultDestination, LevelFilter, Logger, LoggerConfig, MemorySink};
///
/// let logger = Logger::with_config(
///     &LoggerConfig::default().with_default_destination(DefaultDestination::Disabled),
/// );
/// let capture = Arc::new(MemorySink::new());
/// logger.add_destination(capture.clone(), Some(LevelFilter::Info));
///
/// logger.info(format_args!("value={}", 42));
/// logger.debug("filtered out");
///
/// assert_eq!(capture.contents(), "INFO: value=42\n");
/// ```
pub struct Logger {
    default_level: AtomicU8,
    /// Most verbose threshold across all destinations.
    interest: AtomicU8,
    layout: Layout,
    builtin: Option<Arc<dyn Sink>>,
    registry: Mutex<Registry>,
}

impl Logger {
    /// Creates a logger writing to standard error at `level`.
    #[must_use]
    pub fn new(level: LevelFilter) -> Self {
        Self::with_config(&LoggerConfig::default().with_level(level))
    }

    /// Creates a logger from `config`.
    ///
    /// A file destination that cannot be opened is reported through
    /// `tracing` and leaves the logger without a built-in destination.
    #[must_use]
    pub fn with_config(config: &LoggerConfig) -> Self {
        let builtin = match open_builtin(&config.default_destination) {
            Ok(builtin) => builtin,
            Err(error) => {
                tracing::warn!(
                    target: "scopelog::logger",
                    destination = ?config.default_destination,
                    %error,
                    "built-in log destination unavailable"
                );
                None
            }
        };

        let mut registry = Registry::default();
        if let Some(sink) = &builtin {
            registry.insert(sink, config.level);
        }

        Self {
            default_level: AtomicU8::new(config.level.as_u8()),
            interest: AtomicU8::new(registry.most_verbose().as_u8()),
            layout: Layout {
                indent_width: config.indent_width,
                line_ending: config.line_ending,
            },
            builtin,
            registry: Mutex::new(registry),
        }
    }

    /// Logs `message` at `level`.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        self.emit(level, Indent::Nested, &message);
    }

    /// Logs `message` at [`Level::Info`], the severity used when a caller
    /// does not name one.
    pub fn log_default(&self, message: impl fmt::Display) {
        self.emit(Level::Info, Indent::Nested, &message);
    }

    /// Logs `message` at [`Level::Debug`].
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(Level::Debug, Indent::Nested, &message);
    }

    /// Logs `message` at [`Level::Info`].
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(Level::Info, Indent::Nested, &message);
    }

    /// Logs `message` at [`Level::Warn`].
    pub fn warn(&self, message: impl fmt::Display) {
        self.emit(Level::Warn, Indent::Nested, &message);
    }

    /// Logs `message` at [`Level::Error`].
    pub fn error(&self, message: impl fmt::Display) {
        self.emit(Level::Error, Indent::Nested, &message);
    }

    /// Writes `message` without prefix or indentation.
    pub fn passthru(&self, message: impl fmt::Display) {
        self.emit(Level::Passthru, Indent::Nested, &message);
    }

    /// Renders a printf-style `template` and logs the result at `level`.
    ///
    /// The template is checked against `args` even when no destination
    /// accepts `level`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] when the arguments do not match the
    /// template. Nothing is logged in that case.
    pub fn log_template(
        &self,
        level: Level,
        template: &str,
        args: &[Arg<'_>],
    ) -> Result<(), TemplateError> {
        let message = template::render(template, args)?;
        self.emit(level, Indent::Nested, &message);
        Ok(())
    }

    /// Reports whether at least one destination would accept `level`.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        LevelFilter::from_u8(self.interest.load(Ordering::Acquire))
            .unwrap_or(LevelFilter::Off)
            .admits(level)
    }

    /// Returns the default threshold.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_u8(self.default_level.load(Ordering::Acquire))
            .unwrap_or_default()
    }

    /// Changes the default threshold and, if it is still registered, the
    /// built-in destination's threshold.
    pub fn set_log_level(&self, level: LevelFilter) {
        let mut registry = self.registry();
        self.default_level.store(level.as_u8(), Ordering::Release);
        if let Some(id) = self.builtin_id() {
            registry.set_threshold(id, level);
        }
        self.refresh_interest(&registry);
    }

    /// Registers `sink` at `threshold`, or at the default threshold when
    /// `None`. Registering a sink again replaces its threshold.
    ///
    /// Only a weak handle is kept: the destination goes quiet once every
    /// other handle to the sink has been dropped.
    pub fn add_destination(&self, sink: Arc<dyn Sink>, threshold: Option<LevelFilter>) -> SinkId {
        let mut registry = self.registry();
        let id = registry.insert(&sink, threshold.unwrap_or_else(|| self.log_level()));
        self.refresh_interest(&registry);
        id
    }

    /// Deregisters `sink`. Returns `false` if it was not registered.
    pub fn remove_destination<S: ?Sized>(&self, sink: &Arc<S>) -> bool {
        self.remove_destination_by_id(SinkId::of(sink))
    }

    /// Deregisters the sink identified by `id`. Returns `false` if it was not
    /// registered.
    ///
    /// An id is only meaningful while its sink is alive. Once the sink has
    /// been dropped and its entry pruned, a new sink may be allocated at the
    /// same address and receive the same id, so callers should not hold ids
    /// past the lifetime of their sinks. [`Logger::remove_destination`] avoids
    /// the issue by deriving the id from a live handle.
    pub fn remove_destination_by_id(&self, id: SinkId) -> bool {
        let mut registry = self.registry();
        let removed = registry.remove(id);
        self.refresh_interest(&registry);
        removed
    }

    /// Deregisters every destination, including the built-in one.
    pub fn clear_destinations(&self) {
        let mut registry = self.registry();
        registry.clear();
        self.refresh_interest(&registry);
    }

    /// Returns the threshold `sink` is registered at.
    #[must_use]
    pub fn destination_threshold<S: ?Sized>(&self, sink: &Arc<S>) -> Option<LevelFilter> {
        self.registry().threshold(SinkId::of(sink))
    }

    /// Returns the built-in destination, if one was created.
    #[must_use]
    pub const fn default_sink(&self) -> Option<&Arc<dyn Sink>> {
        self.builtin.as_ref()
    }

    /// Changes the built-in destination's threshold without touching the
    /// default. Returns `false` when the built-in destination is not
    /// registered.
    pub fn set_default_destination_threshold(&self, threshold: LevelFilter) -> bool {
        let Some(id) = self.builtin_id() else {
            return false;
        };
        let mut registry = self.registry();
        let updated = registry.set_threshold(id, threshold);
        self.refresh_interest(&registry);
        updated
    }

    /// Registers the built-in destination again, at the default threshold.
    /// Returns `false` when the logger has no built-in destination.
    pub fn restore_default_destination(&self) -> bool {
        let Some(sink) = &self.builtin else {
            return false;
        };
        let mut registry = self.registry();
        if !registry.contains(SinkId::of(sink)) {
            registry.insert(sink, self.log_level());
            self.refresh_interest(&registry);
        }
        true
    }

    /// Returns a snapshot of the registered destinations in registration
    /// order.
    #[must_use]
    pub fn destinations(&self) -> Vec<DestinationInfo> {
        self.registry().snapshot()
    }

    /// Flushes every live destination. Failures are ignored.
    pub fn flush(&self) {
        self.registry().flush();
    }

    /// Traces a scope named `name` on this logger until the returned value is
    /// dropped.
    pub fn trace_scope<'a>(&'a self, name: impl Into<Cow<'a, str>>) -> ScopeTracer<'a> {
        ScopeTracer::with_logger(self, name)
    }

    pub(crate) fn emit(&self, level: Level, indent: Indent, message: &dyn fmt::Display) {
        if !self.enabled(level) {
            return;
        }
        let line = self.layout.render(level, self.log_level(), indent, message);

        let failures = {
            let mut registry = self.registry();
            let failures = registry.broadcast(level, &line);
            self.refresh_interest(&registry);
            failures
        };
        report(failures);
    }

    fn builtin_id(&self) -> Option<SinkId> {
        self.builtin.as_ref().map(SinkId::of)
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn refresh_interest(&self, registry: &Registry) {
        self.interest
            .store(registry.most_verbose().as_u8(), Ordering::Release);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::with_config(&LoggerConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("log_level", &self.log_level())
            .field("layout", &self.layout)
            .field("has_builtin", &self.builtin.is_some())
            .field("destinations", &self.destinations().len())
            .finish_non_exhaustive()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.registry.get_mut().unwrap_or_else(PoisonError::into_inner).flush();
    }
}

fn open_builtin(destination: &DefaultDestination) -> io::Result<Option<Arc<dyn Sink>>> {
    let sink: Arc<dyn Sink> = match destination {
        DefaultDestination::Stderr => Arc::new(ConsoleSink::stderr()),
        DefaultDestination::Stdout => Arc::new(ConsoleSink::stdout()),
        DefaultDestination::File(path) => Arc::new(FileSink::create(path)?),
        DefaultDestination::Disabled => return Ok(None),
    };
    Ok(Some(sink))
}

fn report(failures: Vec<WriteFailure>) {
    for failure in failures {
        tracing::warn!(
            target: "scopelog::broadcast",
            destination = failure.id.get(),
            error = %failure.error,
            "log destination rejected a write; later failures are only counted"
        );
    }
}
