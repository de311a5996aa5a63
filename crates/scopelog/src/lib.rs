#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `scopelog` is a leveled logger that broadcasts each message to several
//! destinations at once and indents output according to a per-thread scope
//! depth. Messages carry one of five severities ([`Level`]); every
//! destination has its own minimum threshold ([`LevelFilter`]), so the same
//! line can reach a verbose debug file while standard error only sees
//! warnings.
//!
//! # Design
//!
//! - [`Logger`] owns the default threshold, a built-in destination (standard
//!   error unless configured otherwise) and a registry of caller-owned
//!   [`Sink`]s. The registry keeps weak handles, keyed by [`SinkId`].
//! - Each message is rendered once: indentation, the severity prefix
//!   (`DEBG: `, `INFO: `, `WARN: `, `ERRR: `, none for passthru), the text
//!   and a line terminator. The resulting line is written unchanged to every
//!   destination whose threshold admits the severity.
//! - [`ScopeTracer`] logs `Entering <name>` and `Leaving <name>` around a
//!   scope and raises the calling thread's depth in between. The depth lives
//!   in a thread local, so concurrent threads never disturb each other's
//!   indentation.
//! - A process-wide logger is available through [`logger()`] and the
//!   [`log!`], [`debug!`], [`info!`], [`warn!`], [`error!`], [`passthru!`]
//!   and [`scope!`] macros. Runtime printf-style templates go through
//!   [`Logger::log_template`] and [`render_template`].
//!
//! # Invariants
//!
//! - A message at severity `S` reaches a destination with threshold `T` iff
//!   `S >= T`. Passthru passes every threshold except [`LevelFilter::Off`].
//! - Indentation is only rendered while the logger's default threshold is
//!   [`LevelFilter::Debug`], and never on passthru text.
//! - The nesting depth returns to its previous value when a tracer is
//!   dropped, including during unwinding.
//!
//! # Errors
//!
//! Logging calls never fail. A destination that rejects a write is skipped,
//! the rest still receive the line, and its first failure is reported through
//! [`tracing`] under the `scopelog::broadcast` target. Fallible operations
//! return [`ParseLevelError`], [`TemplateError`] or [`InitError`].
//!
//! # Examples
//!
//! Capture output in memory next to the built-in destination:
//!
//! ```
//! use std::sync::Arc;
//! use scopelog::{LevelFilter, Logger, MemorySink};
//!
//! let logger = Logger::new(LevelFilter::Warn);
//! let capture = Arc::new(MemorySink::new());
//! logger.add_destination(capture.clone(), Some(LevelFilter::Info));
//!
//! scopelog::info!(logger: &logger; "value={}", 42);
//!
//! assert_eq!(capture.contents(), "INFO: value=42\n");
//! logger.remove_destination(&capture);
//! ```
//!
//! Trace nested work with indentation:
//!
//! ```
//! use std::sync::Arc;
//! use scopelog::{DefaultDestination, LevelFilter, Logger, LoggerConfig, MemorySink};
//!
//! let logger = Logger::with_config(
//!     &LoggerConfig::from_verbose_level(2).with_default_destination(DefaultDestination::Disabled),
//! );
//! let capture = Arc::new(MemorySink::new());
//! logger.add_destination(capture.clone(), None);
//!
//! fn load(logger: &Logger) {
//!     scopelog::scope!(logger: logger; "load");
//!     scopelog::debug!(logger: logger; "reading header");
//! }
//! load(&logger);
//!
//! assert_eq!(
//!     capture.lines(),
//!     ["DEBG: Entering load", "  DEBG: reading header", "DEBG: Leaving load"]
//! );
//! ```
//!
//! # See also
//!
//! - [`scopelog_sink`] for the sink trait and the bundled sinks.

mod config;
mod format;
mod global;
mod levels;
mod line_ending;
mod logger;
mod macros;
pub mod nesting;
mod registry;
mod scope;
mod template;
#[cfg(feature = "tracing-bridge")]
mod tracing_bridge;

pub use config::{DefaultDestination, LEVEL_ENV, LoggerConfig};
pub use global::{InitError, init, logger};
pub use levels::{Level, LevelFilter, ParseLevelError};
pub use line_ending::LineEnding;
pub use logger::Logger;
pub use registry::DestinationInfo;
pub use scope::ScopeTracer;
pub use scopelog_sink::{
    ConsoleSink, ConsoleStream, FileSink, MemorySink, Sink, SinkId, WriterSink,
};
pub use template::{Arg, TemplateError, render as render_template};
#[cfg(feature = "tracing-bridge")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing-bridge")))]
pub use tracing_bridge::{LoggerLayer, init_tracing, init_tracing_with_filter};
