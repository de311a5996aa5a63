//! crates/scopelog/src/tracing_bridge.rs
//! Forwards `tracing` events into a [`Logger`].
//!
//! [`LoggerLayer`] is a `tracing-subscriber` layer. It renders each event's
//! `message` field followed by its remaining fields as `key=value` pairs and
//! logs the result at the mapped severity, so the output picks up the
//! logger's prefixes, scope indentation and destinations.
//!
//! | tracing          | scopelog |
//! |------------------|----------|
//! | `TRACE`, `DEBUG` | Debug    |
//! | `INFO`           | Info     |
//! | `WARN`           | Warn     |
//! | `ERROR`          | Error    |
//!
//! Events under the `scopelog` target are dropped: they are the logger's own
//! diagnostics and would otherwise feed back into it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scopelog::{LoggerConfig, init_tracing};
//!
//! let logger = scopelog::init(&LoggerConfig::from_verbose_level(2))?;
//! init_tracing(logger)?;
//!
//! tracing::info!(files = 3, "copy finished");
//! ```

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::levels::Level;
use crate::logger::Logger;

const SELF_TARGET: &str = "scopelog";

/// A tracing layer that logs every event through a [`Logger`].
#[derive(Clone, Copy, Debug)]
pub struct LoggerLayer {
    logger: &'static Logger,
}

impl LoggerLayer {
    /// Creates a layer forwarding to `logger`.
    #[must_use]
    pub const fn new(logger: &'static Logger) -> Self {
        Self { logger }
    }

    /// Maps a tracing level to a logger severity.
    #[must_use]
    pub const fn map_level(level: &tracing::Level) -> Level {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            tracing::Level::DEBUG | tracing::Level::TRACE => Level::Debug,
        }
    }

    fn is_own_target(target: &str) -> bool {
        target
            .strip_prefix(SELF_TARGET)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if Self::is_own_target(metadata.target()) {
            return;
        }

        let level = Self::map_level(metadata.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        self.logger.log(level, visitor);
    }
}

/// Collects the message and the remaining fields of one event.
#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl EventVisitor {
    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }
}

impl fmt::Display for EventVisitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self.message.is_empty() && !self.fields.is_empty() {
            f.write_str(" ")?;
        }
        f.write_str(&self.fields)
    }
}

/// Installs a [`LoggerLayer`] forwarding to `logger` as the global tracing
/// subscriber.
///
/// # Errors
///
/// Fails when a global subscriber is already set.
pub fn init_tracing(logger: &'static Logger) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger))
        .try_init()
}

/// Installs a [`LoggerLayer`] behind an additional filter layer, such as an
/// `EnvFilter`.
///
/// # Errors
///
/// Fails when a global subscriber is already set.
pub fn init_tracing_with_filter<F>(logger: &'static Logger, filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::new(logger))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_level() {
        assert_eq!(LoggerLayer::map_level(&tracing::Level::ERROR), Level::Error);
        assert_eq!(LoggerLayer::map_level(&tracing::Level::WARN), Level::Warn);
        assert_eq!(LoggerLayer::map_level(&tracing::Level::INFO), Level::Info);
        assert_eq!(LoggerLayer::map_level(&tracing::Level::DEBUG), Level::Debug);
        assert_eq!(LoggerLayer::map_level(&tracing::Level::TRACE), Level::Debug);
    }

    #[test]
    fn test_own_target_detection() {
        assert!(LoggerLayer::is_own_target("scopelog"));
        assert!(LoggerLayer::is_own_target("scopelog::broadcast"));
        assert!(!LoggerLayer::is_own_target("scopelog_sink"));
        assert!(!LoggerLayer::is_own_target("app::scopelog"));
    }

    #[test]
    fn test_visitor_renders_message_then_fields() {
        let visitor = EventVisitor {
            message: "copy finished".to_owned(),
            fields: "files=3".to_owned(),
        };
        assert_eq!(visitor.to_string(), "copy finished files=3");
    }

    #[test]
    fn test_visitor_without_message() {
        let mut visitor = EventVisitor::default();
        visitor.push_field("a", format_args!("{}", 1));
        visitor.push_field("b", format_args!("{}", 2));
        assert_eq!(visitor.to_string(), "a=1 b=2");
    }
}
