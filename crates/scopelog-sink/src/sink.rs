//! crates/scopelog-sink/src/sink.rs
//! The `Sink` capability trait and the identity handle used by registries.

use std::io;
use std::sync::Arc;

mod console;
mod memory;
mod writer;

pub use console::{ConsoleSink, ConsoleStream};
pub use memory::MemorySink;
pub use writer::{FileSink, WriterSink};

/// A destination that accepts rendered log text.
///
/// Implementations must tolerate concurrent calls from several threads; the
/// provided sinks serialise writes internally so that each call lands as one
/// contiguous block.
///
/// # Examples
///
/// Implement a sink that counts the lines it receives:
///
/// ```
/// use std::io;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use scopelog_sink::Sink;
///
/// #[derive(Default)]
/// struct LineCounter(AtomicUsize);
///
/// impl Sink for LineCounter {
///     fn write_str(&self, text: &str) -> io::Result<()> {
///         self.0.fetch_add(text.lines().count(), Ordering::Relaxed);
///         Ok(())
///     }
/// }
///
/// let counter = LineCounter::default();
/// counter.write_str("one\ntwo\n")?;
/// assert_eq!(counter.0.load(Ordering::Relaxed), 2);
/// # Ok::<(), io::Error>(())
/// ```
pub trait Sink: Send + Sync {
    /// Writes `text` verbatim.
    fn write_str(&self, text: &str) -> io::Result<()>;

    /// Flushes any data buffered by the sink.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Identity of a shared sink, derived from the address of its allocation.
///
/// Two handles compare equal exactly when they were derived from clones of
/// the same [`Arc`], regardless of whether one of them was coerced into an
/// `Arc<dyn Sink>`.
///
/// An id is unique only while the allocation it was taken from is alive.
/// After the last handle drops, the address can be reused by a new sink
/// that then reports the same id.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SinkId(usize);

impl SinkId {
    /// Returns the identity of the sink behind `sink`.
    #[must_use]
    pub fn of<S: ?Sized>(sink: &Arc<S>) -> Self {
        Self(Arc::as_ptr(sink).cast::<()>().addr())
    }

    /// Returns the raw address backing this identity.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}
