use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Sink;

/// In-memory sink that accumulates every write into a `String`.
///
/// The buffer is guarded by a mutex, so the sink can be shared between the
/// logger and the code inspecting the captured output.
///
/// # Examples
///
/// ```
/// use scopelog_sink::{MemorySink, Sink};
///
/// let sink = MemorySink::new();
/// sink.write_str("DEBG: Entering parse\n")?;
///
/// assert_eq!(sink.contents(), "DEBG: Entering parse\n");
/// assert_eq!(sink.take(), "DEBG: Entering parse\n");
/// assert!(sink.is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: Mutex<String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, String> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer().clone()
    }

    /// Returns the captured text split into lines, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.buffer().lines().map(str::to_owned).collect()
    }

    /// Removes and returns the captured text, leaving the sink empty.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer())
    }

    /// Discards the captured text.
    pub fn clear(&self) {
        self.buffer().clear();
    }

    /// Returns the number of bytes captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    /// Reports whether nothing has been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }
}

impl Sink for MemorySink {
    fn write_str(&self, text: &str) -> io::Result<()> {
        self.buffer().push_str(text);
        Ok(())
    }
}
