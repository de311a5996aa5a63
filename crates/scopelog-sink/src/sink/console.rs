use std::io::{self, Write};

use super::Sink;

/// Standard stream targeted by a [`ConsoleSink`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConsoleStream {
    /// The process's standard output.
    Stdout,
    /// The process's standard error.
    Stderr,
}

/// Sink that writes to one of the process's standard streams.
///
/// Each write takes the stream's lock for the duration of the call so lines
/// produced by different threads never interleave. Standard error is
/// unbuffered; standard output is flushed after every write so that text is
/// visible even if the process exits without running destructors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    /// Creates a sink for `stream`.
    #[must_use]
    pub const fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    /// Creates a sink for standard error.
    #[must_use]
    pub const fn stderr() -> Self {
        Self::new(ConsoleStream::Stderr)
    }

    /// Creates a sink for standard output.
    #[must_use]
    pub const fn stdout() -> Self {
        Self::new(ConsoleStream::Stdout)
    }

    /// Returns the stream this sink writes to.
    #[must_use]
    pub const fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Sink for ConsoleSink {
    fn write_str(&self, text: &str) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => {
                let mut handle = io::stdout().lock();
                handle.write_all(text.as_bytes())?;
                handle.flush()
            }
            ConsoleStream::Stderr => io::stderr().lock().write_all(text.as_bytes()),
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().lock().flush(),
            ConsoleStream::Stderr => io::stderr().lock().flush(),
        }
    }
}
