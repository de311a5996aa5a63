use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Sink;

/// Sink that serialises writes into an [`io::Write`] target.
///
/// The writer lives behind a mutex so the sink can be registered with a
/// shared logger while the owner keeps a handle for inspection. Writes are
/// passed through unchanged; no buffering is added on top of whatever the
/// wrapped writer does.
///
/// # Examples
///
/// ```
/// use scopelog_sink::{Sink, WriterSink};
///
/// let sink = WriterSink::new(Vec::new());
/// sink.write_str("WARN: disk nearly full\n")?;
///
/// let bytes = sink.into_inner();
/// assert_eq!(bytes, b"WARN: disk nearly full\n".to_vec());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Default)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W> WriterSink<W> {
    /// Wraps `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the wrapped writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock())
    }

    /// Replaces the wrapped writer, returning the previous one.
    ///
    /// Text written before the swap stays in the returned writer, which lets
    /// callers redirect a registered sink (for example from a temporary buffer
    /// to a file) without deregistering it.
    #[must_use = "the returned writer holds the text written before the replacement"]
    pub fn replace_writer(&self, mut writer: W) -> W {
        mem::swap(&mut *self.lock(), &mut writer);
        writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W> fmt::Debug for WriterSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("writer", &*self.lock())
            .finish()
    }
}

impl<W> Sink for WriterSink<W>
where
    W: Write + Send,
{
    fn write_str(&self, text: &str) -> io::Result<()> {
        self.lock().write_all(text.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        self.lock().flush()
    }
}

/// Sink that writes to a file on disk.
///
/// Writes go straight to the file descriptor without an intermediate buffer,
/// so every line is on disk (in the OS page cache) once the log call returns.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    inner: WriterSink<File>,
}

impl FileSink {
    /// Creates `path`, truncating any existing content.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Ok(Self::from_parts(path, file))
    }

    /// Opens `path` for appending, creating it when absent.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_parts(path, file))
    }

    fn from_parts(path: &Path, file: File) -> Self {
        Self {
            path: path.to_path_buf(),
            inner: WriterSink::new(file),
        }
    }

    /// Returns the path the sink was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the sink and returns the open file.
    #[must_use]
    pub fn into_file(self) -> File {
        self.inner.into_inner()
    }
}

impl Sink for FileSink {
    fn write_str(&self, text: &str) -> io::Result<()> {
        self.inner.write_str(text)
    }

    fn flush(&self) -> io::Result<()> {
        Sink::flush(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn writer_sink_passes_text_through() {
        let sink = WriterSink::new(Vec::new());
        sink.write_str("one\n").expect("write succeeds");
        sink.write_str("two\n").expect("write succeeds");

        assert_eq!(sink.into_inner(), b"one\ntwo\n".to_vec());
    }

    #[test]
    fn with_writer_exposes_current_state() {
        let sink = WriterSink::new(Vec::new());
        sink.write_str("abc").expect("write succeeds");

        let len = sink.with_writer(|buffer| buffer.len());
        assert_eq!(len, 3);
    }

    #[test]
    fn replace_writer_returns_previous_output() {
        let sink = WriterSink::new(Vec::new());
        sink.write_str("before").expect("write succeeds");

        let previous = sink.replace_writer(Vec::new());
        sink.write_str("after").expect("write succeeds");

        assert_eq!(previous, b"before".to_vec());
        assert_eq!(sink.into_inner(), b"after".to_vec());
    }

    #[test]
    fn writer_errors_surface_to_caller() {
        let sink = WriterSink::new(BrokenPipe);

        let error = sink.write_str("lost").expect_err("write fails");
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
        assert!(Sink::flush(&sink).is_err());
    }

    #[test]
    fn debug_shows_wrapped_writer() {
        let sink = WriterSink::new(Vec::<u8>::new());
        let rendered = format!("{sink:?}");
        assert!(rendered.contains("WriterSink"));
    }
}
