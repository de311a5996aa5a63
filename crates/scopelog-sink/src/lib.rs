#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/scopelog-sink/src/lib.rs
//!
//! # Overview
//!
//! `scopelog-sink` provides the output destinations that the `scopelog`
//! logger broadcasts rendered lines into. A destination is anything that can
//! accept a block of text: the process console, a log file, an arbitrary
//! [`std::io::Write`] implementor, or an in-memory capture buffer.
//!
//! # Design
//!
//! The crate exposes the [`Sink`] capability trait together with four
//! implementations:
//!
//! - [`ConsoleSink`] writes to standard output or standard error.
//! - [`WriterSink`] serialises access to any [`std::io::Write`] target.
//! - [`FileSink`] is a [`WriterSink`] over a [`std::fs::File`] that remembers
//!   the path it was opened from.
//! - [`MemorySink`] accumulates text in a `String`, which makes it the sink of
//!   choice for tests and for callers that post-process captured output.
//!
//! Sinks are shared through [`std::sync::Arc`]. The logger identifies a sink by
//! the address of its allocation, exposed as a [`SinkId`], so registering the
//! same `Arc` twice refers to the same destination.
//!
//! # Invariants
//!
//! - Every sink is `Send + Sync`; concurrent writes are serialised inside the
//!   sink so a single line is never interleaved with another.
//! - Sinks never append terminators or prefixes. The text handed to
//!   [`Sink::write_str`] is written verbatim.
//!
//! # Errors
//!
//! Write and flush operations surface [`std::io::Error`] values from the
//! underlying target. The logger treats such failures as local to the sink.
//!
//! # Examples
//!
//! Capture two lines and inspect them:
//!
//! ```
//! use scopelog_sink::{MemorySink, Sink};
//!
//! let sink = MemorySink::new();
//! sink.write_str("INFO: first\n")?;
//! sink.write_str("WARN: second\n")?;
//!
//! assert_eq!(sink.lines(), vec!["INFO: first", "WARN: second"]);
//! # Ok::<(), std::io::Error>(())
//! ```

mod sink;

pub use sink::{ConsoleSink, ConsoleStream, FileSink, MemorySink, Sink, SinkId, WriterSink};
