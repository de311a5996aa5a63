//! crates/scopelog/src/registry.rs
//! Destination registry and the broadcaster that fans rendered lines out to it.
//!
//! Entries hold [`Weak`] handles: registering a sink never extends its
//! lifetime. An entry whose sink has been dropped is inert and disappears on
//! the next broadcast.

use std::io;
use std::sync::{Arc, Weak};

use scopelog_sink::{Sink, SinkId};

use crate::levels::{Level, LevelFilter};

/// Snapshot of one registered destination.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DestinationInfo {
    /// Identity of the registered sink.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: SinkId,
    /// Minimum severity delivered to the sink.
    pub threshold: LevelFilter,
    /// Whether the sink is still alive. Dropped sinks are pruned on the next
    /// broadcast.
    pub alive: bool,
    /// Number of writes the sink has rejected.
    pub failures: u64,
}

/// First write failure of a destination, reported after the registry lock
/// has been released.
#[derive(Debug)]
pub(crate) struct WriteFailure {
    pub(crate) id: SinkId,
    pub(crate) error: io::Error,
}

struct Destination {
    id: SinkId,
    sink: Weak<dyn Sink>,
    threshold: LevelFilter,
    failures: u64,
}

#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<Destination>,
}

impl Registry {
    /// Registers `sink`, or updates the threshold if it is already present.
    pub(crate) fn insert(&mut self, sink: &Arc<dyn Sink>, threshold: LevelFilter) -> SinkId {
        let id = SinkId::of(sink);
        if let Some(entry) = self.entry_mut(id) {
            entry.threshold = threshold;
            entry.sink = Arc::downgrade(sink);
        } else {
            self.entries.push(Destination {
                id,
                sink: Arc::downgrade(sink),
                threshold,
                failures: 0,
            });
        }
        id
    }

    pub(crate) fn remove(&mut self, id: SinkId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn contains(&self, id: SinkId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Changes the threshold of a registered destination. Returns `false` when
    /// `id` is not registered.
    pub(crate) fn set_threshold(&mut self, id: SinkId, threshold: LevelFilter) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.threshold = threshold;
                true
            }
            None => false,
        }
    }

    pub(crate) fn threshold(&self, id: SinkId) -> Option<LevelFilter> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.threshold)
    }

    /// Most verbose threshold across all destinations, [`LevelFilter::Off`]
    /// when nothing is registered.
    pub(crate) fn most_verbose(&self) -> LevelFilter {
        self.entries
            .iter()
            .map(|entry| entry.threshold)
            .min()
            .unwrap_or(LevelFilter::Off)
    }

    /// Writes `text` to every destination admitting `level`.
    ///
    /// Failures never interrupt delivery. Each destination's first failure is
    /// returned so the caller can report it once.
    pub(crate) fn broadcast(&mut self, level: Level, text: &str) -> Vec<WriteFailure> {
        let mut first_failures = Vec::new();
        self.entries.retain_mut(|entry| {
            let Some(sink) = entry.sink.upgrade() else {
                return false;
            };
            if entry.threshold.admits(level) {
                if let Err(error) = sink.write_str(text) {
                    entry.failures = entry.failures.saturating_add(1);
                    if entry.failures == 1 {
                        first_failures.push(WriteFailure { id: entry.id, error });
                    }
                }
            }
            true
        });
        first_failures
    }

    /// Flushes every live destination, ignoring failures.
    pub(crate) fn flush(&self) {
        for sink in self.entries.iter().filter_map(|entry| entry.sink.upgrade()) {
            let _ = sink.flush();
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<DestinationInfo> {
        self.entries
            .iter()
            .map(|entry| DestinationInfo {
                id: entry.id,
                threshold: entry.threshold,
                alive: entry.sink.strong_count() > 0,
                failures: entry.failures,
            })
            .collect()
    }

    fn entry_mut(&mut self, id: SinkId) -> Option<&mut Destination> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }
}
