//! # Event Log
//!
//! The short narrative history shown next to the board. This is game content, not
//! diagnostics; diagnostics go through the `log` crate.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How an event should feel to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogTone {
    Amazing,
    Good,
    Bad,
    Neutral,
}

/// One line of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    pub tone: LogTone,
}

/// Bounded event history, newest first.
///
/// # Examples
///
/// ```
/// use smoothlife::{EventLog, LogTone};
///
/// let mut log = EventLog::new(2);
/// log.post("one", LogTone::Neutral);
/// log.post("two", LogTone::Good);
/// log.post("three", LogTone::Bad);
/// let texts: Vec<_> = log.entries().map(|e| e.text.as_str()).collect();
/// assert_eq!(texts, vec!["three", "two"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Adds an event in front, dropping the oldest once full.
    pub fn post(&mut self, text: impl Into<String>, tone: LogTone) {
        self.entries.push_front(LogEntry {
            text: text.into(),
            tone,
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries from newest to oldest.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
