// Operation log shown next to the visualization

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

/// Default number of retained entries
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// Category of a log entry, drives its colour in the log pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Start,
    Compare,
    Swap,
    Info,
    Found,
    Error,
    Warning,
    Success,
    Visit,
}

impl LogKind {
    pub fn label(self) -> &'static str {
        match self {
            LogKind::Start => "start",
            LogKind::Compare => "compare",
            LogKind::Swap => "swap",
            LogKind::Info => "info",
            LogKind::Found => "found",
            LogKind::Error => "error",
            LogKind::Warning => "warning",
            LogKind::Success => "success",
            LogKind::Visit => "visit",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One timestamped log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: u64,
    pub message: String,
    pub kind: LogKind,
    /// Time since the recorder was created
    pub timestamp: Duration,
    pub step_index: usize,
}

/// Append-only log bounded to the most recent `capacity` entries
#[derive(Debug, Clone)]
pub struct LogRecorder {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
    step_index: usize,
    epoch: Instant,
}

impl LogRecorder {
    pub fn new(capacity: usize) -> Self {
        LogRecorder {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 1,
            step_index: 0,
            epoch: Instant::now(),
        }
    }

    /// Record the step counter stamped onto subsequent entries
    pub fn set_step(&mut self, step_index: usize) {
        self.step_index = step_index;
    }

    /// Append an entry, evicting the oldest ones past capacity
    pub fn add(&mut self, message: impl Into<String>, kind: LogKind) {
        if self.capacity == 0 {
            return;
        }
        let entry = LogEntry {
            id: self.next_id,
            message: message.into(),
            kind,
            timestamp: self.epoch.elapsed(),
            step_index: self.step_index,
        };
        self.next_id += 1;
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.step_index = 0;
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_kind(&self, kind: LogKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

impl Default for LogRecorder {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
