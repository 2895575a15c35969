//! Algorithm drivers
//!
//! A driver runs a textbook algorithm over a working copy of the live
//! snapshot and records every visual step as a [`Frame`]. Drivers never
//! sleep and never touch the live state; the engine plays the recorded
//! [`Trace`] back through the scheduler.
//!
//! - [`sorting`]: bubble, selection, insertion, quick, merge, heap, counting, bucket
//! - [`linear`]: array, stack, queue, linked list and hash table operations
//! - [`tree`]: BST insert/search and the four traversals
//!
//! Invalid parameters (out-of-range index, empty structure) produce a trace
//! whose only frames are the start line and one `error` line, with the
//! snapshot untouched. A recording that outgrows [`MAX_TRACE_MEMORY`] is
//! refused as a whole with [`VizError::TraceTooLarge`].

pub mod linear;
pub mod sorting;
pub mod tree;

use crate::engine::errors::VizError;
use crate::log::LogKind;
use crate::snapshot::{
    Counters, Element, ElementId, Frame, FrameLog, Highlights, IdAllocator, Snapshot,
    StructureKind,
};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

pub use linear::ListPosition;
pub use sorting::SortAlgorithm;
pub use tree::{TraversalCursor, TraversalOrder};

/// Memory a single recorded trace may take before recording is refused
pub const MAX_TRACE_MEMORY: usize = 32 * 1024 * 1024;

/// Descriptor of the algorithm a visualizer page was opened for
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub complexity: String,
    pub difficulty: String,
}

impl AlgorithmInfo {
    pub fn new(name: &str, complexity: &str, difficulty: &str) -> Self {
        AlgorithmInfo {
            name: name.to_string(),
            complexity: complexity.to_string(),
            difficulty: difficulty.to_string(),
        }
    }

    /// Structure family the descriptor selects
    pub fn family(&self) -> StructureKind {
        let name = self.name.to_ascii_lowercase();
        if name.contains("sort") {
            StructureKind::Sorting
        } else if name.contains("tree") || name.contains("bst") || name.contains("traversal") {
            StructureKind::Tree
        } else if name.contains("stack") {
            StructureKind::Stack
        } else if name.contains("queue") {
            StructureKind::Queue
        } else if name.contains("linked") || name.contains("list") {
            StructureKind::LinkedList
        } else if name.contains("hash") {
            StructureKind::Hash
        } else {
            StructureKind::Array
        }
    }

    /// Sorting algorithm named by the descriptor, if any
    pub fn sort_algorithm(&self) -> Option<SortAlgorithm> {
        let name = self.name.to_ascii_lowercase();
        SortAlgorithm::ALL
            .into_iter()
            .find(|algo| name.contains(algo.key()))
    }

    /// Descriptor shown when a family is opened without one
    pub fn default_for(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Sorting => SortAlgorithm::Bubble.info(),
            StructureKind::Array => AlgorithmInfo::new("Array", "O(n)", "Easy"),
            StructureKind::Stack => AlgorithmInfo::new("Stack", "O(1)", "Easy"),
            StructureKind::Queue => AlgorithmInfo::new("Queue", "O(1)", "Easy"),
            StructureKind::LinkedList => AlgorithmInfo::new("Linked List", "O(n)", "Easy"),
            StructureKind::Hash => AlgorithmInfo::new("Hash Table", "O(1)", "Medium"),
            StructureKind::Tree => AlgorithmInfo::new("Binary Search Tree", "O(h)", "Medium"),
        }
    }
}

/// Every operation a visualizer can animate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Sort(SortAlgorithm),
    ArrayInsert { value: i64, index: i64 },
    ArrayDelete { index: i64 },
    ArraySearch { value: i64 },
    StackPush { value: i64 },
    StackPop,
    Enqueue { value: i64 },
    Dequeue,
    ListInsert { value: i64, position: ListPosition },
    ListDelete { value: i64 },
    HashInsert { key: i64, value: String },
    BstInsert { value: i64 },
    BstSearch { value: i64 },
    Traverse(TraversalOrder),
}

impl Operation {
    /// Family name of the snapshot this operation runs on
    pub fn expected_family(&self) -> &'static str {
        match self {
            Operation::Sort(_)
            | Operation::ArrayInsert { .. }
            | Operation::ArrayDelete { .. }
            | Operation::ArraySearch { .. } => "array",
            Operation::StackPush { .. } | Operation::StackPop => "stack",
            Operation::Enqueue { .. } | Operation::Dequeue => "queue",
            Operation::ListInsert { .. } | Operation::ListDelete { .. } => "linked-list",
            Operation::HashInsert { .. } => "hash",
            Operation::BstInsert { .. } | Operation::BstSearch { .. } | Operation::Traverse(_) => {
                "tree"
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Sort(algo) => write!(f, "{}", algo.name()),
            Operation::ArrayInsert { value, index } => write!(f, "insert {} at {}", value, index),
            Operation::ArrayDelete { index } => write!(f, "delete index {}", index),
            Operation::ArraySearch { value } => write!(f, "search {}", value),
            Operation::StackPush { value } => write!(f, "push {}", value),
            Operation::StackPop => write!(f, "pop"),
            Operation::Enqueue { value } => write!(f, "enqueue {}", value),
            Operation::Dequeue => write!(f, "dequeue"),
            Operation::ListInsert { value, position } => {
                write!(f, "insert {} at {}", value, position)
            }
            Operation::ListDelete { value } => write!(f, "delete {}", value),
            Operation::HashInsert { key, value } => write!(f, "insert ({}, {})", key, value),
            Operation::BstInsert { value } => write!(f, "BST insert {}", value),
            Operation::BstSearch { value } => write!(f, "BST search {}", value),
            Operation::Traverse(order) => write!(f, "{} traversal", order.name()),
        }
    }
}

/// The recorded frames of one operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub frames: Vec<Frame>,
    /// Memory limit the recording ran into; frames past it were not captured
    pub exceeded: Option<usize>,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot after the last step
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.frames.last().map(|frame| &frame.snapshot)
    }

    /// Log lines in recording order
    pub fn logs(&self) -> impl Iterator<Item = &FrameLog> {
        self.frames.iter().filter_map(|frame| frame.log.as_ref())
    }

    pub fn count_kind(&self, kind: LogKind) -> usize {
        self.logs().filter(|log| log.kind == kind).count()
    }
}

/// Working state of a driver plus the frames captured so far
#[derive(Debug)]
pub struct Recorder<S> {
    pub state: S,
    pub highlights: Highlights,
    pub counters: Counters,
    frames: Vec<Frame>,
    memory: usize,
    memory_limit: usize,
    exceeded: bool,
}

impl<S: Clone + Into<Snapshot>> Recorder<S> {
    pub fn new(state: S) -> Self {
        Self::with_memory_limit(state, MAX_TRACE_MEMORY)
    }

    pub fn with_memory_limit(state: S, memory_limit: usize) -> Self {
        Recorder {
            state,
            highlights: Highlights::default(),
            counters: Counters::default(),
            frames: Vec::new(),
            memory: 0,
            memory_limit,
            exceeded: false,
        }
    }

    /// Capture the current state with a log line
    pub fn step(&mut self, kind: LogKind, message: impl Into<String>) {
        self.push_frame(Some(FrameLog {
            message: message.into(),
            kind,
        }));
    }

    /// Capture the current state without a log line
    pub fn frame(&mut self) {
        self.push_frame(None);
    }

    /// Once the memory limit is hit, every later frame is dropped; the driver
    /// still runs to completion but nothing more is cloned.
    fn push_frame(&mut self, log: Option<FrameLog>) {
        if self.exceeded {
            return;
        }
        let frame = Frame {
            snapshot: self.state.clone().into(),
            highlights: self.highlights.clone(),
            counters: self.counters,
            log,
        };
        let frame_size = frame.estimated_size();
        if self.memory + frame_size > self.memory_limit {
            self.exceeded = true;
            self.frames = Vec::new();
            return;
        }
        self.memory += frame_size;
        self.frames.push(frame);
    }

    /// Validation failure: one error line, state untouched
    pub fn reject(&mut self, message: impl Into<String>) {
        self.highlights.clear_focus();
        self.step(LogKind::Error, message);
    }

    /// Clear the focus sets and record the closing line
    pub fn finish(mut self, kind: LogKind, message: impl Into<String>) -> Trace {
        self.highlights.clear_focus();
        self.step(kind, message);
        self.into_trace()
    }

    pub fn into_trace(self) -> Trace {
        Trace {
            frames: self.frames,
            exceeded: self.exceeded.then_some(self.memory_limit),
        }
    }
}

/// Ids of the elements at `positions`, skipping out-of-range ones
pub(crate) fn ids_at(items: &[Element], positions: &[usize]) -> BTreeSet<ElementId> {
    positions
        .iter()
        .filter_map(|&idx| items.get(idx).map(|e| e.id))
        .collect()
}

/// Record `operation` against `snapshot`. New elements draw ids from `ids`.
pub fn record(
    operation: &Operation,
    snapshot: &Snapshot,
    ids: &mut IdAllocator,
) -> Result<Trace, VizError> {
    let trace = match (operation, snapshot) {
        (Operation::Sort(algo), Snapshot::Array(items)) => sorting::run(*algo, items.clone()),
        (Operation::ArrayInsert { value, index }, Snapshot::Array(items)) => {
            linear::array_insert(items.clone(), *value, *index, ids)
        }
        (Operation::ArrayDelete { index }, Snapshot::Array(items)) => {
            linear::array_delete(items.clone(), *index)
        }
        (Operation::ArraySearch { value }, Snapshot::Array(items)) => {
            linear::array_search(items.clone(), *value)
        }
        (Operation::StackPush { value }, Snapshot::Stack(stack)) => {
            linear::stack_push(stack.clone(), *value, ids)
        }
        (Operation::StackPop, Snapshot::Stack(stack)) => linear::stack_pop(stack.clone()),
        (Operation::Enqueue { value }, Snapshot::Queue(queue)) => {
            linear::enqueue(queue.clone(), *value, ids)
        }
        (Operation::Dequeue, Snapshot::Queue(queue)) => linear::dequeue(queue.clone()),
        (Operation::ListInsert { value, position }, Snapshot::LinkedList(list)) => {
            linear::list_insert(list.clone(), *value, *position, ids)
        }
        (Operation::ListDelete { value }, Snapshot::LinkedList(list)) => {
            linear::list_delete(list.clone(), *value)
        }
        (Operation::HashInsert { key, value }, Snapshot::Hash(table)) => {
            linear::hash_insert(table.clone(), *key, value, ids)
        }
        (Operation::BstInsert { value }, Snapshot::Tree(t)) => tree::bst_insert(t.clone(), *value, ids),
        (Operation::BstSearch { value }, Snapshot::Tree(t)) => tree::bst_search(t.clone(), *value),
        (Operation::Traverse(order), Snapshot::Tree(t)) => tree::traverse(t.clone(), *order),
        (op, snapshot) => {
            return Err(VizError::WrongStructure {
                expected: op.expected_family(),
                got: snapshot.family(),
            })
        }
    };
    match trace.exceeded {
        Some(limit) => Err(VizError::TraceTooLarge { limit }),
        None => Ok(trace),
    }
}
