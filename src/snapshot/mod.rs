//! Snapshot store: the live data structure, its highlight sets and the frame history
//!
//! - [`Snapshot`]: the structure being visualized (array, stack, queue, linked list,
//!   hash table, tree)
//! - [`Highlights`]: named id sets recomputed for every step
//! - [`Frame`]: one recorded visual step (snapshot + highlights + counters + log line)
//! - [`FrameHistory`]: bounded history of the last run, used for stepping back and forth

pub mod linear;
pub mod tree;

use crate::log::LogKind;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

pub use linear::{HashEntry, HashTable, LinkedList, ListNode, QueueView, StackView};
pub use tree::{Tree, TreeNode};

/// Stable identity of an element or node. Survives reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElementId(u64);

impl ElementId {
    pub fn new(raw: u64) -> Self {
        ElementId(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing ids for one visualizer instance
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }

    /// Build elements for `values`, each with a fresh id
    pub fn elements(&mut self, values: &[i64]) -> Vec<Element> {
        values
            .iter()
            .map(|&value| Element {
                id: self.next_id(),
                value,
            })
            .collect()
    }
}

/// A value plus the identity used for animation keying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub value: i64,
}

/// Which family of structure a snapshot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Sorting,
    Array,
    Stack,
    Queue,
    LinkedList,
    Hash,
    Tree,
}

impl StructureKind {
    pub const ALL: [StructureKind; 7] = [
        StructureKind::Sorting,
        StructureKind::Array,
        StructureKind::Stack,
        StructureKind::Queue,
        StructureKind::LinkedList,
        StructureKind::Hash,
        StructureKind::Tree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Sorting => "sorting",
            StructureKind::Array => "array",
            StructureKind::Stack => "stack",
            StructureKind::Queue => "queue",
            StructureKind::LinkedList => "linked-list",
            StructureKind::Hash => "hash",
            StructureKind::Tree => "tree",
        }
    }

    /// Parse a family name as typed on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_ascii_lowercase();
        StructureKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .or(match lowered.as_str() {
                "sort" => Some(StructureKind::Sorting),
                "list" | "linkedlist" => Some(StructureKind::LinkedList),
                "hashtable" | "hash-table" => Some(StructureKind::Hash),
                "bst" => Some(StructureKind::Tree),
                _ => None,
            })
    }

    /// Timing family used for the speed → delay mapping
    pub fn timing_family(self) -> TimingFamily {
        match self {
            StructureKind::Sorting => TimingFamily::Sorting,
            StructureKind::Tree => TimingFamily::Tree,
            _ => TimingFamily::Linear,
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three visualizer families, each with its own delay constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingFamily {
    Sorting,
    Linear,
    Tree,
}

/// The live data structure of one visualizer
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Array(Vec<Element>),
    Stack(StackView),
    Queue(QueueView),
    LinkedList(LinkedList),
    Hash(HashTable),
    Tree(Tree),
}

impl Snapshot {
    /// Family name of the variant, used in mismatch errors
    pub fn family(&self) -> &'static str {
        match self {
            Snapshot::Array(_) => "array",
            Snapshot::Stack(_) => "stack",
            Snapshot::Queue(_) => "queue",
            Snapshot::LinkedList(_) => "linked-list",
            Snapshot::Hash(_) => "hash",
            Snapshot::Tree(_) => "tree",
        }
    }

    /// Values in display order; tree nodes are listed in-order
    pub fn values(&self) -> Vec<i64> {
        match self {
            Snapshot::Array(items) => items.iter().map(|e| e.value).collect(),
            Snapshot::Stack(stack) => stack.items.iter().map(|e| e.value).collect(),
            Snapshot::Queue(queue) => queue.items.iter().map(|e| e.value).collect(),
            Snapshot::LinkedList(list) => list.values(),
            Snapshot::Hash(table) => table.entries().map(|entry| entry.key).collect(),
            Snapshot::Tree(tree) => tree
                .in_order()
                .into_iter()
                .filter_map(|id| tree.node(id).map(|n| n.value))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Snapshot::Array(items) => items.len(),
            Snapshot::Stack(stack) => stack.items.len(),
            Snapshot::Queue(queue) => queue.items.len(),
            Snapshot::LinkedList(list) => list.nodes.len(),
            Snapshot::Hash(table) => table.entries().count(),
            Snapshot::Tree(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        let slots = match self {
            Snapshot::Hash(table) => table.buckets.len(),
            _ => self.len(),
        };
        // rough per-element cost including pointers and tree links
        slots * 48
    }
}

impl From<Vec<Element>> for Snapshot {
    fn from(items: Vec<Element>) -> Self {
        Snapshot::Array(items)
    }
}

impl From<StackView> for Snapshot {
    fn from(stack: StackView) -> Self {
        Snapshot::Stack(stack)
    }
}

impl From<QueueView> for Snapshot {
    fn from(queue: QueueView) -> Self {
        Snapshot::Queue(queue)
    }
}

impl From<LinkedList> for Snapshot {
    fn from(list: LinkedList) -> Self {
        Snapshot::LinkedList(list)
    }
}

impl From<HashTable> for Snapshot {
    fn from(table: HashTable) -> Self {
        Snapshot::Hash(table)
    }
}

impl From<Tree> for Snapshot {
    fn from(tree: Tree) -> Self {
        Snapshot::Tree(tree)
    }
}

/// Named sets of ids used purely for rendering emphasis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    /// Sub-range a divide-and-conquer step is working on
    pub range: BTreeSet<ElementId>,
    pub comparing: BTreeSet<ElementId>,
    pub swapping: BTreeSet<ElementId>,
    pub sorted: BTreeSet<ElementId>,
    pub pivot: BTreeSet<ElementId>,
    pub merging: BTreeSet<ElementId>,
    pub visiting: BTreeSet<ElementId>,
    pub found: BTreeSet<ElementId>,
    pub path_nodes: BTreeSet<ElementId>,
    pub path_edges: BTreeSet<(ElementId, ElementId)>,
    /// Visit order, oldest first
    pub visited: Vec<ElementId>,
}

impl Highlights {
    pub fn clear(&mut self) {
        *self = Highlights::default();
    }

    /// Clear the transient focus sets, keeping `sorted` and `visited`
    pub fn clear_focus(&mut self) {
        self.range.clear();
        self.comparing.clear();
        self.swapping.clear();
        self.pivot.clear();
        self.merging.clear();
        self.visiting.clear();
        self.found.clear();
        self.path_nodes.clear();
        self.path_edges.clear();
    }

    pub fn is_empty(&self) -> bool {
        *self == Highlights::default()
    }

    /// Estimate the memory usage of the sets in bytes
    pub fn estimated_size(&self) -> usize {
        let ids = self.range.len()
            + self.comparing.len()
            + self.swapping.len()
            + self.sorted.len()
            + self.pivot.len()
            + self.merging.len()
            + self.visiting.len()
            + self.found.len()
            + self.path_nodes.len()
            + self.path_edges.len() * 2;
        // B-tree nodes carry roughly three words per id
        ids * 24 + self.visited.len() * 8
    }
}

/// Running instrumentation shown next to the visualization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub comparisons: u64,
    pub swaps: u64,
}

/// A log line attached to a frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLog {
    pub message: String,
    pub kind: LogKind,
}

/// One discrete visual step of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub snapshot: Snapshot,
    pub highlights: Highlights,
    pub counters: Counters,
    pub log: Option<FrameLog>,
}

impl Frame {
    /// Estimate the memory usage of this frame in bytes
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Frame>()
            + self.snapshot.estimated_size()
            + self.highlights.estimated_size()
            + self.log.as_ref().map_or(0, |log| log.message.len())
    }
}

/// History of the frames of the last completed run
#[derive(Debug, Default)]
pub struct FrameHistory {
    frames: VecDeque<Frame>,
    max_frames: usize,
}

impl FrameHistory {
    pub fn new(max_frames: usize) -> Self {
        FrameHistory {
            frames: VecDeque::new(),
            max_frames,
        }
    }

    /// Add a frame to history. Frames past the limit are dropped from the front.
    pub fn push(&mut self, frame: Frame) {
        if self.max_frames == 0 {
            return;
        }
        if self.frames.len() == self.max_frames {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    /// Get a frame by index
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn limit(&self) -> usize {
        self.max_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(value: i64) -> Frame {
        Frame {
            snapshot: Snapshot::Array(vec![Element {
                id: ElementId::new(1),
                value,
            }]),
            highlights: Highlights::default(),
            counters: Counters::default(),
            log: None,
        }
    }

    #[test]
    fn test_id_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        let elements = ids.elements(&[4, 4, 2]);
        assert_eq!(elements[0].id.as_u64(), 1);
        assert_eq!(elements[2].id.as_u64(), 3);
        assert_eq!(ids.next_id().as_u64(), 4);
    }

    #[test]
    fn test_history_drops_oldest_past_limit() {
        let mut history = FrameHistory::new(2);
        history.push(frame(1));
        history.push(frame(2));
        history.push(frame(3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).map(|f| f.snapshot.values()), Some(vec![2]));
        assert_eq!(history.get(1).map(|f| f.snapshot.values()), Some(vec![3]));
    }

    #[test]
    fn test_clear_focus_keeps_sorted_and_visited() {
        let mut highlights = Highlights::default();
        highlights.sorted.insert(ElementId::new(1));
        highlights.visited.push(ElementId::new(2));
        highlights.comparing.insert(ElementId::new(3));
        highlights.clear_focus();

        assert!(highlights.comparing.is_empty());
        assert_eq!(highlights.sorted.len(), 1);
        assert_eq!(highlights.visited.len(), 1);
    }

    #[test]
    fn test_structure_kind_from_name() {
        assert_eq!(StructureKind::from_name("Tree"), Some(StructureKind::Tree));
        assert_eq!(StructureKind::from_name("bst"), Some(StructureKind::Tree));
        assert_eq!(
            StructureKind::from_name("linked-list"),
            Some(StructureKind::LinkedList)
        );
        assert_eq!(StructureKind::from_name("graph"), None);
    }
}
