//! Tree drivers: BST insert/search and traversals
//!
//! Traversals are computed eagerly from the tree and then replayed one node
//! per step through a [`TraversalCursor`]; the same cursor backs the manual
//! step-forward/step-back controls.

use super::{Recorder, Trace};
use crate::log::LogKind;
use crate::snapshot::tree::Side;
use crate::snapshot::{ElementId, Highlights, IdAllocator, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    InOrder,
    PreOrder,
    PostOrder,
    LevelOrder,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::InOrder,
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::LevelOrder,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TraversalOrder::InOrder => "In-order",
            TraversalOrder::PreOrder => "Pre-order",
            TraversalOrder::PostOrder => "Post-order",
            TraversalOrder::LevelOrder => "Level-order",
        }
    }

    /// The full visit sequence for `tree`
    pub fn sequence(self, tree: &Tree) -> Vec<ElementId> {
        match self {
            TraversalOrder::InOrder => tree.in_order(),
            TraversalOrder::PreOrder => tree.pre_order(),
            TraversalOrder::PostOrder => tree.post_order(),
            TraversalOrder::LevelOrder => tree.level_order(),
        }
    }
}

/// Position inside a precomputed visit sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalCursor {
    order: TraversalOrder,
    sequence: Vec<ElementId>,
    /// Number of visited nodes; the current node is `sequence[position - 1]`
    position: usize,
}

impl TraversalCursor {
    pub fn new(tree: &Tree, order: TraversalOrder) -> Self {
        TraversalCursor {
            order,
            sequence: order.sequence(tree),
            position: 0,
        }
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    pub fn sequence(&self) -> &[ElementId] {
        &self.sequence
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.position == self.sequence.len()
    }

    pub fn current(&self) -> Option<ElementId> {
        self.position
            .checked_sub(1)
            .and_then(|idx| self.sequence.get(idx).copied())
    }

    pub fn visited(&self) -> &[ElementId] {
        &self.sequence[..self.position]
    }

    /// Visit the next node. `None` at the end of the sequence.
    pub fn step_forward(&mut self) -> Option<ElementId> {
        let next = self.sequence.get(self.position).copied()?;
        self.position += 1;
        Some(next)
    }

    /// Un-visit the current node. Returns the node dropped from `visited`.
    pub fn step_back(&mut self) -> Option<ElementId> {
        let idx = self.position.checked_sub(1)?;
        self.position = idx;
        self.sequence.get(idx).copied()
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Highlights for the current position: the current node, the visited
    /// prefix, and the root-to-current path with its edges
    pub fn highlights(&self, tree: &Tree) -> Highlights {
        let mut highlights = Highlights {
            visited: self.visited().to_vec(),
            ..Highlights::default()
        };
        if let Some(current) = self.current() {
            highlights.visiting.insert(current);
            let path = tree.path_to(current);
            highlights.path_edges = path.windows(2).map(|pair| (pair[0], pair[1])).collect();
            highlights.path_nodes = path.into_iter().collect();
        }
        highlights
    }
}

pub fn traverse(tree: Tree, order: TraversalOrder) -> Trace {
    let mut cursor = TraversalCursor::new(&tree, order);
    let mut rec = Recorder::new(tree);
    rec.step(LogKind::Start, format!("Starting {} traversal", order.name()));

    if cursor.sequence().is_empty() {
        rec.reject("Tree is empty");
        return rec.into_trace();
    }

    while let Some(id) = cursor.step_forward() {
        rec.highlights = cursor.highlights(&rec.state);
        rec.counters.swaps += 1;
        let value = rec.state.node(id).map(|n| n.value).unwrap_or_default();
        rec.step(LogKind::Visit, format!("Visiting {}", value));
    }

    let values: Vec<String> = rec
        .state
        .values_of(cursor.sequence())
        .iter()
        .map(|v| v.to_string())
        .collect();
    rec.finish(
        LogKind::Success,
        format!("{} traversal: {}", order.name(), values.join(" → ")),
    )
}

pub fn bst_insert(tree: Tree, value: i64, ids: &mut IdAllocator) -> Trace {
    let mut rec = Recorder::new(tree);
    rec.step(LogKind::Start, format!("Inserting {} into BST", value));

    match rec.state.root() {
        None => {
            let id = ids.next_id();
            rec.state.set_root(id, value);
            rec.counters.swaps += 1;
            rec.highlights.found.insert(id);
            rec.step(LogKind::Success, format!("Tree was empty, {} is the root", value));
        }
        Some(root) => {
            rec.insert_below(root, value, ids);
        }
    }
    let size = rec.state.len();
    rec.finish(LogKind::Info, format!("Tree has {} nodes", size))
}

pub fn bst_search(tree: Tree, value: i64) -> Trace {
    let mut rec = Recorder::new(tree);
    rec.step(LogKind::Start, format!("Searching BST for {}", value));

    let root = rec.state.root();
    if !rec.search_below(root, value) {
        rec.highlights.clear_focus();
        rec.step(LogKind::Error, format!("{} not found in tree", value));
        return rec.into_trace();
    }
    rec.into_trace()
}

impl Recorder<Tree> {
    /// Highlight `id` as the current node along with its path from the root
    fn focus(&mut self, id: ElementId) {
        let path = self.state.path_to(id);
        self.highlights.visiting.clear();
        self.highlights.visiting.insert(id);
        self.highlights.path_edges = path.windows(2).map(|pair| (pair[0], pair[1])).collect();
        self.highlights.path_nodes = path.into_iter().collect();
    }

    fn insert_below(&mut self, id: ElementId, value: i64, ids: &mut IdAllocator) {
        let Some(node) = self.state.node(id).copied() else {
            return;
        };
        self.focus(id);
        self.counters.comparisons += 1;
        self.step(LogKind::Compare, format!("Comparing {} with {}", value, node.value));

        if value == node.value {
            self.step(LogKind::Warning, format!("{} already exists in the tree", value));
            return;
        }

        let (side, label) = if value < node.value {
            (Side::Left, "left")
        } else {
            (Side::Right, "right")
        };
        let relation = if value < node.value { "<" } else { ">" };
        self.step(
            LogKind::Info,
            format!("{} {} {}, going {}", value, relation, node.value, label),
        );

        match self.state.child(id, side) {
            Some(child) => self.insert_below(child, value, ids),
            None => {
                let new_id = ids.next_id();
                if self.state.attach(id, side, new_id, value) {
                    self.counters.swaps += 1;
                    self.focus(new_id);
                    self.highlights.found.insert(new_id);
                    self.step(
                        LogKind::Success,
                        format!("Inserted {} as the {} child of {}", value, label, node.value),
                    );
                }
            }
        }
    }

    /// Returns true when `value` was found
    fn search_below(&mut self, cursor: Option<ElementId>, value: i64) -> bool {
        let Some(node) = cursor.and_then(|id| self.state.node(id).copied()) else {
            return false;
        };
        self.focus(node.id);
        self.counters.comparisons += 1;
        self.step(LogKind::Compare, format!("Comparing {} with {}", value, node.value));

        if value == node.value {
            self.highlights.found.insert(node.id);
            self.step(LogKind::Found, format!("Found {}", value));
            return true;
        }
        let (side, label) = if value < node.value {
            (Side::Left, "left")
        } else {
            (Side::Right, "right")
        };
        self.step(LogKind::Info, format!("Going {}", label));
        let child = self.state.child(node.id, side);
        self.search_below(child, value)
    }
}
