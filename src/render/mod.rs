//! Pure rendering model
//!
//! Maps a [`Snapshot`] and its [`Highlights`] to a [`Drawing`]: labelled cells,
//! pointer markers and a tree layout, each cell carrying a [`Tone`]. The
//! terminal panes only translate tones to colours. Nothing here mutates state.

use crate::snapshot::{ElementId, Highlights, Snapshot, Tree};
use rustc_hash::FxHashMap;

/// Visual emphasis of one element, from strongest to weakest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tone {
    Sorted,
    Found,
    Swapping,
    Pivot,
    Comparing,
    Merging,
    Visiting,
    Path,
    Visited,
    Range,
    Normal,
}

/// Tone of `id` under the fixed precedence order
pub fn tone_for(id: ElementId, highlights: &Highlights) -> Tone {
    if highlights.sorted.contains(&id) {
        Tone::Sorted
    } else if highlights.found.contains(&id) {
        Tone::Found
    } else if highlights.swapping.contains(&id) {
        Tone::Swapping
    } else if highlights.pivot.contains(&id) {
        Tone::Pivot
    } else if highlights.comparing.contains(&id) {
        Tone::Comparing
    } else if highlights.merging.contains(&id) {
        Tone::Merging
    } else if highlights.visiting.contains(&id) {
        Tone::Visiting
    } else if highlights.path_nodes.contains(&id) {
        Tone::Path
    } else if highlights.visited.contains(&id) {
        Tone::Visited
    } else if highlights.range.contains(&id) {
        Tone::Range
    } else {
        Tone::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: ElementId,
    pub label: String,
    pub tone: Tone,
    /// Pointer names attached to this cell (`top`, `front`, `rear`, `head`)
    pub markers: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub index: usize,
    pub entry: Option<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedNode {
    pub cell: Cell,
    pub depth: usize,
    /// In-order rank; distinct per node so columns never collide
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedEdge {
    pub from: ElementId,
    pub to: ElementId,
    pub on_path: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeLayout {
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<PlacedEdge>,
    pub depth: usize,
}

impl TreeLayout {
    pub fn node(&self, id: ElementId) -> Option<&PlacedNode> {
        self.nodes.iter().find(|n| n.cell.id == id)
    }
}

/// Drawable form of one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drawing {
    /// Array, stack (bottom → top) or queue (front → rear)
    Sequence(Vec<Cell>),
    Chain(Vec<Cell>),
    Buckets(Vec<Bucket>),
    Tree(TreeLayout),
}

pub fn draw(snapshot: &Snapshot, highlights: &Highlights) -> Drawing {
    match snapshot {
        Snapshot::Array(items) => Drawing::Sequence(
            items
                .iter()
                .map(|e| cell(e.id, e.value.to_string(), highlights))
                .collect(),
        ),
        Snapshot::Stack(stack) => Drawing::Sequence(
            stack
                .items
                .iter()
                .enumerate()
                .map(|(idx, e)| {
                    let mut c = cell(e.id, e.value.to_string(), highlights);
                    if idx as i64 == stack.top {
                        c.markers.push("top");
                    }
                    c
                })
                .collect(),
        ),
        Snapshot::Queue(queue) => Drawing::Sequence(
            queue
                .items
                .iter()
                .enumerate()
                .map(|(idx, e)| {
                    let mut c = cell(e.id, e.value.to_string(), highlights);
                    if idx as i64 == queue.front {
                        c.markers.push("front");
                    }
                    if idx as i64 == queue.rear {
                        c.markers.push("rear");
                    }
                    c
                })
                .collect(),
        ),
        Snapshot::LinkedList(list) => Drawing::Chain(
            list.nodes
                .iter()
                .enumerate()
                .map(|(idx, n)| {
                    let mut c = cell(n.id, n.value.to_string(), highlights);
                    if idx == 0 {
                        c.markers.push("head");
                    }
                    c
                })
                .collect(),
        ),
        Snapshot::Hash(table) => Drawing::Buckets(
            table
                .buckets
                .iter()
                .enumerate()
                .map(|(index, slot)| Bucket {
                    index,
                    entry: slot
                        .as_ref()
                        .map(|e| cell(e.id, format!("{}: {}", e.key, e.value), highlights)),
                })
                .collect(),
        ),
        Snapshot::Tree(tree) => Drawing::Tree(layout_tree(tree, highlights)),
    }
}

fn cell(id: ElementId, label: String, highlights: &Highlights) -> Cell {
    Cell {
        id,
        label,
        tone: tone_for(id, highlights),
        markers: Vec::new(),
    }
}

/// Place nodes by in-order rank (column) and depth (row)
pub fn layout_tree(tree: &Tree, highlights: &Highlights) -> TreeLayout {
    let columns: FxHashMap<ElementId, usize> = tree
        .in_order()
        .into_iter()
        .enumerate()
        .map(|(column, id)| (id, column))
        .collect();

    let mut layout = TreeLayout::default();
    let mut stack: Vec<(ElementId, usize)> = tree.root().map(|r| (r, 0)).into_iter().collect();
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.node(id) else { continue };
        layout.depth = layout.depth.max(depth + 1);
        layout.nodes.push(PlacedNode {
            cell: cell(id, node.value.to_string(), highlights),
            depth,
            column: columns.get(&id).copied().unwrap_or_default(),
        });
        for child in [node.right, node.left].into_iter().flatten() {
            layout.edges.push(PlacedEdge {
                from: id,
                to: child,
                on_path: highlights.path_edges.contains(&(id, child)),
            });
            stack.push((child, depth + 1));
        }
    }
    layout.nodes.sort_by_key(|n| (n.depth, n.column));
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{IdAllocator, QueueView, StackView};

    #[test]
    fn test_sorted_wins_over_comparing() {
        let id = ElementId::new(3);
        let mut highlights = Highlights::default();
        highlights.comparing.insert(id);
        assert_eq!(tone_for(id, &highlights), Tone::Comparing);
        highlights.sorted.insert(id);
        assert_eq!(tone_for(id, &highlights), Tone::Sorted);
        assert_eq!(tone_for(ElementId::new(4), &highlights), Tone::Normal);
    }

    #[test]
    fn test_draw_does_not_touch_highlights() {
        let mut ids = IdAllocator::new();
        let snapshot = Snapshot::Array(ids.elements(&[1, 2]));
        let mut highlights = Highlights::default();
        highlights.pivot.insert(ElementId::new(2));
        let before = highlights.clone();

        let Drawing::Sequence(cells) = draw(&snapshot, &highlights) else {
            panic!("Expected sequence drawing");
        };
        assert_eq!(cells[1].tone, Tone::Pivot);
        assert_eq!(highlights, before);
    }

    #[test]
    fn test_pointer_markers() {
        let mut ids = IdAllocator::new();
        let stack = Snapshot::Stack(StackView::new(ids.elements(&[1, 2, 3])));
        let Drawing::Sequence(cells) = draw(&stack, &Highlights::default()) else {
            panic!("Expected sequence drawing");
        };
        assert_eq!(cells[2].markers, vec!["top"]);

        let queue = Snapshot::Queue(QueueView::new(ids.elements(&[4])));
        let Drawing::Sequence(cells) = draw(&queue, &Highlights::default()) else {
            panic!("Expected sequence drawing");
        };
        assert_eq!(cells[0].markers, vec!["front", "rear"]);
    }

    #[test]
    fn test_tree_layout_columns_follow_in_order() {
        let mut ids = IdAllocator::new();
        let tree = Tree::bst_from_values(&[50, 30, 70, 20], &mut ids);
        let layout = layout_tree(&tree, &Highlights::default());

        assert_eq!(layout.depth, 3);
        assert_eq!(layout.edges.len(), 3);
        let root = layout.node(tree.root().unwrap()).unwrap();
        assert_eq!((root.depth, root.column), (0, 2));
        let labels: Vec<&str> = layout.nodes.iter().map(|n| n.cell.label.as_str()).collect();
        assert_eq!(labels, vec!["50", "30", "70", "20"]);
    }
}
