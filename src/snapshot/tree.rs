//! Binary tree arena
//!
//! Nodes live in an id-keyed map and point at their children by id. Nodes are
//! only ever attached under an empty child slot, so the structure cannot form
//! a cycle.

use super::{ElementId, IdAllocator};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    pub id: ElementId,
    pub value: i64,
    pub left: Option<ElementId>,
    pub right: Option<ElementId>,
}

/// Which child slot of a parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    nodes: FxHashMap<ElementId, TreeNode>,
    root: Option<ElementId>,
}

impl Tree {
    pub fn new() -> Self {
        Tree::default()
    }

    /// Build a BST by inserting `values` in order; duplicates are skipped
    pub fn bst_from_values(values: &[i64], ids: &mut IdAllocator) -> Self {
        let mut tree = Tree::new();
        for &value in values {
            let mut cursor = tree.root;
            let mut slot = None;
            let mut duplicate = false;
            while let Some(id) = cursor {
                let Some(node) = tree.node(id) else { break };
                if value == node.value {
                    duplicate = true;
                    break;
                }
                let side = if value < node.value { Side::Left } else { Side::Right };
                slot = Some((id, side));
                cursor = tree.child(id, side);
            }
            if duplicate {
                continue;
            }
            let id = ids.next_id();
            match slot {
                Some((parent, side)) => {
                    tree.attach(parent, side, id, value);
                }
                None => tree.set_root(id, value),
            }
        }
        tree
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn node(&self, id: ElementId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn child(&self, id: ElementId, side: Side) -> Option<ElementId> {
        self.node(id).and_then(|node| match side {
            Side::Left => node.left,
            Side::Right => node.right,
        })
    }

    /// Replace the whole tree with a single root node
    pub fn set_root(&mut self, id: ElementId, value: i64) {
        self.nodes.clear();
        self.nodes.insert(
            id,
            TreeNode {
                id,
                value,
                left: None,
                right: None,
            },
        );
        self.root = Some(id);
    }

    /// Attach a new leaf under an empty child slot. Returns false if the
    /// parent is missing or the slot is taken.
    pub fn attach(&mut self, parent: ElementId, side: Side, id: ElementId, value: i64) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return false;
        };
        let slot = match side {
            Side::Left => &mut parent_node.left,
            Side::Right => &mut parent_node.right,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(id);
        self.nodes.insert(
            id,
            TreeNode {
                id,
                value,
                left: None,
                right: None,
            },
        );
        true
    }

    /// Find the first node holding `value` in level order
    pub fn find_value(&self, value: i64) -> Option<ElementId> {
        self.level_order()
            .into_iter()
            .find(|id| self.node(*id).is_some_and(|n| n.value == value))
    }

    pub fn values_of(&self, ids: &[ElementId]) -> Vec<i64> {
        ids.iter()
            .filter_map(|id| self.node(*id).map(|n| n.value))
            .collect()
    }

    pub fn in_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.len());
        self.in_order_from(self.root, &mut out);
        out
    }

    fn in_order_from(&self, cursor: Option<ElementId>, out: &mut Vec<ElementId>) {
        if let Some(node) = cursor.and_then(|id| self.node(id)) {
            self.in_order_from(node.left, out);
            out.push(node.id);
            self.in_order_from(node.right, out);
        }
    }

    pub fn pre_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.len());
        self.pre_order_from(self.root, &mut out);
        out
    }

    fn pre_order_from(&self, cursor: Option<ElementId>, out: &mut Vec<ElementId>) {
        if let Some(node) = cursor.and_then(|id| self.node(id)) {
            out.push(node.id);
            self.pre_order_from(node.left, out);
            self.pre_order_from(node.right, out);
        }
    }

    pub fn post_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.len());
        self.post_order_from(self.root, &mut out);
        out
    }

    fn post_order_from(&self, cursor: Option<ElementId>, out: &mut Vec<ElementId>) {
        if let Some(node) = cursor.and_then(|id| self.node(id)) {
            self.post_order_from(node.left, out);
            self.post_order_from(node.right, out);
            out.push(node.id);
        }
    }

    pub fn level_order(&self) -> Vec<ElementId> {
        let mut out = Vec::with_capacity(self.len());
        let mut queue: VecDeque<ElementId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            if let Some(node) = self.node(id) {
                out.push(id);
                queue.extend(node.left);
                queue.extend(node.right);
            }
        }
        out
    }

    /// Node ids from the root down to `target`, inclusive. Empty if absent.
    pub fn path_to(&self, target: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        if self.path_from(self.root, target, &mut path) {
            path
        } else {
            Vec::new()
        }
    }

    fn path_from(&self, cursor: Option<ElementId>, target: ElementId, path: &mut Vec<ElementId>) -> bool {
        let Some(node) = cursor.and_then(|id| self.node(id)) else {
            return false;
        };
        path.push(node.id);
        if node.id == target
            || self.path_from(node.left, target, path)
            || self.path_from(node.right, target, path)
        {
            return true;
        }
        path.pop();
        false
    }

    /// Number of levels; 0 for an empty tree
    pub fn height(&self) -> usize {
        self.height_from(self.root)
    }

    fn height_from(&self, cursor: Option<ElementId>) -> usize {
        match cursor.and_then(|id| self.node(id)) {
            Some(node) => 1 + self.height_from(node.left).max(self.height_from(node.right)),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        let mut ids = IdAllocator::new();
        Tree::bst_from_values(&[50, 30, 70, 20, 40, 60, 80], &mut ids)
    }

    #[test]
    fn test_textbook_orders() {
        let tree = sample();
        assert_eq!(tree.values_of(&tree.in_order()), vec![20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.values_of(&tree.pre_order()), vec![50, 30, 20, 40, 70, 60, 80]);
        assert_eq!(tree.values_of(&tree.post_order()), vec![20, 40, 30, 60, 80, 70, 50]);
        assert_eq!(tree.values_of(&tree.level_order()), vec![50, 30, 70, 20, 40, 60, 80]);
    }

    #[test]
    fn test_path_to_leaf() {
        let tree = sample();
        let leaf = tree.find_value(60).unwrap();
        assert_eq!(tree.values_of(&tree.path_to(leaf)), vec![50, 70, 60]);
        assert!(tree.path_to(ElementId::new(999)).is_empty());
    }

    #[test]
    fn test_attach_refuses_taken_slot() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        assert!(!tree.attach(root, Side::Left, ElementId::new(100), 10));
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_duplicates_are_skipped_on_build() {
        let mut ids = IdAllocator::new();
        let tree = Tree::bst_from_values(&[5, 5, 3], &mut ids);
        assert_eq!(tree.len(), 2);
    }
}
