//! Linear structures: stack, queue, linked list and hash table views
//!
//! Each view keeps its pointer fields (`top`, `front`, `rear`, `next`/`prev`)
//! in sync with the backing storage through a `sync`/`rebuild_links` call made
//! after every committed mutation.

use super::{Element, ElementId};

/// Stack backed by a vector; the top of the stack is the last element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackView {
    pub items: Vec<Element>,
    /// `len - 1`, or `-1` when empty
    pub top: i64,
}

impl StackView {
    pub fn new(items: Vec<Element>) -> Self {
        let mut stack = StackView { items, top: -1 };
        stack.sync();
        stack
    }

    pub fn sync(&mut self) {
        self.top = self.items.len() as i64 - 1;
    }

    pub fn peek(&self) -> Option<&Element> {
        self.items.last()
    }
}

/// Queue backed by a vector; `front..=rear` is the valid window
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueView {
    pub items: Vec<Element>,
    pub front: i64,
    pub rear: i64,
}

impl QueueView {
    pub fn new(items: Vec<Element>) -> Self {
        let mut queue = QueueView {
            items,
            front: -1,
            rear: -1,
        };
        queue.sync();
        queue
    }

    pub fn sync(&mut self) {
        if self.items.is_empty() {
            self.front = -1;
            self.rear = -1;
        } else {
            self.front = 0;
            self.rear = self.items.len() as i64 - 1;
        }
    }
}

/// A node of a singly-addressed, doubly-linked chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListNode {
    pub id: ElementId,
    pub value: i64,
    pub next: Option<ElementId>,
    pub prev: Option<ElementId>,
}

/// Linked list stored in chain order. `next`/`prev` mirror the vector order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedList {
    pub nodes: Vec<ListNode>,
}

impl LinkedList {
    pub fn from_elements(elements: &[Element]) -> Self {
        let mut list = LinkedList {
            nodes: elements
                .iter()
                .map(|e| ListNode {
                    id: e.id,
                    value: e.value,
                    next: None,
                    prev: None,
                })
                .collect(),
        };
        list.rebuild_links();
        list
    }

    /// Recompute every `next`/`prev` link from the chain order
    pub fn rebuild_links(&mut self) {
        let ids: Vec<ElementId> = self.nodes.iter().map(|n| n.id).collect();
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            node.prev = idx.checked_sub(1).map(|p| ids[p]);
            node.next = ids.get(idx + 1).copied();
        }
    }

    pub fn head(&self) -> Option<&ListNode> {
        self.nodes.first()
    }

    pub fn values(&self) -> Vec<i64> {
        self.nodes.iter().map(|n| n.value).collect()
    }

    /// Walk the chain from the head by following `next` links
    pub fn walk(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head().map(|n| n.id);
        while let Some(id) = cursor {
            if order.len() > self.nodes.len() {
                break;
            }
            order.push(id);
            cursor = self.nodes.iter().find(|n| n.id == id).and_then(|n| n.next);
        }
        order
    }
}

/// A key/value pair occupying one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashEntry {
    pub id: ElementId,
    pub key: i64,
    pub value: String,
}

/// Fixed-size table with one slot per bucket and no collision chaining
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HashTable {
    pub buckets: Vec<Option<HashEntry>>,
}

impl HashTable {
    pub fn with_buckets(count: usize) -> Self {
        HashTable {
            buckets: vec![None; count.max(1)],
        }
    }

    /// `abs(key) mod bucket_count`
    pub fn bucket_index(&self, key: i64) -> usize {
        (key.unsigned_abs() % self.buckets.len().max(1) as u64) as usize
    }

    pub fn entries(&self) -> impl Iterator<Item = &HashEntry> {
        self.buckets.iter().flatten()
    }

    pub fn get(&self, key: i64) -> Option<&HashEntry> {
        self.buckets[self.bucket_index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::IdAllocator;

    #[test]
    fn test_stack_top_tracks_length() {
        let mut ids = IdAllocator::new();
        let mut stack = StackView::new(ids.elements(&[1, 2, 3]));
        assert_eq!(stack.top, 2);
        stack.items.clear();
        stack.sync();
        assert_eq!(stack.top, -1);
    }

    #[test]
    fn test_queue_window() {
        let mut ids = IdAllocator::new();
        let queue = QueueView::new(ids.elements(&[7, 8]));
        assert_eq!((queue.front, queue.rear), (0, 1));
        let empty = QueueView::new(Vec::new());
        assert_eq!((empty.front, empty.rear), (-1, -1));
    }

    #[test]
    fn test_linked_list_links_follow_order() {
        let mut ids = IdAllocator::new();
        let list = LinkedList::from_elements(&ids.elements(&[10, 20, 30]));
        let walked = list.walk();
        assert_eq!(walked, list.nodes.iter().map(|n| n.id).collect::<Vec<_>>());
        assert_eq!(list.nodes[0].prev, None);
        assert_eq!(list.nodes[2].next, None);
        assert_eq!(list.nodes[1].prev, Some(list.nodes[0].id));
    }

    #[test]
    fn test_hash_bucket_index_uses_absolute_key() {
        let table = HashTable::with_buckets(7);
        assert_eq!(table.bucket_index(15), 1);
        assert_eq!(table.bucket_index(-15), 1);
        assert_eq!(table.bucket_index(i64::MIN), (i64::MIN.unsigned_abs() % 7) as usize);
    }
}
