//! Linear-structure drivers: array, stack, queue, linked list, hash table

use super::{ids_at, Recorder, Trace};
use crate::log::LogKind;
use crate::snapshot::{
    Element, HashEntry, HashTable, IdAllocator, LinkedList, ListNode, QueueView, StackView,
};
use std::fmt;

/// Where a linked-list insert attaches the new node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPosition {
    Beginning,
    End,
}

impl fmt::Display for ListPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListPosition::Beginning => f.write_str("beginning"),
            ListPosition::End => f.write_str("end"),
        }
    }
}

pub fn array_insert(items: Vec<Element>, value: i64, index: i64, ids: &mut IdAllocator) -> Trace {
    let mut rec = Recorder::new(items);
    rec.step(LogKind::Start, format!("Inserting {} at index {}", value, index));

    let len = rec.state.len();
    if index < 0 || index as usize > len {
        rec.reject(format!("Index {} is out of bounds [0, {}]", index, len));
        return rec.into_trace();
    }
    let index = index as usize;

    if index < len {
        rec.highlights.pivot = ids_at(&rec.state, &[index]);
        rec.step(LogKind::Info, format!("Target index {} holds {}", index, rec.state[index].value));
    }
    rec.highlights.pivot.clear();

    // shift from the tail so each element moves into a free slot
    for pos in (index..len).rev() {
        rec.highlights.swapping = ids_at(&rec.state, &[pos]);
        rec.counters.swaps += 1;
        let message = format!("Shifting {} from index {} to {}", rec.state[pos].value, pos, pos + 1);
        rec.step(LogKind::Swap, message);
    }
    rec.highlights.swapping.clear();

    let element = Element {
        id: ids.next_id(),
        value,
    };
    rec.state.insert(index, element);
    rec.highlights.found.insert(element.id);
    rec.step(LogKind::Success, format!("Inserted {} at index {}", value, index));
    rec.finish(LogKind::Info, format!("Array length is now {}", len + 1))
}

pub fn array_delete(items: Vec<Element>, index: i64) -> Trace {
    let mut rec = Recorder::new(items);
    rec.step(LogKind::Start, format!("Deleting index {}", index));

    let len = rec.state.len();
    if index < 0 || index as usize >= len {
        let message = if len == 0 {
            format!("Index {} is out of bounds: array is empty", index)
        } else {
            format!("Index {} is out of bounds [0, {})", index, len)
        };
        rec.reject(message);
        return rec.into_trace();
    }
    let index = index as usize;

    rec.highlights.pivot = ids_at(&rec.state, &[index]);
    rec.step(LogKind::Info, format!("Removing {} at index {}", rec.state[index].value, index));
    let removed = rec.state.remove(index);
    rec.highlights.pivot.clear();
    rec.counters.swaps += 1;
    rec.step(LogKind::Swap, format!("Removed {}", removed.value));

    for pos in index..rec.state.len() {
        rec.highlights.swapping = ids_at(&rec.state, &[pos]);
        rec.counters.swaps += 1;
        let message = format!("Shifting {} from index {} to {}", rec.state[pos].value, pos + 1, pos);
        rec.step(LogKind::Swap, message);
    }
    rec.finish(
        LogKind::Success,
        format!("Deleted {}; array length is now {}", removed.value, len - 1),
    )
}

pub fn array_search(items: Vec<Element>, value: i64) -> Trace {
    let mut rec = Recorder::new(items);
    rec.step(LogKind::Start, format!("Searching for {}", value));

    for idx in 0..rec.state.len() {
        rec.counters.comparisons += 1;
        rec.highlights.comparing = ids_at(&rec.state, &[idx]);
        let current = rec.state[idx];
        rec.step(
            LogKind::Compare,
            format!("Checking index {}: {}", idx, current.value),
        );
        if current.value == value {
            rec.highlights.comparing.clear();
            rec.highlights.found.insert(current.id);
            rec.step(LogKind::Found, format!("Found {} at index {}", value, idx));
            // keep the match highlighted on the closing frame
            return rec.into_trace();
        }
    }
    rec.highlights.clear_focus();
    rec.step(LogKind::Error, format!("{} not found", value));
    rec.into_trace()
}

pub fn stack_push(stack: StackView, value: i64, ids: &mut IdAllocator) -> Trace {
    let mut rec = Recorder::new(stack);
    rec.step(LogKind::Start, format!("Pushing {}", value));

    let element = Element {
        id: ids.next_id(),
        value,
    };
    rec.state.items.push(element);
    rec.state.sync();
    rec.counters.swaps += 1;
    rec.highlights.found.insert(element.id);
    let top = rec.state.top;
    rec.step(LogKind::Success, format!("Pushed {}; top = {}", value, top));
    rec.finish(LogKind::Info, format!("Stack size is {}", top + 1))
}

pub fn stack_pop(stack: StackView) -> Trace {
    let mut rec = Recorder::new(stack);
    rec.step(LogKind::Start, "Popping");

    let Some(top) = rec.state.peek().copied() else {
        rec.reject("Stack underflow: stack is empty");
        return rec.into_trace();
    };
    rec.highlights.pivot.insert(top.id);
    rec.step(LogKind::Info, format!("Top element is {}", top.value));

    rec.state.items.pop();
    rec.state.sync();
    rec.counters.swaps += 1;
    rec.highlights.pivot.clear();
    let new_top = rec.state.top;
    rec.finish(
        LogKind::Success,
        format!("Popped {}; top = {}", top.value, new_top),
    )
}

pub fn enqueue(queue: QueueView, value: i64, ids: &mut IdAllocator) -> Trace {
    let mut rec = Recorder::new(queue);
    rec.step(LogKind::Start, format!("Enqueuing {}", value));

    let element = Element {
        id: ids.next_id(),
        value,
    };
    rec.state.items.push(element);
    rec.state.sync();
    rec.counters.swaps += 1;
    rec.highlights.found.insert(element.id);
    let (front, rear) = (rec.state.front, rec.state.rear);
    rec.step(LogKind::Success, format!("Enqueued {}; rear = {}", value, rear));
    rec.finish(LogKind::Info, format!("front = {}, rear = {}", front, rear))
}

pub fn dequeue(queue: QueueView) -> Trace {
    let mut rec = Recorder::new(queue);
    rec.step(LogKind::Start, "Dequeuing");

    let Some(front) = rec.state.items.first().copied() else {
        rec.reject("Queue underflow: queue is empty");
        return rec.into_trace();
    };
    rec.highlights.pivot.insert(front.id);
    rec.step(LogKind::Info, format!("Front element is {}", front.value));

    rec.state.items.remove(0);
    rec.state.sync();
    rec.counters.swaps += 1;
    rec.highlights.pivot.clear();
    let (new_front, new_rear) = (rec.state.front, rec.state.rear);
    rec.finish(
        LogKind::Success,
        format!(
            "Dequeued {}; front = {}, rear = {}",
            front.value, new_front, new_rear
        ),
    )
}

pub fn list_insert(list: LinkedList, value: i64, position: ListPosition, ids: &mut IdAllocator) -> Trace {
    let mut rec = Recorder::new(list);
    rec.step(LogKind::Start, format!("Inserting {} at the {}", value, position));

    let node = ListNode {
        id: ids.next_id(),
        value,
        next: None,
        prev: None,
    };

    match position {
        ListPosition::Beginning => {
            if let Some(head) = rec.state.head().copied() {
                rec.highlights.visiting.insert(head.id);
                rec.step(LogKind::Visit, format!("Current head is {}", head.value));
                rec.highlights.visiting.clear();
            }
            rec.state.nodes.insert(0, node);
        }
        ListPosition::End => {
            let walk = rec.state.walk();
            for id in walk {
                rec.highlights.visiting.clear();
                rec.highlights.visiting.insert(id);
                let value = rec.state.nodes.iter().find(|n| n.id == id).map(|n| n.value);
                rec.step(
                    LogKind::Visit,
                    format!("Traversing node {}", value.unwrap_or_default()),
                );
            }
            rec.highlights.visiting.clear();
            rec.state.nodes.push(node);
        }
    }
    rec.state.rebuild_links();
    rec.counters.swaps += 1;
    rec.highlights.found.insert(node.id);
    rec.step(
        LogKind::Success,
        format!("Inserted {} at the {}", value, position),
    );
    let length = rec.state.nodes.len();
    rec.finish(LogKind::Info, format!("List length is now {}", length))
}

pub fn list_delete(list: LinkedList, value: i64) -> Trace {
    let mut rec = Recorder::new(list);
    rec.step(LogKind::Start, format!("Deleting {}", value));

    if rec.state.nodes.is_empty() {
        rec.reject("List is empty");
        return rec.into_trace();
    }

    let walk = rec.state.walk();
    for id in walk {
        let Some(idx) = rec.state.nodes.iter().position(|n| n.id == id) else {
            continue;
        };
        let current = rec.state.nodes[idx];
        rec.counters.comparisons += 1;
        rec.highlights.visiting.clear();
        rec.highlights.visiting.insert(id);
        rec.step(
            LogKind::Compare,
            format!("Checking node {}", current.value),
        );
        if current.value == value {
            rec.highlights.visiting.clear();
            rec.highlights.found.insert(id);
            rec.step(LogKind::Found, format!("Found {}", value));

            rec.state.nodes.remove(idx);
            rec.state.rebuild_links();
            rec.counters.swaps += 1;
            let length = rec.state.nodes.len();
            return rec.finish(
                LogKind::Success,
                format!("Deleted {}; list length is now {}", value, length),
            );
        }
    }
    rec.highlights.clear_focus();
    rec.step(LogKind::Error, format!("{} not found in list", value));
    rec.into_trace()
}

/// Store `(key, value)` in bucket `abs(key) mod m`, replacing any occupant
pub fn hash_insert(table: HashTable, key: i64, value: &str, ids: &mut IdAllocator) -> Trace {
    let mut rec = Recorder::new(table);
    rec.step(LogKind::Start, format!("Inserting ({}, {})", key, value));

    let bucket = rec.state.bucket_index(key);
    let buckets = rec.state.buckets.len();
    rec.step(
        LogKind::Info,
        format!("hash({}) = |{}| mod {} = {}", key, key, buckets, bucket),
    );

    let entry = HashEntry {
        id: ids.next_id(),
        key,
        value: value.to_string(),
    };
    let message = match rec.state.buckets[bucket].take() {
        Some(previous) => format!(
            "Stored ({}, {}) in bucket {}, replacing key {}",
            key, value, bucket, previous.key
        ),
        None => format!("Stored ({}, {}) in bucket {}", key, value, bucket),
    };
    rec.highlights.found.insert(entry.id);
    rec.state.buckets[bucket] = Some(entry);
    rec.counters.swaps += 1;
    rec.step(LogKind::Success, message);
    let occupied = rec.state.entries().count();
    rec.finish(
        LogKind::Info,
        format!("{} of {} buckets occupied", occupied, buckets),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;

    fn values(trace: &Trace) -> Vec<i64> {
        trace.final_snapshot().map(|s| s.values()).unwrap_or_default()
    }

    #[test]
    fn test_array_insert_at_length_appends() {
        let mut ids = IdAllocator::new();
        let items = ids.elements(&[1, 2, 3]);
        let trace = array_insert(items, 9, 3, &mut ids);
        assert_eq!(values(&trace), vec![1, 2, 3, 9]);
        assert_eq!(trace.count_kind(LogKind::Error), 0);
    }

    #[test]
    fn test_array_insert_shifts_each_element() {
        let mut ids = IdAllocator::new();
        let items = ids.elements(&[1, 2, 3]);
        let trace = array_insert(items, 9, 1, &mut ids);
        assert_eq!(values(&trace), vec![1, 9, 2, 3]);
        assert_eq!(trace.count_kind(LogKind::Swap), 2);
    }

    #[test]
    fn test_array_bounds_are_rejected() {
        let mut ids = IdAllocator::new();
        let items = ids.elements(&[1, 2, 3]);
        for trace in [
            array_insert(items.clone(), 9, -1, &mut ids),
            array_insert(items.clone(), 9, 4, &mut ids),
            array_delete(items.clone(), 3),
            array_delete(items.clone(), -2),
        ] {
            assert_eq!(values(&trace), vec![1, 2, 3]);
            assert_eq!(trace.count_kind(LogKind::Error), 1);
        }
    }

    #[test]
    fn test_array_delete_shifts_left() {
        let mut ids = IdAllocator::new();
        let trace = array_delete(ids.elements(&[4, 5, 6, 7]), 1);
        assert_eq!(values(&trace), vec![4, 6, 7]);
        // the removal plus two shifts
        assert_eq!(trace.count_kind(LogKind::Swap), 3);
    }

    #[test]
    fn test_array_search_hit_and_miss() {
        let mut ids = IdAllocator::new();
        let items = ids.elements(&[4, 5, 6]);
        let hit = array_search(items.clone(), 5);
        assert_eq!(hit.count_kind(LogKind::Found), 1);
        assert_eq!(hit.count_kind(LogKind::Compare), 2);

        let miss = array_search(items, 42);
        assert_eq!(miss.count_kind(LogKind::Error), 1);
        assert_eq!(miss.count_kind(LogKind::Compare), 3);
    }

    #[test]
    fn test_stack_pop_empty_is_rejected() {
        let trace = stack_pop(StackView::new(Vec::new()));
        assert_eq!(trace.count_kind(LogKind::Error), 1);
        match trace.final_snapshot() {
            Some(Snapshot::Stack(stack)) => assert_eq!(stack.top, -1),
            other => panic!("Expected stack snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_queue_dequeue_recomputes_window() {
        let mut ids = IdAllocator::new();
        let trace = dequeue(QueueView::new(ids.elements(&[1, 2, 3])));
        match trace.final_snapshot() {
            Some(Snapshot::Queue(queue)) => {
                assert_eq!(queue.items.len(), 2);
                assert_eq!((queue.front, queue.rear), (0, 1));
            }
            other => panic!("Expected queue snapshot, got {:?}", other),
        }
        let empty = dequeue(QueueView::new(Vec::new()));
        assert_eq!(empty.count_kind(LogKind::Error), 1);
    }

    #[test]
    fn test_list_insert_and_delete_keep_links() {
        let mut ids = IdAllocator::new();
        let list = LinkedList::from_elements(&ids.elements(&[10, 20]));
        let trace = list_insert(list, 5, ListPosition::Beginning, &mut ids);
        let Some(Snapshot::LinkedList(list)) = trace.final_snapshot().cloned() else {
            panic!("Expected linked list snapshot");
        };
        assert_eq!(list.values(), vec![5, 10, 20]);
        assert_eq!(list.walk().len(), 3);

        let trace = list_delete(list, 10);
        let Some(Snapshot::LinkedList(list)) = trace.final_snapshot().cloned() else {
            panic!("Expected linked list snapshot");
        };
        assert_eq!(list.values(), vec![5, 20]);
        assert_eq!(list.nodes[0].next, Some(list.nodes[1].id));
        assert_eq!(list.nodes[1].prev, Some(list.nodes[0].id));
    }

    #[test]
    fn test_list_delete_missing_value() {
        let mut ids = IdAllocator::new();
        let list = LinkedList::from_elements(&ids.elements(&[10, 20]));
        let trace = list_delete(list, 99);
        assert_eq!(trace.count_kind(LogKind::Error), 1);
        assert_eq!(values(&trace), vec![10, 20]);
    }

    #[test]
    fn test_hash_collision_overwrites() {
        let mut ids = IdAllocator::new();
        let trace = hash_insert(HashTable::with_buckets(7), 3, "a", &mut ids);
        let Some(Snapshot::Hash(table)) = trace.final_snapshot().cloned() else {
            panic!("Expected hash snapshot");
        };
        let trace = hash_insert(table, 10, "b", &mut ids);
        let Some(Snapshot::Hash(table)) = trace.final_snapshot().cloned() else {
            panic!("Expected hash snapshot");
        };
        assert_eq!(table.entries().count(), 1);
        assert_eq!(table.get(10).map(|e| e.value.as_str()), Some("b"));
        assert!(table.get(3).is_none());
    }
}
