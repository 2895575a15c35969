//! Sorting drivers
//!
//! All drivers work on the element vector by position and keep it a
//! permutation of the input at every recorded frame, so element ids can be
//! followed across the whole animation. Merge, counting and bucket sort
//! achieve this by laying out `placed ++ not-yet-placed` rather than writing
//! into an auxiliary buffer.

use super::{ids_at, Recorder, Trace};
use crate::log::LogKind;
use crate::snapshot::{Element, ElementId};
use rustc_hash::FxHashSet;

/// Largest value counting sort accepts; its count array has `max + 1` slots
pub const COUNTING_SORT_MAX_VALUE: i64 = 10_000;

/// Bucket sort never uses more buckets than this
pub const MAX_BUCKETS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
    Heap,
    Counting,
    Bucket,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 8] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
        SortAlgorithm::Heap,
        SortAlgorithm::Counting,
        SortAlgorithm::Bucket,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Heap => "Heap Sort",
            SortAlgorithm::Counting => "Counting Sort",
            SortAlgorithm::Bucket => "Bucket Sort",
        }
    }

    /// Lower-case keyword used to match descriptor names
    pub fn key(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Quick => "quick",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Heap => "heap",
            SortAlgorithm::Counting => "counting",
            SortAlgorithm::Bucket => "bucket",
        }
    }

    pub fn complexity(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble | SortAlgorithm::Selection | SortAlgorithm::Insertion => "O(n²)",
            SortAlgorithm::Quick | SortAlgorithm::Merge | SortAlgorithm::Heap => "O(n log n)",
            SortAlgorithm::Counting => "O(n + k)",
            SortAlgorithm::Bucket => "O(n + k)",
        }
    }

    pub fn difficulty(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble | SortAlgorithm::Selection | SortAlgorithm::Insertion => "Easy",
            SortAlgorithm::Quick | SortAlgorithm::Merge | SortAlgorithm::Counting => "Medium",
            SortAlgorithm::Heap | SortAlgorithm::Bucket => "Hard",
        }
    }

    pub fn info(self) -> super::AlgorithmInfo {
        super::AlgorithmInfo::new(self.name(), self.complexity(), self.difficulty())
    }
}

/// Record a full run of `algo` over `items`
pub fn run(algo: SortAlgorithm, items: Vec<Element>) -> Trace {
    let mut rec = Recorder::new(items);
    rec.step(
        LogKind::Start,
        format!("Starting {} on {} elements", algo.name(), rec.state.len()),
    );

    let sorted_ok = match algo {
        SortAlgorithm::Bubble => {
            rec.bubble_sort();
            true
        }
        SortAlgorithm::Selection => {
            rec.selection_sort();
            true
        }
        SortAlgorithm::Insertion => {
            rec.insertion_sort();
            true
        }
        SortAlgorithm::Quick => {
            if !rec.state.is_empty() {
                let high = rec.state.len() - 1;
                rec.quick_sort(0, high);
            }
            true
        }
        SortAlgorithm::Merge => {
            if !rec.state.is_empty() {
                let right = rec.state.len() - 1;
                rec.merge_sort(0, right);
            }
            true
        }
        SortAlgorithm::Heap => {
            rec.heap_sort();
            true
        }
        SortAlgorithm::Counting => rec.counting_sort(),
        SortAlgorithm::Bucket => {
            rec.bucket_sort();
            true
        }
    };

    if !sorted_ok {
        return rec.into_trace();
    }

    rec.mark_all_sorted();
    let counters = rec.counters;
    rec.finish(
        LogKind::Success,
        format!(
            "{} complete: {} comparisons, {} swaps",
            algo.name(),
            counters.comparisons,
            counters.swaps
        ),
    )
}

impl Recorder<Vec<Element>> {
    fn value(&self, idx: usize) -> i64 {
        self.state[idx].value
    }

    fn id(&self, idx: usize) -> ElementId {
        self.state[idx].id
    }

    fn mark_sorted(&mut self, idx: usize) {
        let id = self.id(idx);
        self.highlights.sorted.insert(id);
    }

    fn mark_all_sorted(&mut self) {
        self.highlights.sorted = self.state.iter().map(|e| e.id).collect();
    }

    /// Highlight two positions, count the comparison and log it
    fn compare(&mut self, a: usize, b: usize) {
        self.counters.comparisons += 1;
        self.highlights.comparing = ids_at(&self.state, &[a, b]);
        let message = format!(
            "Comparing a[{}]={} with a[{}]={}",
            a,
            self.value(a),
            b,
            self.value(b)
        );
        self.step(LogKind::Compare, message);
    }

    /// Highlight, swap, count; two frames
    fn swap(&mut self, a: usize, b: usize) {
        self.highlights.swapping = ids_at(&self.state, &[a, b]);
        let message = format!("Swapping {} and {}", self.value(a), self.value(b));
        self.step(LogKind::Swap, message);
        self.state.swap(a, b);
        self.counters.swaps += 1;
        self.frame();
        self.highlights.swapping.clear();
    }

    fn bubble_sort(&mut self) {
        let n = self.state.len();
        if n < 2 {
            return;
        }
        for i in 0..n - 1 {
            for j in 0..n - i - 1 {
                self.compare(j, j + 1);
                if self.value(j) > self.value(j + 1) {
                    self.swap(j, j + 1);
                } else {
                    let message = format!("{} <= {}, no swap", self.value(j), self.value(j + 1));
                    self.step(LogKind::Info, message);
                }
            }
            self.highlights.comparing.clear();
            self.mark_sorted(n - 1 - i);
            let message = format!("Pass {}: {} is in place", i + 1, self.value(n - 1 - i));
            self.step(LogKind::Info, message);
        }
    }

    fn selection_sort(&mut self) {
        let n = self.state.len();
        for i in 0..n {
            let mut min_idx = i;
            self.highlights.pivot = ids_at(&self.state, &[min_idx]);
            for j in i + 1..n {
                self.compare(min_idx, j);
                if self.value(j) < self.value(min_idx) {
                    min_idx = j;
                    self.highlights.pivot = ids_at(&self.state, &[min_idx]);
                    let message = format!("New minimum {} at index {}", self.value(j), j);
                    self.step(LogKind::Info, message);
                }
            }
            self.highlights.comparing.clear();
            if min_idx != i {
                self.swap(i, min_idx);
            }
            self.highlights.pivot.clear();
            self.mark_sorted(i);
            let message = format!("{} placed at index {}", self.value(i), i);
            self.step(LogKind::Info, message);
        }
    }

    fn insertion_sort(&mut self) {
        let n = self.state.len();
        if n == 0 {
            return;
        }
        self.mark_sorted(0);
        self.step(LogKind::Info, format!("{} starts the sorted prefix", self.value(0)));

        for i in 1..n {
            let key = self.state[i];
            self.highlights.pivot.clear();
            self.highlights.pivot.insert(key.id);
            self.step(LogKind::Info, format!("Picking key {} from index {}", key.value, i));

            let mut j = i;
            while j > 0 {
                self.compare(j - 1, j);
                if self.value(j - 1) <= key.value {
                    break;
                }
                let moved = self.value(j - 1);
                self.state.swap(j - 1, j);
                self.counters.swaps += 1;
                self.step(
                    LogKind::Swap,
                    format!("Shifting {} right to index {}", moved, j),
                );
                j -= 1;
            }
            self.highlights.comparing.clear();
            self.highlights.pivot.clear();
            self.highlights.sorted = self.state[..=i].iter().map(|e| e.id).collect();
            self.step(
                LogKind::Info,
                format!("Inserted {} at index {}", key.value, j),
            );
        }
    }

    /// Sort the inclusive range `low..=high`
    fn quick_sort(&mut self, low: usize, high: usize) {
        if low == high {
            self.mark_sorted(low);
            let message = format!("{} at index {} is a single element", self.value(low), low);
            self.step(LogKind::Info, message);
            return;
        }

        self.highlights.range = self.state[low..=high].iter().map(|e| e.id).collect();
        self.step(LogKind::Info, format!("Partitioning range [{}, {}]", low, high));
        let p = self.partition(low, high);
        self.mark_sorted(p);
        self.step(
            LogKind::Info,
            format!("Pivot {} is in place at index {}", self.value(p), p),
        );

        if p > low {
            self.quick_sort(low, p - 1);
        }
        if p < high {
            self.quick_sort(p + 1, high);
        }
    }

    /// Lomuto partition around the last element
    fn partition(&mut self, low: usize, high: usize) -> usize {
        let pivot = self.state[high];
        self.highlights.pivot.clear();
        self.highlights.pivot.insert(pivot.id);
        self.step(LogKind::Info, format!("Pivot is {}", pivot.value));

        let mut i = low;
        for j in low..high {
            self.compare(j, high);
            if self.value(j) < pivot.value {
                if i != j {
                    self.swap(i, j);
                }
                i += 1;
            }
        }
        self.highlights.comparing.clear();
        if i != high {
            self.swap(i, high);
        }
        self.highlights.pivot.clear();
        self.highlights.range.clear();
        i
    }

    /// Sort the inclusive range `left..=right`
    fn merge_sort(&mut self, left: usize, right: usize) {
        if left >= right {
            return;
        }
        let mid = (left + right) / 2;
        self.highlights.range = self.state[left..=right].iter().map(|e| e.id).collect();
        self.step(
            LogKind::Info,
            format!("Dividing [{}, {}] at {}", left, right, mid),
        );
        self.highlights.range.clear();

        self.merge_sort(left, mid);
        self.merge_sort(mid + 1, right);
        self.merge(left, mid, right);
    }

    fn merge(&mut self, left: usize, mid: usize, right: usize) {
        let lhs: Vec<Element> = self.state[left..=mid].to_vec();
        let rhs: Vec<Element> = self.state[mid + 1..=right].to_vec();
        self.highlights.merging = self.state[left..=right].iter().map(|e| e.id).collect();
        self.step(
            LogKind::Info,
            format!("Merging [{}, {}] and [{}, {}]", left, mid, mid + 1, right),
        );

        let mut placed: Vec<Element> = Vec::with_capacity(right - left + 1);
        let (mut i, mut j) = (0, 0);
        while i < lhs.len() || j < rhs.len() {
            let take_left = if i < lhs.len() && j < rhs.len() {
                self.counters.comparisons += 1;
                self.highlights.comparing = [lhs[i].id, rhs[j].id].into_iter().collect();
                self.step(
                    LogKind::Compare,
                    format!("Comparing {} with {}", lhs[i].value, rhs[j].value),
                );
                lhs[i].value <= rhs[j].value
            } else {
                i < lhs.len()
            };

            let next = if take_left {
                i += 1;
                lhs[i - 1]
            } else {
                j += 1;
                rhs[j - 1]
            };
            placed.push(next);
            let position = left + placed.len() - 1;

            // placed ++ remaining left ++ remaining right keeps the range a permutation
            let layout: Vec<Element> = placed
                .iter()
                .chain(lhs[i..].iter())
                .chain(rhs[j..].iter())
                .copied()
                .collect();
            self.state[left..=right].copy_from_slice(&layout);
            self.counters.swaps += 1;
            self.step(
                LogKind::Swap,
                format!("Writing {} to index {}", next.value, position),
            );
        }

        self.highlights.comparing.clear();
        self.highlights.merging.clear();
        self.frame();
    }

    fn heap_sort(&mut self) {
        let n = self.state.len();
        if n < 2 {
            return;
        }
        self.step(LogKind::Info, "Building max heap");
        for i in (0..n / 2).rev() {
            self.heapify(n, i);
        }
        self.step(LogKind::Info, format!("Max heap built, root is {}", self.value(0)));

        for end in (1..n).rev() {
            self.swap(0, end);
            self.mark_sorted(end);
            let message = format!("{} moved to index {}", self.value(end), end);
            self.step(LogKind::Info, message);
            self.heapify(end, 0);
        }
    }

    /// Sift `root` down within the first `size` positions
    fn heapify(&mut self, size: usize, root: usize) {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        if left < size {
            self.compare(left, largest);
            if self.value(left) > self.value(largest) {
                largest = left;
            }
        }
        if right < size {
            self.compare(right, largest);
            if self.value(right) > self.value(largest) {
                largest = right;
            }
        }
        self.highlights.comparing.clear();

        if largest != root {
            self.swap(root, largest);
            self.heapify(size, largest);
        }
    }

    /// Returns false when the input is outside the supported value range
    fn counting_sort(&mut self) -> bool {
        if self.state.is_empty() {
            return true;
        }
        if let Some(negative) = self.state.iter().find(|e| e.value < 0) {
            let message = format!("Counting sort needs non-negative values, found {}", negative.value);
            self.reject(message);
            return false;
        }
        let max = self.state.iter().map(|e| e.value).max().unwrap_or(0);
        if max > COUNTING_SORT_MAX_VALUE {
            let message = format!(
                "Counting sort supports values up to {}, found {}",
                COUNTING_SORT_MAX_VALUE, max
            );
            self.reject(message);
            return false;
        }

        let original = self.state.clone();
        let mut counts: Vec<Vec<Element>> = vec![Vec::new(); max as usize + 1];
        for (idx, element) in original.iter().enumerate() {
            counts[element.value as usize].push(*element);
            self.counters.comparisons += 1;
            self.highlights.comparing = ids_at(&self.state, &[idx]);
            self.step(
                LogKind::Info,
                format!(
                    "Counting {} (count is now {})",
                    element.value,
                    counts[element.value as usize].len()
                ),
            );
        }
        self.highlights.comparing.clear();

        let mut placed: Vec<Element> = Vec::with_capacity(original.len());
        for bucket in counts.iter() {
            for element in bucket {
                placed.push(*element);
                self.place(&original, &placed);
                self.step(
                    LogKind::Swap,
                    format!("Placing {} at index {}", element.value, placed.len() - 1),
                );
            }
        }
        true
    }

    fn bucket_sort(&mut self) {
        let n = self.state.len();
        if n < 2 {
            return;
        }
        let min = self.state.iter().map(|e| e.value).min().unwrap_or(0);
        let max = self.state.iter().map(|e| e.value).max().unwrap_or(0);
        let bucket_count = n.min(MAX_BUCKETS);
        self.step(
            LogKind::Info,
            format!("Distributing into {} buckets over range [{}, {}]", bucket_count, min, max),
        );

        let original = self.state.clone();
        let mut buckets: Vec<Vec<Element>> = vec![Vec::new(); bucket_count];
        for (idx, element) in original.iter().enumerate() {
            let bucket = bucket_index(element.value, min, max, bucket_count);
            buckets[bucket].push(*element);
            self.highlights.comparing = ids_at(&self.state, &[idx]);
            self.step(
                LogKind::Info,
                format!("{} goes to bucket {}", element.value, bucket),
            );
        }
        self.highlights.comparing.clear();

        for (idx, bucket) in buckets.iter_mut().enumerate() {
            bucket.sort_by_key(|e| e.value);
            let values: Vec<String> = bucket.iter().map(|e| e.value.to_string()).collect();
            self.step(
                LogKind::Info,
                format!("Bucket {} sorted: [{}]", idx, values.join(", ")),
            );
        }

        let mut placed: Vec<Element> = Vec::with_capacity(n);
        for bucket in buckets.iter() {
            for element in bucket {
                placed.push(*element);
                self.place(&original, &placed);
                self.step(
                    LogKind::Swap,
                    format!("Placing {} at index {}", element.value, placed.len() - 1),
                );
            }
        }
    }

    /// Lay out `placed` followed by the unplaced elements of `original` and
    /// mark the newest placement sorted
    fn place(&mut self, original: &[Element], placed: &[Element]) {
        let taken: FxHashSet<ElementId> = placed.iter().map(|e| e.id).collect();
        self.state = placed
            .iter()
            .copied()
            .chain(original.iter().filter(|e| !taken.contains(&e.id)).copied())
            .collect();
        self.counters.swaps += 1;
        if let Some(last) = placed.last() {
            self.highlights.sorted.insert(last.id);
        }
    }
}

/// `floor((value − min) / (max − min) × count)`, clamped to the last bucket.
/// The spread is taken in `i128` so the full `i64` range fits.
pub fn bucket_index(value: i64, min: i64, max: i64, bucket_count: usize) -> usize {
    let range = i128::from(max) - i128::from(min);
    if range <= 0 || bucket_count == 0 {
        return 0;
    }
    let offset = i128::from(value) - i128::from(min);
    let scaled = (offset as f64 / range as f64 * bucket_count as f64).floor();
    (scaled.max(0.0) as usize).min(bucket_count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::IdAllocator;

    fn sorted_values(algo: SortAlgorithm, values: &[i64]) -> Vec<i64> {
        let mut ids = IdAllocator::new();
        run(algo, ids.elements(values))
            .final_snapshot()
            .map(|s| s.values())
            .unwrap_or_default()
    }

    #[test]
    fn test_every_algorithm_sorts() {
        let input = [29, 3, 71, 3, 15, 0, 42, 8];
        let mut expected = input.to_vec();
        expected.sort();
        for algo in SortAlgorithm::ALL {
            assert_eq!(sorted_values(algo, &input), expected, "{}", algo.name());
        }
    }

    #[test]
    fn test_bubble_sort_example() {
        let mut ids = IdAllocator::new();
        let items = ids.elements(&[5, 3, 8, 1]);
        let all_ids: Vec<ElementId> = items.iter().map(|e| e.id).collect();
        let trace = run(SortAlgorithm::Bubble, items);

        let last = trace.frames.last().unwrap();
        assert_eq!(last.snapshot.values(), vec![1, 3, 5, 8]);
        assert!(all_ids.iter().all(|id| last.highlights.sorted.contains(id)));
        assert!(trace.count_kind(LogKind::Swap) >= 3);
        assert_eq!(last.counters.swaps, 4);
        assert_eq!(last.counters.comparisons, 6);
    }

    #[test]
    fn test_empty_and_single_inputs() {
        for algo in SortAlgorithm::ALL {
            assert_eq!(sorted_values(algo, &[]), Vec::<i64>::new());
            assert_eq!(sorted_values(algo, &[7]), vec![7]);
        }
    }

    #[test]
    fn test_counting_sort_rejects_negative_values() {
        let mut ids = IdAllocator::new();
        let trace = run(SortAlgorithm::Counting, ids.elements(&[4, -1, 2]));
        assert_eq!(trace.count_kind(LogKind::Error), 1);
        assert_eq!(trace.final_snapshot().map(|s| s.values()), Some(vec![4, -1, 2]));
    }

    #[test]
    fn test_frames_stay_permutations() {
        let mut ids = IdAllocator::new();
        let items = ids.elements(&[9, 4, 7, 1, 8, 2]);
        let mut expected: Vec<ElementId> = items.iter().map(|e| e.id).collect();
        expected.sort();
        for algo in SortAlgorithm::ALL {
            let trace = run(algo, items.clone());
            for frame in &trace.frames {
                let crate::snapshot::Snapshot::Array(state) = &frame.snapshot else {
                    panic!("Expected array snapshot");
                };
                let mut seen: Vec<ElementId> = state.iter().map(|e| e.id).collect();
                seen.sort();
                assert_eq!(seen, expected, "{}", algo.name());
            }
        }
    }

    #[test]
    fn test_bucket_index_clamps_to_last_bucket() {
        assert_eq!(bucket_index(0, 0, 100, 5), 0);
        assert_eq!(bucket_index(50, 0, 100, 5), 2);
        assert_eq!(bucket_index(100, 0, 100, 5), 4);
        assert_eq!(bucket_index(7, 7, 7, 5), 0);
        assert_eq!(bucket_index(i64::MIN, i64::MIN, i64::MAX, 5), 0);
        assert_eq!(bucket_index(i64::MAX, i64::MIN, i64::MAX, 5), 4);
        assert_eq!(bucket_index(0, i64::MIN, i64::MAX, 5), 2);
    }

    #[test]
    fn test_sorts_handle_extreme_values() {
        let input = [i64::MAX, 0, i64::MIN, -1, i64::MAX - 1];
        let mut expected = input.to_vec();
        expected.sort();
        for algo in SortAlgorithm::ALL {
            if algo == SortAlgorithm::Counting {
                continue;
            }
            assert_eq!(sorted_values(algo, &input), expected, "{}", algo.name());
        }
    }

    #[test]
    fn test_reverse_input_counters_are_reproducible() {
        for algo in [
            SortAlgorithm::Bubble,
            SortAlgorithm::Selection,
            SortAlgorithm::Insertion,
            SortAlgorithm::Quick,
            SortAlgorithm::Heap,
        ] {
            let mut a = IdAllocator::new();
            let mut b = IdAllocator::new();
            let first = run(algo, a.elements(&[6, 5, 4, 3, 2, 1]));
            let second = run(algo, b.elements(&[6, 5, 4, 3, 2, 1]));
            assert_eq!(
                first.frames.last().map(|f| f.counters),
                second.frames.last().map(|f| f.counters)
            );
        }
    }
}
