use algoscope::drivers::sorting::{self, SortAlgorithm};
use algoscope::log::LogKind;
use algoscope::snapshot::{ElementId, IdAllocator, Snapshot};
use proptest::prelude::*;

fn sorted_ids(snapshot: &Snapshot) -> Vec<ElementId> {
    let Snapshot::Array(items) = snapshot else {
        panic!("Expected array snapshot");
    };
    let mut ids: Vec<ElementId> = items.iter().map(|e| e.id).collect();
    ids.sort();
    ids
}

/// Every algorithm that accepts arbitrary integers
fn general_algorithms() -> Vec<SortAlgorithm> {
    SortAlgorithm::ALL
        .into_iter()
        .filter(|algo| *algo != SortAlgorithm::Counting)
        .collect()
}

fn wide_value() -> impl Strategy<Value = i64> {
    prop_oneof![-1_000_000i64..1_000_000, any::<i64>()]
}

proptest! {
    #[test]
    fn sorts_and_preserves_identity(
        values in prop::collection::vec(wide_value(), 0..24),
        algo_idx in 0usize..7,
    ) {
        let algo = general_algorithms()[algo_idx];
        let mut ids = IdAllocator::new();
        let items = ids.elements(&values);
        let mut input_ids: Vec<ElementId> = items.iter().map(|e| e.id).collect();
        input_ids.sort();

        let trace = sorting::run(algo, items);

        let mut expected = values.clone();
        expected.sort();
        let last = trace.final_snapshot().expect("trace has frames");
        prop_assert_eq!(last.values(), expected);

        // every intermediate frame is a permutation of the input elements
        for frame in &trace.frames {
            prop_assert_eq!(sorted_ids(&frame.snapshot), input_ids.clone());
        }
    }

    #[test]
    fn counting_sort_handles_its_domain(
        values in prop::collection::vec(0i64..=10_000, 0..24),
    ) {
        let trace = sorting::run(SortAlgorithm::Counting, IdAllocator::new().elements(&values));
        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(trace.final_snapshot().map(|s| s.values()), Some(expected));
        prop_assert_eq!(trace.count_kind(LogKind::Error), 0);
    }

    #[test]
    fn counting_sort_rejects_out_of_domain_values(
        mut values in prop::collection::vec(0i64..100, 0..16),
        outlier in prop_oneof![i64::MIN..0, 10_001i64..=i64::MAX],
        slot in any::<prop::sample::Index>(),
    ) {
        values.insert(slot.index(values.len() + 1), outlier);
        let trace = sorting::run(SortAlgorithm::Counting, IdAllocator::new().elements(&values));
        prop_assert_eq!(trace.count_kind(LogKind::Error), 1);
        prop_assert_eq!(trace.final_snapshot().map(|s| s.values()), Some(values));
    }

    #[test]
    fn counters_are_reproducible(
        values in prop::collection::vec(0i64..100, 1..16),
        algo_idx in 0usize..SortAlgorithm::ALL.len(),
    ) {
        let algo = SortAlgorithm::ALL[algo_idx];
        let first = sorting::run(algo, IdAllocator::new().elements(&values));
        let second = sorting::run(algo, IdAllocator::new().elements(&values));
        let counters = |trace: &algoscope::drivers::Trace| trace.frames.last().map(|f| f.counters);
        prop_assert_eq!(counters(&first), counters(&second));
    }
}
