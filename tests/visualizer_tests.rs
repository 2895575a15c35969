use algoscope::config::VizConfig;
use algoscope::drivers::{Operation, SortAlgorithm, TraversalOrder};
use algoscope::engine::errors::VizError;
use algoscope::engine::Visualizer;
use algoscope::log::LogKind;
use algoscope::snapshot::{Snapshot, StructureKind};
use std::future::Future;
use std::time::Duration;

fn config() -> VizConfig {
    VizConfig {
        seed: Some(7),
        ..VizConfig::default()
    }
}

async fn local<F: Future<Output = ()>>(test: F) {
    tokio::task::LocalSet::new().run_until(test).await;
}

#[tokio::test(start_paused = true)]
async fn test_reset_then_start_keeps_only_second_run() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Stack, config());
        viz.start(Operation::StackPush { value: 99 }).unwrap();

        // let the first run commit part of its frames
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(viz.is_animating());

        viz.reset();
        viz.start(Operation::StackPush { value: 7 }).unwrap();
        viz.wait_idle().await;

        // give a surviving stale task every chance to commit
        tokio::time::sleep(Duration::from_secs(10)).await;

        let live = viz.state();
        assert_eq!(live.snapshot.values(), vec![10, 20, 30, 7]);
        assert!(live.log.entries().all(|e| !e.message.contains("99")));
        assert_eq!(live.log.count_kind(LogKind::Start), 1);
        assert!(!live.animating);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_start_while_animating_is_busy() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Queue, config());
        viz.start(Operation::Enqueue { value: 1 }).unwrap();
        assert!(matches!(viz.start(Operation::Dequeue), Err(VizError::Busy)));
        viz.wait_idle().await;
        assert!(viz.start(Operation::Dequeue).is_ok());
        viz.wait_idle().await;
        assert_eq!(viz.state().snapshot.values(), vec![20, 30, 1]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_bubble_sort_counters_and_history() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Sorting, config());
        viz.load_values(&[5, 3, 8, 1]);
        viz.run(Operation::Sort(SortAlgorithm::Bubble)).await.unwrap();

        let (frames, log_len) = {
            let live = viz.state();
            assert_eq!(live.snapshot.values(), vec![1, 3, 5, 8]);
            assert_eq!(live.counters.comparisons, 6);
            assert_eq!(live.counters.swaps, 4);
            assert_eq!(live.highlights.sorted.len(), 4);
            assert_eq!(live.history_position + 1, live.history.len());
            (live.history.len(), live.log.len())
        };
        assert!(frames > 2);

        viz.step_backward().unwrap();
        viz.step_backward().unwrap();
        assert_eq!(viz.state().history_position, frames - 3);
        viz.step_forward().unwrap();
        assert_eq!(viz.state().log.len(), log_len);

        while viz.step_backward().is_ok() {}
        let live = viz.state();
        assert_eq!(live.history_position, 0);
        assert_eq!(live.snapshot.values(), vec![5, 3, 8, 1]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_pause_holds_playback() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Sorting, config());
        viz.start(Operation::Sort(SortAlgorithm::Selection)).unwrap();
        tokio::time::sleep(Duration::from_millis(1200)).await;

        viz.set_paused(true);
        // a countdown already in flight still commits its frame
        tokio::time::sleep(Duration::from_secs(1)).await;
        let committed = viz.state().history.len();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(viz.state().history.len(), committed);
        assert!(viz.is_animating());

        viz.set_paused(false);
        viz.wait_idle().await;
        assert!(viz.state().history.len() > committed);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_speed_shortens_playback() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Tree, config());
        viz.set_speed(100);
        let started = tokio::time::Instant::now();
        viz.run(Operation::Traverse(TraversalOrder::InOrder)).await.unwrap();
        let fast = started.elapsed();

        viz.set_speed(0);
        let started = tokio::time::Instant::now();
        viz.run(Operation::Traverse(TraversalOrder::InOrder)).await.unwrap();
        assert!(started.elapsed() > fast * 5);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_invalid_index_logs_error_without_mutation() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Array, config());
        let before = viz.state().snapshot.clone();
        viz.run(Operation::ArrayDelete { index: 99 }).await.unwrap();

        let live = viz.state();
        assert_eq!(live.snapshot, before);
        assert_eq!(live.log.count_kind(LogKind::Error), 1);
        assert!(!live.animating);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_bst_search_miss_is_repeatable() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Tree, config());
        let before = viz.state().snapshot.clone();
        for round in 1..=2 {
            viz.run(Operation::BstSearch { value: 65 }).await.unwrap();
            let live = viz.state();
            assert_eq!(live.snapshot, before);
            assert_eq!(live.log.count_kind(LogKind::Error), round);
        }
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_wrong_structure_is_rejected() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Stack, config());
        let err = viz.start(Operation::Sort(SortAlgorithm::Quick)).unwrap_err();
        assert!(matches!(
            err,
            VizError::WrongStructure {
                expected: "array",
                got: "stack"
            }
        ));
        assert!(!viz.is_animating());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_select_switches_family_and_clears_log() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Stack, config());
        viz.run(Operation::StackPop).await.unwrap();
        assert!(!viz.state().log.is_empty());

        viz.select(StructureKind::Hash);
        let live = viz.state();
        assert!(live.log.is_empty());
        assert!(matches!(&live.snapshot, Snapshot::Hash(table) if table.buckets.len() == 7));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_oversized_sort_is_refused_up_front() {
    local(async {
        let mut viz = Visualizer::new(StructureKind::Sorting, config());
        let values: Vec<i64> = (0..200).rev().collect();
        viz.load_values(&values);

        let result = viz.start(Operation::Sort(SortAlgorithm::Bubble));
        assert!(matches!(result, Err(VizError::TraceTooLarge { .. })));
        assert!(!viz.is_animating());
        assert_eq!(viz.state().snapshot.values(), values);

        viz.load_values(&[4, 2, 9]);
        viz.run(Operation::Sort(SortAlgorithm::Bubble)).await.unwrap();
        assert_eq!(viz.state().snapshot.values(), vec![2, 4, 9]);
    })
    .await;
}
