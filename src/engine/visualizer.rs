use crate::config::{Timing, VizConfig};
use crate::drivers::{self, AlgorithmInfo, Operation, Trace, TraversalCursor, TraversalOrder};
use crate::engine::errors::{Cancelled, VizError};
use crate::log::{LogKind, LogRecorder};
use crate::scheduler::{RunToken, Scheduler};
use crate::snapshot::{
    Counters, ElementId, Frame, FrameHistory, HashEntry, HashTable, Highlights, IdAllocator,
    LinkedList, QueueView, Snapshot, StackView, StructureKind, Tree,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Sample tree loaded into tree visualizers
pub const SAMPLE_TREE: [i64; 7] = [50, 30, 70, 20, 40, 60, 80];

/// Initial contents of stack, queue and linked-list visualizers
pub const SAMPLE_LINEAR: [i64; 3] = [10, 20, 30];

/// Observable state of one visualizer
#[derive(Debug)]
pub struct Live {
    pub kind: StructureKind,
    pub info: AlgorithmInfo,
    pub snapshot: Snapshot,
    pub highlights: Highlights,
    pub counters: Counters,
    pub log: LogRecorder,
    /// True from the start of a run until its last frame is committed
    pub animating: bool,
    /// Operation of the current or last run
    pub operation: Option<Operation>,
    /// Frames of the last run
    pub history: FrameHistory,
    pub history_position: usize,
}

impl Live {
    fn apply(&mut self, frame: &Frame) {
        self.snapshot = frame.snapshot.clone();
        self.highlights = frame.highlights.clone();
        self.counters = frame.counters;
    }
}

pub struct Visualizer {
    state: Rc<RefCell<Live>>,
    scheduler: Scheduler,
    speed: Rc<Cell<u8>>,
    config: VizConfig,
    ids: IdAllocator,
    rng: StdRng,
    playback: Option<JoinHandle<()>>,
    traversal: Option<TraversalCursor>,
}

impl Visualizer {
    pub fn new(kind: StructureKind, config: VizConfig) -> Self {
        Self::with_info(AlgorithmInfo::default_for(kind), kind, config)
    }

    /// Open the visualizer family selected by an algorithm descriptor
    pub fn for_algorithm(info: AlgorithmInfo, config: VizConfig) -> Self {
        let kind = info.family();
        Self::with_info(info, kind, config)
    }

    fn with_info(info: AlgorithmInfo, kind: StructureKind, config: VizConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut visualizer = Visualizer {
            state: Rc::new(RefCell::new(Live {
                kind,
                info,
                snapshot: Snapshot::Array(Vec::new()),
                highlights: Highlights::default(),
                counters: Counters::default(),
                log: LogRecorder::new(config.log_capacity),
                animating: false,
                operation: None,
                history: FrameHistory::new(config.history_limit),
                history_position: 0,
            })),
            scheduler: Scheduler::new(config.poll_interval()),
            speed: Rc::new(Cell::new(config.speed.min(crate::config::MAX_SPEED))),
            config,
            ids: IdAllocator::new(),
            rng,
            playback: None,
            traversal: None,
        };
        visualizer.reset();
        visualizer
    }

    /// Borrow the live state for rendering. Do not hold across an await.
    pub fn state(&self) -> Ref<'_, Live> {
        self.state.borrow()
    }

    pub fn kind(&self) -> StructureKind {
        self.state.borrow().kind
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().animating
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn speed(&self) -> u8 {
        self.speed.get()
    }

    /// Takes effect from the next delay, including for a running playback
    pub fn set_speed(&self, speed: u8) {
        self.speed.set(speed.min(crate::config::MAX_SPEED));
    }

    pub fn step_delay(&self) -> Duration {
        self.timing().delay(self.speed.get())
    }

    fn timing(&self) -> Timing {
        *self.config.timing(self.kind().timing_family())
    }

    pub fn is_paused(&self) -> bool {
        self.scheduler.is_paused()
    }

    pub fn set_paused(&self, paused: bool) {
        self.scheduler.set_paused(paused);
    }

    pub fn toggle_pause(&self) -> bool {
        let paused = !self.scheduler.is_paused();
        self.scheduler.set_paused(paused);
        paused
    }

    /// Cancel any run and reload fresh data for the current family
    pub fn reset(&mut self) {
        let kind = self.kind();
        self.cancel_playback();
        let snapshot = self.initial_snapshot(kind);
        self.install(snapshot);
        info!(family = %kind, "visualizer reset");
    }

    /// Switch to another family; resets everything
    pub fn select(&mut self, kind: StructureKind) {
        self.state.borrow_mut().kind = kind;
        self.state.borrow_mut().info = AlgorithmInfo::default_for(kind);
        self.reset();
    }

    /// Select a new descriptor, switching family if needed
    pub fn set_algorithm(&mut self, info: AlgorithmInfo) {
        let kind = info.family();
        if kind != self.kind() {
            self.select(kind);
        }
        self.state.borrow_mut().info = info;
    }

    /// Replace the data with `values`: an array for the sorting/array
    /// families, a BST for trees, the initial contents otherwise
    pub fn load_values(&mut self, values: &[i64]) {
        self.cancel_playback();
        let kind = self.kind();
        let snapshot = self.snapshot_from(kind, values);
        self.install(snapshot);
        info!(family = %kind, len = values.len(), "loaded values");
    }

    fn install(&mut self, snapshot: Snapshot) {
        self.traversal = None;
        let mut live = self.state.borrow_mut();
        live.snapshot = snapshot;
        live.highlights.clear();
        live.counters = Counters::default();
        live.log.clear();
        live.animating = false;
        live.operation = None;
        live.history.clear();
        live.history_position = 0;
    }

    fn cancel_playback(&mut self) {
        self.scheduler.cancel();
        if let Some(handle) = self.playback.take() {
            handle.abort();
        }
    }

    fn initial_snapshot(&mut self, kind: StructureKind) -> Snapshot {
        match kind {
            StructureKind::Sorting | StructureKind::Array => {
                let (min, max) = (self.config.value_min, self.config.value_max);
                let values: Vec<i64> = (0..self.config.array_len)
                    .map(|_| self.rng.gen_range(min..=max))
                    .collect();
                self.snapshot_from(kind, &values)
            }
            StructureKind::Tree => self.snapshot_from(kind, &SAMPLE_TREE),
            StructureKind::Hash => Snapshot::Hash(HashTable::with_buckets(self.config.hash_buckets)),
            _ => self.snapshot_from(kind, &SAMPLE_LINEAR),
        }
    }

    fn snapshot_from(&mut self, kind: StructureKind, values: &[i64]) -> Snapshot {
        match kind {
            StructureKind::Sorting | StructureKind::Array => Snapshot::Array(self.ids.elements(values)),
            StructureKind::Stack => Snapshot::Stack(StackView::new(self.ids.elements(values))),
            StructureKind::Queue => Snapshot::Queue(QueueView::new(self.ids.elements(values))),
            StructureKind::LinkedList => {
                Snapshot::LinkedList(LinkedList::from_elements(&self.ids.elements(values)))
            }
            StructureKind::Hash => {
                let mut table = HashTable::with_buckets(self.config.hash_buckets);
                for &key in values {
                    let bucket = table.bucket_index(key);
                    table.buckets[bucket] = Some(HashEntry {
                        id: self.ids.next_id(),
                        key,
                        value: key.to_string(),
                    });
                }
                Snapshot::Hash(table)
            }
            StructureKind::Tree => Snapshot::Tree(Tree::bst_from_values(values, &mut self.ids)),
        }
    }

    /// Record `operation` and mark the visualizer as animating
    fn prepare(&mut self, operation: Operation) -> Result<(RunToken, Trace), VizError> {
        if self.is_animating() {
            warn!(%operation, "rejected start while animating");
            return Err(VizError::Busy);
        }
        let trace = {
            let live = self.state.borrow();
            drivers::record(&operation, &live.snapshot, &mut self.ids)
                .inspect_err(|err| warn!(%operation, %err, "recording refused"))?
        };

        let token = self.scheduler.begin();
        self.traversal = None;
        let mut live = self.state.borrow_mut();
        live.animating = true;
        live.highlights.clear();
        live.counters = Counters::default();
        live.history.clear();
        live.history_position = 0;
        live.operation = Some(operation.clone());
        info!(%operation, frames = trace.len(), generation = token.generation(), "run started");
        Ok((token, trace))
    }

    /// Start `operation` as a background playback on the current `LocalSet`
    pub fn start(&mut self, operation: Operation) -> Result<(), VizError> {
        let (token, trace) = self.prepare(operation)?;
        let playback = Playback {
            state: Rc::clone(&self.state),
            scheduler: self.scheduler.clone(),
            speed: Rc::clone(&self.speed),
            timing: self.timing(),
        };
        self.playback = Some(tokio::task::spawn_local(playback.run(token, trace)));
        Ok(())
    }

    /// Run `operation` to completion on the calling task
    pub async fn run(&mut self, operation: Operation) -> Result<(), VizError> {
        let (token, trace) = self.prepare(operation)?;
        let playback = Playback {
            state: Rc::clone(&self.state),
            scheduler: self.scheduler.clone(),
            speed: Rc::clone(&self.speed),
            timing: self.timing(),
        };
        playback.run(token, trace).await;
        Ok(())
    }

    /// Resolve once no run is animating
    pub async fn wait_idle(&self) {
        while self.is_animating() {
            tokio::time::sleep(self.scheduler.poll_interval()).await;
        }
    }

    /// Show the next frame of the last run
    pub fn step_forward(&mut self) -> Result<(), VizError> {
        self.step_history(1)
    }

    /// Show the previous frame of the last run
    pub fn step_backward(&mut self) -> Result<(), VizError> {
        self.step_history(-1)
    }

    fn step_history(&mut self, delta: i64) -> Result<(), VizError> {
        if self.is_animating() {
            return Err(VizError::Busy);
        }
        let direction = if delta > 0 { "forward" } else { "backward" };
        let mut live = self.state.borrow_mut();
        if live.history.is_empty() {
            return Err(VizError::NothingToStep {
                direction,
                reason: "no recorded run",
            });
        }
        let target = live.history_position as i64 + delta;
        if target < 0 {
            return Err(VizError::NothingToStep {
                direction,
                reason: "already at the first step",
            });
        }
        let target = target as usize;
        let Some(frame) = live.history.get(target).cloned() else {
            return Err(VizError::NothingToStep {
                direction,
                reason: "already at the last step",
            });
        };
        live.apply(&frame);
        live.history_position = target;
        Ok(())
    }

    /// Start manual stepping through `order` from an empty visit set
    pub fn prepare_traversal(&mut self, order: TraversalOrder) -> Result<(), VizError> {
        if self.is_animating() {
            return Err(VizError::Busy);
        }
        let mut guard = self.state.borrow_mut();
        let live = &mut *guard;
        let Snapshot::Tree(tree) = &live.snapshot else {
            return Err(VizError::WrongStructure {
                expected: "tree",
                got: live.snapshot.family(),
            });
        };
        let cursor = TraversalCursor::new(tree, order);
        live.highlights = cursor.highlights(tree);
        live.log.add(
            format!("{} traversal ready for stepping", order.name()),
            LogKind::Start,
        );
        self.traversal = Some(cursor);
        Ok(())
    }

    /// Visit the next node of the prepared traversal
    pub fn traversal_step_forward(&mut self) -> Result<Option<ElementId>, VizError> {
        self.step_traversal(true)
    }

    /// Drop the current node from the prepared traversal's visit set
    pub fn traversal_step_back(&mut self) -> Result<Option<ElementId>, VizError> {
        self.step_traversal(false)
    }

    pub fn traversal(&self) -> Option<&TraversalCursor> {
        self.traversal.as_ref()
    }

    fn step_traversal(&mut self, forward: bool) -> Result<Option<ElementId>, VizError> {
        if self.is_animating() {
            return Err(VizError::Busy);
        }
        let direction = if forward { "forward" } else { "backward" };
        let Some(cursor) = self.traversal.as_mut() else {
            return Err(VizError::NothingToStep {
                direction,
                reason: "no traversal prepared",
            });
        };
        let mut guard = self.state.borrow_mut();
        let live = &mut *guard;
        let Snapshot::Tree(tree) = &live.snapshot else {
            return Err(VizError::WrongStructure {
                expected: "tree",
                got: live.snapshot.family(),
            });
        };
        let moved = if forward {
            cursor.step_forward()
        } else {
            cursor.step_back()
        };
        let highlights = cursor.highlights(tree);
        let message = moved.and_then(|id| tree.node(id)).map(|node| {
            if forward {
                format!("Visiting {}", node.value)
            } else {
                format!("Stepped back from {}", node.value)
            }
        });
        live.highlights = highlights;
        if let Some(message) = message {
            live.log.add(message, LogKind::Visit);
        }
        Ok(moved)
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        self.cancel_playback();
    }
}

/// Everything a playback task needs, detached from the visualizer borrow
struct Playback {
    state: Rc<RefCell<Live>>,
    scheduler: Scheduler,
    speed: Rc<Cell<u8>>,
    timing: Timing,
}

impl Playback {
    async fn run(self, token: RunToken, trace: Trace) {
        match self.play(&token, trace).await {
            Ok(()) => {
                self.state.borrow_mut().animating = false;
                info!(generation = token.generation(), "run finished");
            }
            Err(Cancelled) => {
                debug!(generation = token.generation(), "stale run stopped");
            }
        }
    }

    async fn play(&self, token: &RunToken, trace: Trace) -> Result<(), Cancelled> {
        let total = trace.frames.len();
        for (idx, frame) in trace.frames.into_iter().enumerate() {
            self.commit(token, idx, frame)?;
            if idx + 1 < total {
                let delay = self.timing.delay(self.speed.get());
                self.scheduler.delay(token, delay).await?;
            }
        }
        token.check()
    }

    /// Apply one frame if `token` is still current
    fn commit(&self, token: &RunToken, idx: usize, frame: Frame) -> Result<(), Cancelled> {
        token.check()?;
        let mut live = self.state.borrow_mut();
        live.apply(&frame);
        live.log.set_step(idx);
        if let Some(log) = &frame.log {
            live.log.add(log.message.clone(), log.kind);
        }
        live.history.push(frame);
        live.history_position = live.history.len().saturating_sub(1);
        debug!(step = idx, "frame committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::SortAlgorithm;

    fn config() -> VizConfig {
        VizConfig {
            seed: Some(3),
            ..VizConfig::default()
        }
    }

    #[test]
    fn test_new_visualizers_load_sample_data() {
        let tree = Visualizer::new(StructureKind::Tree, config());
        assert_eq!(tree.state().snapshot.values(), vec![20, 30, 40, 50, 60, 70, 80]);

        let stack = Visualizer::new(StructureKind::Stack, config());
        assert_eq!(stack.state().snapshot.values(), SAMPLE_LINEAR.to_vec());

        let sorting = Visualizer::new(StructureKind::Sorting, config());
        let values = sorting.state().snapshot.values();
        assert_eq!(values.len(), 10);
        assert!(values.iter().all(|v| (5..=99).contains(v)));
    }

    #[test]
    fn test_seed_makes_data_reproducible() {
        let a = Visualizer::new(StructureKind::Sorting, config());
        let b = Visualizer::new(StructureKind::Sorting, config());
        assert_eq!(a.state().snapshot.values(), b.state().snapshot.values());
    }

    #[test]
    fn test_for_algorithm_picks_family() {
        let viz = Visualizer::for_algorithm(SortAlgorithm::Merge.info(), config());
        assert_eq!(viz.kind(), StructureKind::Sorting);
        assert_eq!(viz.state().info.name, "Merge Sort");
    }

    #[test]
    fn test_manual_traversal_stepping() {
        let mut viz = Visualizer::new(StructureKind::Tree, config());
        assert!(viz.traversal_step_forward().is_err());

        viz.prepare_traversal(TraversalOrder::PreOrder).unwrap();
        viz.traversal_step_forward().unwrap();
        viz.traversal_step_forward().unwrap();
        assert_eq!(viz.state().highlights.visited.len(), 2);

        viz.traversal_step_back().unwrap();
        let live = viz.state();
        assert_eq!(live.highlights.visited.len(), 1);
        assert_eq!(live.highlights.visiting.len(), 1);
    }

    #[test]
    fn test_step_without_history_fails() {
        let mut viz = Visualizer::new(StructureKind::Stack, config());
        assert!(matches!(
            viz.step_backward(),
            Err(VizError::NothingToStep { .. })
        ));
    }
}
