use std::{
    cmp::Ordering,
    sync::{
        atomic::{AtomicU64, Ordering as AtomicOrdering},
        Arc,
    },
};

use shared::{
    domain::Role,
    error::SortError,
    protocol::{RunStats, StepEvent},
};
use tokio::sync::broadcast;

use crate::{pacer::Pacer, sequence::WorkingSequence};

const STEP_EVENT_CAPACITY: usize = 4096;

#[derive(Default)]
struct Counters {
    pauses: AtomicU64,
    comparisons: AtomicU64,
    swaps: AtomicU64,
    writes: AtomicU64,
    partitions: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, AtomicOrdering::Relaxed) + 1
    }

    fn reset(&self) {
        for counter in [
            &self.pauses,
            &self.comparisons,
            &self.swaps,
            &self.writes,
            &self.partitions,
        ] {
            counter.store(0, AtomicOrdering::Relaxed);
        }
    }

    fn snapshot(&self) -> RunStats {
        RunStats {
            pauses: self.pauses.load(AtomicOrdering::Relaxed),
            comparisons: self.comparisons.load(AtomicOrdering::Relaxed),
            swaps: self.swaps.load(AtomicOrdering::Relaxed),
            writes: self.writes.load(AtomicOrdering::Relaxed),
            partitions: self.partitions.load(AtomicOrdering::Relaxed),
        }
    }
}

/// The only gateway between sorting logic and the timing/visual model.
///
/// Index arguments outside `0..len` are ignored: `mark`/`unmark`/`swap` do
/// nothing and `compare` answers `false`. Dividers can then hand over empty
/// ranges without special casing.
pub struct StepController {
    sequence: WorkingSequence,
    pacer: Arc<dyn Pacer>,
    events: broadcast::Sender<StepEvent>,
    counters: Counters,
}

impl StepController {
    pub fn new(sequence: WorkingSequence, pacer: Arc<dyn Pacer>) -> Self {
        let (events, _) = broadcast::channel(STEP_EVENT_CAPACITY);
        Self::with_events(sequence, pacer, events)
    }

    pub fn with_events(
        sequence: WorkingSequence,
        pacer: Arc<dyn Pacer>,
        events: broadcast::Sender<StepEvent>,
    ) -> Self {
        Self {
            sequence,
            pacer,
            events,
            counters: Counters::default(),
        }
    }

    pub fn sequence(&self) -> &WorkingSequence {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn stats(&self) -> RunStats {
        self.counters.snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StepEvent> {
        self.events.subscribe()
    }

    pub async fn value(&self, index: usize) -> Option<i64> {
        self.sequence.get(index).await.map(|e| e.value)
    }

    pub async fn role(&self, index: usize) -> Option<Role> {
        self.sequence.get(index).await.map(|e| e.role)
    }

    pub async fn pause(&self) -> Result<(), SortError> {
        let count = Counters::bump(&self.counters.pauses);
        self.emit(StepEvent::Paused { count });
        self.pacer.pause().await
    }

    /// A slot already `Done` keeps that role for the rest of the run.
    pub async fn mark(&self, index: usize, role: Role) {
        if self.sequence.set_role(index, role).await {
            self.emit(StepEvent::Marked { index, role });
        }
    }

    pub async fn unmark(&self, index: usize) {
        self.mark(index, Role::Normal).await;
    }

    /// Pauses, then reports whether `value[left] > value[right]`.
    pub async fn compare(&self, left: usize, right: usize) -> Result<bool, SortError> {
        self.pause().await?;
        let (Some(a), Some(b)) = (self.value(left).await, self.value(right).await) else {
            return Ok(false);
        };
        let greater = a > b;
        self.record_comparison(left, right, greater);
        Ok(greater)
    }

    /// Pauses, then orders the value at `index` against `value`, a copy of
    /// what `other` held when it was read (the pivot slot in quick sort).
    pub async fn compare_with(
        &self,
        index: usize,
        other: usize,
        value: i64,
    ) -> Result<Option<Ordering>, SortError> {
        self.pause().await?;
        let Some(current) = self.value(index).await else {
            return Ok(None);
        };
        self.record_comparison(index, other, current > value);
        Ok(Some(current.cmp(&value)))
    }

    /// Pauses, then exchanges the values (not the roles) of two slots.
    pub async fn swap(&self, left: usize, right: usize) -> Result<(), SortError> {
        self.pause().await?;
        if self.sequence.swap_values(left, right).await {
            Counters::bump(&self.counters.swaps);
            self.emit(StepEvent::Swapped { left, right });
        }
        Ok(())
    }

    /// Overwrites one slot without pausing; callers bracket it themselves.
    pub async fn place(&self, index: usize, value: i64, source: usize) {
        if self.sequence.set_value(index, value).await {
            Counters::bump(&self.counters.writes);
            self.emit(StepEvent::Placed {
                index,
                value,
                source,
            });
        }
    }

    pub(crate) fn record_comparison(&self, left: usize, right: usize, greater: bool) {
        Counters::bump(&self.counters.comparisons);
        self.emit(StepEvent::Compared {
            left,
            right,
            greater,
        });
    }

    /// Starts a fresh run over the current values: counters go back to zero
    /// and every slot back to `Normal`.
    pub(crate) async fn begin_run(&self) {
        self.counters.reset();
        self.sequence.reset_roles().await;
    }

    pub(crate) fn record_partition(&self) {
        Counters::bump(&self.counters.partitions);
    }

    pub(crate) fn emit(&self, event: StepEvent) {
        // No subscribers is fine; observers may also poll the sequence.
        let _ = self.events.send(event);
    }
}
