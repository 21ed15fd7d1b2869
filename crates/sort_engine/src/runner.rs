use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::{
    domain::AlgorithmKind,
    error::SortError,
    protocol::{RunStats, StepEvent},
};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::warn;

use crate::{
    controller::StepController,
    pacer::{CancellablePacer, InstantPacer, Pacer, TimerPacer},
    sequence::WorkingSequence,
    SortEngine,
};

pub const DEFAULT_MAX_LEN: usize = 1_000;
const RUN_EVENT_CAPACITY: usize = 8192;

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub algorithm: String,
    pub values: Vec<i64>,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub algorithm: AlgorithmKind,
    pub values: Vec<i64>,
    pub stats: RunStats,
}

/// Starts sort runs one at a time.
///
/// A second `start` while a run is in flight is refused with
/// [`SortError::Busy`]; the slot frees up when the run's task ends, whether
/// it finished, failed or was cancelled.
pub struct SortRunner {
    max_len: usize,
    in_flight: Arc<AtomicBool>,
}

impl Default for SortRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEN)
    }
}

struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SortRunner {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates the request and spawns the run on the current tokio runtime.
    pub fn start(&self, request: RunRequest) -> Result<RunHandle, SortError> {
        let algorithm: AlgorithmKind = request.algorithm.parse()?;
        let len = request.values.len();
        if len > self.max_len {
            return Err(SortError::InvalidSize {
                len,
                max: self.max_len,
            });
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(%algorithm, "refusing to start a second sort run");
            return Err(SortError::Busy);
        }
        let guard = InFlightGuard(self.in_flight.clone());

        let sequence = WorkingSequence::from_values(request.values);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let base: Arc<dyn Pacer> = if request.delay.is_zero() {
            Arc::new(InstantPacer)
        } else {
            Arc::new(TimerPacer::new(request.delay))
        };
        let pacer = Arc::new(CancellablePacer::new(base, cancel_rx));

        let (events, first_receiver) = broadcast::channel(RUN_EVENT_CAPACITY);
        let controller = StepController::with_events(sequence.clone(), pacer, events.clone());

        let task = tokio::spawn(async move {
            let _guard = guard;
            let engine = SortEngine::new(controller);
            let stats = engine.run(algorithm).await?;
            let values = engine.controller().sequence().values().await;
            Ok(RunOutcome {
                algorithm,
                values,
                stats,
            })
        });

        Ok(RunHandle {
            algorithm,
            sequence,
            events,
            first_receiver: Some(first_receiver),
            cancel: RunCanceller(Arc::new(cancel_tx)),
            task,
        })
    }
}

pub struct RunHandle {
    algorithm: AlgorithmKind,
    sequence: WorkingSequence,
    events: broadcast::Sender<StepEvent>,
    first_receiver: Option<broadcast::Receiver<StepEvent>>,
    cancel: RunCanceller,
    task: JoinHandle<Result<RunOutcome, SortError>>,
}

/// Cancels a run from outside its handle, e.g. from a signal listener.
#[derive(Debug, Clone)]
pub struct RunCanceller(Arc<watch::Sender<bool>>);

impl RunCanceller {
    /// Abandons the run at its next pause. The sequence stays as it was.
    pub fn cancel(&self) {
        let _ = self.0.send(true);
    }
}

impl RunHandle {
    pub fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    /// The live sequence the run mutates.
    pub fn sequence(&self) -> &WorkingSequence {
        &self.sequence
    }

    /// The first call returns a receiver subscribed before the run started,
    /// so it sees every event. Later calls subscribe from now on.
    pub fn take_events(&mut self) -> broadcast::Receiver<StepEvent> {
        self.first_receiver
            .take()
            .unwrap_or_else(|| self.events.subscribe())
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn canceller(&self) -> RunCanceller {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) -> Result<RunOutcome, SortError> {
        match self.task.await {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(SortError::Cancelled),
            Err(err) => Err(SortError::Internal(err.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "tests/runner_tests.rs"]
mod tests;
