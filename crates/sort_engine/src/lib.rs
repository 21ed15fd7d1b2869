use std::time::Duration;

use shared::{
    domain::AlgorithmKind,
    error::{RunError, SortError},
    protocol::{RunStats, StepEvent},
};
use tracing::{info, warn};

mod algorithms;
pub mod controller;
pub mod pacer;
pub mod runner;
pub mod sequence;

pub use controller::StepController;
pub use pacer::{CancellablePacer, InstantPacer, Pacer, TimerPacer};
pub use runner::{RunCanceller, RunHandle, RunOutcome, RunRequest, SortRunner};
pub use sequence::WorkingSequence;

/// Runs the animated sorts over the sequence owned by its controller.
///
/// Every algorithm leaves the sequence non-decreasing with every slot
/// marked `Done`. The pacer only decides how long that takes. Each `run`
/// starts over from the current values with fresh roles and counters.
pub struct SortEngine {
    controller: StepController,
}

impl SortEngine {
    pub fn new(controller: StepController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    pub async fn run(&self, algorithm: AlgorithmKind) -> Result<RunStats, SortError> {
        let len = self.controller.len();
        self.controller.begin_run().await;
        info!(%algorithm, len, "sort run started");
        self.controller.emit(StepEvent::RunStarted { algorithm, len });

        let result = match algorithm {
            AlgorithmKind::Bubble => self.bubble_sort().await,
            AlgorithmKind::Selection => self.selection_sort().await,
            AlgorithmKind::Insertion => self.insertion_sort().await,
            AlgorithmKind::Merge => self.merge_sort().await,
            AlgorithmKind::Quick => self.quick_sort().await,
        };

        match result {
            Ok(()) => {
                let stats = self.controller.stats();
                info!(
                    %algorithm,
                    len,
                    pauses = stats.pauses,
                    comparisons = stats.comparisons,
                    swaps = stats.swaps,
                    "sort run finished"
                );
                self.controller.emit(StepEvent::RunFinished { algorithm, stats });
                Ok(stats)
            }
            Err(err) => {
                match &err {
                    SortError::Cancelled => info!(%algorithm, len, "sort run cancelled"),
                    other => warn!(%algorithm, len, error = %other, "sort run aborted"),
                }
                self.controller.emit(StepEvent::RunAborted {
                    algorithm,
                    error: RunError::from(&err),
                });
                Err(err)
            }
        }
    }

    pub async fn bubble_sort(&self) -> Result<(), SortError> {
        algorithms::bubble::sort(&self.controller).await
    }

    pub async fn selection_sort(&self) -> Result<(), SortError> {
        algorithms::selection::sort(&self.controller).await
    }

    pub async fn insertion_sort(&self) -> Result<(), SortError> {
        algorithms::insertion::sort(&self.controller).await
    }

    pub async fn merge_sort(&self) -> Result<(), SortError> {
        algorithms::merge::sort(&self.controller).await
    }

    pub async fn quick_sort(&self) -> Result<(), SortError> {
        algorithms::quick::sort(&self.controller).await
    }
}

/// Sorts `values` with the algorithm named by `algorithm_id`, pausing
/// `delay` per step. Must be called from within a tokio runtime.
pub async fn run(
    algorithm_id: &str,
    values: Vec<i64>,
    delay: Duration,
) -> Result<RunOutcome, SortError> {
    SortRunner::default()
        .start(RunRequest {
            algorithm: algorithm_id.to_string(),
            values,
            delay,
        })?
        .join()
        .await
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
