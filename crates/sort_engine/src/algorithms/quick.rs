use std::cmp::Ordering;

use futures::future::{BoxFuture, FutureExt};
use shared::{domain::Role, error::SortError};
use tracing::debug;

use crate::controller::StepController;

pub(crate) async fn sort(ctl: &StepController) -> Result<(), SortError> {
    let n = ctl.len();
    if n > 0 {
        divide(ctl, 0, n as isize - 1).await?;
    }

    // Singleton ranges are finalized as they are reached; sweep the rest.
    for index in 0..n {
        if ctl.role(index).await != Some(Role::Done) {
            ctl.mark(index, Role::Done).await;
        }
    }
    Ok(())
}

fn divide(
    ctl: &StepController,
    start: isize,
    end: isize,
) -> BoxFuture<'_, Result<(), SortError>> {
    async move {
        if start < end {
            let pivot = partition(ctl, start as usize, end as usize).await? as isize;
            divide(ctl, start, pivot - 1).await?;
            divide(ctl, pivot + 1, end).await?;
        } else if start == end {
            ctl.mark(start as usize, Role::Done).await;
        }
        Ok(())
    }
    .boxed()
}

/// Lomuto partition around the value at `end`. Returns the pivot's final
/// slot, which is marked `Done`.
async fn partition(ctl: &StepController, start: usize, end: usize) -> Result<usize, SortError> {
    let Some(pivot) = ctl.value(end).await else {
        return Ok(end);
    };
    ctl.record_partition();
    debug!(start, end, pivot, "partitioning");

    ctl.mark(end, Role::Pivot).await;
    let mut store = start;
    for i in start..end {
        ctl.mark(i, Role::Active).await;
        if ctl.compare_with(i, end, pivot).await? == Some(Ordering::Less) {
            ctl.swap(i, store).await?;
            ctl.unmark(store).await;
            store += 1;
        }
        ctl.unmark(i).await;
    }

    ctl.swap(store, end).await?;
    ctl.unmark(end).await;
    ctl.mark(store, Role::Done).await;
    Ok(store)
}
