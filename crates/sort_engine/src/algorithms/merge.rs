use futures::future::{BoxFuture, FutureExt};
use shared::{domain::Role, error::SortError};
use tracing::debug;

use crate::controller::StepController;

pub(crate) async fn sort(ctl: &StepController) -> Result<(), SortError> {
    let n = ctl.len();
    if n > 1 {
        divide(ctl, 0, n - 1).await?;
    }
    for index in 0..n {
        ctl.mark(index, Role::Done).await;
    }
    Ok(())
}

fn divide(
    ctl: &StepController,
    start: usize,
    end: usize,
) -> BoxFuture<'_, Result<(), SortError>> {
    async move {
        if start < end {
            let mid = start + (end - start) / 2;
            divide(ctl, start, mid).await?;
            divide(ctl, mid + 1, end).await?;
            merge(ctl, start, mid, end).await?;
        }
        Ok(())
    }
    .boxed()
}

/// Merges the sorted runs `[start, mid]` and `[mid + 1, end]` in place.
///
/// On equal heads the right run's value is written first, so equal keys
/// from the right run overtake those from the left.
async fn merge(
    ctl: &StepController,
    start: usize,
    mid: usize,
    end: usize,
) -> Result<(), SortError> {
    debug!(start, mid, end, "merging runs");
    let left = ctl.sequence().values_in(start, mid).await;
    let right = ctl.sequence().values_in(mid + 1, end).await;

    let (mut i, mut j, mut k) = (0, 0, start);
    while i < left.len() && j < right.len() {
        // The left head's own slot may already be overwritten, so the write
        // slot `k` stands in for it in marks and `Compared { left, .. }`.
        // Slots from `k` on are unwritten, so the right head is still in place.
        let right_slot = mid + 1 + j;
        ctl.mark(k, Role::Active).await;
        ctl.mark(right_slot, Role::Active).await;
        ctl.pause().await?;
        ctl.record_comparison(k, right_slot, left[i] > right[j]);
        let take_right = left[i] >= right[j];
        ctl.unmark(k).await;
        ctl.unmark(right_slot).await;

        if take_right {
            write(ctl, k, right[j], right_slot).await?;
            j += 1;
        } else {
            write(ctl, k, left[i], start + i).await?;
            i += 1;
        }
        k += 1;
    }

    while i < left.len() {
        write(ctl, k, left[i], start + i).await?;
        i += 1;
        k += 1;
    }
    while j < right.len() {
        write(ctl, k, right[j], mid + 1 + j).await?;
        j += 1;
        k += 1;
    }
    Ok(())
}

async fn write(
    ctl: &StepController,
    index: usize,
    value: i64,
    source: usize,
) -> Result<(), SortError> {
    ctl.mark(index, Role::Active).await;
    ctl.pause().await?;
    ctl.place(index, value, source).await;
    ctl.unmark(index).await;
    Ok(())
}
