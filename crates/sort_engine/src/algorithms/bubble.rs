use shared::{domain::Role, error::SortError};

use crate::controller::StepController;

pub(crate) async fn sort(ctl: &StepController) -> Result<(), SortError> {
    let n = ctl.len();
    if n == 0 {
        return Ok(());
    }

    for i in 0..n - 1 {
        for j in 0..n - i - 1 {
            ctl.mark(j, Role::Active).await;
            ctl.mark(j + 1, Role::Active).await;
            if ctl.compare(j, j + 1).await? {
                ctl.swap(j, j + 1).await?;
            }
            ctl.unmark(j).await;
            ctl.unmark(j + 1).await;
        }
        ctl.mark(n - i - 1, Role::Done).await;
    }
    // Whatever is left at the front is the minimum by now.
    ctl.mark(0, Role::Done).await;
    Ok(())
}
