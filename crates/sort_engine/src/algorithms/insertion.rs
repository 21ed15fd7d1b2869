use shared::{domain::Role, error::SortError};

use crate::controller::StepController;

pub(crate) async fn sort(ctl: &StepController) -> Result<(), SortError> {
    let n = ctl.len();

    for i in 1..n {
        ctl.mark(i, Role::Candidate).await;
        ctl.pause().await?;

        // `j` follows the candidate as it sinks left.
        let mut j = i;
        while j > 0 && ctl.compare(j - 1, j).await? {
            ctl.mark(j - 1, Role::Active).await;
            ctl.swap(j - 1, j).await?;
            ctl.unmark(j).await;
            j -= 1;
        }
        ctl.unmark(j).await;
    }

    for index in 0..n {
        ctl.pause().await?;
        ctl.mark(index, Role::Done).await;
    }
    Ok(())
}
