use shared::{domain::Role, error::SortError};

use crate::controller::StepController;

pub(crate) async fn sort(ctl: &StepController) -> Result<(), SortError> {
    let n = ctl.len();

    for i in 0..n {
        let mut min_index = i;
        ctl.mark(min_index, Role::Candidate).await;

        for j in i + 1..n {
            ctl.mark(j, Role::Active).await;
            if ctl.compare(min_index, j).await? {
                ctl.unmark(min_index).await;
                min_index = j;
                ctl.mark(min_index, Role::Candidate).await;
            } else {
                ctl.unmark(j).await;
            }
        }

        if min_index != i {
            ctl.swap(min_index, i).await?;
        }
        ctl.unmark(min_index).await;
        ctl.mark(i, Role::Done).await;
    }
    Ok(())
}
