use serde::{Deserialize, Serialize};

use crate::{
    domain::{AlgorithmKind, Role},
    error::RunError,
};

/// Counters accumulated by one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub pauses: u64,
    pub comparisons: u64,
    pub swaps: u64,
    pub writes: u64,
    pub partitions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StepEvent {
    RunStarted {
        algorithm: AlgorithmKind,
        len: usize,
    },
    Paused {
        count: u64,
    },
    Marked {
        index: usize,
        role: Role,
    },
    Compared {
        left: usize,
        right: usize,
        greater: bool,
    },
    Swapped {
        left: usize,
        right: usize,
    },
    /// A merge write. `source` is the slot the value occupied when the
    /// merge call began.
    Placed {
        index: usize,
        value: i64,
        source: usize,
    },
    RunFinished {
        algorithm: AlgorithmKind,
        stats: RunStats,
    },
    RunAborted {
        algorithm: AlgorithmKind,
        error: RunError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_event_uses_tagged_layout() {
        let event = StepEvent::Marked {
            index: 3,
            role: Role::Pivot,
        };
        let json = serde_json::to_value(&event).expect("json");
        assert_eq!(json["type"], "marked");
        assert_eq!(json["payload"]["index"], 3);
        assert_eq!(json["payload"]["role"], "pivot");
    }

    #[test]
    fn aborted_event_carries_error_code() {
        let err = crate::error::SortError::Cancelled;
        let event = StepEvent::RunAborted {
            algorithm: AlgorithmKind::Quick,
            error: RunError::from(&err),
        };
        let json = serde_json::to_value(&event).expect("json");
        assert_eq!(json["payload"]["error"]["code"], "cancelled");
        assert_eq!(json["payload"]["algorithm"], "quick");
    }
}
