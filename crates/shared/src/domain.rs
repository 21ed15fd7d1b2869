use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SortError;

/// Visualization state of one slot in the working sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Normal,
    Active,
    Candidate,
    Pivot,
    Done,
}

impl Role {
    pub fn is_done(self) -> bool {
        matches!(self, Role::Done)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub value: i64,
    pub role: Role,
}

impl Element {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            role: Role::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::Bubble,
        AlgorithmKind::Selection,
        AlgorithmKind::Insertion,
        AlgorithmKind::Merge,
        AlgorithmKind::Quick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmKind::Bubble => "bubble",
            AlgorithmKind::Selection => "selection",
            AlgorithmKind::Insertion => "insertion",
            AlgorithmKind::Merge => "merge",
            AlgorithmKind::Quick => "quick",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SortError;

    /// Accepts the bare name (`quick`) as well as the `-sort` / `_sort`
    /// suffixed form (`quick-sort`, `QuickSort`), case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_', ' '], "");
        let name = normalized.strip_suffix("sort").unwrap_or(&normalized);
        match name {
            "bubble" => Ok(AlgorithmKind::Bubble),
            "selection" => Ok(AlgorithmKind::Selection),
            "insertion" => Ok(AlgorithmKind::Insertion),
            "merge" => Ok(AlgorithmKind::Merge),
            "quick" => Ok(AlgorithmKind::Quick),
            _ => Err(SortError::InvalidAlgorithm(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algorithm_aliases() {
        assert_eq!("quick".parse::<AlgorithmKind>().expect("parse"), AlgorithmKind::Quick);
        assert_eq!(
            "Merge-Sort".parse::<AlgorithmKind>().expect("parse"),
            AlgorithmKind::Merge
        );
        assert_eq!(
            "insertion_sort".parse::<AlgorithmKind>().expect("parse"),
            AlgorithmKind::Insertion
        );
        for kind in AlgorithmKind::ALL {
            assert_eq!(kind.as_str().parse::<AlgorithmKind>().expect("parse"), kind);
        }
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let err = "bogo".parse::<AlgorithmKind>().expect_err("should fail");
        assert!(matches!(err, SortError::InvalidAlgorithm(ref id) if id == "bogo"));
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::Candidate).expect("json");
        assert_eq!(json, "\"candidate\"");
        assert_eq!(Role::default(), Role::Normal);
    }
}
