//! Allocation strategy selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The synchronization discipline an allocator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// No synchronization over read-check-write. Can oversell.
    Unsync,
    /// One mutex held across read-check-write.
    Locked,
    /// Per-seat semaphore permits plus a ledger lock.
    Counting,
}

impl AllocationStrategy {
    /// All strategies, in demo order.
    pub const ALL: [AllocationStrategy; 3] = [Self::Unsync, Self::Locked, Self::Counting];

    /// Whether the strategy guarantees confirmed seats never exceed capacity.
    pub fn prevents_oversell(&self) -> bool {
        !matches!(self, Self::Unsync)
    }
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStrategy::Unsync => write!(f, "unsync"),
            AllocationStrategy::Locked => write!(f, "locked"),
            AllocationStrategy::Counting => write!(f, "counting"),
        }
    }
}

/// Parses a strategy name case-insensitively.
///
/// Besides the canonical names, `unsafe`, `mutex` and `semaphore` are
/// accepted for `unsync`, `locked` and `counting`.
impl FromStr for AllocationStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unsync" | "unsafe" => Ok(Self::Unsync),
            "locked" | "mutex" => Ok(Self::Locked),
            "counting" | "semaphore" => Ok(Self::Counting),
            other => Err(AppError::validation(format!(
                "Unknown allocation strategy '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("unsafe".parse::<AllocationStrategy>().unwrap(), AllocationStrategy::Unsync);
        assert_eq!("Mutex".parse::<AllocationStrategy>().unwrap(), AllocationStrategy::Locked);
        assert_eq!(
            "semaphore".parse::<AllocationStrategy>().unwrap(),
            AllocationStrategy::Counting
        );
        assert!("spinlock".parse::<AllocationStrategy>().is_err());
    }

    #[test]
    fn test_prevents_oversell() {
        assert!(!AllocationStrategy::Unsync.prevents_oversell());
        assert!(AllocationStrategy::Locked.prevents_oversell());
        assert!(AllocationStrategy::Counting.prevents_oversell());
    }
}
