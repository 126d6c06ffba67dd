//! Identifier types.
//!
//! [`BookingId`] is a ledger sequence number, local to one allocator.
//! [`RunId`] wraps a [`uuid::Uuid`] and tags one scenario run in logs and
//! reports.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Monotonic booking identifier assigned by an allocator's ledger.
///
/// The first booking of every allocator gets id `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl BookingId {
    /// Return the raw sequence number.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BookingId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier of a single scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
