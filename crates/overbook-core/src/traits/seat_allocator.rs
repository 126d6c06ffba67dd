//! Seat allocator trait shared by every synchronization strategy.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{AllocationStrategy, InventoryStatus};

/// Trait for booking seats out of a fixed-capacity inventory.
///
/// One instance owns one inventory and one ledger, and is shared between
/// concurrent callers by reference (usually an `Arc`). Implementations
/// differ only in how they synchronize the read-check-write of the seat
/// count; see [`AllocationStrategy`].
#[async_trait]
pub trait SeatAllocator: Send + Sync + std::fmt::Debug {
    /// Attempts to book `seats` seats for `passenger`.
    ///
    /// Returns `Ok(true)` when confirmed and `Ok(false)` when there are not
    /// enough seats. A blank passenger name or a zero seat count is a
    /// validation error, never a denial.
    async fn book(&self, passenger: &str, seats: u32) -> AppResult<bool>;

    /// Returns a snapshot of the inventory and ledger.
    async fn status(&self) -> AppResult<InventoryStatus>;

    /// Returns the strategy this allocator implements.
    fn strategy(&self) -> AllocationStrategy;

    /// Returns the capacity fixed at construction.
    fn total_seats(&self) -> u32;
}
