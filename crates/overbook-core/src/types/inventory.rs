//! Inventory snapshot returned by status queries.

use serde::{Deserialize, Serialize};

use super::booking::Booking;
use super::strategy::AllocationStrategy;

/// Point-in-time view of an allocator's inventory and ledger.
///
/// For the unsync and counting strategies this snapshot may race with
/// in-flight bookings; it is diagnostic only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryStatus {
    /// Strategy of the allocator that produced this snapshot.
    pub strategy: AllocationStrategy,
    /// Capacity fixed at construction.
    pub total_seats: u32,
    /// Seats the allocator believes remain. Negative only after a lost update.
    pub available_seats: i64,
    /// Ledger snapshot in append order.
    pub bookings: Vec<Booking>,
    /// Free permits in the admission semaphore (counting strategy only).
    pub admission_permits: Option<u32>,
}

impl InventoryStatus {
    /// Sum of seats across all confirmed bookings.
    pub fn seats_sold(&self) -> u64 {
        self.bookings.iter().map(|b| u64::from(b.seats)).sum()
    }

    /// Seats sold beyond capacity, `max(0, sold - total)`.
    pub fn oversold(&self) -> u64 {
        self.seats_sold().saturating_sub(u64::from(self.total_seats))
    }

    /// Whether the ledger holds more seats than exist.
    pub fn is_oversold(&self) -> bool {
        self.oversold() > 0
    }

    /// Number of confirmed bookings.
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    /// Whether ledger ids are strictly increasing in append order.
    pub fn ids_strictly_increasing(&self) -> bool {
        self.bookings.windows(2).all(|w| w[0].id < w[1].id)
    }
}
