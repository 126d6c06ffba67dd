//! Seat allocator with no mutual exclusion over read-check-write.
//!
//! Each step is individually atomic but the sequence is not: a caller
//! compares a stale snapshot of the seat count, and the final decrement is a
//! separate load and store. Concurrent callers can therefore all pass the
//! check and together confirm more seats than exist. This allocator exists
//! to reproduce that oversell.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use overbook_core::error::AppError;
use overbook_core::traits::SeatAllocator;
use overbook_core::types::{AllocationStrategy, InventoryStatus};

use crate::delay::{DelayHook, DelayPoint};
use crate::ledger::Ledger;
use crate::validation::{validate_capacity, validate_request};

/// Unsynchronized seat allocator.
#[derive(Debug)]
pub struct UnsyncSeatAllocator {
    /// Capacity fixed at construction.
    total_seats: u32,
    /// Seat count, read and written in separate steps.
    available: AtomicI64,
    /// Ledger. The lock covers the append only, not the seat check.
    ledger: Mutex<Ledger>,
    /// Latency injected between the steps.
    delay: DelayHook,
}

impl UnsyncSeatAllocator {
    /// Creates an allocator with no injected latency.
    pub fn new(total_seats: u32) -> Result<Self, AppError> {
        Self::with_delay(total_seats, DelayHook::none())
    }

    /// Creates an allocator that pauses at each [`DelayPoint`].
    pub fn with_delay(total_seats: u32, delay: DelayHook) -> Result<Self, AppError> {
        validate_capacity(total_seats)?;
        Ok(Self {
            total_seats,
            available: AtomicI64::new(i64::from(total_seats)),
            ledger: Mutex::new(Ledger::new()),
            delay,
        })
    }
}

#[async_trait]
impl SeatAllocator for UnsyncSeatAllocator {
    async fn book(&self, passenger: &str, seats: u32) -> Result<bool, AppError> {
        validate_request(passenger, seats)?;
        let wanted = i64::from(seats);
        debug!(strategy = "unsync", passenger = %passenger, seats, "Booking requested");

        let snapshot = self.available.load(Ordering::SeqCst);
        self.delay.pause(DelayPoint::AfterRead).await;

        if snapshot < wanted {
            info!(
                strategy = "unsync",
                passenger = %passenger,
                seats,
                available = snapshot,
                "Booking denied: not enough seats"
            );
            return Ok(false);
        }
        debug!(
            strategy = "unsync",
            passenger = %passenger,
            available = snapshot,
            "Seats look available"
        );

        self.delay.pause(DelayPoint::AfterCheck).await;

        // Lost-update window: another caller may store between this load and store.
        let current = self.available.load(Ordering::SeqCst);
        let remaining = current - wanted;
        self.available.store(remaining, Ordering::SeqCst);

        let booking_id = self.ledger.lock().await.append(passenger, seats);
        info!(
            strategy = "unsync",
            passenger = %passenger,
            seats,
            booking_id = %booking_id,
            remaining,
            "Booking confirmed"
        );
        Ok(true)
    }

    async fn status(&self) -> Result<InventoryStatus, AppError> {
        let bookings = self.ledger.lock().await.snapshot();
        Ok(InventoryStatus {
            strategy: AllocationStrategy::Unsync,
            total_seats: self.total_seats,
            available_seats: self.available.load(Ordering::SeqCst),
            bookings,
            admission_permits: None,
        })
    }

    fn strategy(&self) -> AllocationStrategy {
        AllocationStrategy::Unsync
    }

    fn total_seats(&self) -> u32 {
        self.total_seats
    }
}
