//! Seat allocator admitting one semaphore permit per seat.
//!
//! A booking for `n` seats takes `n` permits one at a time without ever
//! waiting. If a permit is unavailable before all `n` are held, every
//! permit taken so far is returned and the booking is denied. Held permits
//! are made permanent once the booking succeeds; a separate mutex then
//! serializes the ledger append.
//!
//! Two multi-seat requests may interleave their acquisitions, so a request
//! can be denied even though it would have fit had it run alone. A request
//! for more seats than are free at arrival is denied before any permit is
//! touched. The semaphore never hands out more than `total_seats` permits,
//! which is what prevents oversell.

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore, SemaphorePermit, TryAcquireError};
use tracing::{debug, info, warn};

use overbook_core::error::AppError;
use overbook_core::traits::SeatAllocator;
use overbook_core::types::{AllocationStrategy, InventoryStatus};

use crate::ledger::Ledger;
use crate::validation::{validate_capacity, validate_request};

/// Reporting state appended under the ledger lock.
#[derive(Debug)]
struct Books {
    /// Display counter only; admission is decided by the semaphore.
    available: i64,
    ledger: Ledger,
}

/// Semaphore-admitted seat allocator.
#[derive(Debug)]
pub struct CountingSeatAllocator {
    /// Capacity fixed at construction.
    total_seats: u32,
    /// One permit per unsold seat.
    permits: Semaphore,
    /// Ledger and display counter.
    books: Mutex<Books>,
}

impl CountingSeatAllocator {
    /// Creates an allocator with `total_seats` permits.
    pub fn new(total_seats: u32) -> Result<Self, AppError> {
        validate_capacity(total_seats)?;
        Ok(Self {
            total_seats,
            permits: Semaphore::new(total_seats as usize),
            books: Mutex::new(Books {
                available: i64::from(total_seats),
                ledger: Ledger::new(),
            }),
        })
    }

    /// Permits currently free in the admission semaphore.
    pub fn available_permits(&self) -> u32 {
        u32::try_from(self.permits.available_permits()).unwrap_or(u32::MAX)
    }

    /// Takes `seats` permits one by one, or none at all.
    ///
    /// Returns `Ok(None)` after rolling back a partial acquisition.
    fn acquire_each(
        &self,
        passenger: &str,
        seats: u32,
    ) -> Result<Option<Vec<SemaphorePermit<'_>>>, AppError> {
        let free = self.permits.available_permits();
        let mut held = Vec::with_capacity(free.min(seats as usize));
        for _ in 0..seats {
            match self.permits.try_acquire() {
                Ok(permit) => held.push(permit),
                Err(TryAcquireError::NoPermits) => {
                    let obtained = held.len();
                    // Dropping the permits returns them to the semaphore.
                    drop(held);
                    if obtained > 0 {
                        warn!(
                            strategy = "counting",
                            passenger = %passenger,
                            seats,
                            obtained,
                            "Partial acquisition rolled back"
                        );
                    }
                    return Ok(None);
                }
                Err(TryAcquireError::Closed) => {
                    return Err(AppError::internal("Admission semaphore is closed"));
                }
            }
        }
        Ok(Some(held))
    }
}

#[async_trait]
impl SeatAllocator for CountingSeatAllocator {
    async fn book(&self, passenger: &str, seats: u32) -> Result<bool, AppError> {
        validate_request(passenger, seats)?;
        debug!(strategy = "counting", passenger = %passenger, seats, "Booking requested");

        // Permits held transiently by a concurrent caller count as taken,
        // the same as an interleaved acquisition would see them.
        let free = self.permits.available_permits();
        if seats as usize > free {
            info!(
                strategy = "counting",
                passenger = %passenger,
                seats,
                free,
                "Booking denied: not enough seats"
            );
            return Ok(false);
        }

        let Some(held) = self.acquire_each(passenger, seats)? else {
            info!(
                strategy = "counting",
                passenger = %passenger,
                seats,
                "Booking denied: not enough seats"
            );
            return Ok(false);
        };
        held.into_iter().for_each(SemaphorePermit::forget);

        let mut books = self.books.lock().await;
        books.available -= i64::from(seats);
        let booking_id = books.ledger.append(passenger, seats);
        info!(
            strategy = "counting",
            passenger = %passenger,
            seats,
            booking_id = %booking_id,
            remaining = books.available,
            "Booking confirmed"
        );
        Ok(true)
    }

    async fn status(&self) -> Result<InventoryStatus, AppError> {
        let books = self.books.lock().await;
        Ok(InventoryStatus {
            strategy: AllocationStrategy::Counting,
            total_seats: self.total_seats,
            available_seats: books.available,
            bookings: books.ledger.snapshot(),
            admission_permits: Some(self.available_permits()),
        })
    }

    fn strategy(&self) -> AllocationStrategy {
        AllocationStrategy::Counting
    }

    fn total_seats(&self) -> u32 {
        self.total_seats
    }
}
