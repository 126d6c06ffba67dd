//! Seat allocator guarding read-check-write with one async mutex.
//!
//! The guard is taken before the seat count is read and dropped after the
//! ledger append, on every return path. Both delay points run while the
//! guard is held, so bookings are fully serialized. Waiters are served in
//! FIFO order because the tokio mutex is fair.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use overbook_core::error::AppError;
use overbook_core::traits::SeatAllocator;
use overbook_core::types::{AllocationStrategy, InventoryStatus};

use crate::delay::{DelayHook, DelayPoint};
use crate::ledger::Ledger;
use crate::validation::{validate_capacity, validate_request};

/// Everything the critical section protects.
#[derive(Debug)]
struct Inventory {
    available: u32,
    ledger: Ledger,
}

/// Mutex-serialized seat allocator.
#[derive(Debug)]
pub struct LockedSeatAllocator {
    /// Capacity fixed at construction.
    total_seats: u32,
    /// Seat count and ledger behind one lock.
    state: Mutex<Inventory>,
    /// Latency injected while the lock is held.
    delay: DelayHook,
}

impl LockedSeatAllocator {
    /// Creates an allocator with no injected latency.
    pub fn new(total_seats: u32) -> Result<Self, AppError> {
        Self::with_delay(total_seats, DelayHook::none())
    }

    /// Creates an allocator that pauses at each [`DelayPoint`] inside the
    /// critical section.
    pub fn with_delay(total_seats: u32, delay: DelayHook) -> Result<Self, AppError> {
        validate_capacity(total_seats)?;
        Ok(Self {
            total_seats,
            state: Mutex::new(Inventory {
                available: total_seats,
                ledger: Ledger::new(),
            }),
            delay,
        })
    }
}

#[async_trait]
impl SeatAllocator for LockedSeatAllocator {
    async fn book(&self, passenger: &str, seats: u32) -> Result<bool, AppError> {
        validate_request(passenger, seats)?;
        debug!(strategy = "locked", passenger = %passenger, seats, "Booking requested");

        let mut state = self.state.lock().await;

        let snapshot = state.available;
        self.delay.pause(DelayPoint::AfterRead).await;

        if snapshot < seats {
            info!(
                strategy = "locked",
                passenger = %passenger,
                seats,
                available = snapshot,
                "Booking denied: not enough seats"
            );
            return Ok(false);
        }
        debug!(
            strategy = "locked",
            passenger = %passenger,
            available = snapshot,
            "Seats available"
        );

        self.delay.pause(DelayPoint::AfterCheck).await;

        state.available -= seats;
        let booking_id = state.ledger.append(passenger, seats);
        info!(
            strategy = "locked",
            passenger = %passenger,
            seats,
            booking_id = %booking_id,
            remaining = state.available,
            "Booking confirmed"
        );
        Ok(true)
    }

    async fn status(&self) -> Result<InventoryStatus, AppError> {
        let state = self.state.lock().await;
        Ok(InventoryStatus {
            strategy: AllocationStrategy::Locked,
            total_seats: self.total_seats,
            available_seats: i64::from(state.available),
            bookings: state.ledger.snapshot(),
            admission_permits: None,
        })
    }

    fn strategy(&self) -> AllocationStrategy {
        AllocationStrategy::Locked
    }

    fn total_seats(&self) -> u32 {
        self.total_seats
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_books_until_full() {
        let allocator = LockedSeatAllocator::new(10).unwrap();
        assert!(allocator.book("Passenger_A", 4).await.unwrap());
        assert!(allocator.book("Passenger_B", 6).await.unwrap());
        assert!(!allocator.book("Passenger_C", 1).await.unwrap());

        let status = allocator.status().await.unwrap();
        assert_eq!(status.available_seats, 0);
        assert_eq!(status.booking_count(), 2);
        assert_eq!(status.bookings[1].id.value(), 2);
    }

    #[tokio::test]
    async fn test_denies_more_than_capacity() {
        let allocator = LockedSeatAllocator::new(3).unwrap();
        assert!(!allocator.book("Passenger_A", 4).await.unwrap());
        assert!(allocator.status().await.unwrap().bookings.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        assert!(LockedSeatAllocator::new(0).unwrap_err().is_validation());
        let allocator = LockedSeatAllocator::new(3).unwrap();
        assert!(allocator.book(" ", 1).await.unwrap_err().is_validation());
        assert!(allocator.book("Passenger_A", 0).await.unwrap_err().is_validation());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_only_one_caller_inside_critical_section() {
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));
        let hook = {
            let inside = Arc::clone(&inside);
            let max_inside = Arc::clone(&max_inside);
            DelayHook::custom(move |point| {
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                async move {
                    match point {
                        DelayPoint::AfterRead => {
                            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                            max_inside.fetch_max(now, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(2)).await;
                        }
                        DelayPoint::AfterCheck => {
                            inside.fetch_sub(1, Ordering::SeqCst);
                        }
                    }
                }
            })
        };
        let allocator = Arc::new(LockedSeatAllocator::with_delay(100, hook).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let allocator = Arc::clone(&allocator);
                tokio::spawn(async move { allocator.book(&format!("Passenger_{i}"), 1).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_panic_inside_critical_section_releases_lock() {
        let tripped = Arc::new(AtomicBool::new(false));
        let hook = {
            let tripped = Arc::clone(&tripped);
            DelayHook::custom(move |point| {
                let first =
                    point == DelayPoint::AfterCheck && !tripped.swap(true, Ordering::SeqCst);
                async move {
                    if first {
                        panic!("booking task failed mid-section");
                    }
                }
            })
        };
        let allocator = Arc::new(LockedSeatAllocator::with_delay(5, hook).unwrap());

        let failed = {
            let allocator = Arc::clone(&allocator);
            tokio::spawn(async move { allocator.book("Passenger_A", 2).await })
        };
        let err = failed.await.unwrap_err();
        assert!(err.is_panic());

        let status = tokio::time::timeout(Duration::from_secs(5), allocator.status())
            .await
            .expect("lock still held after panic")
            .unwrap();
        assert_eq!(status.available_seats, 5);
        assert!(status.bookings.is_empty());

        assert!(allocator.book("Passenger_B", 5).await.unwrap());
        let status = allocator.status().await.unwrap();
        assert_eq!(status.available_seats, 0);
        assert_eq!(status.bookings[0].id.value(), 1);
    }
}
