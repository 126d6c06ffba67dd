//! Shared helpers for allocation integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Barrier;

use overbook_alloc::{AllocatorDispatch, DelayHook, DelayPoint};
use overbook_core::traits::SeatAllocator;
use overbook_core::types::{AllocationStrategy, BookingRequest};

/// Strategies that must never oversell.
pub const SAFE_STRATEGIES: [AllocationStrategy; 2] =
    [AllocationStrategy::Locked, AllocationStrategy::Counting];

/// Build a shared allocator for `strategy`.
pub fn allocator(
    strategy: AllocationStrategy,
    total_seats: u32,
    delay: DelayHook,
) -> Arc<dyn SeatAllocator> {
    Arc::new(AllocatorDispatch::new(strategy, total_seats, delay).expect("valid capacity"))
}

/// Short random sleeps, enough to interleave callers without slowing tests.
pub fn jitter() -> DelayHook {
    DelayHook::random(Duration::from_millis(1), Duration::from_millis(5))
}

/// Hook that holds every caller after its read until `callers` have read.
///
/// Only usable with the unsync strategy: under a lock the second caller
/// never reaches the barrier.
pub fn read_barrier(callers: usize) -> DelayHook {
    let barrier = Arc::new(Barrier::new(callers));
    DelayHook::custom(move |point| {
        let barrier = Arc::clone(&barrier);
        async move {
            if point == DelayPoint::AfterRead {
                barrier.wait().await;
            }
        }
    })
}

/// `count` requests with seat counts cycling through 1..=max_seats.
pub fn spread_requests(count: usize, max_seats: u32, salt: usize) -> Vec<BookingRequest> {
    (0..count)
        .map(|i| {
            let seats = ((i * 7 + salt * 3) % max_seats as usize) as u32 + 1;
            BookingRequest::new(format!("Passenger_{i}"), seats)
        })
        .collect()
}
