//! Integration tests for ledger integrity, denial, and permit rollback.

mod helpers;

use std::collections::HashSet;

use overbook_alloc::{CountingSeatAllocator, DelayHook, run_scenario};
use overbook_core::traits::SeatAllocator;
use overbook_core::types::AllocationStrategy;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_booking_ids_unique_and_increasing_for_all_strategies() {
    for strategy in AllocationStrategy::ALL {
        let requests = helpers::spread_requests(30, 3, 1);
        let allocator = helpers::allocator(strategy, 40, helpers::jitter());
        let report = run_scenario(allocator, &requests).await.unwrap();

        let bookings = &report.status.bookings;
        assert!(!bookings.is_empty());
        assert!(report.status.ids_strictly_increasing(), "{strategy}: ids out of order");

        let ids: HashSet<_> = bookings.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), bookings.len(), "{strategy}: duplicate ids");
        assert_eq!(bookings.first().map(|b| b.id.value()), Some(1));
        assert_eq!(
            bookings.last().map(|b| b.id.value()),
            Some(bookings.len() as u64),
            "{strategy}: ids skipped a number"
        );
        assert_eq!(bookings.len(), report.confirmed_count());
    }
}

#[tokio::test]
async fn test_request_above_capacity_always_denied() {
    for strategy in AllocationStrategy::ALL {
        let allocator = helpers::allocator(strategy, 10, DelayHook::none());
        assert!(!allocator.book("Passenger_A", 11).await.unwrap(), "{strategy}");

        let status = allocator.status().await.unwrap();
        assert_eq!(status.available_seats, 10, "{strategy}");
        assert!(status.bookings.is_empty(), "{strategy}");
    }
}

#[tokio::test]
async fn test_invalid_input_is_an_error_not_a_denial() {
    for strategy in AllocationStrategy::ALL {
        let allocator = helpers::allocator(strategy, 10, DelayHook::none());
        assert!(allocator.book("Passenger_A", 0).await.unwrap_err().is_validation());
        assert!(allocator.book("", 2).await.unwrap_err().is_validation());
        assert!(allocator.status().await.unwrap().bookings.is_empty());
    }
}

#[tokio::test]
async fn test_failed_multi_seat_request_leaks_no_permits() {
    let allocator = CountingSeatAllocator::new(6).unwrap();
    assert!(allocator.book("Passenger_A", 4).await.unwrap());
    let before = allocator.status().await.unwrap().admission_permits;
    assert_eq!(before, Some(2));

    assert!(!allocator.book("Passenger_B", 3).await.unwrap());

    let after = allocator.status().await.unwrap();
    assert_eq!(after.admission_permits, before);
    assert_eq!(after.booking_count(), 1);
    assert_eq!(after.available_seats, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_contended_rollbacks_keep_permits_consistent() {
    for salt in 0..10 {
        let requests = helpers::spread_requests(50, 5, salt);
        let allocator = helpers::allocator(AllocationStrategy::Counting, 17, DelayHook::none());
        let report = run_scenario(allocator, &requests).await.unwrap();

        let status = &report.status;
        let permits = u64::from(status.admission_permits.unwrap());
        assert_eq!(permits + status.seats_sold(), 17, "permits leaked or double-counted");
        assert_eq!(status.available_seats, permits as i64);
    }
}
