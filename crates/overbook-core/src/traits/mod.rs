//! Core traits defined in `overbook-core` and implemented by other crates.

pub mod seat_allocator;

pub use seat_allocator::SeatAllocator;
