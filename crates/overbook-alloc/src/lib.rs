//! # overbook-alloc
//!
//! Seat allocation under three concurrency disciplines, all behind
//! [`overbook_core::traits::SeatAllocator`].
//!
//! ## Modules
//!
//! - `unsync`: read-check-write with no mutual exclusion (oversells under contention)
//! - `locked`: read-check-write inside one async mutex guard
//! - `counting`: one semaphore permit per seat, with rollback on partial acquisition
//! - `dispatch`: enum dispatcher selecting a strategy at runtime
//! - `delay`: injectable latency at named delay points
//! - `ledger`: append-only booking record with monotonic ids
//! - `scenario`: runs many concurrent callers against one allocator

pub mod counting;
pub mod delay;
pub mod dispatch;
pub mod ledger;
pub mod locked;
pub mod scenario;
pub mod unsync;
pub mod validation;

pub use counting::CountingSeatAllocator;
pub use delay::{DelayHook, DelayPoint};
pub use dispatch::AllocatorDispatch;
pub use ledger::Ledger;
pub use locked::LockedSeatAllocator;
pub use scenario::{BookingOutcome, ScenarioReport, TrialSummary, run_scenario, run_trials};
pub use unsync::UnsyncSeatAllocator;
