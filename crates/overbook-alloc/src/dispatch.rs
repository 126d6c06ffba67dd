//! Runtime selection between allocation strategies.

use async_trait::async_trait;
use tracing::debug;

use overbook_core::config::AppConfig;
use overbook_core::error::AppError;
use overbook_core::traits::SeatAllocator;
use overbook_core::types::{AllocationStrategy, InventoryStatus};

use crate::counting::CountingSeatAllocator;
use crate::delay::DelayHook;
use crate::locked::LockedSeatAllocator;
use crate::unsync::UnsyncSeatAllocator;

/// Dispatcher for seat allocation strategies.
#[derive(Debug)]
pub enum AllocatorDispatch {
    /// No synchronization over read-check-write.
    Unsync(UnsyncSeatAllocator),
    /// Single mutex around read-check-write.
    Locked(LockedSeatAllocator),
    /// Per-seat semaphore permits.
    Counting(CountingSeatAllocator),
}

impl AllocatorDispatch {
    /// Creates an allocator for `strategy`.
    ///
    /// The counting strategy has no delay points and ignores `delay`.
    pub fn new(
        strategy: AllocationStrategy,
        total_seats: u32,
        delay: DelayHook,
    ) -> Result<Self, AppError> {
        Ok(match strategy {
            AllocationStrategy::Unsync => {
                Self::Unsync(UnsyncSeatAllocator::with_delay(total_seats, delay)?)
            }
            AllocationStrategy::Locked => {
                Self::Locked(LockedSeatAllocator::with_delay(total_seats, delay)?)
            }
            AllocationStrategy::Counting => {
                if !delay.is_none() {
                    debug!(delay = ?delay, "Counting allocator has no delay points; hook ignored");
                }
                Self::Counting(CountingSeatAllocator::new(total_seats)?)
            }
        })
    }

    /// Creates an allocator sized and delayed per configuration.
    pub fn from_config(
        strategy: AllocationStrategy,
        config: &AppConfig,
    ) -> Result<Self, AppError> {
        Self::new(
            strategy,
            config.inventory.total_seats,
            DelayHook::from_config(&config.delay),
        )
    }
}

#[async_trait]
impl SeatAllocator for AllocatorDispatch {
    async fn book(&self, passenger: &str, seats: u32) -> Result<bool, AppError> {
        match self {
            Self::Unsync(inner) => inner.book(passenger, seats).await,
            Self::Locked(inner) => inner.book(passenger, seats).await,
            Self::Counting(inner) => inner.book(passenger, seats).await,
        }
    }

    async fn status(&self) -> Result<InventoryStatus, AppError> {
        match self {
            Self::Unsync(inner) => inner.status().await,
            Self::Locked(inner) => inner.status().await,
            Self::Counting(inner) => inner.status().await,
        }
    }

    fn strategy(&self) -> AllocationStrategy {
        match self {
            Self::Unsync(inner) => inner.strategy(),
            Self::Locked(inner) => inner.strategy(),
            Self::Counting(inner) => inner.strategy(),
        }
    }

    fn total_seats(&self) -> u32 {
        match self {
            Self::Unsync(inner) => inner.total_seats(),
            Self::Locked(inner) => inner.total_seats(),
            Self::Counting(inner) => inner.total_seats(),
        }
    }
}
