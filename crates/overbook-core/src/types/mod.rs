//! Core type definitions used across the Overbook workspace.

pub mod booking;
pub mod id;
pub mod inventory;
pub mod request;
pub mod strategy;

pub use booking::{Booking, BookingStatus};
pub use id::*;
pub use inventory::InventoryStatus;
pub use request::BookingRequest;
pub use strategy::AllocationStrategy;
