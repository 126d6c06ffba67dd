//! # overbook-core
//!
//! Core crate for Overbook. Contains the seat allocator trait, configuration
//! schemas, booking and inventory types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Overbook crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
