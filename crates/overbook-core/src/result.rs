//! Convenience result type alias for Overbook.

use crate::error::AppError;

/// A specialized `Result` type for Overbook operations.
pub type AppResult<T> = Result<T, AppError>;
