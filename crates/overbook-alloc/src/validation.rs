//! Input checks shared by every allocator.
//!
//! Invalid input is an error, never a denial.

use overbook_core::error::AppError;

/// Rejects a zero-capacity inventory.
pub fn validate_capacity(total_seats: u32) -> Result<(), AppError> {
    if total_seats == 0 {
        return Err(AppError::validation("total_seats must be at least 1"));
    }
    Ok(())
}

/// Rejects blank passenger names and zero-seat requests.
pub fn validate_request(passenger: &str, seats: u32) -> Result<(), AppError> {
    if passenger.trim().is_empty() {
        return Err(AppError::validation("passenger name must not be empty"));
    }
    if seats == 0 {
        return Err(AppError::validation(format!(
            "{passenger} requested 0 seats; at least 1 is required"
        )));
    }
    Ok(())
}
