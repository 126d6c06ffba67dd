//! Booking requests issued by scenario callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One caller's intent: a passenger asking for a number of seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Passenger name.
    pub passenger: String,
    /// Requested seat count.
    pub seats: u32,
}

impl BookingRequest {
    /// Create a new request.
    pub fn new(passenger: impl Into<String>, seats: u32) -> Self {
        Self {
            passenger: passenger.into(),
            seats,
        }
    }

    /// The six passengers of the overbooking incident demo, 16 seats in total.
    pub fn incident_passengers() -> Vec<Self> {
        [
            ("Passenger_A", 2),
            ("Passenger_B", 3),
            ("Passenger_C", 2),
            ("Passenger_D", 4),
            ("Passenger_E", 2),
            ("Passenger_F", 3),
        ]
        .into_iter()
        .map(|(name, seats)| Self::new(name, seats))
        .collect()
    }
}

impl fmt::Display for BookingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.passenger, self.seats)
    }
}

impl FromStr for BookingRequest {
    type Err = AppError;

    /// Parse `name:seats`, e.g. `Passenger_A:2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, seats) = s
            .rsplit_once(':')
            .ok_or_else(|| AppError::validation(format!("Expected 'name:seats', got '{s}'")))?;
        let seats = seats
            .trim()
            .parse::<u32>()
            .map_err(|e| AppError::validation(format!("Invalid seat count in '{s}': {e}")))?;
        Ok(Self::new(name.trim(), seats))
    }
}
