//! Ledger records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::BookingId;

/// Status of a booking. Only confirmed bookings are ever recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Seats were allocated to the passenger.
    Confirmed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "CONFIRMED"),
        }
    }
}

/// An immutable ledger entry, created only when an allocation succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Ledger sequence number.
    pub id: BookingId,
    /// Passenger name as given by the caller.
    pub passenger: String,
    /// Number of seats allocated (always at least 1).
    pub seats: u32,
    /// Booking status.
    pub status: BookingStatus,
    /// When the booking was appended to the ledger.
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    /// Create a confirmed booking stamped with the current time.
    pub fn confirmed(id: BookingId, passenger: impl Into<String>, seats: u32) -> Self {
        Self {
            id,
            passenger: passenger.into(),
            seats,
            status: BookingStatus::Confirmed,
            booked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_booking() {
        let booking = Booking::confirmed(BookingId(1), "Passenger_A", 2);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.seats, 2);
        assert_eq!(booking.passenger, "Passenger_A");
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
    }
}
