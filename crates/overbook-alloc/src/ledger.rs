//! Append-only booking ledger.

use overbook_core::types::{Booking, BookingId};

/// Ordered record of confirmed bookings.
///
/// Not synchronized itself; every allocator keeps it behind a lock so that
/// id assignment and append happen together.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Id of the most recent booking, `0` before the first one.
    last_id: u64,
    bookings: Vec<Booking>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next id and appends a confirmed booking.
    pub fn append(&mut self, passenger: &str, seats: u32) -> BookingId {
        self.last_id += 1;
        let id = BookingId(self.last_id);
        self.bookings.push(Booking::confirmed(id, passenger, seats));
        id
    }

    /// Copy of the bookings in append order.
    pub fn snapshot(&self) -> Vec<Booking> {
        self.bookings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut ledger = Ledger::new();
        assert!(ledger.snapshot().is_empty());
        assert_eq!(ledger.append("Passenger_A", 2), BookingId(1));
        assert_eq!(ledger.append("Passenger_B", 3), BookingId(2));

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].passenger, "Passenger_A");
        assert_eq!(snapshot[1].id, BookingId(2));
    }
}
