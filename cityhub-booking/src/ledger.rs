use uuid::Uuid;

use cityhub_domain::booking::{Booking, BookingStatus};

/// In-memory booking history, newest first. The sweeper and the status
/// transitions are the only writers after creation.
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
        }
    }

    /// Record a freshly paid booking at the head of the history.
    pub fn record(&mut self, booking: Booking) {
        self.bookings.insert(0, booking);
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn get(&self, id: &Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == *id)
    }

    pub(crate) fn bookings_mut(&mut self) -> &mut [Booking] {
        &mut self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Transition: Active -> Completed (vehicle left, ticket used).
    pub fn complete(&mut self, id: &Uuid) -> Result<(), LedgerError> {
        let booking = self.get_mut(id)?;
        if booking.status != BookingStatus::Active {
            return Err(LedgerError::InvalidTransition {
                from: format!("{:?}", booking.status),
                to: "COMPLETED".to_string(),
            });
        }
        booking.status = BookingStatus::Completed;
        Ok(())
    }

    /// Transition: Active -> Cancelled.
    pub fn cancel(&mut self, id: &Uuid) -> Result<(), LedgerError> {
        let booking = self.get_mut(id)?;
        if booking.status != BookingStatus::Active {
            return Err(LedgerError::InvalidTransition {
                from: format!("{:?}", booking.status),
                to: "CANCELLED".to_string(),
            });
        }
        booking.status = BookingStatus::Cancelled;
        Ok(())
    }

    fn get_mut(&mut self, id: &Uuid) -> Result<&mut Booking, LedgerError> {
        self.bookings
            .iter_mut()
            .find(|b| b.id == *id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cityhub_domain::booking::Booking;

    fn movie_booking(title: &str) -> Booking {
        Booking::movie("m1", title, "6:00 PM", "asha", 200, Utc::now())
    }

    #[test]
    fn records_newest_first() {
        let mut ledger = BookingLedger::new();
        ledger.record(movie_booking("First"));
        ledger.record(movie_booking("Second"));

        assert_eq!(ledger.len(), 2);
        assert!(ledger.bookings()[0].item_title.starts_with("Second"));
        assert!(ledger.bookings()[1].item_title.starts_with("First"));
    }

    #[test]
    fn booking_lifecycle() {
        let mut ledger = BookingLedger::new();
        let booking = movie_booking("Ticket");
        let id = booking.id;
        ledger.record(booking);

        ledger.complete(&id).unwrap();
        assert_eq!(ledger.get(&id).unwrap().status, BookingStatus::Completed);

        // Completed bookings cannot be cancelled.
        assert!(ledger.cancel(&id).is_err());
    }

    #[test]
    fn unknown_booking_is_an_error() {
        let mut ledger = BookingLedger::new();
        assert!(ledger.complete(&Uuid::new_v4()).is_err());
    }
}
