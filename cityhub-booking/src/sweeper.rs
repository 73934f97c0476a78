use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use cityhub_domain::booking::{BookingKind, BookingStatus};

use crate::ledger::BookingLedger;

/// A penalty applied by one sweep pass, for notification fan-out.
#[derive(Debug, Clone)]
pub struct OverdueCharge {
    pub booking_id: Uuid,
    pub item_title: String,
    pub penalty: i32,
}

/// Periodic pass that flags active parking bookings past their stay limit
/// and applies the flat penalty. The overdue flag guards the pass: a booking
/// is charged at most once, ever.
pub struct OverdueSweeper {
    penalty: i32,
}

impl OverdueSweeper {
    pub fn new(penalty: i32) -> Self {
        Self { penalty }
    }

    pub fn sweep(&self, ledger: &mut BookingLedger, now: DateTime<Utc>) -> Vec<OverdueCharge> {
        let mut charges = Vec::new();

        for booking in ledger.bookings_mut() {
            if booking.kind != BookingKind::Parking
                || booking.status != BookingStatus::Active
                || booking.is_overdue
            {
                continue;
            }
            let Some(limit_hours) = booking.time_limit_hours else {
                continue;
            };

            let elapsed = now - booking.booked_at;
            if elapsed > Duration::hours(limit_hours) {
                booking.is_overdue = true;
                booking.penalty = self.penalty;
                booking.amount += self.penalty;

                charges.push(OverdueCharge {
                    booking_id: booking.id,
                    item_title: booking.item_title.clone(),
                    penalty: self.penalty,
                });
            }
        }

        charges
    }
}

impl Default for OverdueSweeper {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityhub_domain::booking::Booking;
    use cityhub_domain::spot::{ParkingSpot, VehicleType, ZoneCategory};

    fn parking_booking(category: ZoneCategory, booked_at: DateTime<Utc>) -> Booking {
        let spot = ParkingSpot::new("021", "S", category, VehicleType::Compact, booked_at);
        Booking::parking(&spot, "asha", 50, booked_at)
    }

    #[test]
    fn one_hour_limit_is_overdue_after_65_minutes() {
        let sweeper = OverdueSweeper::default();
        let mut ledger = BookingLedger::new();
        let booked_at = Utc::now();
        let booking = parking_booking(ZoneCategory::Shopping, booked_at);
        let id = booking.id;
        ledger.record(booking);

        let charges = sweeper.sweep(&mut ledger, booked_at + Duration::minutes(65));
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].booking_id, id);
        assert_eq!(charges[0].penalty, 100);

        let swept = ledger.get(&id).unwrap();
        assert!(swept.is_overdue);
        assert_eq!(swept.penalty, 100);
        assert_eq!(swept.amount, 150);
    }

    #[test]
    fn three_hour_limit_is_not_overdue_after_65_minutes() {
        let sweeper = OverdueSweeper::default();
        let mut ledger = BookingLedger::new();
        let booked_at = Utc::now();
        ledger.record(parking_booking(ZoneCategory::Movie, booked_at));

        let charges = sweeper.sweep(&mut ledger, booked_at + Duration::minutes(65));
        assert!(charges.is_empty());

        let booking = &ledger.bookings()[0];
        assert!(!booking.is_overdue);
        assert_eq!(booking.amount, 50);
    }

    #[test]
    fn sweep_is_idempotent_per_booking() {
        let sweeper = OverdueSweeper::default();
        let mut ledger = BookingLedger::new();
        let booked_at = Utc::now();
        let id = {
            let booking = parking_booking(ZoneCategory::Shopping, booked_at);
            let id = booking.id;
            ledger.record(booking);
            id
        };

        let first = sweeper.sweep(&mut ledger, booked_at + Duration::minutes(65));
        assert_eq!(first.len(), 1);

        // Re-running much later must not double-charge.
        let second = sweeper.sweep(&mut ledger, booked_at + Duration::hours(10));
        assert!(second.is_empty());

        let booking = ledger.get(&id).unwrap();
        assert_eq!(booking.penalty, 100);
        assert_eq!(booking.amount, 150);
        assert!(booking.is_overdue);
    }

    #[test]
    fn overdue_implies_penalty_included_once() {
        let sweeper = OverdueSweeper::default();
        let mut ledger = BookingLedger::new();
        let booked_at = Utc::now();
        ledger.record(parking_booking(ZoneCategory::Shopping, booked_at));
        ledger.record(parking_booking(ZoneCategory::Movie, booked_at));

        sweeper.sweep(&mut ledger, booked_at + Duration::minutes(90));
        sweeper.sweep(&mut ledger, booked_at + Duration::minutes(95));

        for booking in ledger.bookings() {
            if booking.is_overdue {
                assert!(booking.penalty > 0);
                assert_eq!(booking.amount, booking.base_amount() + booking.penalty);
                assert_eq!(booking.amount, 150);
            } else {
                assert_eq!(booking.penalty, 0);
            }
        }
    }

    #[test]
    fn movie_bookings_are_never_swept() {
        let sweeper = OverdueSweeper::default();
        let mut ledger = BookingLedger::new();
        let booked_at = Utc::now();
        ledger.record(Booking::movie("m1", "Epic", "6:00 PM", "asha", 200, booked_at));

        let charges = sweeper.sweep(&mut ledger, booked_at + Duration::hours(24));
        assert!(charges.is_empty());
        assert!(!ledger.bookings()[0].is_overdue);
    }

    #[test]
    fn exact_limit_boundary_is_not_overdue() {
        let sweeper = OverdueSweeper::default();
        let mut ledger = BookingLedger::new();
        let booked_at = Utc::now();
        ledger.record(parking_booking(ZoneCategory::Shopping, booked_at));

        // Strictly greater-than: exactly one hour elapsed is still on time.
        let charges = sweeper.sweep(&mut ledger, booked_at + Duration::hours(1));
        assert!(charges.is_empty());
    }
}
