use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::spot::ParkingSpot;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingKind {
    Parking,
    Movie,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Active,
    Completed,
    Cancelled,
}

/// A confirmed reservation, parking or movie, with the amount collected.
///
/// Invariants: `penalty > 0` implies `is_overdue`, and `amount` already
/// contains any applied penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub reference: String,
    pub item_title: String,
    pub kind: BookingKind,
    pub booked_at: DateTime<Utc>,
    pub time_limit_hours: Option<i64>,
    pub amount: i32,
    pub penalty: i32,
    pub is_overdue: bool,
    pub status: BookingStatus,
    pub qr_data: String,
}

impl Booking {
    /// Parking booking against a reserved spot. The QR payload is what the
    /// gate scanner consumes on entry.
    pub fn parking(spot: &ParkingSpot, username: &str, amount: i32, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference: format!("PKG-{}", now.timestamp_millis()),
            item_title: spot.label(),
            kind: BookingKind::Parking,
            booked_at: now,
            time_limit_hours: Some(spot.time_limit_hours),
            amount,
            penalty: 0,
            is_overdue: false,
            status: BookingStatus::Active,
            qr_data: format!("PARK:{}:{}", spot.id, username),
        }
    }

    /// Movie ticket booking. No stay limit applies.
    pub fn movie(
        movie_id: &str,
        title: &str,
        showtime: &str,
        username: &str,
        amount: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            reference: format!("MOV-{}", now.timestamp_millis()),
            item_title: format!("{} ({})", title, showtime),
            kind: BookingKind::Movie,
            booked_at: now,
            time_limit_hours: None,
            amount,
            penalty: 0,
            is_overdue: false,
            status: BookingStatus::Active,
            qr_data: format!("MOVIE:{}:{}", movie_id, username),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// Base amount before any overdue penalty.
    pub fn base_amount(&self) -> i32 {
        self.amount - self.penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spot::{VehicleType, ZoneCategory};

    #[test]
    fn parking_booking_carries_spot_limit() {
        let now = Utc::now();
        let spot = ParkingSpot::new("014", "M", ZoneCategory::Movie, VehicleType::Compact, now);
        let booking = Booking::parking(&spot, "asha", 50, now);

        assert_eq!(booking.kind, BookingKind::Parking);
        assert_eq!(booking.time_limit_hours, Some(3));
        assert_eq!(booking.qr_data, "PARK:014:asha");
        assert!(booking.reference.starts_with("PKG-"));
        assert!(!booking.is_overdue);
        assert_eq!(booking.penalty, 0);
    }

    #[test]
    fn movie_booking_has_no_limit() {
        let booking = Booking::movie("m3", "Inception", "8:30 PM", "asha", 200, Utc::now());
        assert_eq!(booking.time_limit_hours, None);
        assert_eq!(booking.base_amount(), 200);
        assert_eq!(booking.item_title, "Inception (8:30 PM)");
    }
}
