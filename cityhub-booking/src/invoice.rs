use cityhub_domain::booking::{Booking, BookingKind, BookingStatus};

/// Render a booking as the plain-text receipt offered for download.
pub fn render_invoice(booking: &Booking) -> String {
    let kind = match booking.kind {
        BookingKind::Parking => "PARKING",
        BookingKind::Movie => "MOVIE",
    };
    let status = match booking.status {
        BookingStatus::Active => "ACTIVE",
        BookingStatus::Completed => "COMPLETED",
        BookingStatus::Cancelled => "CANCELLED",
    };

    let mut lines = vec![
        "CITYHUB AI - INVOICE".to_string(),
        "--------------------".to_string(),
        format!("Invoice ID: {}", booking.reference),
        format!("Date: {}", booking.booked_at.format("%Y-%m-%d %H:%M:%S UTC")),
        String::new(),
        format!("Service: {}", booking.item_title),
        format!("Type: {}", kind),
        String::new(),
        format!("Base Amount: ₹{}.00", booking.base_amount()),
    ];

    if booking.penalty > 0 {
        lines.push(format!("Overdue Penalty: ₹{}.00", booking.penalty));
    }

    lines.push("--------------------".to_string());
    lines.push(format!("TOTAL PAID: ₹{}.00", booking.amount));
    lines.push(String::new());
    lines.push(format!("Status: {}", status));
    if booking.is_overdue {
        lines.push("(Time Limit Exceeded)".to_string());
    }
    lines.push(String::new());
    lines.push("Thank you for using CityHub AI!".to_string());

    lines.join("\n")
}

/// Suggested filename for the save-as dialog.
pub fn invoice_filename(booking: &Booking) -> String {
    format!("Invoice_{}.txt", booking.reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cityhub_domain::spot::{ParkingSpot, VehicleType, ZoneCategory};

    #[test]
    fn clean_booking_has_no_penalty_line() {
        let booking = Booking::movie("m1", "Epic", "6:00 PM", "asha", 200, Utc::now());
        let text = render_invoice(&booking);

        assert!(text.contains("TOTAL PAID: ₹200.00"));
        assert!(text.contains("Type: MOVIE"));
        assert!(!text.contains("Overdue Penalty"));
        assert!(!text.contains("Time Limit Exceeded"));
    }

    #[test]
    fn overdue_booking_itemizes_the_penalty() {
        let now = Utc::now();
        let spot = ParkingSpot::new("021", "S", ZoneCategory::Shopping, VehicleType::Compact, now);
        let mut booking = Booking::parking(&spot, "asha", 50, now);
        booking.is_overdue = true;
        booking.penalty = 100;
        booking.amount += 100;

        let text = render_invoice(&booking);
        assert!(text.contains("Base Amount: ₹50.00"));
        assert!(text.contains("Overdue Penalty: ₹100.00"));
        assert!(text.contains("TOTAL PAID: ₹150.00"));
        assert!(text.contains("(Time Limit Exceeded)"));

        assert_eq!(invoice_filename(&booking), format!("Invoice_{}.txt", booking.reference));
    }
}
