use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use cityhub_domain::booking::Booking;
use cityhub_domain::movie::Movie;
use cityhub_domain::notification::{Notification, Severity};
use cityhub_domain::spot::{SpotStatus, VehicleType};
use cityhub_lot::{
    ChurnOutcome, LotStats, OccupancySim, RateCalculator, RateConfig, RateQuote, SpotRegistry,
};

use crate::ledger::{BookingLedger, LedgerError};
use crate::notify::NotificationCenter;
use crate::sweeper::OverdueSweeper;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub rate: RateConfig,
    pub overdue_penalty: i32,
    pub churn_toggle_probability: f64,
    pub notification_ttl_seconds: i64,
    pub movie_ticket_price: i32,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            rate: RateConfig::default(),
            overdue_penalty: 100,
            churn_toggle_probability: 0.3,
            notification_ttl_seconds: 5,
            movie_ticket_price: 200,
        }
    }
}

/// Quote for a spot a driver is about to book.
#[derive(Debug, Clone, Serialize)]
pub struct SpotQuote {
    pub spot_id: String,
    pub title: String,
    pub details: String,
    pub rate: i32,
    pub is_peak: bool,
}

/// Checkout pinned between "driver picked something" and "payment cleared".
/// At most one exists at a time; the churn simulation must not touch its spot.
#[derive(Debug, Clone)]
pub enum PendingCheckout {
    Parking {
        spot_id: String,
        username: String,
        rate: i32,
        intent_id: String,
    },
    Movie {
        movie_id: String,
        title: String,
        showtime: String,
        username: String,
        amount: i32,
        intent_id: String,
    },
}

impl PendingCheckout {
    fn intent_id(&self) -> &str {
        match self {
            PendingCheckout::Parking { intent_id, .. } => intent_id,
            PendingCheckout::Movie { intent_id, .. } => intent_id,
        }
    }
}

/// The portal's whole mutable world: spot inventory, booking history,
/// notification queue and the in-flight checkout. Every mutation goes
/// through a method here, so callers serialize on one lock and state can
/// never tear.
pub struct Portal {
    registry: SpotRegistry,
    ledger: BookingLedger,
    notifications: NotificationCenter,
    sweeper: OverdueSweeper,
    rates: RateCalculator,
    churn: OccupancySim,
    pending: Option<PendingCheckout>,
    sms_contact: Option<String>,
    movie_ticket_price: i32,
}

impl Portal {
    pub fn new(registry: SpotRegistry, config: PortalConfig) -> Self {
        Self {
            registry,
            ledger: BookingLedger::new(),
            notifications: NotificationCenter::new(Duration::seconds(
                config.notification_ttl_seconds,
            )),
            sweeper: OverdueSweeper::new(config.overdue_penalty),
            rates: RateCalculator::new(config.rate),
            churn: OccupancySim::new(config.churn_toggle_probability),
            pending: None,
            sms_contact: None,
            movie_ticket_price: config.movie_ticket_price,
        }
    }

    // ---- read side ----

    pub fn registry(&self) -> &SpotRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.items()
    }

    pub fn stats(&self) -> LotStats {
        LotStats::compute(&self.registry, self.rates.peak_hours_label())
    }

    pub fn rate_quote(&self, vehicle: VehicleType, hour: u32) -> RateQuote {
        self.rates.quote(vehicle, hour)
    }

    pub fn movie_ticket_price(&self) -> i32 {
        self.movie_ticket_price
    }

    pub fn pending_spot_id(&self) -> Option<&str> {
        match &self.pending {
            Some(PendingCheckout::Parking { spot_id, .. }) => Some(spot_id.as_str()),
            _ => None,
        }
    }

    /// Price and label a spot ahead of checkout. Read-only.
    pub fn quote_spot(&self, spot_id: &str, hour: u32) -> Result<SpotQuote, PortalError> {
        let spot = self
            .registry
            .get(spot_id)
            .ok_or_else(|| PortalError::SpotNotFound(spot_id.to_string()))?;
        if !spot.is_available() {
            return Err(PortalError::SpotUnavailable(spot_id.to_string()));
        }

        let quote = self.rates.quote(spot.vehicle_type, hour);
        let zone = match spot.category {
            cityhub_domain::spot::ZoneCategory::Movie => "Movie Zone",
            cityhub_domain::spot::ZoneCategory::Shopping => "Shopping Zone",
        };
        let plural = if spot.time_limit_hours > 1 { "s" } else { "" };

        Ok(SpotQuote {
            spot_id: spot.id.clone(),
            title: format!("Booking {}-{}", spot.section, spot.id),
            details: format!("{} • Max {} Hour{}", zone, spot.time_limit_hours, plural),
            rate: quote.rate,
            is_peak: quote.is_peak,
        })
    }

    // ---- transitions ----

    /// Pin a spot for checkout once a payment intent exists for it.
    pub fn begin_parking_checkout(
        &mut self,
        spot_id: &str,
        username: &str,
        rate: i32,
        intent_id: &str,
    ) -> Result<(), PortalError> {
        if self.pending.is_some() {
            return Err(PortalError::CheckoutInProgress);
        }
        let spot = self
            .registry
            .get(spot_id)
            .ok_or_else(|| PortalError::SpotNotFound(spot_id.to_string()))?;
        if !spot.is_available() {
            return Err(PortalError::SpotUnavailable(spot_id.to_string()));
        }

        self.pending = Some(PendingCheckout::Parking {
            spot_id: spot_id.to_string(),
            username: username.to_string(),
            rate,
            intent_id: intent_id.to_string(),
        });
        Ok(())
    }

    pub fn begin_movie_checkout(
        &mut self,
        movie: &Movie,
        showtime: &str,
        username: &str,
        intent_id: &str,
    ) -> Result<(), PortalError> {
        if self.pending.is_some() {
            return Err(PortalError::CheckoutInProgress);
        }
        if !movie.has_showtime(showtime) {
            return Err(PortalError::UnknownShowtime(showtime.to_string()));
        }

        self.pending = Some(PendingCheckout::Movie {
            movie_id: movie.id.clone(),
            title: movie.title.clone(),
            showtime: showtime.to_string(),
            username: username.to_string(),
            amount: self.movie_ticket_price,
            intent_id: intent_id.to_string(),
        });
        Ok(())
    }

    /// Drop the in-flight checkout, unpinning its spot.
    pub fn cancel_checkout(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Payment cleared: turn the pending checkout into a booking. The spot
    /// moves to reserved, the booking lands at the head of the ledger, and a
    /// success notification is queued and returned for fan-out.
    pub fn confirm_checkout(
        &mut self,
        intent_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(Booking, Notification), PortalError> {
        match self.pending.take() {
            None => Err(PortalError::NoCheckoutInProgress),
            Some(pending) if pending.intent_id() != intent_id => {
                self.pending = Some(pending);
                Err(PortalError::IntentMismatch)
            }
            Some(PendingCheckout::Parking {
                spot_id,
                username,
                rate,
                ..
            }) => {
                let spot = self
                    .registry
                    .get(&spot_id)
                    .cloned()
                    .ok_or_else(|| PortalError::SpotNotFound(spot_id.clone()))?;

                let booking = Booking::parking(&spot, &username, rate, now);
                self.registry
                    .set_status(&spot_id, SpotStatus::Reserved, now)
                    .map_err(|_| PortalError::SpotNotFound(spot_id.clone()))?;
                self.ledger.record(booking.clone());

                let plural = if spot.time_limit_hours > 1 { "s" } else { "" };
                let notification = self.notifications.push(
                    Severity::Success,
                    format!(
                        "Booking Confirmed. Max Time: {}hr{}.",
                        spot.time_limit_hours, plural
                    ),
                    now,
                );
                Ok((booking, notification))
            }
            Some(PendingCheckout::Movie {
                movie_id,
                title,
                showtime,
                username,
                amount,
                ..
            }) => {
                let booking = Booking::movie(&movie_id, &title, &showtime, &username, amount, now);
                self.ledger.record(booking.clone());
                let notification = self.notifications.push(
                    Severity::Success,
                    format!(
                        "Booking Confirmed for {}! Please check your email for the ticket.",
                        title
                    ),
                    now,
                );
                Ok((booking, notification))
            }
        }
    }

    /// Overdue pass. Returns the warning notifications queued this round so
    /// the caller can fan them out.
    pub fn sweep_overdue(&mut self, now: DateTime<Utc>) -> Vec<Notification> {
        let charges = self.sweeper.sweep(&mut self.ledger, now);
        let target = self
            .sms_contact
            .clone()
            .unwrap_or_else(|| "User".to_string());

        charges
            .into_iter()
            .map(|charge| {
                self.notifications.push(
                    Severity::Warning,
                    format!(
                        "SMS to {}: Time Limit Exceeded for {}. Penalty of ₹{} applied.",
                        target, charge.item_title, charge.penalty
                    ),
                    now,
                )
            })
            .collect()
    }

    /// Ambient occupancy step; skips the checkout-pinned spot.
    pub fn churn_tick<R: Rng>(&mut self, now: DateTime<Utc>, rng: &mut R) -> ChurnOutcome {
        let pinned = match &self.pending {
            Some(PendingCheckout::Parking { spot_id, .. }) => Some(spot_id.clone()),
            _ => None,
        };
        self.churn
            .tick(&mut self.registry, pinned.as_deref(), now, rng)
    }

    pub fn notify(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Notification {
        self.notifications.push(severity, message, now)
    }

    pub fn dismiss_notification(&mut self, id: &Uuid) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn expire_notifications(&mut self, now: DateTime<Utc>) -> usize {
        self.notifications.expire(now)
    }

    pub fn complete_booking(&mut self, id: &Uuid) -> Result<(), LedgerError> {
        self.ledger.complete(id)
    }

    pub fn cancel_booking(&mut self, id: &Uuid) -> Result<(), LedgerError> {
        self.ledger.cancel(id)
    }

    /// Admin: grow a section. Queues and returns a success notification.
    pub fn add_slots(
        &mut self,
        section: &str,
        count: usize,
        now: DateTime<Utc>,
    ) -> (Vec<String>, Notification) {
        let ids = self.registry.add_section_slots(section, count, now);
        let notification = self.notifications.push(
            Severity::Success,
            format!("Added {} new slots to Section {}", count, section),
            now,
        );
        (ids, notification)
    }

    /// Admin: retire a slot entirely. Queues and returns a warning
    /// notification.
    pub fn remove_slot(
        &mut self,
        spot_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Notification, PortalError> {
        self.registry
            .remove(spot_id)
            .map_err(|_| PortalError::SpotNotFound(spot_id.to_string()))?;
        Ok(self.notifications.push(
            Severity::Warning,
            format!("Slot {} removed from system.", spot_id),
            now,
        ))
    }

    /// Where overdue SMS-style warnings are addressed. Updated alongside the
    /// profile's phone number.
    pub fn set_sms_contact(&mut self, contact: Option<String>) {
        self.sms_contact = contact;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Spot not found: {0}")]
    SpotNotFound(String),

    #[error("Spot is not available: {0}")]
    SpotUnavailable(String),

    #[error("Another checkout is already in progress")]
    CheckoutInProgress,

    #[error("No checkout in progress")]
    NoCheckoutInProgress,

    #[error("Payment intent does not match the pending checkout")]
    IntentMismatch,

    #[error("Unknown showtime: {0}")]
    UnknownShowtime(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityhub_domain::booking::BookingKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_portal() -> Portal {
        let mut rng = StdRng::seed_from_u64(42);
        let registry = SpotRegistry::seeded(&mut rng, Utc::now());
        Portal::new(registry, PortalConfig::default())
    }

    #[test]
    fn parking_checkout_reserves_spot_and_records_booking() {
        let mut portal = seeded_portal();
        let now = Utc::now();

        let quote = portal.quote_spot("021", 10).unwrap();
        assert_eq!(quote.details, "Shopping Zone • Max 1 Hour");

        portal
            .begin_parking_checkout("021", "asha", quote.rate, "upi_1")
            .unwrap();
        assert_eq!(portal.pending_spot_id(), Some("021"));

        let (booking, notification) = portal.confirm_checkout("upi_1", now).unwrap();
        assert_eq!(booking.kind, BookingKind::Parking);
        assert_eq!(booking.time_limit_hours, Some(1));
        assert!(notification.message.contains("Max Time: 1hr."));

        assert_eq!(
            portal.registry().get("021").unwrap().status,
            SpotStatus::Reserved
        );
        assert_eq!(portal.ledger().bookings()[0].id, booking.id);
        assert_eq!(portal.pending_spot_id(), None);

        let messages: Vec<_> = portal.notifications().iter().map(|n| &n.message).collect();
        assert!(messages.iter().any(|m| m.contains("Booking Confirmed")));
    }

    #[test]
    fn cannot_start_checkout_on_reserved_spot() {
        let mut portal = seeded_portal();
        let now = Utc::now();

        portal
            .begin_parking_checkout("021", "asha", 50, "upi_1")
            .unwrap();
        portal.confirm_checkout("upi_1", now).unwrap();

        let err = portal.quote_spot("021", 10).unwrap_err();
        assert!(matches!(err, PortalError::SpotUnavailable(_)));
    }

    #[test]
    fn only_one_checkout_at_a_time() {
        let mut portal = seeded_portal();

        portal
            .begin_parking_checkout("021", "asha", 50, "upi_1")
            .unwrap();
        let err = portal
            .begin_parking_checkout("022", "asha", 50, "upi_2")
            .unwrap_err();
        assert!(matches!(err, PortalError::CheckoutInProgress));

        assert!(portal.cancel_checkout());
        portal
            .begin_parking_checkout("022", "asha", 50, "upi_2")
            .unwrap();
    }

    #[test]
    fn confirm_requires_matching_intent() {
        let mut portal = seeded_portal();

        portal
            .begin_parking_checkout("021", "asha", 50, "upi_1")
            .unwrap();
        let err = portal.confirm_checkout("upi_other", Utc::now()).unwrap_err();
        assert!(matches!(err, PortalError::IntentMismatch));

        // The checkout survives a mismatched confirmation attempt.
        assert_eq!(portal.pending_spot_id(), Some("021"));
    }

    #[test]
    fn churn_never_touches_checkout_spot() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut registry = SpotRegistry::new();
        let now = Utc::now();
        let ids = registry.add_section_slots("S", 1, now);

        let mut portal = Portal::new(
            registry,
            PortalConfig {
                churn_toggle_probability: 1.0,
                ..PortalConfig::default()
            },
        );
        portal
            .begin_parking_checkout(&ids[0], "asha", 50, "upi_1")
            .unwrap();

        for _ in 0..50 {
            assert_eq!(portal.churn_tick(now, &mut rng), ChurnOutcome::Skipped);
        }
        assert_eq!(
            portal.registry().get(&ids[0]).unwrap().status,
            SpotStatus::Available
        );
    }

    #[test]
    fn sweep_queues_sms_warning_with_contact() {
        let mut portal = seeded_portal();
        let now = Utc::now();

        portal.set_sms_contact(Some("+91-98-7654-3210".to_string()));
        portal
            .begin_parking_checkout("021", "asha", 50, "upi_1")
            .unwrap();
        portal.confirm_checkout("upi_1", now).unwrap();

        let warnings = portal.sweep_overdue(now + Duration::minutes(65));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("SMS to +91-98-7654-3210"));
        assert!(warnings[0].message.contains("Penalty of ₹100 applied."));

        // Second pass is silent.
        assert!(portal
            .sweep_overdue(now + Duration::minutes(70))
            .is_empty());
    }

    #[test]
    fn movie_checkout_records_ticket() {
        let mut portal = seeded_portal();
        let now = Utc::now();
        let movie = Movie {
            id: "m1".to_string(),
            title: "Skyfire".to_string(),
            language: "English".to_string(),
            rating: 4.2,
            showtimes: vec!["6:00 PM".to_string()],
        };

        let err = portal
            .begin_movie_checkout(&movie, "11:11 PM", "asha", "upi_1")
            .unwrap_err();
        assert!(matches!(err, PortalError::UnknownShowtime(_)));

        portal
            .begin_movie_checkout(&movie, "6:00 PM", "asha", "upi_1")
            .unwrap();
        let (booking, _) = portal.confirm_checkout("upi_1", now).unwrap();

        assert_eq!(booking.kind, BookingKind::Movie);
        assert_eq!(booking.amount, 200);
        assert_eq!(booking.time_limit_hours, None);
    }

    #[test]
    fn admin_actions_queue_notifications() {
        let mut portal = seeded_portal();
        let now = Utc::now();

        let (ids, _) = portal.add_slots("S", 2, now);
        assert_eq!(ids.len(), 2);
        portal.remove_slot(&ids[0], now).unwrap();

        let messages: Vec<_> = portal.notifications().iter().map(|n| &n.message).collect();
        assert!(messages.iter().any(|m| m.contains("Added 2 new slots")));
        assert!(messages.iter().any(|m| m.contains("removed from system")));
    }
}
