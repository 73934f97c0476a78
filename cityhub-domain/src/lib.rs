pub mod auth;
pub mod booking;
pub mod clock;
pub mod movie;
pub mod notification;
pub mod pii;
pub mod spot;
pub mod user;

pub use booking::{Booking, BookingKind, BookingStatus};
pub use clock::{Clock, SimClock, SystemClock};
pub use notification::{Notification, Severity};
pub use spot::{ParkingSpot, SpotStatus, VehicleType, ZoneCategory};
pub use user::{Role, UserProfile};
