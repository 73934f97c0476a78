pub mod invoice;
pub mod ledger;
pub mod notify;
pub mod payment;
pub mod portal;
pub mod sweeper;

pub use ledger::{BookingLedger, LedgerError};
pub use notify::NotificationCenter;
pub use payment::{MockUpiGateway, PaymentError, PaymentGateway, PaymentIntent, PaymentStatus};
pub use portal::{Portal, PortalConfig, PortalError, SpotQuote};
pub use sweeper::{OverdueCharge, OverdueSweeper};
