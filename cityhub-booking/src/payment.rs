use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    AwaitingScan,
    Processing,
    Succeeded,
    Failed,
    Cancelled,
}

/// One payment attempt presented to the customer as a scannable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i32,
    pub note: String,
    pub qr_payload: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment intent not found: {0}")]
    IntentNotFound(String),

    #[error("Payment declined: {0}")]
    Declined(String),
}

/// Payment provider seam. The demo ships the mock UPI gateway; a real
/// processor implements the same two calls.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Register a payment attempt and produce the QR payload to display.
    async fn create_intent(&self, amount: i32, note: &str) -> Result<PaymentIntent, PaymentError>;

    /// Simulate (or await) the customer scanning and approving.
    async fn confirm(&self, intent_id: &str) -> Result<PaymentStatus, PaymentError>;
}

/// Simulated UPI flow: every confirmation succeeds after a short
/// processing delay.
pub struct MockUpiGateway {
    processing_delay: Duration,
}

impl MockUpiGateway {
    pub fn new(processing_delay: Duration) -> Self {
        Self { processing_delay }
    }
}

impl Default for MockUpiGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl PaymentGateway for MockUpiGateway {
    async fn create_intent(&self, amount: i32, note: &str) -> Result<PaymentIntent, PaymentError> {
        let id = format!("upi_{}", Uuid::new_v4().simple());
        Ok(PaymentIntent {
            qr_payload: format!("upi://pay?pa=cityhub@upi&am={}.00&tn={}", amount, note),
            id,
            amount,
            note: note.to_string(),
            status: PaymentStatus::AwaitingScan,
            created_at: Utc::now(),
        })
    }

    async fn confirm(&self, _intent_id: &str) -> Result<PaymentStatus, PaymentError> {
        tokio::time::sleep(self.processing_delay).await;
        Ok(PaymentStatus::Succeeded)
    }
}
