use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use cityhub_booking::PaymentStatus;
use cityhub_domain::booking::Booking;
use cityhub_domain::clock::Clock;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/checkout/confirm", post(confirm))
        .route("/v1/checkout/cancel", post(cancel))
}

#[derive(Debug, Deserialize)]
struct ConfirmRequest {
    intent_id: String,
}

#[derive(Debug, Serialize)]
struct ConfirmResponse {
    booking: Booking,
    payment_status: PaymentStatus,
}

/// Run the simulated scan-and-pay, then commit the pending checkout. The
/// gateway call happens outside the portal lock; the intent id ties the two
/// halves together.
async fn confirm(
    State(state): State<AppState>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<ConfirmResponse>, AppError> {
    let status = state
        .gateway
        .confirm(&req.intent_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if status != PaymentStatus::Succeeded {
        return Err(AppError::ConflictError(
            "Payment was not completed".to_string(),
        ));
    }

    let (booking, notification) = {
        let mut portal = state.lock_portal()?;
        portal
            .confirm_checkout(&req.intent_id, state.clock.now())
            .map_err(AppError::from_portal)?
    };
    state.broadcast(notification);

    tracing::info!("booking confirmed: {}", booking.reference);

    Ok(Json(ConfirmResponse {
        booking,
        payment_status: status,
    }))
}

async fn cancel(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let cancelled = {
        let mut portal = state.lock_portal()?;
        portal.cancel_checkout()
    };

    Ok(Json(serde_json::json!({ "cancelled": cancelled })))
}
