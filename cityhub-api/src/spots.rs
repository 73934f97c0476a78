use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Timelike;
use serde::{Deserialize, Serialize};

use cityhub_booking::{PaymentIntent, SpotQuote};
use cityhub_domain::clock::Clock;
use cityhub_domain::spot::{ParkingSpot, VehicleType};
use cityhub_lot::{LotStats, RateQuote};

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/spots", get(list_spots))
        .route("/v1/spots/stats", get(lot_stats))
        .route("/v1/spots/rate", get(current_rate))
        .route("/v1/spots/{id}/checkout", post(begin_checkout))
}

async fn list_spots(State(state): State<AppState>) -> Result<Json<Vec<ParkingSpot>>, AppError> {
    let portal = state.lock_portal()?;
    Ok(Json(portal.registry().spots().to_vec()))
}

async fn lot_stats(State(state): State<AppState>) -> Result<Json<LotStats>, AppError> {
    let portal = state.lock_portal()?;
    Ok(Json(portal.stats()))
}

#[derive(Debug, Deserialize)]
struct RateQuery {
    vehicle_type: Option<VehicleType>,
}

/// Headline rate for the dashboard. Defaults to the compact tariff.
async fn current_rate(
    State(state): State<AppState>,
    Query(query): Query<RateQuery>,
) -> Result<Json<RateQuote>, AppError> {
    let hour = state.clock.now().hour();
    let vehicle = query.vehicle_type.unwrap_or(VehicleType::Compact);

    let portal = state.lock_portal()?;
    Ok(Json(portal.rate_quote(vehicle, hour)))
}

#[derive(Debug, Serialize)]
struct CheckoutResponse {
    quote: SpotQuote,
    intent: PaymentIntent,
}

/// Start checkout on an available spot: price it, open a payment intent and
/// pin the spot against the churn simulation until payment settles.
async fn begin_checkout(
    State(state): State<AppState>,
    Path(spot_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let hour = state.clock.now().hour();

    let quote = {
        let portal = state.lock_portal()?;
        portal
            .quote_spot(&spot_id, hour)
            .map_err(AppError::from_portal)?
    };

    let intent = state
        .gateway
        .create_intent(quote.rate, &quote.title)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    {
        let mut portal = state.lock_portal()?;
        portal
            .begin_parking_checkout(&spot_id, &claims.sub, quote.rate, &intent.id)
            .map_err(AppError::from_portal)?;
    }

    tracing::info!("checkout started on spot {} by {}", spot_id, claims.sub);

    Ok(Json(CheckoutResponse { quote, intent }))
}
