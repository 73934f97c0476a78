use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use cityhub_booking::invoice;
use cityhub_domain::booking::Booking;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", get(list_bookings))
        .route("/v1/bookings/{id}/invoice", get(download_invoice))
        .route("/v1/bookings/{id}/complete", post(complete_booking))
        .route("/v1/bookings/{id}/cancel", post(cancel_booking))
}

async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    let portal = state.lock_portal()?;
    Ok(Json(portal.ledger().bookings().to_vec()))
}

/// Plain-text receipt served as a save-as download.
async fn download_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booking = {
        let portal = state.lock_portal()?;
        portal
            .ledger()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFoundError(format!("Booking not found: {}", id)))?
    };

    let body = invoice::render_invoice(&booking);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        invoice::invoice_filename(&booking)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

async fn complete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut portal = state.lock_portal()?;
    portal
        .complete_booking(&id)
        .map_err(AppError::from_ledger)?;
    Ok(Json(serde_json::json!({ "status": "COMPLETED" })))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut portal = state.lock_portal()?;
    portal.cancel_booking(&id).map_err(AppError::from_ledger)?;
    Ok(Json(serde_json::json!({ "status": "CANCELLED" })))
}
