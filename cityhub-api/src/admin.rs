use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use cityhub_domain::clock::Clock;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/spots", post(add_slots))
        .route("/v1/admin/spots/{id}", delete(remove_slot))
}

#[derive(Debug, Deserialize)]
struct AddSlotsRequest {
    section: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct AddSlotsResponse {
    added: Vec<String>,
}

async fn add_slots(
    State(state): State<AppState>,
    Json(req): Json<AddSlotsRequest>,
) -> Result<Json<AddSlotsResponse>, AppError> {
    if req.count == 0 || req.section.trim().is_empty() {
        return Err(AppError::ValidationError(
            "section and a positive count are required".to_string(),
        ));
    }

    let (added, notification) = {
        let mut portal = state.lock_portal()?;
        portal.add_slots(req.section.trim(), req.count, state.clock.now())
    };
    state.broadcast(notification);

    tracing::info!("admin added {} slots to section {}", added.len(), req.section);

    Ok(Json(AddSlotsResponse { added }))
}

async fn remove_slot(
    State(state): State<AppState>,
    Path(spot_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notification = {
        let mut portal = state.lock_portal()?;
        portal
            .remove_slot(&spot_id, state.clock.now())
            .map_err(AppError::from_portal)?
    };
    state.broadcast(notification);

    tracing::info!("admin removed slot {}", spot_id);

    Ok(Json(serde_json::json!({ "removed": spot_id })))
}
