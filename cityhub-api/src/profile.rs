use axum::{
    extract::{Extension, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use cityhub_domain::user::UserProfile;

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/profile", get(get_profile))
        .route("/v1/profile", put(update_profile))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserProfile>, AppError> {
    let profiles = state.lock_profiles()?;
    profiles
        .get(&claims.sub)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Profile not found: {}", claims.sub)))
}

#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    phone_number: Option<String>,
    vehicle_number: Option<String>,
    vehicle_model: Option<String>,
}

/// Update contact and vehicle details. The phone number also becomes the
/// target of overdue SMS-style warnings.
async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let updated = {
        let mut profiles = state.lock_profiles()?;
        let profile = profiles
            .get_mut(&claims.sub)
            .ok_or_else(|| AppError::NotFoundError(format!("Profile not found: {}", claims.sub)))?;

        if req.phone_number.is_some() {
            profile.phone_number = req.phone_number;
        }
        if req.vehicle_number.is_some() {
            profile.vehicle_number = req.vehicle_number;
        }
        if req.vehicle_model.is_some() {
            profile.vehicle_model = req.vehicle_model;
        }
        profile.clone()
    };

    {
        let mut portal = state.lock_portal()?;
        portal.set_sms_contact(updated.phone_number.clone());
    }

    Ok(Json(updated))
}
