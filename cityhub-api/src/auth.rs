use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use cityhub_domain::auth::{AuthMode, Credentials};
use cityhub_domain::user::{Role, UserProfile};

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    username: String,
    role: Role,
}

#[derive(Debug, Serialize)]
struct ResetResponse {
    message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/reset", post(reset))
}

fn issue_session(state: &AppState, profile: &UserProfile) -> Result<String, AppError> {
    let claims = Claims {
        sub: profile.username.clone(),
        role: profile.role.as_str().to_owned(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

async fn establish_session(
    state: &AppState,
    mode: AuthMode,
    creds: &Credentials,
) -> Result<Json<AuthResponse>, AppError> {
    let profile = state
        .authenticator
        .validate_credentials(mode, creds)
        .await
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token = issue_session(state, &profile)?;

    state
        .lock_profiles()?
        .insert(profile.username.clone(), profile.clone());

    tracing::info!("session issued for {} ({:?})", profile.username, profile.role);

    Ok(Json(AuthResponse {
        token,
        username: profile.username,
        role: profile.role,
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    establish_session(&state, AuthMode::Login, &creds).await
}

/// Registration auto-logs the new account in, same as the portal form.
async fn register(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    establish_session(&state, AuthMode::Register, &creds).await
}

/// Stubbed password reset: validates the form and reports success. There is
/// no credential store to update.
async fn reset(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<Json<ResetResponse>, AppError> {
    state
        .authenticator
        .validate_credentials(AuthMode::Reset, &creds)
        .await
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    Ok(Json(ResetResponse {
        message: "Password reset successfully! Redirecting to login...".to_string(),
    }))
}
