use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use cityhub_booking::{LedgerError, PortalError};

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    /// Map portal transition failures onto HTTP semantics.
    pub fn from_portal(err: PortalError) -> Self {
        match err {
            PortalError::SpotNotFound(_) => AppError::NotFoundError(err.to_string()),
            PortalError::SpotUnavailable(_)
            | PortalError::CheckoutInProgress
            | PortalError::IntentMismatch => AppError::ConflictError(err.to_string()),
            PortalError::NoCheckoutInProgress | PortalError::UnknownShowtime(_) => {
                AppError::ValidationError(err.to_string())
            }
            PortalError::Ledger(inner) => AppError::from_ledger(inner),
        }
    }

    pub fn from_ledger(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            LedgerError::InvalidTransition { .. } => AppError::ConflictError(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
