use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{delete, get},
    Json, Router,
};
use futures_util::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use cityhub_domain::notification::Notification;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/notifications", get(list_notifications))
        .route("/v1/notifications/stream", get(stream_notifications))
        .route("/v1/notifications/{id}", delete(dismiss_notification))
}

async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let portal = state.lock_portal()?;
    Ok(Json(portal.notifications().to_vec()))
}

/// Dismiss exactly one toast. Other entries keep their order.
async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let dismissed = {
        let mut portal = state.lock_portal()?;
        portal.dismiss_notification(&id)
    };

    if !dismissed {
        return Err(AppError::NotFoundError(format!(
            "Notification not found: {}",
            id
        )));
    }
    Ok(Json(serde_json::json!({ "dismissed": true })))
}

/// Live notification feed. Receivers that lag simply miss messages; there is
/// no replay.
async fn stream_notifications(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.notifier.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(notification) => Event::default()
                .event("notification")
                .json_data(&notification)
                .ok()
                .map(Ok::<_, Infallible>),
            Err(_) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
