use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/assist/driver", post(driver_assist))
        .route("/v1/assist/manager", post(manager_insights))
}

#[derive(Debug, Deserialize)]
struct DriverQuery {
    query: String,
}

#[derive(Debug, Serialize)]
struct AssistReply {
    reply: String,
}

/// Chat turn for the driver assistant. The availability snapshot is taken
/// under the lock; the provider call happens outside it.
async fn driver_assist(
    State(state): State<AppState>,
    Json(req): Json<DriverQuery>,
) -> Result<Json<AssistReply>, AppError> {
    let spots = {
        let portal = state.lock_portal()?;
        portal.registry().spots().to_vec()
    };

    let reply = state.assistant.driver_assistance(&req.query, &spots).await;
    Ok(Json(AssistReply { reply }))
}

#[derive(Debug, Serialize)]
struct InsightsReply {
    insights: String,
}

async fn manager_insights(State(state): State<AppState>) -> Result<Json<InsightsReply>, AppError> {
    let stats = {
        let portal = state.lock_portal()?;
        portal.stats()
    };

    let insights = state.assistant.manager_insights(&stats).await;
    Ok(Json(InsightsReply { insights }))
}
