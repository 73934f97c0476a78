use axum::{extract::State, routing::post, Json, Router};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use cityhub_domain::clock::Clock;
use cityhub_domain::notification::Severity;

use crate::error::AppError;
use crate::state::AppState;

/// Debug-only controls for fast-forwarding simulation scenarios. These drive
/// the same transitions the timers do, just on demand.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/debug/advance-clock", post(advance_clock))
        .route("/v1/debug/run-sweep", post(run_sweep))
}

#[derive(Debug, Deserialize)]
struct AdvanceClockRequest {
    minutes: Option<i64>,
}

#[derive(Debug, Serialize)]
struct AdvanceClockResponse {
    offset_minutes: i64,
}

/// Fast-forward the simulated clock. Defaults to 65 minutes, enough to trip
/// a one-hour stay limit.
async fn advance_clock(
    State(state): State<AppState>,
    Json(req): Json<AdvanceClockRequest>,
) -> Result<Json<AdvanceClockResponse>, AppError> {
    let minutes = req.minutes.unwrap_or(65);
    state.clock.advance(Duration::minutes(minutes));

    let notification = {
        let mut portal = state.lock_portal()?;
        portal.notify(
            Severity::Info,
            format!("DEBUG: Simulated {} minutes passing...", minutes),
            state.clock.now(),
        )
    };
    state.broadcast(notification);

    Ok(Json(AdvanceClockResponse {
        offset_minutes: state.clock.offset().num_minutes(),
    }))
}

#[derive(Debug, Serialize)]
struct SweepResponse {
    flagged: usize,
}

/// Run one overdue pass immediately instead of waiting for the timer.
async fn run_sweep(State(state): State<AppState>) -> Result<Json<SweepResponse>, AppError> {
    let warnings = {
        let mut portal = state.lock_portal()?;
        portal.sweep_overdue(state.clock.now())
    };

    let flagged = warnings.len();
    for notification in warnings {
        state.broadcast(notification);
    }

    Ok(Json(SweepResponse { flagged }))
}
