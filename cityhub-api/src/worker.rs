use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info};

use cityhub_domain::clock::Clock;
use cityhub_lot::ChurnOutcome;

use crate::app_config::SimulationConfig;
use crate::state::AppState;

/// Start the background simulation timers: the overdue sweep, the occupancy
/// churn and the notification expiry pass. Handles are aborted on shutdown.
pub fn spawn_simulation(state: AppState, config: &SimulationConfig) -> Vec<JoinHandle<()>> {
    info!(
        "starting simulation workers (sweep {}s, churn {}s)",
        config.sweep_interval_seconds, config.churn_interval_seconds
    );

    vec![
        tokio::spawn(sweep_loop(state.clone(), config.sweep_interval_seconds)),
        tokio::spawn(churn_loop(state.clone(), config.churn_interval_seconds)),
        tokio::spawn(expiry_loop(
            state,
            config.notification_expiry_interval_seconds,
        )),
    ]
}

/// Overdue pass on the simulated clock, so the debug fast-forward is
/// honored.
async fn sweep_loop(state: AppState, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        ticker.tick().await;

        let warnings = match state.portal.lock() {
            Ok(mut portal) => portal.sweep_overdue(state.clock.now()),
            Err(_) => {
                error!("portal state poisoned, stopping overdue sweeper");
                return;
            }
        };

        if !warnings.is_empty() {
            info!("overdue sweep flagged {} booking(s)", warnings.len());
        }
        for notification in warnings {
            let _ = state.notifier.send(notification);
        }
    }
}

/// Ambient occupancy churn.
async fn churn_loop(state: AppState, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        ticker.tick().await;

        let outcome = {
            let mut rng = rand::thread_rng();
            match state.portal.lock() {
                Ok(mut portal) => portal.churn_tick(state.clock.now(), &mut rng),
                Err(_) => {
                    error!("portal state poisoned, stopping occupancy churn");
                    return;
                }
            }
        };

        if let ChurnOutcome::Toggled { spot_id, status } = outcome {
            debug!("churn toggled spot {} to {:?}", spot_id, status);
        }
    }
}

/// Drop notifications whose display window lapsed. Everything, stamps and
/// expiry alike, rides the simulated clock so the timeline never tears.
async fn expiry_loop(state: AppState, interval_secs: u64) {
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        ticker.tick().await;

        let removed = match state.portal.lock() {
            Ok(mut portal) => portal.expire_notifications(state.clock.now()),
            Err(_) => {
                error!("portal state poisoned, stopping notification expiry");
                return;
            }
        };

        if removed > 0 {
            debug!("expired {} notification(s)", removed);
        }
    }
}
