use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cityhub_api::{app, app_config, movies, worker, AppState, AuthSettings};
use cityhub_assist::{Assistant, GeminiProvider};
use cityhub_booking::{MockUpiGateway, PaymentGateway, Portal};
use cityhub_domain::auth::{Authenticator, StubAuthenticator};
use cityhub_domain::clock::{Clock, SimClock};
use cityhub_domain::notification::Severity;
use cityhub_lot::SpotRegistry;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cityhub_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting CityHub API on port {}", config.server.port);

    let clock = Arc::new(SimClock::system());

    let registry = {
        let mut rng = rand::thread_rng();
        SpotRegistry::seeded(&mut rng, clock.now())
    };
    let portal = Arc::new(Mutex::new(Portal::new(
        registry,
        config.business_rules.portal_config(),
    )));

    let (notifier, _) = tokio::sync::broadcast::channel(100);

    let assistant = Arc::new(Assistant::new(Arc::new(GeminiProvider::new(
        config.assist.api_key.clone(),
        config.assist.model.clone(),
    ))));
    let gateway: Arc<dyn PaymentGateway> = Arc::new(MockUpiGateway::new(Duration::from_millis(
        config.business_rules.payment_processing_ms,
    )));
    let authenticator: Arc<dyn Authenticator> = Arc::new(StubAuthenticator);

    let state = AppState {
        portal,
        clock,
        profiles: Arc::new(Mutex::new(HashMap::new())),
        notifier,
        assistant,
        gateway,
        authenticator,
        movies: Arc::new(movies::seed_catalog()),
        auth: AuthSettings {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
    };

    {
        let mut portal = state.portal.lock().expect("fresh portal lock");
        let banner = portal.notify(
            Severity::Info,
            "Welcome to CityHub AI! System Online.",
            state.clock.now(),
        );
        state.broadcast(banner);
    }

    let workers = worker::spawn_simulation(state.clone(), &config.simulation);

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Simulation timers die with the server.
    for handle in workers {
        handle.abort();
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
