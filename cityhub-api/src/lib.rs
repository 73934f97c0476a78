use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod admin;
pub mod app_config;
pub mod assist;
pub mod auth;
pub mod bookings;
pub mod checkout;
pub mod debug;
pub mod error;
pub mod middleware;
pub mod movies;
pub mod notifications;
pub mod profile;
pub mod spots;
pub mod state;
pub mod worker;

pub use state::{AppState, AuthSettings};

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let protected = Router::new()
        .merge(spots::routes())
        .merge(checkout::routes())
        .merge(bookings::routes())
        .merge(movies::routes())
        .merge(notifications::routes())
        .merge(assist::routes())
        .merge(profile::routes())
        .merge(debug::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let admin_routes = admin::routes().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::require_admin,
    ));

    Router::new()
        .merge(auth::routes())
        .merge(protected)
        .merge(admin_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
