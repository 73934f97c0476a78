use axum::{
    extract::{Extension, Path, State},
    routing::{get, post},
    Json, Router,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use cityhub_booking::PaymentIntent;
use cityhub_domain::movie::Movie;

use crate::error::AppError;
use crate::middleware::auth::Claims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/movies", get(list_movies))
        .route("/v1/movies/{id}/book", post(book_movie))
}

/// Seed catalog. In-memory stand-in for a distributor feed.
pub fn seed_catalog() -> Vec<Movie> {
    let entry = |id: &str, title: &str, language: &str, rating: f32, showtimes: &[&str]| Movie {
        id: id.to_string(),
        title: title.to_string(),
        language: language.to_string(),
        rating,
        showtimes: showtimes.iter().map(|s| s.to_string()).collect(),
    };

    vec![
        entry(
            "t1",
            "Veera Simha",
            "Telugu",
            4.6,
            &["10:00 AM", "1:30 PM", "5:00 PM", "8:30 PM"],
        ),
        entry(
            "t2",
            "Godavari Express",
            "Telugu",
            4.2,
            &["9:00 AM", "12:00 PM", "3:00 PM", "6:00 PM", "9:00 PM"],
        ),
        entry(
            "h1",
            "Dilwale Returns",
            "Hindi",
            4.1,
            &["11:00 AM", "2:30 PM", "6:00 PM", "9:30 PM"],
        ),
        entry(
            "h2",
            "Mumbai Nights",
            "Hindi",
            3.9,
            &["11:30 AM", "3:00 PM", "6:30 PM", "10:00 PM"],
        ),
        entry(
            "e1",
            "Skyfire",
            "English",
            4.4,
            &["10:00 AM", "2:00 PM", "6:00 PM", "10:00 PM"],
        ),
        entry(
            "e2",
            "The Last Signal",
            "English",
            4.0,
            &["11:30 AM", "3:30 PM", "7:30 PM"],
        ),
    ]
}

async fn list_movies(State(state): State<AppState>) -> Json<Vec<Movie>> {
    Json(state.movies.as_ref().clone())
}

#[derive(Debug, Deserialize)]
struct BookMovieRequest {
    showtime: String,
}

#[derive(Debug, Serialize)]
struct MovieCheckoutResponse {
    movie_id: String,
    title: String,
    showtime: String,
    amount: i32,
    /// Simulated virtual queue position; counts down client-side.
    queue_position: u32,
    intent: PaymentIntent,
}

/// Join the virtual queue for a show and open the payment intent. The
/// booking lands in the ledger once /v1/checkout/confirm clears.
async fn book_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<BookMovieRequest>,
) -> Result<Json<MovieCheckoutResponse>, AppError> {
    let movie = state
        .movies
        .iter()
        .find(|m| m.id == movie_id)
        .cloned()
        .ok_or_else(|| AppError::NotFoundError(format!("Movie not found: {}", movie_id)))?;

    let amount = {
        let portal = state.lock_portal()?;
        portal.movie_ticket_price()
    };

    let intent = state
        .gateway
        .create_intent(amount, &format!("Ticket: {}", movie.title))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    {
        let mut portal = state.lock_portal()?;
        portal
            .begin_movie_checkout(&movie, &req.showtime, &claims.sub, &intent.id)
            .map_err(AppError::from_portal)?;
    }

    let queue_position = rand::thread_rng().gen_range(3..8);

    Ok(Json(MovieCheckoutResponse {
        movie_id: movie.id,
        title: movie.title,
        showtime: req.showtime,
        amount,
        queue_position,
        intent,
    }))
}
