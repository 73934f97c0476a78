use serde::{Deserialize, Serialize};

/// Catalog entry for the movie booking flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub language: String,
    pub rating: f32,
    pub showtimes: Vec<String>,
}

impl Movie {
    pub fn has_showtime(&self, showtime: &str) -> bool {
        self.showtimes.iter().any(|s| s == showtime)
    }
}
