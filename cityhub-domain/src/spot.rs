use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Occupancy state of a single parking spot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotStatus {
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Compact,
    Suv,
    Handicap,
    Ev,
}

/// Zone a spot belongs to. The category fixes the stay limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneCategory {
    Movie,
    Shopping,
}

impl ZoneCategory {
    /// Maximum stay in hours for this zone.
    pub fn time_limit_hours(&self) -> i64 {
        match self {
            ZoneCategory::Movie => 3,
            ZoneCategory::Shopping => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: String,
    pub section: String,
    pub category: ZoneCategory,
    pub time_limit_hours: i64,
    pub status: SpotStatus,
    pub vehicle_type: VehicleType,
    pub last_updated: DateTime<Utc>,
}

impl ParkingSpot {
    /// Build a spot. The time limit is derived from the category, never set
    /// independently.
    pub fn new(
        id: impl Into<String>,
        section: impl Into<String>,
        category: ZoneCategory,
        vehicle_type: VehicleType,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            section: section.into(),
            category,
            time_limit_hours: category.time_limit_hours(),
            status: SpotStatus::Available,
            vehicle_type,
            last_updated: now,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == SpotStatus::Available
    }

    /// Display label, e.g. "Spot M-003 (MOVIE)".
    pub fn label(&self) -> String {
        let zone = match self.category {
            ZoneCategory::Movie => "MOVIE",
            ZoneCategory::Shopping => "SHOPPING",
        };
        format!("Spot {}-{} ({})", self.section, self.id, zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_fixes_time_limit() {
        let now = Utc::now();
        let movie = ParkingSpot::new("001", "M", ZoneCategory::Movie, VehicleType::Compact, now);
        let shopping = ParkingSpot::new("021", "S", ZoneCategory::Shopping, VehicleType::Suv, now);

        assert_eq!(movie.time_limit_hours, 3);
        assert_eq!(shopping.time_limit_hours, 1);
    }

    #[test]
    fn spot_starts_available() {
        let spot = ParkingSpot::new("001", "M", ZoneCategory::Movie, VehicleType::Ev, Utc::now());
        assert!(spot.is_available());
        assert_eq!(spot.label(), "Spot M-001 (MOVIE)");
    }
}
