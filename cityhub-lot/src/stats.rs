use serde::{Deserialize, Serialize};

use crate::registry::SpotRegistry;
use cityhub_domain::spot::SpotStatus;

/// Point-in-time lot statistics for the operations dashboard and the
/// manager insights prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotStats {
    pub total_spots: usize,
    pub available_spots: usize,
    pub occupied_spots: usize,
    pub occupancy_rate: f64,
    pub revenue: f64,
    pub peak_hours: String,
}

impl LotStats {
    pub fn compute(registry: &SpotRegistry, peak_hours: impl Into<String>) -> Self {
        let total = registry.len();
        let available = registry
            .spots()
            .iter()
            .filter(|s| s.status == SpotStatus::Available)
            .count();
        let occupied = total - available;

        Self {
            total_spots: total,
            available_spots: available,
            occupied_spots: occupied,
            occupancy_rate: if total > 0 {
                occupied as f64 / total as f64
            } else {
                0.0
            },
            // Rough daily figure: live occupancy on top of the recurring base.
            revenue: occupied as f64 * 5.50 + 1240.0,
            peak_hours: peak_hours.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stats_track_occupancy() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();
        let mut registry = SpotRegistry::seeded(&mut rng, now);

        registry.set_status("001", SpotStatus::Occupied, now).unwrap();
        registry.set_status("002", SpotStatus::Occupied, now).unwrap();

        let stats = LotStats::compute(&registry, "17:00 - 21:00");
        assert_eq!(stats.total_spots, 60);
        assert_eq!(stats.available_spots, 58);
        assert_eq!(stats.occupied_spots, 2);
        assert!((stats.occupancy_rate - 2.0 / 60.0).abs() < 1e-9);
        assert!((stats.revenue - (2.0 * 5.50 + 1240.0)).abs() < 1e-9);
        assert_eq!(stats.peak_hours, "17:00 - 21:00");
    }

    #[test]
    fn empty_registry_has_zero_rate() {
        let stats = LotStats::compute(&SpotRegistry::new(), "17:00 - 21:00");
        assert_eq!(stats.occupancy_rate, 0.0);
        assert_eq!(stats.total_spots, 0);
    }
}
