use chrono::{DateTime, Utc};
use rand::Rng;

use cityhub_domain::spot::SpotStatus;

use crate::registry::SpotRegistry;

/// Ambient occupancy churn: cars arriving and leaving outside the booking
/// flow. Runs on a timer; each tick considers one random spot.
pub struct OccupancySim {
    toggle_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChurnOutcome {
    Toggled { spot_id: String, status: SpotStatus },
    Skipped,
}

impl OccupancySim {
    pub fn new(toggle_probability: f64) -> Self {
        Self { toggle_probability }
    }

    /// One simulation step. Spots that are reserved, under maintenance, or
    /// pinned by an in-flight checkout are never touched.
    pub fn tick<R: Rng>(
        &self,
        registry: &mut SpotRegistry,
        pinned: Option<&str>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> ChurnOutcome {
        if registry.is_empty() {
            return ChurnOutcome::Skipped;
        }

        let index = rng.gen_range(0..registry.len());
        let spot = registry.at_mut(index);

        if pinned == Some(spot.id.as_str()) {
            return ChurnOutcome::Skipped;
        }
        if matches!(spot.status, SpotStatus::Reserved | SpotStatus::Maintenance) {
            return ChurnOutcome::Skipped;
        }

        if rng.gen_bool(self.toggle_probability) {
            spot.status = match spot.status {
                SpotStatus::Available => SpotStatus::Occupied,
                _ => SpotStatus::Available,
            };
            spot.last_updated = now;
            return ChurnOutcome::Toggled {
                spot_id: spot.id.clone(),
                status: spot.status,
            };
        }

        ChurnOutcome::Skipped
    }
}

impl Default for OccupancySim {
    fn default() -> Self {
        Self::new(0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_spot_registry(status: SpotStatus) -> SpotRegistry {
        let mut registry = SpotRegistry::new();
        let now = Utc::now();
        let ids = registry.add_section_slots("S", 1, now);
        registry.set_status(&ids[0], status, now).unwrap();
        registry
    }

    #[test]
    fn toggles_available_spot_to_occupied_and_back() {
        let sim = OccupancySim::new(1.0);
        let mut registry = single_spot_registry(SpotStatus::Available);
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();

        match sim.tick(&mut registry, None, now, &mut rng) {
            ChurnOutcome::Toggled { status, .. } => assert_eq!(status, SpotStatus::Occupied),
            ChurnOutcome::Skipped => panic!("expected a toggle"),
        }
        match sim.tick(&mut registry, None, now, &mut rng) {
            ChurnOutcome::Toggled { status, .. } => assert_eq!(status, SpotStatus::Available),
            ChurnOutcome::Skipped => panic!("expected a toggle"),
        }
    }

    #[test]
    fn never_touches_reserved_spots() {
        let sim = OccupancySim::new(1.0);
        let mut registry = single_spot_registry(SpotStatus::Reserved);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            assert_eq!(
                sim.tick(&mut registry, None, Utc::now(), &mut rng),
                ChurnOutcome::Skipped
            );
        }
        assert_eq!(registry.spots()[0].status, SpotStatus::Reserved);
    }

    #[test]
    fn never_touches_pinned_spot() {
        let sim = OccupancySim::new(1.0);
        let mut registry = single_spot_registry(SpotStatus::Available);
        let pinned = registry.spots()[0].id.clone();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            assert_eq!(
                sim.tick(&mut registry, Some(pinned.as_str()), Utc::now(), &mut rng),
                ChurnOutcome::Skipped
            );
        }
        assert_eq!(registry.spots()[0].status, SpotStatus::Available);
    }

    #[test]
    fn empty_registry_is_a_no_op() {
        let sim = OccupancySim::default();
        let mut registry = SpotRegistry::new();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            sim.tick(&mut registry, None, Utc::now(), &mut rng),
            ChurnOutcome::Skipped
        );
    }
}
