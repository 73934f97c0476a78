use chrono::{DateTime, Utc};
use rand::Rng;

use cityhub_domain::spot::{ParkingSpot, SpotStatus, VehicleType, ZoneCategory};

/// In-memory spot inventory. Seeded once at startup, mutated by bookings,
/// admin actions and the occupancy simulation.
pub struct SpotRegistry {
    spots: Vec<ParkingSpot>,
}

impl SpotRegistry {
    pub fn new() -> Self {
        Self { spots: Vec::new() }
    }

    /// Standard city lot layout: 20 movie-zone slots (3h limit) in section M,
    /// 40 shopping-zone slots (1h limit) in section S. Vehicle classifiers
    /// follow the painted layout; the SUV share in section S is randomized.
    pub fn seeded<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> Self {
        let mut spots = Vec::with_capacity(60);

        for i in 1..=20u32 {
            let vehicle = if i % 10 == 0 {
                VehicleType::Handicap
            } else {
                VehicleType::Compact
            };
            spots.push(ParkingSpot::new(
                format!("{:03}", i),
                "M",
                ZoneCategory::Movie,
                vehicle,
                now,
            ));
        }

        for i in 1..=40u32 {
            let vehicle = if i % 8 == 0 {
                VehicleType::Ev
            } else if rng.gen_bool(0.3) {
                VehicleType::Suv
            } else {
                VehicleType::Compact
            };
            spots.push(ParkingSpot::new(
                format!("{:03}", i + 20),
                "S",
                ZoneCategory::Shopping,
                vehicle,
                now,
            ));
        }

        Self { spots }
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    pub fn get(&self, id: &str) -> Option<&ParkingSpot> {
        self.spots.iter().find(|s| s.id == id)
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> &mut ParkingSpot {
        &mut self.spots[index]
    }

    /// Transition a spot's status, stamping `last_updated`.
    pub fn set_status(
        &mut self,
        id: &str,
        status: SpotStatus,
        now: DateTime<Utc>,
    ) -> Result<(), RegistryError> {
        let spot = self
            .spots
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        spot.status = status;
        spot.last_updated = now;
        Ok(())
    }

    /// Admin: append `count` shopping-category slots to `section`. Returns
    /// the new ids. Ids continue from the highest numeric id so deletions
    /// never cause a reuse.
    pub fn add_section_slots(
        &mut self,
        section: &str,
        count: usize,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let next = self
            .spots
            .iter()
            .filter_map(|s| s.id.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;

        let mut ids = Vec::with_capacity(count);
        for n in 0..count as u32 {
            let id = format!("{:03}", next + n);
            self.spots.push(ParkingSpot::new(
                id.clone(),
                section,
                ZoneCategory::Shopping,
                VehicleType::Compact,
                now,
            ));
            ids.push(id);
        }
        ids
    }

    /// Admin: remove a slot from the system entirely.
    pub fn remove(&mut self, id: &str) -> Result<ParkingSpot, RegistryError> {
        let index = self
            .spots
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        Ok(self.spots.remove(index))
    }

    pub fn available_count(&self) -> usize {
        self.spots
            .iter()
            .filter(|s| s.status == SpotStatus::Available)
            .count()
    }
}

impl Default for SpotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Spot not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> SpotRegistry {
        let mut rng = StdRng::seed_from_u64(42);
        SpotRegistry::seeded(&mut rng, Utc::now())
    }

    #[test]
    fn seed_layout_matches_lot_plan() {
        let registry = seeded();
        assert_eq!(registry.len(), 60);

        let movie: Vec<_> = registry
            .spots()
            .iter()
            .filter(|s| s.category == ZoneCategory::Movie)
            .collect();
        let shopping: Vec<_> = registry
            .spots()
            .iter()
            .filter(|s| s.category == ZoneCategory::Shopping)
            .collect();

        assert_eq!(movie.len(), 20);
        assert_eq!(shopping.len(), 40);
        assert!(movie.iter().all(|s| s.section == "M" && s.time_limit_hours == 3));
        assert!(shopping.iter().all(|s| s.section == "S" && s.time_limit_hours == 1));

        // Every tenth movie slot is a handicap bay, every eighth shopping
        // slot is an EV bay.
        assert_eq!(registry.get("010").unwrap().vehicle_type, VehicleType::Handicap);
        assert_eq!(registry.get("028").unwrap().vehicle_type, VehicleType::Ev);
    }

    #[test]
    fn category_fixes_time_limit_across_registry() {
        for spot in seeded().spots() {
            match spot.category {
                ZoneCategory::Movie => assert_eq!(spot.time_limit_hours, 3),
                ZoneCategory::Shopping => assert_eq!(spot.time_limit_hours, 1),
            }
        }
    }

    #[test]
    fn set_status_stamps_timestamp() {
        let mut registry = seeded();
        let later = Utc::now() + chrono::Duration::minutes(5);

        registry.set_status("001", SpotStatus::Reserved, later).unwrap();

        let spot = registry.get("001").unwrap();
        assert_eq!(spot.status, SpotStatus::Reserved);
        assert_eq!(spot.last_updated, later);
    }

    #[test]
    fn admin_slots_continue_numbering() {
        let mut registry = seeded();
        let ids = registry.add_section_slots("S", 3, Utc::now());

        assert_eq!(ids, vec!["061", "062", "063"]);
        assert_eq!(registry.len(), 63);
        let added = registry.get("062").unwrap();
        assert_eq!(added.category, ZoneCategory::Shopping);
        assert_eq!(added.time_limit_hours, 1);
    }

    #[test]
    fn remove_unknown_spot_is_an_error() {
        let mut registry = seeded();
        assert!(registry.remove("999").is_err());

        registry.remove("030").unwrap();
        assert_eq!(registry.len(), 59);
        assert!(registry.get("030").is_none());
    }
}
