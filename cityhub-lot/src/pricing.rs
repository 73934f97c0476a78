use serde::{Deserialize, Serialize};

use cityhub_domain::spot::VehicleType;

/// Tunable knobs for the dynamic rate. Amounts are whole rupees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateConfig {
    /// Base rate for compact and EV vehicles.
    pub standard_base: i32,

    /// Base rate for SUV and handicap bays.
    pub premium_base: i32,

    /// Flat surcharge added during the evening peak window.
    pub peak_surcharge: i32,

    /// Peak window, inclusive on both ends (hour of day, 0-23).
    pub peak_start_hour: u32,
    pub peak_end_hour: u32,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            standard_base: 50,
            premium_base: 100,
            peak_surcharge: 20,
            peak_start_hour: 17,
            peak_end_hour: 21,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateQuote {
    pub rate: i32,
    pub is_peak: bool,
}

/// Dynamic rate calculator. Pure function of vehicle type and hour of day.
pub struct RateCalculator {
    config: RateConfig,
}

impl RateCalculator {
    pub fn new(config: RateConfig) -> Self {
        Self { config }
    }

    pub fn peak_hours_label(&self) -> String {
        format!(
            "{}:00 - {}:00",
            self.config.peak_start_hour, self.config.peak_end_hour
        )
    }

    pub fn quote(&self, vehicle: VehicleType, hour: u32) -> RateQuote {
        let is_peak = hour >= self.config.peak_start_hour && hour <= self.config.peak_end_hour;

        let mut rate = match vehicle {
            VehicleType::Suv | VehicleType::Handicap => self.config.premium_base,
            VehicleType::Compact | VehicleType::Ev => self.config.standard_base,
        };
        if is_peak {
            rate += self.config.peak_surcharge;
        }

        RateQuote { rate, is_peak }
    }
}

impl Default for RateCalculator {
    fn default() -> Self {
        Self::new(RateConfig::default())
    }
}
