pub mod churn;
pub mod pricing;
pub mod registry;
pub mod stats;

pub use churn::{ChurnOutcome, OccupancySim};
pub use pricing::{RateCalculator, RateConfig, RateQuote};
pub use registry::{RegistryError, SpotRegistry};
pub use stats::LotStats;
