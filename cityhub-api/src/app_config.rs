use serde::Deserialize;
use std::env;

use cityhub_booking::PortalConfig;
use cityhub_lot::RateConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub assist: AssistConfig,
    pub business_rules: BusinessRules,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistConfig {
    pub api_key: String,
    pub model: String,
}

/// Portal economics. Amounts in whole rupees.
#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    pub overdue_penalty: i32,
    pub standard_rate: i32,
    pub premium_rate: i32,
    pub peak_surcharge: i32,
    pub peak_start_hour: u32,
    pub peak_end_hour: u32,
    pub movie_ticket_price: i32,
    pub notification_ttl_seconds: i64,
    #[serde(default = "default_toggle_probability")]
    pub churn_toggle_probability: f64,
    pub payment_processing_ms: u64,
}

fn default_toggle_probability() -> f64 {
    0.3
}

/// Timer cadences for the background simulation.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    pub sweep_interval_seconds: u64,
    pub churn_interval_seconds: u64,
    pub notification_expiry_interval_seconds: u64,
}

impl BusinessRules {
    pub fn portal_config(&self) -> PortalConfig {
        PortalConfig {
            rate: RateConfig {
                standard_base: self.standard_rate,
                premium_base: self.premium_rate,
                peak_surcharge: self.peak_surcharge,
                peak_start_hour: self.peak_start_hour,
                peak_end_hour: self.peak_end_hour,
            },
            overdue_penalty: self.overdue_penalty,
            churn_toggle_probability: self.churn_toggle_probability,
            notification_ttl_seconds: self.notification_ttl_seconds,
            movie_ticket_price: self.movie_ticket_price,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `CITYHUB__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("CITYHUB").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
